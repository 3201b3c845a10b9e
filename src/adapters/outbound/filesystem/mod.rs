/// Filesystem adapters for file I/O operations
mod file_writer;
mod manifest_writer;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use manifest_writer::{ManifestDirectoryWriter, MANIFEST_EXTENSION};
