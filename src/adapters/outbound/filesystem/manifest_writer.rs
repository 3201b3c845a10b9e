use crate::shared::error::AuditError;
use crate::shared::security::{validate_not_symlink, validate_output_directory};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of per-machine manifest dumps
pub const MANIFEST_EXTENSION: &str = "manifest";

/// ManifestDirectoryWriter writes one `<slug>.manifest` file per machine
pub struct ManifestDirectoryWriter {
    directory: PathBuf,
}

impl ManifestDirectoryWriter {
    /// Fails unless `directory` is an existing directory (not a symlink)
    pub fn new(directory: PathBuf) -> Result<Self> {
        validate_output_directory(&directory)?;
        Ok(Self { directory })
    }

    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", slug, MANIFEST_EXTENSION))
    }

    /// Writes `manifest` for the machine identified by `slug`
    pub fn write(&self, slug: &str, manifest: &str) -> Result<PathBuf> {
        let path = self.path_for(slug);
        if path.exists() {
            validate_not_symlink(&path, "write")?;
        }

        fs::write(&path, manifest).map_err(|e| AuditError::FileWrite {
            path: path.clone(),
            details: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), "wrote manifest");
        Ok(path)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
