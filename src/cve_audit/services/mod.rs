mod manifest_parser;
mod scan_pipeline;

pub use manifest_parser::ManifestParser;
pub use scan_pipeline::ScanPipeline;
