pub mod cve_links;
mod release_codename;

pub use release_codename::{ReleaseCodenamePolicy, RELEASE_PACKAGE};
