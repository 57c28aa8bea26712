use std::path::PathBuf;

use thiserror::Error;

/// Failure while building a catalog. The build is aborted; no partial catalog
/// is ever returned.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root could not be resolved to an absolute path.
    #[error("cannot resolve image root {}: {source}", root.display())]
    Root {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walk failed (missing root, permission denied, I/O).
    #[error("error listing images under {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
