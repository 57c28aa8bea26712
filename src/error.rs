use std::path::PathBuf;

use memory_catalog::ScanError;
use thiserror::Error;

/// Startup errors for the memory frame server.
#[derive(Debug, Error)]
pub enum Error {
    /// No photo library was configured.
    #[error("no image path configured; set IMAGE_PATH, --image-path or image-path")]
    MissingImagePath,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The scan succeeded but found nothing to show.
    #[error("did not find any images in {}", root.display())]
    EmptyCatalog { root: PathBuf },

    /// Scanning the photo library failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
