pub mod config;
pub mod error;
pub mod web;

use memory_catalog::Catalog;
use tracing::info;

use crate::config::Config;
use crate::error::Error;

/// Scan the configured library and refuse to continue without any photos.
///
/// # Errors
/// [`Error::MissingImagePath`] without a library, [`Error::Scan`] if the walk
/// fails and [`Error::EmptyCatalog`] if nothing matched.
pub fn build_catalog(cfg: &Config) -> Result<Catalog, Error> {
    let root = cfg.image_path.as_deref().ok_or(Error::MissingImagePath)?;
    let catalog = memory_catalog::build(root, &cfg.scan_options())?;
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog {
            root: root.to_path_buf(),
        });
    }
    info!(count = catalog.len(), root = %root.display(), "catalog ready");
    Ok(catalog)
}
