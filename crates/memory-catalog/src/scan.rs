//! One-shot directory scan that produces the [`Catalog`].

use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::ScanError;

/// Options controlling the catalog scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Recognized extensions, lowercase, without the dot.
    pub extensions: Vec<String>,
    /// Descend into symlinked directories.
    pub follow_links: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string()],
            follow_links: false,
        }
    }
}

impl ScanOptions {
    /// Build options from user supplied extensions such as `".JPG"` or `"png"`.
    #[must_use]
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
            ..Self::default()
        }
    }
}

/// Lowercase and strip a leading dot.
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Return `true` if `path` carries one of `extensions` (case-insensitive).
#[must_use]
pub fn is_recognized(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Walk `root` and index every recognized file under a fresh identifier.
///
/// Only directory metadata is read. An empty result is not an error here;
/// whoever needs at least one entry must check.
///
/// # Errors
/// Returns [`ScanError`] if the root cannot be resolved or the walk fails at
/// any point.
pub fn build(root: &Path, opts: &ScanOptions) -> Result<Catalog, ScanError> {
    let root = std::path::absolute(root).map_err(|source| ScanError::Root {
        root: root.to_path_buf(),
        source,
    })?;
    info!(root = %root.display(), extensions = ?opts.extensions, "starting image scan");

    let mut catalog = Catalog::default();
    for entry in WalkDir::new(&root).follow_links(opts.follow_links) {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.clone(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if !is_recognized(path, &opts.extensions) {
            debug!(path = %path.display(), "skipping unrecognized file");
            continue;
        }
        let id = fresh_id(&catalog);
        debug!(path = %path.display(), %id, "indexed image");
        catalog.push(CatalogEntry::new(entry.into_path(), id));
    }

    info!(root = %root.display(), count = catalog.len(), "built image catalog");
    Ok(catalog)
}

fn fresh_id(catalog: &Catalog) -> String {
    loop {
        let id = Uuid::new_v4().hyphenated().to_string();
        if !catalog.contains_id(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        let exts = vec!["jpg".to_string()];
        assert!(is_recognized(Path::new("/a/b.jpg"), &exts));
        assert!(is_recognized(Path::new("/a/b.JPG"), &exts));
        assert!(is_recognized(Path::new("/a/b.JpG"), &exts));
        assert!(!is_recognized(Path::new("/a/b.jpeg"), &exts));
        assert!(!is_recognized(Path::new("/a/b.png"), &exts));
        assert!(!is_recognized(Path::new("/a/jpg"), &exts));
        assert!(!is_recognized(Path::new("/a/.jpg"), &exts));
    }

    #[test]
    fn extensions_are_normalized() {
        let opts = ScanOptions::with_extensions([".JPG", "png", " ", "."]);
        assert_eq!(opts.extensions, vec!["jpg".to_string(), "png".to_string()]);
        assert!(!opts.follow_links);
    }

    #[test]
    fn default_recognizes_jpg_only() {
        assert_eq!(ScanOptions::default().extensions, vec!["jpg".to_string()]);
    }
}
