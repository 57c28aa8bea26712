//! The immutable image index and identifier lookups.

use std::collections::HashMap;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::{Path, PathBuf};

use crate::rotation;

/// Length of a canonical hyphenated UUID string.
pub const ID_LEN: usize = 36;

/// One discovered image: where it lives and the opaque id clients use for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    path: PathBuf,
    id: String,
}

impl CatalogEntry {
    pub(crate) fn new(path: PathBuf, id: String) -> Self {
        Self { path, id }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered entries plus an id index. Built once by [`crate::scan::build`];
/// there is no way to mutate it afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Whether `id` is already taken. Only the builder needs this.
    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Append a new entry. Callers guarantee the id is fresh.
    pub(crate) fn push(&mut self, entry: CatalogEntry) {
        debug_assert!(!self.contains_id(entry.id()));
        self.by_id.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in scan order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up an entry by its exact identifier.
    ///
    /// Anything that is not exactly [`ID_LEN`] bytes long is rejected without
    /// touching the index. No case folding or partial matching is done.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<&CatalogEntry> {
        if id.len() != ID_LEN {
            return None;
        }
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// The entry shown during the rotation window containing `now_unix_seconds`.
    /// `None` only for an empty catalog.
    #[must_use]
    pub fn current(
        &self,
        now_unix_seconds: i64,
        period_seconds: NonZeroU64,
    ) -> Option<&CatalogEntry> {
        let size = NonZeroUsize::new(self.entries.len())?;
        let idx = rotation::current_index(size, now_unix_seconds, period_seconds);
        self.entries.get(idx)
    }
}
