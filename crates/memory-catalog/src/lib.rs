//! Image catalog for the memory frame.
//!
//! [`scan::build`] indexes a directory once at startup. The resulting
//! [`Catalog`] is immutable and can be shared across threads without locking;
//! [`rotation::current_index`] picks the shared "current" entry from the clock
//! and [`Catalog::resolve`] maps opaque ids back to files.

pub mod catalog;
pub mod error;
pub mod rotation;
pub mod scan;

pub use catalog::{Catalog, CatalogEntry, ID_LEN};
pub use error::ScanError;
pub use rotation::{DEFAULT_PERIOD_SECS, current_index};
pub use scan::{ScanOptions, build};
