//! Bundled reference backends.
//!
//! Production on-disk formats live behind the [`rundb_core::backend::Backend`]
//! trait elsewhere; these two exist as the contract's reference
//! implementation and as the probe target for [`crate::open`].

mod mem;
pub(crate) mod snapshot;

pub use mem::{MemBackend, MemBackendError};
pub use snapshot::{SnapshotWriteError, write_snapshot};
