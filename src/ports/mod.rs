//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the core and an external
//! system (time, files, tables, preferences, backup upload).
//! Implementations live in `src/adapters/` and `src/store/`.

pub mod clock;
pub mod filesystem;
pub mod preferences;
pub mod task_store;
pub mod transport;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use preferences::KeyValueStore;
pub use task_store::{StoreFuture, TaskStore};
pub use transport::{BackupTransport, UploadFuture, UploadedFile};
