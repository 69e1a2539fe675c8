//! In-memory adapters for tests and replay.

mod clock;
mod filesystem;

pub use clock::FixedClock;
pub use filesystem::MemoryFileSystem;
