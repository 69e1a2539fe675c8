//! Recorded clock readings and upload results for deterministic sessions.
//!
//! A cassette is a YAML list of entries tagged by [`Channel`]. Replaying
//! adapters drain each channel in recorded order.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Channel, Entry};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
