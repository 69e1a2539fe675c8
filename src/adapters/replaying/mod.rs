//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod transport;

pub use clock::ReplayingClock;
pub use transport::ReplayingTransport;
