//! Adapter implementations for the port traits.

pub mod live;
pub mod memory;
pub mod replaying;
