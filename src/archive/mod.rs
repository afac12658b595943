//! Opaque metadata archive.
//!
//! The only place that knows how a report's system metadata blob is laid
//! out. Everything else treats the blob as bytes to store and replay.

pub mod capsule;

pub use capsule::*;
