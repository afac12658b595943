//! Round-trip orchestration.
//!
//! Glues the codec to a transport for the two flows the app needs:
//! - submit a report and adopt the store's copy
//! - fetch a report by identity

pub mod round_trip;

pub use round_trip::*;
