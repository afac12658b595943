//! Detached asset staging.
//!
//! Photos never travel inline in a record. This module encodes them,
//! writes them to scratch storage and reads them back by reference.

pub mod sources;
pub mod stager;

pub use sources::*;
pub use stager::*;
