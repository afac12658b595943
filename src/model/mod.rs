//! Domain model.
//!
//! The hazard report as the app holds it: scalar fields, an optional photo
//! and the opaque blob of remote bookkeeping.

pub mod location;
pub mod photo;
pub mod report;

pub use location::*;
pub use photo::*;
pub use report::*;
