//! Record codec.
//!
//! Converts between the local [`crate::model::HazardReport`] and the remote
//! store's [`crate::record::RemoteRecord`]:
//! - scalar fields inline
//! - photo as a detached asset reference
//! - server envelope carried in the opaque metadata blob

pub mod keys;
pub mod record_codec;

pub use record_codec::*;
