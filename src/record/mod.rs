//! Remote record representation.
//!
//! The structured record the remote store exchanges: named scalar fields,
//! detached asset references and the server-managed envelope.

pub mod envelope;
pub mod fields;
pub mod remote;
pub mod value;

pub use envelope::*;
pub use remote::*;
pub use value::*;
