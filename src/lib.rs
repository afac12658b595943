//! Hazard Report Core - remote record codec for hazard reports
//!
//! This crate converts a locally held hazard report to and from the record
//! format of a remote structured-storage service. The implementation
//! prioritizes:
//!
//! 1. **Identity preservation** - the server's envelope survives every edit
//!    cycle byte-for-byte, so updates never turn into duplicate inserts
//! 2. **Strictness** - required fields are never defaulted
//! 3. **Tolerance** - a photo that cannot be moved never blocks the report
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `codec` - RecordCodec, report ⇄ remote record conversion
//! - `staging` - AssetStager, photo encode/stage/resolve/decode
//! - `archive` - versioned capsule format for the opaque metadata blob
//! - `model` - the domain entity and its value types
//! - `record` - the remote record representation
//! - `transport` - Submit/Fetch boundary and an in-memory store
//! - `pipeline` - submit/fetch round trips
//! - `config` - photo quality and staging directory
//! - `logging` - structured logging with record context
//!
//! ## Example
//!
//! ```
//! use hazard_report_core::{
//!     codec::RecordCodec, model::{GeoLocation, HazardReport},
//!     pipeline::submit_report, transport::InMemoryRecordStore,
//! };
//!
//! let codec = RecordCodec::default();
//! let store = InMemoryRecordStore::new();
//! let report = HazardReport::new(
//!     "Fallen tree",
//!     Some(GeoLocation::new(37.0, -122.0).unwrap()),
//!     None,
//!     true,
//!     false,
//! );
//!
//! let synced = submit_report(&codec, &store, &report).unwrap().into_value();
//! assert!(synced.is_synced());
//!
//! // Edits carry the captured envelope, so this is an update.
//! let record = codec.encode_for_submission(&synced).unwrap().value;
//! assert!(!record.is_new());
//! ```

pub mod archive;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod staging;
pub mod transport;

pub use codec::{Converted, RecordCodec};
pub use config::{CodecConfig, PhotoQuality};
pub use error::{CodecError, PhotoError};
pub use model::{GeoLocation, HazardPhoto, HazardReport, SystemMetadata};
pub use record::{AssetRef, FieldValue, RecordId, RemoteRecord};
pub use staging::AssetStager;
pub use transport::{InMemoryRecordStore, RecordTransport, TransportError};

/// Initialize the crate-wide logger.
///
/// Info level by default, overridable through `RUST_LOG`. Safe to call more
/// than once; only the first call installs the logger.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
