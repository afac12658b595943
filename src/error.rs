//! Error types for the hazard report codec.
//!
//! [`CodecError`] is fatal for the record being converted. [`PhotoError`]
//! never aborts a conversion; it is handed back next to the converted value
//! (see [`crate::codec::Converted`]).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::transport::TransportError;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Failures that prevent a record from being converted.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Required field absent from a remote record
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },

    /// Field present with an unexpected value type
    #[error("field `{field}` has wrong type: expected {expected}, found {found}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Remote record carries no envelope, so later edits could not target it
    #[error("remote record has no system fields to archive")]
    MissingSystemFields,

    /// Envelope could not be archived or restored
    #[error("metadata archive error: {0}")]
    MetadataArchive(#[from] ArchiveError),

    /// Pass-through from the remote transport
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CodecError {
    /// True for the missing-or-mistyped required field family.
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            CodecError::MissingField { .. } | CodecError::FieldType { .. }
        )
    }

    /// True when the opaque envelope could not be captured or replayed.
    pub fn is_metadata_error(&self) -> bool {
        matches!(
            self,
            CodecError::MissingSystemFields | CodecError::MetadataArchive(_)
        )
    }
}

/// Recoverable failures moving a photo in or out of a record.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// Staged file could not be written
    #[error("could not write staged photo to {}: {source}", .path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Image could not be compressed
    #[error("could not encode photo: {0}")]
    Encode(#[source] image::ImageError),

    /// Asset reference has no local file behind it
    #[error("photo asset was not downloaded to a local file")]
    NotLocalized,

    /// Local asset file could not be read
    #[error("could not read photo asset at {}: {source}", .path.display())]
    AssetUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Asset bytes are not a valid image encoding
    #[error("could not decode photo: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// Photo field holds something other than an asset reference
    #[error("photo field holds a {found} value, not an asset")]
    NotAnAsset { found: &'static str },
}

impl PhotoError {
    /// True for failures on the outgoing (staging) side.
    pub fn is_staging(&self) -> bool {
        matches!(self, PhotoError::Staging { .. } | PhotoError::Encode(_))
    }
}
