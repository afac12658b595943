//! Versioned capsule format for [`SystemFields`].
//!
//! Layout (big-endian):
//!
//! ```text
//! 0   magic     4   "HRSF"
//! 4   version   1
//! 5   length    4   payload length (u32)
//! 9   digest   32   SHA-256 of payload
//! 41  payload   n   JSON of SystemFields
//! ```
//!
//! Archiving is deterministic: re-archiving a restored capsule yields the
//! same bytes.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::model::SystemMetadata;
use crate::record::SystemFields;

pub const CAPSULE_MAGIC: [u8; 4] = *b"HRSF";
pub const CAPSULE_VERSION: u8 = 1;

const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = 4 + 1 + 4 + DIGEST_LEN;

/// Capsule encode/decode failures.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("capsule truncated: {len} bytes, header needs {needed}")]
    Truncated { len: usize, needed: usize },

    #[error("capsule magic mismatch")]
    BadMagic,

    #[error("unsupported capsule version {0}")]
    UnsupportedVersion(u8),

    #[error("capsule payload length mismatch: declared {declared}, actual {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("capsule digest mismatch")]
    DigestMismatch,

    #[error("capsule payload is not in canonical form")]
    NonCanonical,

    #[error("capsule payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("could not encode system fields: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("could not decode system fields: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Archive an envelope into capsule bytes.
pub fn archive_system_fields(fields: &SystemFields) -> Result<Vec<u8>, ArchiveError> {
    let payload = serde_json::to_vec(fields).map_err(ArchiveError::Encode)?;
    let len = u32::try_from(payload.len())
        .map_err(|_| ArchiveError::PayloadTooLarge(payload.len()))?;
    let digest = Sha256::digest(&payload);

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&CAPSULE_MAGIC);
    out.push(CAPSULE_VERSION);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&digest);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Restore an envelope from capsule bytes, verifying header, digest and
/// canonical payload form.
pub fn unarchive_system_fields(bytes: &[u8]) -> Result<SystemFields, ArchiveError> {
    if bytes.len() < HEADER_LEN {
        return Err(ArchiveError::Truncated {
            len: bytes.len(),
            needed: HEADER_LEN,
        });
    }
    if bytes[..4] != CAPSULE_MAGIC {
        return Err(ArchiveError::BadMagic);
    }
    if bytes[4] != CAPSULE_VERSION {
        return Err(ArchiveError::UnsupportedVersion(bytes[4]));
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&bytes[5..9]);
    let declared = u32::from_be_bytes(len_bytes) as usize;
    let payload = &bytes[HEADER_LEN..];
    if declared != payload.len() {
        return Err(ArchiveError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    if Sha256::digest(payload).as_slice() != &bytes[9..HEADER_LEN] {
        return Err(ArchiveError::DigestMismatch);
    }

    let fields: SystemFields = serde_json::from_slice(payload).map_err(ArchiveError::Decode)?;

    // Payload must be exactly what `archive_system_fields` writes.
    let canonical = serde_json::to_vec(&fields).map_err(ArchiveError::Encode)?;
    if canonical != payload {
        return Err(ArchiveError::NonCanonical);
    }

    Ok(fields)
}

/// Capture an envelope as the opaque blob stored on a report.
pub fn capture(fields: &SystemFields) -> Result<SystemMetadata, ArchiveError> {
    archive_system_fields(fields).map(SystemMetadata::from_bytes)
}

/// Restore the envelope carried by a report's blob.
pub fn restore(metadata: &SystemMetadata) -> Result<SystemFields, ArchiveError> {
    unarchive_system_fields(metadata.as_bytes())
}

/// Short hex fingerprint of a capsule, for log lines.
pub fn fingerprint(metadata: &SystemMetadata) -> String {
    let digest = Sha256::digest(metadata.as_bytes());
    hex::encode(&digest[..6])
}
