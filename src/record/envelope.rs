//! Server-managed identity and versioning envelope.
//!
//! The remote store owns every value in here. The client carries the
//! envelope forward between edits via [`crate::archive`] and never edits it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Zone used when the store does not specify one.
pub const DEFAULT_ZONE_NAME: &str = "_defaultZone";

/// Owner of records in the user's own database.
pub const DEFAULT_OWNER_NAME: &str = "__defaultOwner__";

/// Record zone within the remote database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneId {
    pub zone_name: String,
    pub owner_name: String,
}

impl Default for ZoneId {
    fn default() -> Self {
        Self {
            zone_name: DEFAULT_ZONE_NAME.to_string(),
            owner_name: DEFAULT_OWNER_NAME.to_string(),
        }
    }
}

/// Remote identity of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordId {
    pub record_name: String,
    pub zone: ZoneId,
}

impl RecordId {
    pub fn new(record_name: impl Into<String>) -> Self {
        Self {
            record_name: record_name.into(),
            zone: ZoneId::default(),
        }
    }

    pub fn in_zone(record_name: impl Into<String>, zone: ZoneId) -> Self {
        Self {
            record_name: record_name.into(),
            zone,
        }
    }
}

/// Bookkeeping the store attaches to every saved record.
///
/// Field order is part of the capsule format; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemFields {
    pub record_id: RecordId,
    pub record_type: String,
    pub change_tag: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}
