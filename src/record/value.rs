//! Field values carried by a remote record.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::GeoLocation;

/// Reference to a binary object stored outside the structured record.
///
/// For outgoing records it points at a staged local file. For fetched
/// records the transport fills in the path once the asset is downloaded;
/// `None` means the asset was not localized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub file_path: Option<PathBuf>,
}

impl AssetRef {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
        }
    }

    pub fn not_localized() -> Self {
        Self { file_path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

/// A single named value in a remote record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    String(String),
    Int64(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
    Location(GeoLocation),
    Asset(AssetRef),
}

impl FieldValue {
    /// Short type name, used in logs and type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Int64(_) => "int64",
            FieldValue::Double(_) => "double",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Location(_) => "location",
            FieldValue::Asset(_) => "asset",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret a numeric indicator as a flag (zero is false).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Int64(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<&GeoLocation> {
        match self {
            FieldValue::Location(loc) => Some(loc),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<&AssetRef> {
        match self {
            FieldValue::Asset(asset) => Some(asset),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Int64(i64::from(b))
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int64(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Double(f)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

impl From<GeoLocation> for FieldValue {
    fn from(loc: GeoLocation) -> Self {
        FieldValue::Location(loc)
    }
}

impl From<AssetRef> for FieldValue {
    fn from(asset: AssetRef) -> Self {
        FieldValue::Asset(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_is_numeric_indicator() {
        assert_eq!(FieldValue::from(true), FieldValue::Int64(1));
        assert_eq!(FieldValue::from(false), FieldValue::Int64(0));
        assert_eq!(FieldValue::Int64(1).as_bool(), Some(true));
        assert_eq!(FieldValue::Int64(0).as_bool(), Some(false));
        assert_eq!(FieldValue::Int64(-3).as_bool(), Some(true));
        assert_eq!(FieldValue::from("true").as_bool(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldValue::from("x").kind(), "string");
        assert_eq!(FieldValue::Double(1.0).kind(), "double");
        assert_eq!(FieldValue::Asset(AssetRef::not_localized()).kind(), "asset");
    }

    #[test]
    fn test_asset_ref() {
        let asset = AssetRef::local("/tmp/a.jpg");
        assert_eq!(asset.path(), Some(Path::new("/tmp/a.jpg")));
        assert_eq!(AssetRef::not_localized().path(), None);
    }
}
