//! Typed field extraction from remote records.
//!
//! Required accessors fail instead of defaulting; optional accessors treat
//! absence as valid but still reject a value of the wrong type.

use crate::error::CodecError;
use crate::model::GeoLocation;

use super::remote::RemoteRecord;
use super::value::FieldValue;

pub fn require_string(record: &RemoteRecord, field: &'static str) -> Result<String, CodecError> {
    let value = require(record, field)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(field, "string", value))
}

pub fn require_bool(record: &RemoteRecord, field: &'static str) -> Result<bool, CodecError> {
    let value = require(record, field)?;
    value.as_bool().ok_or_else(|| mismatch(field, "int64", value))
}

pub fn optional_location(
    record: &RemoteRecord,
    field: &'static str,
) -> Result<Option<GeoLocation>, CodecError> {
    match record.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_location()
            .copied()
            .map(Some)
            .ok_or_else(|| mismatch(field, "location", value)),
    }
}

fn require<'a>(record: &'a RemoteRecord, field: &'static str) -> Result<&'a FieldValue, CodecError> {
    record
        .get(field)
        .ok_or(CodecError::MissingField { field })
}

fn mismatch(field: &'static str, expected: &'static str, found: &FieldValue) -> CodecError {
    CodecError::FieldType {
        field,
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RemoteRecord {
        let mut record = RemoteRecord::new("HazardReport");
        record.set("name", "Downed line");
        record.set("flag", true);
        record.set("where", GeoLocation::new(10.0, 20.0).unwrap());
        record
    }

    #[test]
    fn test_require_string() {
        assert_eq!(require_string(&record(), "name").unwrap(), "Downed line");
        assert!(matches!(
            require_string(&record(), "absent"),
            Err(CodecError::MissingField { field: "absent" })
        ));
        assert!(matches!(
            require_string(&record(), "flag"),
            Err(CodecError::FieldType { found: "int64", .. })
        ));
    }

    #[test]
    fn test_require_bool() {
        assert!(require_bool(&record(), "flag").unwrap());
        assert!(matches!(
            require_bool(&record(), "name"),
            Err(CodecError::FieldType {
                expected: "int64",
                found: "string",
                ..
            })
        ));
    }

    #[test]
    fn test_optional_location() {
        let loc = optional_location(&record(), "where").unwrap().unwrap();
        assert_eq!(loc.latitude(), 10.0);
        assert_eq!(optional_location(&record(), "absent").unwrap(), None);
        assert!(optional_location(&record(), "name").is_err());
    }
}
