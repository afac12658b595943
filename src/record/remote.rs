//! Generic key-value record exchanged with the remote store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::envelope::{RecordId, SystemFields};
use super::value::FieldValue;

/// A structured record as the remote store sees it.
///
/// A record without [`SystemFields`] has never been stored; submitting it
/// creates a new remote entity. A record carrying system fields targets the
/// existing entity they identify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    record_type: String,
    system_fields: Option<SystemFields>,
    fields: BTreeMap<String, FieldValue>,
}

impl RemoteRecord {
    /// New identity-less record of the given type.
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            system_fields: None,
            fields: BTreeMap::new(),
        }
    }

    /// Record rebuilt on an existing envelope, with no fields set yet.
    pub fn from_system_fields(system_fields: SystemFields) -> Self {
        Self {
            record_type: system_fields.record_type.clone(),
            system_fields: Some(system_fields),
            fields: BTreeMap::new(),
        }
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        self.system_fields.as_ref().map(|sf| &sf.record_id)
    }

    pub fn record_name(&self) -> Option<&str> {
        self.record_id().map(|id| id.record_name.as_str())
    }

    pub fn system_fields(&self) -> Option<&SystemFields> {
        self.system_fields.as_ref()
    }

    /// Replace the envelope. Only a store (or a transport speaking for one)
    /// should call this.
    pub fn assign_system_fields(&mut self, system_fields: SystemFields) {
        self.record_type = system_fields.record_type.clone();
        self.system_fields = Some(system_fields);
    }

    /// True if submitting this record would create a new remote entity.
    pub fn is_new(&self) -> bool {
        self.system_fields.is_none()
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.system_fields.as_ref().and_then(|sf| sf.created_at)
    }

    pub fn modification_date(&self) -> Option<DateTime<Utc>> {
        self.system_fields.as_ref().and_then(|sf| sf.modified_at)
    }

    pub fn change_tag(&self) -> Option<&str> {
        self.system_fields
            .as_ref()
            .and_then(|sf| sf.change_tag.as_deref())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::envelope::RecordId;

    fn envelope(name: &str) -> SystemFields {
        SystemFields {
            record_id: RecordId::new(name),
            record_type: "HazardReport".to_string(),
            change_tag: Some("a1".to_string()),
            created_at: None,
            created_by: None,
            modified_at: None,
            modified_by: None,
        }
    }

    #[test]
    fn test_new_record_has_no_identity() {
        let record = RemoteRecord::new("HazardReport");
        assert!(record.is_new());
        assert!(record.record_id().is_none());
        assert!(record.creation_date().is_none());
        assert_eq!(record.record_type(), "HazardReport");
    }

    #[test]
    fn test_record_on_envelope() {
        let record = RemoteRecord::from_system_fields(envelope("X"));
        assert!(!record.is_new());
        assert_eq!(record.record_name(), Some("X"));
        assert_eq!(record.change_tag(), Some("a1"));
        assert!(record.is_empty());
    }

    #[test]
    fn test_field_access() {
        let mut record = RemoteRecord::new("HazardReport");
        record.set("hazardDescription", "Ice");
        record.set("isEmergency", true);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("hazardDescription"), Some(&FieldValue::from("Ice")));
        assert!(record.contains("isEmergency"));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["hazardDescription", "isEmergency"]);
        assert_eq!(record.remove("isEmergency"), Some(FieldValue::Int64(1)));
        assert!(!record.contains("isEmergency"));
    }
}
