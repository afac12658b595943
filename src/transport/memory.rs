//! In-memory record store.
//!
//! Behaves like the remote store as far as the codec can observe: assigns
//! identity, change tags and timestamps on insert, rejects updates with a
//! stale change tag, and refreshes the tag and modification date on every
//! accepted write. Useful for tests and for running the app without a
//! network.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::record::{RecordId, RemoteRecord, SystemFields, ZoneId, DEFAULT_OWNER_NAME};

use super::{RecordTransport, TransportError};

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<RecordId, RemoteRecord>>,
    zone: ZoneId,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(zone: ZoneId) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            zone,
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Current stored copy, if any.
    pub fn get(&self, id: &RecordId) -> Option<RemoteRecord> {
        self.records.lock().get(id).cloned()
    }

    fn insert(&self, mut record: RemoteRecord) -> RemoteRecord {
        let now = Utc::now();
        let id = RecordId::in_zone(
            Uuid::new_v4().hyphenated().to_string().to_uppercase(),
            self.zone.clone(),
        );
        record.assign_system_fields(SystemFields {
            record_id: id.clone(),
            record_type: record.record_type().to_string(),
            change_tag: Some(new_change_tag(None)),
            created_at: Some(now),
            created_by: Some(DEFAULT_OWNER_NAME.to_string()),
            modified_at: Some(now),
            modified_by: Some(DEFAULT_OWNER_NAME.to_string()),
        });

        log::info!(
            "STORE_INSERT record={} type={} fields={}",
            id.record_name,
            record.record_type(),
            record.len()
        );

        self.records.lock().insert(id, record.clone());
        record
    }

    fn update(
        &self,
        mut record: RemoteRecord,
        incoming: SystemFields,
    ) -> Result<RemoteRecord, TransportError> {
        let mut records = self.records.lock();

        let stored = match records.get(&incoming.record_id) {
            Some(stored) => stored,
            None => {
                log::warn!(
                    "STORE_UPDATE_REJECTED record={} reason=unknown_record",
                    incoming.record_id.record_name
                );
                return Err(TransportError::msg(format!(
                    "unknown record {}",
                    incoming.record_id.record_name
                )));
            }
        };

        let current = stored.system_fields().cloned().ok_or_else(|| {
            TransportError::msg(format!(
                "stored record {} has no system fields",
                incoming.record_id.record_name
            ))
        })?;

        if current.change_tag != incoming.change_tag {
            log::warn!(
                "STORE_UPDATE_REJECTED record={} reason=stale_change_tag stored={:?} incoming={:?}",
                incoming.record_id.record_name,
                current.change_tag,
                incoming.change_tag
            );
            return Err(TransportError::msg(format!(
                "server record changed: {} is at change tag {:?}, update carried {:?}",
                incoming.record_id.record_name, current.change_tag, incoming.change_tag
            )));
        }

        let change_tag = new_change_tag(current.change_tag.as_deref());
        record.assign_system_fields(SystemFields {
            change_tag: Some(change_tag),
            modified_at: Some(Utc::now()),
            modified_by: Some(DEFAULT_OWNER_NAME.to_string()),
            ..current
        });

        log::info!(
            "STORE_UPDATE record={} change_tag={:?}",
            incoming.record_id.record_name,
            record.change_tag()
        );

        records.insert(incoming.record_id, record.clone());
        Ok(record)
    }
}

impl RecordTransport for InMemoryRecordStore {
    fn submit(&self, record: RemoteRecord) -> Result<RemoteRecord, TransportError> {
        match record.system_fields().cloned() {
            None => Ok(self.insert(record)),
            Some(incoming) => self.update(record, incoming),
        }
    }

    fn fetch(&self, id: &RecordId) -> Result<RemoteRecord, TransportError> {
        self.get(id)
            .ok_or_else(|| TransportError::msg(format!("unknown record {}", id.record_name)))
    }
}

/// Short random tag, guaranteed to differ from `previous`.
fn new_change_tag(previous: Option<&str>) -> String {
    loop {
        let tag = hex::encode(&Uuid::new_v4().as_bytes()[..4]);
        if previous != Some(tag.as_str()) {
            return tag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RemoteRecord {
        let mut record = RemoteRecord::new("HazardReport");
        record.set("hazardDescription", "Broken glass");
        record
    }

    #[test]
    fn test_insert_assigns_identity() {
        let store = InMemoryRecordStore::new();
        let saved = store.submit(draft()).unwrap();

        assert!(!saved.is_new());
        assert_eq!(saved.record_type(), "HazardReport");
        assert!(saved.change_tag().is_some());
        assert_eq!(saved.creation_date(), saved.modification_date());
        assert_eq!(saved.record_id().unwrap().zone, ZoneId::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_refreshes_tag_and_keeps_creation() {
        let store = InMemoryRecordStore::new();
        let saved = store.submit(draft()).unwrap();

        let mut edit = saved.clone();
        edit.set("hazardDescription", "Broken glass, cleared");
        let updated = store.submit(edit).unwrap();

        assert_eq!(updated.record_id(), saved.record_id());
        assert_ne!(updated.change_tag(), saved.change_tag());
        assert_eq!(updated.creation_date(), saved.creation_date());
        assert!(updated.modification_date() >= saved.modification_date());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_stale_update_rejected() {
        let store = InMemoryRecordStore::new();
        let saved = store.submit(draft()).unwrap();
        store.submit(saved.clone()).unwrap();

        let err = store.submit(saved).unwrap_err();
        assert!(err.to_string().contains("server record changed"));
    }

    #[test]
    fn test_unknown_record_rejected() {
        let store = InMemoryRecordStore::new();
        let saved = store.submit(draft()).unwrap();

        let other = InMemoryRecordStore::new();
        assert!(other.submit(saved.clone()).is_err());
        assert!(other.fetch(saved.record_id().unwrap()).is_err());
    }

    #[test]
    fn test_fetch_returns_stored_copy() {
        let store = InMemoryRecordStore::new();
        let saved = store.submit(draft()).unwrap();
        let fetched = store.fetch(saved.record_id().unwrap()).unwrap();
        assert_eq!(fetched, saved);
    }

    #[test]
    fn test_change_tag_differs() {
        for _ in 0..64 {
            let tag = new_change_tag(Some("00000000"));
            assert_ne!(tag, "00000000");
            assert_eq!(tag.len(), 8);
        }
    }
}
