//! The hazard report domain entity.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::location::GeoLocation;
use super::photo::HazardPhoto;

/// Archived remote bookkeeping for a report that has been stored remotely.
///
/// The bytes are a capsule produced by [`crate::archive`]. Nothing outside
/// that module looks inside; callers only store and replay it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SystemMetadata(Vec<u8>);

impl SystemMetadata {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Standard base64 text form, used when persisting reports as JSON.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.0)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        general_purpose::STANDARD.decode(encoded).map(Self)
    }
}

impl fmt::Debug for SystemMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemMetadata({} bytes)", self.0.len())
    }
}

impl Serialize for SystemMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for SystemMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}

/// A locally held hazard report.
///
/// `created_at`, `modified_at` and `system_metadata` are owned by the remote
/// store and only populated by [`crate::codec::RecordCodec::decode_from_remote`].
///
/// The photo is not part of the serde form. A report reloaded from JSON has
/// no photo, and re-encoding it sends an update without `hazardPhoto`,
/// which replaces the remote field set and drops the stored photo. Callers
/// persisting reports must keep the image themselves and reattach it to
/// `photo` before the next submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReport {
    pub description: String,
    pub location: Option<GeoLocation>,
    #[serde(skip)]
    pub photo: Option<HazardPhoto>,
    pub is_emergency: bool,
    pub is_resolved: bool,
    created_at: Option<DateTime<Utc>>,
    modified_at: Option<DateTime<Utc>>,
    system_metadata: Option<SystemMetadata>,
}

impl HazardReport {
    /// Create a report in the new-record state (never uploaded).
    pub fn new(
        description: impl Into<String>,
        location: Option<GeoLocation>,
        photo: Option<HazardPhoto>,
        is_emergency: bool,
        is_resolved: bool,
    ) -> Self {
        Self {
            description: description.into(),
            location,
            photo,
            is_emergency,
            is_resolved,
            created_at: None,
            modified_at: None,
            system_metadata: None,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    pub fn system_metadata(&self) -> Option<&SystemMetadata> {
        self.system_metadata.as_ref()
    }

    /// True once the report has round-tripped through the remote store.
    pub fn is_synced(&self) -> bool {
        self.system_metadata.is_some()
    }

    pub(crate) fn set_remote_state(
        &mut self,
        system_metadata: SystemMetadata,
        created_at: Option<DateTime<Utc>>,
        modified_at: Option<DateTime<Utc>>,
    ) {
        self.system_metadata = Some(system_metadata);
        self.created_at = created_at;
        self.modified_at = modified_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_unsynced() {
        let report = HazardReport::new("Pothole", None, None, false, false);
        assert!(!report.is_synced());
        assert!(report.created_at().is_none());
        assert!(report.modified_at().is_none());
        assert!(report.system_metadata().is_none());
    }

    #[test]
    fn test_system_metadata_base64() {
        let meta = SystemMetadata::from_bytes(vec![0, 1, 2, 250, 251]);
        let encoded = meta.to_base64();
        assert_eq!(SystemMetadata::from_base64(&encoded).unwrap(), meta);
        assert!(SystemMetadata::from_base64("not base64!").is_err());
        assert_eq!(format!("{:?}", meta), "SystemMetadata(5 bytes)");
    }

    #[test]
    fn test_report_json_persists_metadata() {
        let mut report = HazardReport::new(
            "Flooded underpass",
            Some(GeoLocation::new(51.5, -0.12).unwrap()),
            None,
            true,
            false,
        );
        let now = Utc::now();
        report.set_remote_state(SystemMetadata::from_bytes(b"capsule".to_vec()), Some(now), Some(now));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("Y2Fwc3VsZQ=="));

        let restored: HazardReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
        assert!(restored.is_synced());
    }

    #[test]
    fn test_report_json_omits_photo() {
        use image::{DynamicImage, RgbImage};

        let photo = HazardPhoto::new(DynamicImage::ImageRgb8(RgbImage::new(4, 4)));
        let report = HazardReport::new("Cracked kerb", None, Some(photo.clone()), false, false);

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("photo"));

        let mut restored: HazardReport = serde_json::from_str(&json).unwrap();
        assert!(restored.photo.is_none());
        restored.photo = Some(photo);
        assert_eq!(restored, report);
    }
}
