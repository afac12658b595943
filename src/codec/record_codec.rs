//! Hazard report ⇄ remote record conversion.
//!
//! Encoding rebuilds the outgoing record on the envelope restored from the
//! report's metadata blob (an update) or starts an identity-less record (an
//! insert). Decoding captures the record's envelope as a fresh blob so the
//! next edit targets the same remote entity.
//!
//! Photo failures never abort a conversion. They come back in
//! [`Converted::photo_issue`] and are logged at warn level.

use crate::archive;
use crate::config::{CodecConfig, PhotoQuality};
use crate::error::{CodecError, PhotoError, Result};
use crate::logging::structured::LogContext;
use crate::model::{HazardPhoto, HazardReport};
use crate::record::fields::{optional_location, require_bool, require_string};
use crate::record::{FieldValue, RemoteRecord};
use crate::staging::AssetStager;
use crate::{log_debug, log_error, log_info, log_warn};

use super::keys;

/// A converted value plus the photo failure, if any, met on the way.
#[derive(Debug)]
pub struct Converted<T> {
    pub value: T,
    pub photo_issue: Option<PhotoError>,
}

impl<T> Converted<T> {
    /// A value converted without any photo failure.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            photo_issue: None,
        }
    }

    /// True when the photo was dropped along the way.
    pub fn has_photo_issue(&self) -> bool {
        self.photo_issue.is_some()
    }

    /// Discard the photo issue and keep the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the photo issue.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Converted<U> {
        Converted {
            value: f(self.value),
            photo_issue: self.photo_issue,
        }
    }
}

/// Stateless converter between [`HazardReport`] and [`RemoteRecord`].
#[derive(Debug, Clone)]
pub struct RecordCodec {
    stager: AssetStager,
    photo_quality: PhotoQuality,
}

impl RecordCodec {
    /// Codec staging photos through `stager` at `photo_quality`.
    pub fn new(stager: AssetStager, photo_quality: PhotoQuality) -> Self {
        Self {
            stager,
            photo_quality,
        }
    }

    /// Codec using the configured quality and staging directory.
    pub fn from_config(config: &CodecConfig) -> Self {
        let stager = match &config.staging_dir {
            Some(dir) => AssetStager::in_dir(dir),
            None => AssetStager::new(),
        };
        Self::new(stager, config.photo_quality)
    }

    /// Stager used for outgoing and incoming photos.
    pub fn stager(&self) -> &AssetStager {
        &self.stager
    }

    /// Compression quality for staged photos.
    pub fn photo_quality(&self) -> PhotoQuality {
        self.photo_quality
    }

    /// Build the record to submit for `report`.
    ///
    /// Creation and modification dates are never written; the store owns
    /// them.
    ///
    /// # Errors
    /// [`CodecError::MetadataArchive`] if the report's metadata blob cannot
    /// be restored. A photo that cannot be staged is reported in
    /// [`Converted::photo_issue`] instead.
    pub fn encode_for_submission(&self, report: &HazardReport) -> Result<Converted<RemoteRecord>> {
        let mut ctx = LogContext::new("encode");
        log_debug!(
            ctx,
            "ENCODE_START",
            synced = report.is_synced(),
            photo = report.photo.is_some()
        );

        let mut record = match report.system_metadata() {
            Some(metadata) => {
                let system_fields = archive::restore(metadata).map_err(|e| {
                    log_error!(ctx, "METADATA_RESTORE_FAILED", error = e.to_string());
                    CodecError::MetadataArchive(e)
                })?;
                ctx = ctx.with_record(&system_fields.record_id.record_name);
                log_debug!(
                    ctx,
                    "ENCODE_UPDATE",
                    capsule = archive::fingerprint(metadata),
                    change_tag = system_fields.change_tag.clone()
                );
                RemoteRecord::from_system_fields(system_fields)
            }
            None => {
                log_debug!(ctx, "ENCODE_INSERT", record_type = keys::RECORD_TYPE);
                RemoteRecord::new(keys::RECORD_TYPE)
            }
        };

        record.set(keys::DESCRIPTION, report.description.as_str());
        record.set(keys::IS_EMERGENCY, report.is_emergency);
        record.set(keys::IS_RESOLVED, report.is_resolved);
        if let Some(location) = report.location {
            record.set(keys::LOCATION, location);
        }

        let mut photo_issue = None;
        if let Some(photo) = &report.photo {
            match self.stager.stage(photo, self.photo_quality) {
                Ok(staged) => {
                    log_debug!(
                        ctx,
                        "PHOTO_STAGED",
                        path = staged.path.display().to_string(),
                        bytes = staged.byte_len
                    );
                    record.set(keys::PHOTO, staged.asset_ref());
                }
                Err(e) => {
                    log_warn!(ctx, "PHOTO_STAGE_FAILED", error = e.to_string());
                    photo_issue = Some(e);
                }
            }
        }

        log_info!(
            ctx,
            "ENCODE_COMPLETE",
            update = !record.is_new(),
            fields = record.len(),
            photo = record.contains(keys::PHOTO)
        );

        Ok(Converted {
            value: record,
            photo_issue,
        })
    }

    /// Rebuild a report from a record returned by the store.
    ///
    /// # Errors
    /// [`CodecError::MissingSystemFields`] / [`CodecError::MetadataArchive`]
    /// if the envelope cannot be captured, [`CodecError::MissingField`] /
    /// [`CodecError::FieldType`] if a required field is absent or mistyped.
    /// Photo failures are reported in [`Converted::photo_issue`].
    pub fn decode_from_remote(&self, record: &RemoteRecord) -> Result<Converted<HazardReport>> {
        let ctx = LogContext::new("decode").with_optional_record(record.record_name());
        log_debug!(ctx, "DECODE_START", fields = record.len());

        let system_fields = record.system_fields().ok_or_else(|| {
            log_error!(ctx, "METADATA_MISSING", record_type = record.record_type());
            CodecError::MissingSystemFields
        })?;
        let metadata = archive::capture(system_fields).map_err(|e| {
            log_error!(ctx, "METADATA_CAPTURE_FAILED", error = e.to_string());
            CodecError::MetadataArchive(e)
        })?;

        let description =
            require_string(record, keys::DESCRIPTION).map_err(|e| field_failure(&ctx, e))?;
        let is_emergency =
            require_bool(record, keys::IS_EMERGENCY).map_err(|e| field_failure(&ctx, e))?;
        let is_resolved =
            require_bool(record, keys::IS_RESOLVED).map_err(|e| field_failure(&ctx, e))?;
        let location =
            optional_location(record, keys::LOCATION).map_err(|e| field_failure(&ctx, e))?;

        let (photo, photo_issue) = match self.decode_photo(record) {
            Ok(photo) => (photo, None),
            Err(e) => {
                log_warn!(ctx, "PHOTO_RESOLVE_FAILED", error = e.to_string());
                (None, Some(e))
            }
        };

        let mut report = HazardReport::new(description, location, photo, is_emergency, is_resolved);
        report.set_remote_state(metadata, record.creation_date(), record.modification_date());

        log_info!(
            ctx,
            "DECODE_COMPLETE",
            emergency = report.is_emergency,
            resolved = report.is_resolved,
            photo = report.photo.is_some()
        );

        Ok(Converted {
            value: report,
            photo_issue,
        })
    }

    fn decode_photo(&self, record: &RemoteRecord) -> std::result::Result<Option<HazardPhoto>, PhotoError> {
        match record.get(keys::PHOTO) {
            None => Ok(None),
            Some(FieldValue::Asset(asset)) => self.stager.resolve_photo(asset).map(Some),
            Some(other) => Err(PhotoError::NotAnAsset {
                found: other.kind(),
            }),
        }
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new(AssetStager::new(), PhotoQuality::DEFAULT)
    }
}

fn field_failure(ctx: &LogContext, err: CodecError) -> CodecError {
    match &err {
        CodecError::MissingField { field } => {
            log_warn!(ctx, "FIELD_MISSING", field = field, required = true);
        }
        CodecError::FieldType {
            field,
            expected,
            found,
        } => {
            log_warn!(
                ctx,
                "FIELD_TYPE_MISMATCH",
                field = field,
                expected = expected,
                found = found
            );
        }
        _ => {}
    }
    err
}
