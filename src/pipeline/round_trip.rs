//! Single-record round trips through a transport.
//!
//! 1. Encode the report (insert or update)
//! 2. Submit / fetch through the transport
//! 3. Decode the store's copy so the report picks up the new envelope

use crate::codec::{Converted, RecordCodec};
use crate::error::{CodecError, Result};
use crate::logging::structured::LogContext;
use crate::model::HazardReport;
use crate::record::RecordId;
use crate::transport::RecordTransport;
use crate::{log_info, log_warn};

/// Submit `report` and return it as the store now knows it.
///
/// The returned report carries the refreshed metadata blob and timestamps.
/// `photo_issue` holds the first photo failure from either leg.
pub fn submit_report<T: RecordTransport + ?Sized>(
    codec: &RecordCodec,
    transport: &T,
    report: &HazardReport,
) -> Result<Converted<HazardReport>> {
    let encoded = codec.encode_for_submission(report)?;
    let ctx = LogContext::new("submit").with_optional_record(encoded.value.record_name());
    let is_update = !encoded.value.is_new();

    log_info!(ctx, "SUBMIT_START", update = is_update);

    let saved = transport.submit(encoded.value).map_err(|e| {
        log_warn!(ctx, "SUBMIT_FAILED", update = is_update, error = e.to_string());
        CodecError::Transport(e)
    })?;

    let decoded = codec.decode_from_remote(&saved)?;

    log_info!(
        ctx.with_optional_record(saved.record_name()),
        "SUBMIT_COMPLETE",
        update = is_update,
        change_tag = saved.change_tag()
    );

    Ok(Converted {
        value: decoded.value,
        photo_issue: encoded.photo_issue.or(decoded.photo_issue),
    })
}

/// Fetch the current copy of a report.
pub fn fetch_report<T: RecordTransport + ?Sized>(
    codec: &RecordCodec,
    transport: &T,
    id: &RecordId,
) -> Result<Converted<HazardReport>> {
    let ctx = LogContext::new("fetch").with_record(&id.record_name);

    let record = transport.fetch(id).map_err(|e| {
        log_warn!(ctx, "FETCH_FAILED", error = e.to_string());
        CodecError::Transport(e)
    })?;

    codec.decode_from_remote(&record)
}
