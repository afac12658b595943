//! Wire names of the hazard report record.

/// Record type of every hazard report.
pub const RECORD_TYPE: &str = "HazardReport";

pub const DESCRIPTION: &str = "hazardDescription";
pub const LOCATION: &str = "hazardLocation";
pub const PHOTO: &str = "hazardPhoto";
pub const IS_EMERGENCY: &str = "isEmergency";
pub const IS_RESOLVED: &str = "isResolved";
