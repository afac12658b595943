//! Geographic coordinate for a hazard.

use serde::{Deserialize, Serialize};

/// Invalid coordinate components.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),

    #[error("altitude {0} is not finite")]
    Altitude(f64),
}

/// A validated WGS84 position, optionally with altitude in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude: None,
        })
    }

    pub fn with_altitude(self, altitude: f64) -> Result<Self, LocationError> {
        if !altitude.is_finite() {
            return Err(LocationError::Altitude(altitude));
        }
        Ok(Self {
            altitude: Some(altitude),
            ..self
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }
}

/// Unchecked wire shape; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    altitude: Option<f64>,
}

impl TryFrom<RawLocation> for GeoLocation {
    type Error = LocationError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        let location = GeoLocation::new(raw.latitude, raw.longitude)?;
        match raw.altitude {
            Some(altitude) => location.with_altitude(altitude),
            None => Ok(location),
        }
    }
}

impl From<GeoLocation> for RawLocation {
    fn from(location: GeoLocation) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            altitude: location.altitude,
        }
    }
}
