//! Codec configuration.
//!
//! Defaults work out of the box; `from_env` and `from_json` let the host
//! app override photo quality and the staging directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Env var overriding the photo quality (0.0–1.0).
pub const ENV_PHOTO_QUALITY: &str = "HAZARD_PHOTO_QUALITY";

/// Env var overriding the directory staged photos are written to.
pub const ENV_STAGING_DIR: &str = "HAZARD_STAGING_DIR";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("photo quality {0} outside [0.0, 1.0]")]
    InvalidQuality(f32),

    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error("could not parse codec config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Compression quality for staged photos. Lower is smaller and lossier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct PhotoQuality(f32);

impl PhotoQuality {
    pub const DEFAULT: PhotoQuality = PhotoQuality(0.70);

    pub fn new(quality: f32) -> Result<Self, ConfigError> {
        if !quality.is_finite() || !(0.0..=1.0).contains(&quality) {
            return Err(ConfigError::InvalidQuality(quality));
        }
        Ok(Self(quality))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Encoder level in 1..=100.
    pub fn jpeg_level(&self) -> u8 {
        ((self.0 * 100.0).round() as u8).clamp(1, 100)
    }
}

impl Default for PhotoQuality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for PhotoQuality {
    type Error = ConfigError;

    fn try_from(quality: f32) -> Result<Self, Self::Error> {
        Self::new(quality)
    }
}

impl From<PhotoQuality> for f32 {
    fn from(quality: PhotoQuality) -> Self {
        quality.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub photo_quality: PhotoQuality,
    /// Directory for staged photos; the OS temp dir when unset.
    pub staging_dir: Option<PathBuf>,
}

impl CodecConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `HAZARD_PHOTO_QUALITY` / `HAZARD_STAGING_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_PHOTO_QUALITY) {
            let parsed: f32 = raw.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_PHOTO_QUALITY,
                value: raw.clone(),
            })?;
            config.photo_quality = PhotoQuality::new(parsed)?;
        }

        if let Some(dir) = lookup(ENV_STAGING_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::Env {
                    var: ENV_STAGING_DIR,
                    value: dir,
                });
            }
            config.staging_dir = Some(PathBuf::from(dir));
        }

        log::debug!(
            "CODEC_CONFIG photo_quality={} staging_dir={:?}",
            config.photo_quality.value(),
            config.staging_dir
        );

        Ok(config)
    }
}
