//! Photo staging for detached assets.
//!
//! Outgoing photos are JPEG-encoded and written to a uniquely named file in
//! the scratch directory; the record carries only a reference to that file.
//! Removing staged files after upload is left to the transport or the OS.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;

use crate::config::PhotoQuality;
use crate::error::PhotoError;
use crate::model::HazardPhoto;
use crate::record::AssetRef;

use super::sources::{FixedScratchDir, ScratchDirectory, SystemTempDir, UniqueNameSource, UuidNameSource};

/// Extension of every staged photo file.
pub const PHOTO_EXTENSION: &str = "jpg";

/// A photo written to local storage, ready to be referenced as an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAsset {
    pub path: PathBuf,
    pub byte_len: usize,
}

impl StagedAsset {
    /// Reference to the staged file, for the record's photo field.
    pub fn asset_ref(&self) -> AssetRef {
        AssetRef::local(&self.path)
    }
}

/// Moves photos between the domain image type and detached asset files.
#[derive(Clone)]
pub struct AssetStager {
    names: Arc<dyn UniqueNameSource>,
    scratch: Arc<dyn ScratchDirectory>,
}

impl AssetStager {
    /// UUID file names under the OS temp directory.
    pub fn new() -> Self {
        Self::with_sources(Arc::new(UuidNameSource), Arc::new(SystemTempDir))
    }

    /// UUID file names under `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_sources(Arc::new(UuidNameSource), Arc::new(FixedScratchDir(dir.into())))
    }

    /// Custom name source and scratch directory.
    pub fn with_sources(
        names: Arc<dyn UniqueNameSource>,
        scratch: Arc<dyn ScratchDirectory>,
    ) -> Self {
        Self { names, scratch }
    }

    /// Directory new staged files are written to.
    pub fn scratch_root(&self) -> PathBuf {
        self.scratch.root()
    }

    /// Compress a photo to JPEG bytes.
    pub fn encode(&self, photo: &HazardPhoto, quality: PhotoQuality) -> Result<Vec<u8>, PhotoError> {
        // JPEG has no alpha channel.
        let rgb = photo.image().to_rgb8();
        let mut bytes = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.jpeg_level());
            encoder.encode_image(&rgb).map_err(PhotoError::Encode)?;
        }
        Ok(bytes)
    }

    /// Encode a photo and write it to a fresh staged file.
    ///
    /// # Errors
    /// [`PhotoError::Encode`] if compression fails, [`PhotoError::Staging`]
    /// if the file cannot be created or written.
    pub fn stage(&self, photo: &HazardPhoto, quality: PhotoQuality) -> Result<StagedAsset, PhotoError> {
        let bytes = self.encode(photo, quality)?;
        let file_name = format!("{}.{}", self.names.unique_name(), PHOTO_EXTENSION);
        let path = self.scratch.root().join(file_name);

        if let Err(source) = write_new_file(&path, &bytes) {
            // Never delete a file someone else owns.
            if source.kind() != io::ErrorKind::AlreadyExists {
                remove_partial(&path);
            }
            return Err(PhotoError::Staging { path, source });
        }

        log::debug!(
            "PHOTO_STAGED path={} bytes={} quality={}",
            path.display(),
            bytes.len(),
            quality.jpeg_level()
        );

        Ok(StagedAsset {
            path,
            byte_len: bytes.len(),
        })
    }

    /// Read the bytes behind a detached asset reference.
    pub fn resolve(&self, asset: &AssetRef) -> Result<Vec<u8>, PhotoError> {
        let path = asset.path().ok_or(PhotoError::NotLocalized)?;
        fs::read(path).map_err(|source| PhotoError::AssetUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decode encoded image bytes into a photo.
    pub fn decode(&self, bytes: &[u8]) -> Result<HazardPhoto, PhotoError> {
        image::load_from_memory(bytes)
            .map(HazardPhoto::new)
            .map_err(PhotoError::ImageDecode)
    }

    /// Read and decode the photo behind an asset reference.
    pub fn resolve_photo(&self, asset: &AssetRef) -> Result<HazardPhoto, PhotoError> {
        let bytes = self.resolve(asset)?;
        self.decode(&bytes)
    }
}

impl Default for AssetStager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AssetStager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetStager")
            .field("scratch_root", &self.scratch.root())
            .finish()
    }
}

/// Best-effort removal of a partially written staged file.
fn remove_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("PHOTO_STAGE_CLEANUP path={}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!(
            "PHOTO_STAGE_CLEANUP_FAILED path={} error={}",
            path.display(),
            e
        ),
    }
}

/// Write `bytes` to a file that must not exist yet, flushing and syncing
/// before the handle is released.
fn write_new_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}
