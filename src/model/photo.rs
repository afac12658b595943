//! Decoded hazard photo.

use std::fmt;

use image::{DynamicImage, GenericImageView};

/// A decoded image attached to a report.
///
/// The photo never travels inline in a remote record; it is staged to a file
/// and referenced as a detached asset (see [`crate::staging`]).
#[derive(Clone, PartialEq)]
pub struct HazardPhoto {
    image: DynamicImage,
}

impl HazardPhoto {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl From<DynamicImage> for HazardPhoto {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

// Pixel buffers are far too large for debug output.
impl fmt::Debug for HazardPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HazardPhoto")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("color", &self.image.color())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_dimensions_and_debug() {
        let photo = HazardPhoto::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            4,
            3,
            Rgb([1, 2, 3]),
        )));
        assert_eq!(photo.dimensions(), (4, 3));
        let debug = format!("{:?}", photo);
        assert!(debug.contains("width: 4"));
        assert!(debug.contains("height: 3"));
    }
}
