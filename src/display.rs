//! Display sizing for the widget canvas.
//!
//! The widget renders a resized copy of the image, so box coordinates cross
//! a display-to-original scale factor on the way in and out. This module
//! computes the fitted display size and carries that scale; the actual
//! resizing and rendering happen in the widget runtime.

use std::path::Path;

use crate::error::LabelKitError;
use crate::geometry::{BBox, ImageExtent};

/// Reads an image's pixel extent from its header without decoding pixels.
pub fn probe_extent(path: &Path) -> Result<ImageExtent, LabelKitError> {
    let size = imagesize::size(path).map_err(|err| LabelKitError::ImageProbe {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    ImageExtent::new(size.width as u32, size.height as u32)
}

impl ImageExtent {
    /// Aspect-preserving fit of this extent into `frame`, upscaling when the
    /// image is smaller than the frame. Fitted dimensions are at least 1.
    pub fn fit_within(&self, frame: &ImageExtent) -> ImageExtent {
        let (w, h) = self.as_f64();
        let (frame_w, frame_h) = frame.as_f64();

        let scale = (frame_w / w).min(frame_h / h);
        let fitted_w = ((w * scale).round() as u32).max(1);
        let fitted_h = ((h * scale).round() as u32).max(1);

        // max(1) above keeps both dimensions positive, so this cannot fail.
        ImageExtent::new(fitted_w, fitted_h).expect("fitted extent is positive")
    }
}

/// The original image extent paired with the fitted display extent.
///
/// Boxes sent to the widget are in display space; boxes coming back are
/// scaled up to original pixels. The factor is taken from the width ratio,
/// matching the widget runtime's own scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayGeometry {
    pub original: ImageExtent,
    pub display: ImageExtent,
}

impl DisplayGeometry {
    /// Fits `original` into `frame` and records both extents.
    pub fn fit(original: ImageExtent, frame: &ImageExtent) -> Self {
        Self {
            original,
            display: original.fit_within(frame),
        }
    }

    /// The display-to-original scale factor.
    #[inline]
    pub fn scale(&self) -> f64 {
        f64::from(self.original.width()) / f64::from(self.display.width())
    }

    /// Maps a box from original pixels into display space.
    pub fn to_display(&self, bbox: BBox) -> BBox {
        let s = self.scale();
        let [a, b, c, d] = bbox.values();
        BBox::new(a / s, b / s, c / s, d / s)
    }

    /// Maps a box from display space back into original pixels.
    pub fn to_original(&self, bbox: BBox) -> BBox {
        let s = self.scale();
        let [a, b, c, d] = bbox.values();
        BBox::new(a * s, b * s, c * s, d * s)
    }
}

/// Stable cache-busting key for the image the host serves to the widget.
///
/// Keyed on the path and extent rather than the decoded bytes, so computing
/// it never requires reading the image itself.
pub fn image_cache_key(path: &Path, extent: &ImageExtent) -> String {
    let mut bytes = path.to_string_lossy().into_owned().into_bytes();
    bytes.extend_from_slice(&extent.width().to_le_bytes());
    bytes.extend_from_slice(&extent.height().to_le_bytes());
    format!("{:08x}", crc32c::crc32c(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn extent(w: u32, h: u32) -> ImageExtent {
        ImageExtent::new(w, h).unwrap()
    }

    #[test]
    fn fit_shrinks_landscape_image() {
        let fitted = extent(700, 467).fit_within(&extent(512, 512));
        assert_eq!(fitted.as_array(), [512, 342]);
    }

    #[test]
    fn fit_upscales_small_image() {
        let fitted = extent(100, 50).fit_within(&extent(512, 512));
        assert_eq!(fitted.as_array(), [512, 256]);
    }

    #[test]
    fn fit_preserves_exact_match() {
        let fitted = extent(512, 512).fit_within(&extent(512, 512));
        assert_eq!(fitted.as_array(), [512, 512]);
    }

    #[test]
    fn fit_never_collapses_to_zero() {
        let fitted = extent(10000, 1).fit_within(&extent(512, 512));
        assert_eq!(fitted.as_array(), [512, 1]);
    }

    #[test]
    fn scale_roundtrips_boxes() {
        let geometry = DisplayGeometry::fit(extent(700, 467), &extent(512, 512));
        let b = BBox::new(10.0, 20.0, 200.0, 100.0);
        let back = geometry.to_original(geometry.to_display(b));
        assert!(back.approx_eq(&b, 1e-9));
    }

    #[test]
    fn cache_key_is_stable_and_extent_sensitive() {
        let path = PathBuf::from("image/penguin.jpg");
        let key_a = image_cache_key(&path, &extent(700, 467));
        let key_b = image_cache_key(&path, &extent(700, 467));
        let key_c = image_cache_key(&path, &extent(701, 467));

        assert_eq!(key_a, key_b);
        assert_ne!(key_a, key_c);
        assert_eq!(key_a.len(), 8);
    }
}
