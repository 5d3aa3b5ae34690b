//! Validated image extents.

use serde::{Deserialize, Serialize};

use crate::error::LabelKitError;

/// The (width, height) pixel dimensions of a reference image.
///
/// Both dimensions are guaranteed positive by construction, so conversions
/// that divide by the extent never divide by zero. Constructing a degenerate
/// extent is a caller error ([`LabelKitError::InvalidExtent`]), surfaced
/// immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ImageExtent {
    width: u32,
    height: u32,
}

impl ImageExtent {
    /// Creates an extent, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, LabelKitError> {
        if width == 0 || height == 0 {
            return Err(LabelKitError::InvalidExtent { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The extent as a `(width, height)` pair of `f64`, for coordinate math.
    #[inline]
    pub fn as_f64(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }

    /// The extent as a `[width, height]` array, the shape the widget payload
    /// uses on the wire.
    #[inline]
    pub fn as_array(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

// Deserialization goes through the validating constructor so a degenerate
// extent cannot enter through the wire either.
impl<'de> Deserialize<'de> for ImageExtent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct ExtentData {
            width: u32,
            height: u32,
        }
        let data = ExtentData::deserialize(deserializer)?;
        ImageExtent::new(data.width, data.height).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_dimensions() {
        let extent = ImageExtent::new(700, 467).unwrap();
        assert_eq!(extent.width(), 700);
        assert_eq!(extent.height(), 467);
        assert_eq!(extent.as_f64(), (700.0, 467.0));
    }

    #[test]
    fn rejects_zero_dimensions() {
        for (w, h) in [(0, 100), (100, 0), (0, 0)] {
            let err = ImageExtent::new(w, h).unwrap_err();
            assert!(matches!(
                err,
                LabelKitError::InvalidExtent { width, height } if width == w && height == h
            ));
        }
    }

    #[test]
    fn deserialization_validates() {
        let ok: ImageExtent = serde_json::from_str(r#"{"width":640,"height":480}"#).unwrap();
        assert_eq!(ok.as_array(), [640, 480]);

        let err = serde_json::from_str::<ImageExtent>(r#"{"width":0,"height":480}"#);
        assert!(err.is_err());
    }
}
