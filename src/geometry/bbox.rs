//! Bounding boxes and their layout/normalization conversions.

use serde::{Deserialize, Serialize};

use super::extent::ImageExtent;
use super::format::{BoxFormat, Layout};

/// An axis-aligned bounding box: four numbers whose meaning is fixed by a
/// [`Layout`] tag carried alongside the value, not inside it.
///
/// Boxes are transient values with no inherent unit; the same tuple may be
/// pixel-absolute or image-relative depending on the [`BoxFormat`] the
/// caller tagged it with. Serializes as a bare 4-element array.
///
/// Note: width/height components are NOT validated to be non-negative here.
/// Degenerate boxes coming back from the widget should be representable so
/// callers can inspect them instead of losing them.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BBox([f64; 4]);

impl BBox {
    /// Creates a box from its four components.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self([a, b, c, d])
    }

    /// Creates a box from a component array.
    #[inline]
    pub fn from_array(values: [f64; 4]) -> Self {
        Self(values)
    }

    /// The four components in layout order.
    #[inline]
    pub fn values(&self) -> [f64; 4] {
        self.0
    }

    /// Returns true if all four components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Componentwise comparison within an absolute tolerance.
    ///
    /// Exported for callers comparing widget round-trip output, where
    /// floating-point drift within epsilon is expected.
    #[inline]
    pub fn approx_eq(&self, other: &BBox, eps: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Converts between two layouts.
    ///
    /// When `from == to` the box is returned unchanged. Otherwise the box is
    /// normalized to the canonical top-left `(x, y, w, h)` representation and
    /// projected to the output layout. Width and height are carried through
    /// in magnitude rather than recomputed from independently rounded
    /// corners, so a round trip through any two layouts reproduces the
    /// original tuple exactly in infinite precision and within epsilon in
    /// `f64`.
    pub fn convert(self, from: Layout, to: Layout) -> BBox {
        if from == to {
            return self;
        }

        let [a, b, c, d] = self.0;
        let (x, y, w, h) = match from {
            Layout::Xywh => (a, b, c, d),
            Layout::Xyxy => (a, b, c - a, d - b),
            Layout::Cxywh => (a - c / 2.0, b - d / 2.0, c, d),
        };

        match to {
            Layout::Xywh => BBox([x, y, w, h]),
            Layout::Xyxy => BBox([x, y, x + w, y + h]),
            Layout::Cxywh => BBox([x + w / 2.0, y + h / 2.0, w, h]),
        }
    }

    /// Scales absolute-pixel coordinates down to image-relative fractions.
    ///
    /// The contract fixes the box to XYXY layout `(x1, y1, x2, y2)`: x
    /// coordinates are divided by the image width and y coordinates by the
    /// image height. The same alternating width/height pattern holds for the
    /// other two layouts (their third and fourth components are an x-extent
    /// and a y-extent), which the compound pipelines rely on.
    ///
    /// Only this pair of conversions divides, and only by the image extent,
    /// never by box dimensions, so zero-size boxes are safe everywhere.
    pub fn to_relative(self, extent: &ImageExtent) -> BBox {
        let (w, h) = extent.as_f64();
        let [a, b, c, d] = self.0;
        BBox([a / w, b / h, c / w, d / h])
    }

    /// Exact inverse of [`BBox::to_relative`]: scales image-relative
    /// fractions back up to absolute pixels.
    pub fn to_absolute(self, extent: &ImageExtent) -> BBox {
        let (w, h) = extent.as_f64();
        let [a, b, c, d] = self.0;
        BBox([a * w, b * h, c * w, d * h])
    }

    /// Resolves a tagged box into an absolute-pixel box in `target` layout.
    ///
    /// Relative boxes are scaled up to pixels first (in their native layout,
    /// which is equivalent to scaling in XYXY since the transform is linear),
    /// then the layout is converted. This is the forward half of the
    /// two-stage decomposition that keeps layout conversion orthogonal to
    /// normalization.
    pub fn into_layout(self, format: BoxFormat, target: Layout, extent: &ImageExtent) -> BBox {
        let absolute = if format.relative {
            self.to_absolute(extent)
        } else {
            self
        };
        absolute.convert(format.layout, target)
    }

    /// Reverse of [`BBox::into_layout`]: takes an absolute-pixel box in
    /// `source` layout and produces a box tagged `format`, converting the
    /// layout first and normalizing second.
    pub fn from_layout(self, source: Layout, format: BoxFormat, extent: &ImageExtent) -> BBox {
        let converted = self.convert(source, format.layout);
        if format.relative {
            converted.to_relative(extent)
        } else {
            converted
        }
    }
}

impl std::fmt::Debug for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "BBox({a}, {b}, {c}, {d})")
    }
}

impl From<[f64; 4]> for BBox {
    fn from(values: [f64; 4]) -> Self {
        Self(values)
    }
}
