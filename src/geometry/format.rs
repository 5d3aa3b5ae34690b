//! Layout-format tags for bounding boxes.

use std::fmt;
use std::str::FromStr;

use crate::error::LabelKitError;

/// The arrangement of the four numbers describing a box.
///
/// This is a closed enumeration: callers holding one of the six combined
/// wire tags should parse it into a [`BoxFormat`], which splits the tag into
/// a `Layout` and a relative flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Top-left x, top-left y, width, height.
    Xywh,
    /// Top-left x, top-left y, bottom-right x, bottom-right y.
    Xyxy,
    /// Center x, center y, width, height.
    Cxywh,
}

impl Layout {
    /// All layouts, in wire-tag order.
    pub const ALL: [Layout; 3] = [Layout::Xywh, Layout::Xyxy, Layout::Cxywh];

    /// The wire tag for this layout.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Xywh => "XYWH",
            Layout::Xyxy => "XYXY",
            Layout::Cxywh => "CXYWH",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = LabelKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XYWH" => Ok(Layout::Xywh),
            "XYXY" => Ok(Layout::Xyxy),
            "CXYWH" => Ok(Layout::Cxywh),
            other => Err(LabelKitError::InvalidFormat(other.to_string())),
        }
    }
}

/// A full box-format tag: a [`Layout`] plus the relative-normalization flag.
///
/// `relative` means the four numbers are fractions of the image extent
/// rather than absolute pixels. On the wire this is the `REL_` prefix
/// (e.g. `REL_XYXY`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoxFormat {
    pub layout: Layout,
    pub relative: bool,
}

impl BoxFormat {
    /// Creates a format tag from its parts.
    #[inline]
    pub const fn new(layout: Layout, relative: bool) -> Self {
        Self { layout, relative }
    }

    /// Absolute-pixel format with the given layout.
    #[inline]
    pub const fn absolute(layout: Layout) -> Self {
        Self::new(layout, false)
    }

    /// Image-relative format with the given layout.
    #[inline]
    pub const fn relative(layout: Layout) -> Self {
        Self::new(layout, true)
    }
}

impl fmt::Display for BoxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            write!(f, "REL_{}", self.layout.name())
        } else {
            f.write_str(self.layout.name())
        }
    }
}

impl FromStr for BoxFormat {
    type Err = LabelKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (relative, layout_tag) = match s.strip_prefix("REL_") {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let layout = layout_tag
            .parse::<Layout>()
            .map_err(|_| LabelKitError::InvalidFormat(s.to_string()))?;

        Ok(BoxFormat { layout, relative })
    }
}
