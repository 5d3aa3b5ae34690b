//! Pure bounding-box geometry for the labeling widget.
//!
//! This module is the stateless core that box data passes through on its way
//! to the browser widget and back. Everything here is a pure function over
//! immutable values: no I/O, no UI, no retained state, safe to call from any
//! thread.
//!
//! # Design Principles
//!
//! 1. **Closed layout enumeration**: the four numbers of a box are
//!    interpreted through [`Layout`], a three-member enum, with the
//!    relative-normalization modifier carried separately in [`BoxFormat`].
//!    The six wire tags (`XYWH` .. `REL_CXYWH`) exist only at the string
//!    boundary.
//!
//! 2. **Orthogonal conversions**: layout conversion ([`BBox::convert`]) and
//!    normalization ([`BBox::to_relative`] / [`BBox::to_absolute`]) are
//!    independent transforms. Compound conversions compose them instead of
//!    enumerating every (layout × normalization) pair.
//!
//! 3. **Validated extents**: [`ImageExtent`] only ever holds positive
//!    dimensions, so the normalization conversions themselves cannot divide
//!    by zero.
//!
//! # Example
//!
//! ```
//! use labelkit::geometry::{BBox, Layout};
//!
//! let b = BBox::new(60.0, 60.0, 40.0, 40.0);
//! let corners = b.convert(Layout::Cxywh, Layout::Xyxy);
//! assert_eq!(corners.values(), [40.0, 40.0, 80.0, 80.0]);
//! ```

mod bbox;
mod extent;
mod format;

// Re-export core types for convenient access
pub use bbox::BBox;
pub use extent::ImageExtent;
pub use format::{BoxFormat, Layout};
