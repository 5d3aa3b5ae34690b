//! Recognized UI options and the panel sizing table.
//!
//! The source of truth for the numbers here is the widget runtime's panel
//! chrome; they are not derived.

use serde::Serialize;

/// Base panel row height in pixels.
pub const UI_HEIGHT: u32 = 34;

/// Base side-panel width for the detection and segmentation tools.
pub const UI_WIDTH_WIDE: u32 = 198;

/// Base side-panel width for the classification tool.
pub const UI_WIDTH_NARROW: u32 = 168;

/// Which side of the canvas a movable panel docks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelSide {
    #[default]
    Left,
    Right,
}

/// Docking sides for the class selector, which may also sit below the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DockSide {
    Left,
    Right,
    Bottom,
}

impl From<PanelSide> for DockSide {
    fn from(side: PanelSide) -> Self {
        match side {
            PanelSide::Left => DockSide::Left,
            PanelSide::Right => DockSide::Right,
        }
    }
}

/// Control style for picking a class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassSelector {
    #[default]
    Select,
    Radio,
}

/// Horizontal alignment of the whole component within its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// The flexbox `justify-content` value the widget expects.
    pub fn justify_content(&self) -> &'static str {
        match self {
            Alignment::Left => "start",
            Alignment::Center => "center",
            Alignment::Right => "end",
        }
    }
}

/// Panel size, either one of the named presets or an exact pixel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiSize {
    #[default]
    Small,
    Medium,
    Large,
    Exact(u32),
}

impl UiSize {
    /// Resolves to `(height, width)` in pixels against a base panel width.
    ///
    /// Medium and large widths truncate the fractional product, matching the
    /// widget runtime's own table.
    pub fn dimensions(&self, base_width: u32) -> (u32, u32) {
        match self {
            UiSize::Small => (UI_HEIGHT, base_width),
            UiSize::Medium => (2 * UI_HEIGHT, (1.25 * f64::from(base_width)) as u32),
            UiSize::Large => (4 * UI_HEIGHT, (1.5 * f64::from(base_width)) as u32),
            UiSize::Exact(px) => (*px, *px),
        }
    }

    /// The width component for a side panel.
    #[inline]
    pub fn panel_width(&self, base_width: u32) -> u32 {
        self.dimensions(base_width).1
    }

    /// The height component for a bottom bar.
    #[inline]
    pub fn bar_height(&self, base_width: u32) -> u32 {
        self.dimensions(base_width).0
    }
}

/// A width that is either a pixel count or "fill the viewport".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiDimension {
    Px(u32),
    FillWidth,
}

impl Serialize for UiDimension {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UiDimension::Px(px) => serializer.serialize_u32(*px),
            UiDimension::FillWidth => serializer.serialize_str("100vw"),
        }
    }
}

/// Panel configuration shared by the detection and segmentation tools.
///
/// `position` is the fallback for any panel without an explicit position,
/// the same way the widget treats its `ui_position` argument.
#[derive(Clone, Debug, Default)]
pub struct PanelOptions {
    pub position: PanelSide,
    pub class_select_position: Option<DockSide>,
    pub item_editor_position: Option<PanelSide>,
    pub item_selector_position: Option<PanelSide>,
    pub class_select_type: ClassSelector,
    pub item_editor: bool,
    pub item_selector: bool,
    pub edit_meta: bool,
    pub edit_description: bool,
    pub size: UiSize,
    pub left_size: Option<UiSize>,
    pub bottom_size: Option<UiSize>,
    pub right_size: Option<UiSize>,
    pub alignment: Alignment,
}

impl PanelOptions {
    pub(crate) fn class_select_position(&self) -> DockSide {
        self.class_select_position
            .unwrap_or_else(|| self.position.into())
    }

    pub(crate) fn item_editor_position(&self) -> PanelSide {
        self.item_editor_position.unwrap_or(self.position)
    }

    pub(crate) fn item_selector_position(&self) -> PanelSide {
        self.item_selector_position.unwrap_or(self.position)
    }

    pub(crate) fn left_width(&self, base_width: u32) -> u32 {
        self.left_size.unwrap_or(self.size).panel_width(base_width)
    }

    pub(crate) fn bottom_height(&self, base_width: u32) -> u32 {
        self.bottom_size.unwrap_or(self.size).bar_height(base_width)
    }

    pub(crate) fn right_width(&self, base_width: u32) -> u32 {
        self.right_size.unwrap_or(self.size).panel_width(base_width)
    }

    /// Description editing yields to metadata editing when both are on.
    pub(crate) fn edit_description(&self) -> bool {
        !self.edit_meta && self.edit_description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizing_table_matches_widget_chrome() {
        assert_eq!(UiSize::Small.dimensions(UI_WIDTH_WIDE), (34, 198));
        assert_eq!(UiSize::Medium.dimensions(UI_WIDTH_WIDE), (68, 247));
        assert_eq!(UiSize::Large.dimensions(UI_WIDTH_WIDE), (136, 297));

        assert_eq!(UiSize::Small.dimensions(UI_WIDTH_NARROW), (34, 168));
        assert_eq!(UiSize::Medium.dimensions(UI_WIDTH_NARROW), (68, 210));
        assert_eq!(UiSize::Large.dimensions(UI_WIDTH_NARROW), (136, 252));
    }

    #[test]
    fn exact_size_is_square() {
        assert_eq!(UiSize::Exact(90).dimensions(UI_WIDTH_WIDE), (90, 90));
    }

    #[test]
    fn panel_positions_fall_back_to_default_side() {
        let opts = PanelOptions {
            position: PanelSide::Right,
            ..Default::default()
        };
        assert_eq!(opts.class_select_position(), DockSide::Right);
        assert_eq!(opts.item_editor_position(), PanelSide::Right);
        assert_eq!(opts.item_selector_position(), PanelSide::Right);

        let explicit = PanelOptions {
            position: PanelSide::Right,
            class_select_position: Some(DockSide::Bottom),
            ..Default::default()
        };
        assert_eq!(explicit.class_select_position(), DockSide::Bottom);
    }

    #[test]
    fn meta_editing_wins_over_description() {
        let both = PanelOptions {
            edit_meta: true,
            edit_description: true,
            ..Default::default()
        };
        assert!(!both.edit_description());

        let description_only = PanelOptions {
            edit_description: true,
            ..Default::default()
        };
        assert!(description_only.edit_description());
    }

    #[test]
    fn serializes_wire_spellings() {
        assert_eq!(serde_json::to_string(&DockSide::Bottom).unwrap(), "\"bottom\"");
        assert_eq!(serde_json::to_string(&ClassSelector::Radio).unwrap(), "\"radio\"");
        assert_eq!(serde_json::to_string(&UiDimension::Px(247)).unwrap(), "247");
        assert_eq!(
            serde_json::to_string(&UiDimension::FillWidth).unwrap(),
            "\"100vw\""
        );
        assert_eq!(Alignment::Center.justify_content(), "center");
    }
}
