//! Classification/annotation tool: whole-image labels and metadata.
//!
//! No box geometry flows through this tool; it is pure configuration-object
//! construction around the same panel vocabulary as the others.

use serde::{Deserialize, Serialize};

use super::ui::{
    Alignment, ClassSelector, DockSide, PanelSide, UiDimension, UiSize, UI_WIDTH_NARROW,
};
use crate::error::LabelKitError;
use crate::geometry::ImageExtent;

/// Initially selected label state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelSelection {
    #[default]
    None,
    Single(usize),
    Multi(Vec<usize>),
}

/// Caller-facing configuration for the classification tool.
///
/// The image is optional: the tool can render bare label/metadata controls
/// with no canvas at all.
#[derive(Clone, Debug)]
pub struct AnnotationOptions {
    pub image: Option<ImageRef>,
    pub label_list: Vec<String>,
    pub selected: LabelSelection,
    /// Enables the class-selection controls.
    pub classification: bool,
    pub multi_select: bool,
    /// Enables the metadata editor panel.
    pub meta_editor: bool,
    pub edit_description: bool,
    pub metadata: Vec<String>,
    pub position: PanelSide,
    pub class_select_position: Option<DockSide>,
    pub meta_editor_position: Option<PanelSide>,
    pub class_select_type: ClassSelector,
    pub size: UiSize,
    pub left_size: Option<UiSize>,
    pub bottom_size: Option<UiSize>,
    pub right_size: Option<UiSize>,
    /// Stretches the bottom bar across the viewport.
    pub fill_width: bool,
    /// Overrides the resolved panel height.
    pub height_override: Option<u32>,
    pub read_only: bool,
    pub alignment: Alignment,
    pub key: Option<String>,
}

/// An image reference: the host-resolved URL plus the display extent.
#[derive(Clone, Debug)]
pub struct ImageRef {
    pub url: String,
    pub display_size: ImageExtent,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            image: None,
            label_list: Vec::new(),
            selected: LabelSelection::None,
            classification: false,
            multi_select: false,
            meta_editor: false,
            edit_description: false,
            metadata: Vec::new(),
            position: PanelSide::Right,
            class_select_position: None,
            meta_editor_position: None,
            class_select_type: ClassSelector::Radio,
            size: UiSize::Small,
            left_size: None,
            bottom_size: None,
            right_size: None,
            fill_width: false,
            height_override: None,
            read_only: false,
            alignment: Alignment::Left,
            key: None,
        }
    }
}

/// The JSON document sent to the widget. Field names are the wire contract.
#[derive(Clone, Debug, Serialize)]
pub struct AnnotationPayload {
    pub image_url: String,
    pub image_size: [u32; 2],
    pub label_list: Vec<String>,
    pub ui_height: u32,
    pub ui_width: UiDimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_label_idx: Option<usize>,
    pub meta_info: Vec<String>,
    pub multi_select: bool,
    pub edit_class: bool,
    pub edit_meta: bool,
    pub edit_description: bool,
    pub class_select_type: ClassSelector,
    pub meta_editor: bool,
    pub class_select_position: DockSide,
    pub meta_editor_position: PanelSide,
    pub ui_left_size: u32,
    pub ui_bottom_size: u32,
    pub ui_right_size: u32,
    pub read_only: bool,
    pub default_multi_label_list: Vec<String>,
    pub justify_content: &'static str,
    pub label_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Builds the classification payload.
///
/// Returns `None` when neither classification nor the metadata editor is
/// enabled: the tool would have nothing to render.
pub fn build_annotation_payload(opts: &AnnotationOptions) -> Option<AnnotationPayload> {
    if !opts.classification && !opts.meta_editor {
        return None;
    }

    let (image_url, image_size) = match &opts.image {
        Some(image) => (image.url.clone(), image.display_size.as_array()),
        None => (String::new(), [0, 0]),
    };

    let (mut ui_height, ui_width) = opts.size.dimensions(UI_WIDTH_NARROW);
    if let Some(height) = opts.height_override {
        ui_height = height;
    }
    let ui_width = if opts.fill_width {
        UiDimension::FillWidth
    } else {
        UiDimension::Px(ui_width)
    };

    let default_label_idx = match opts.selected {
        LabelSelection::Single(index) => Some(index),
        _ => None,
    };

    // Multi-select seeds the widget with label names, not indices.
    let default_multi_label_list = match (&opts.selected, opts.image.is_some()) {
        (LabelSelection::Multi(indices), true) if opts.multi_select => indices
            .iter()
            .filter_map(|&i| opts.label_list.get(i).cloned())
            .collect(),
        _ => Vec::new(),
    };

    let edit_meta = !opts.edit_description && opts.meta_editor;

    Some(AnnotationPayload {
        image_url,
        image_size,
        label_list: opts.label_list.clone(),
        ui_height,
        ui_width,
        default_label_idx,
        meta_info: opts.metadata.clone(),
        multi_select: opts.multi_select,
        edit_class: opts.classification,
        edit_meta,
        edit_description: opts.meta_editor && opts.edit_description,
        class_select_type: opts.class_select_type,
        meta_editor: opts.meta_editor,
        class_select_position: opts
            .class_select_position
            .unwrap_or_else(|| opts.position.into()),
        meta_editor_position: opts.meta_editor_position.unwrap_or(opts.position),
        ui_left_size: opts
            .left_size
            .unwrap_or(opts.size)
            .panel_width(UI_WIDTH_NARROW),
        ui_bottom_size: opts
            .bottom_size
            .unwrap_or(opts.size)
            .bar_height(UI_WIDTH_NARROW),
        ui_right_size: opts
            .right_size
            .unwrap_or(opts.size)
            .panel_width(UI_WIDTH_NARROW),
        read_only: opts.read_only,
        default_multi_label_list,
        justify_content: opts.alignment.justify_content(),
        label_type: "annotation",
        key: opts.key.clone(),
    })
}

/// The JSON document the widget posts back.
#[derive(Clone, Debug, Deserialize)]
pub struct RawAnnotationValue {
    /// Single-select runtimes send one label, multi-select a list.
    #[serde(default, deserialize_with = "de_one_or_many")]
    pub label: Vec<String>,
    #[serde(default)]
    pub meta: Vec<String>,
    #[serde(default, deserialize_with = "super::de_widget_key")]
    pub key: u64,
}

/// The edited state of the classification tool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationOutcome {
    pub labels: Vec<String>,
    pub meta: Vec<String>,
    pub key: u64,
}

fn de_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(label) => vec![label],
        OneOrMany::Many(labels) => labels,
    })
}

/// Parses the widget's JSON result.
pub fn parse_annotation_result(raw: &str) -> Result<AnnotationOutcome, LabelKitError> {
    let value: RawAnnotationValue =
        serde_json::from_str(raw).map_err(LabelKitError::ResultParse)?;
    Ok(AnnotationOutcome {
        labels: value.label,
        meta: value.meta,
        key: value.key,
    })
}
