//! Detection tool: bounding boxes with labels, ids, and metadata.
//!
//! The payload pipeline resolves the caller's tagged boxes to absolute XYWH
//! (the widget's native layout), scales them into display space, and pairs
//! each with its label name, color, and companion data. The result pipeline
//! runs the same steps in reverse so callers get boxes back in the exact
//! format they supplied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::colormap::label_colors;
use super::fit_to_len;
use super::ui::{ClassSelector, DockSide, PanelOptions, PanelSide, UI_WIDTH_WIDE};
use crate::display::DisplayGeometry;
use crate::error::LabelKitError;
use crate::geometry::{BBox, BoxFormat, ImageExtent, Layout};

/// Caller-facing configuration for the detection tool.
#[derive(Clone, Debug)]
pub struct DetectionOptions {
    /// Host-resolved URL the widget loads the image from.
    pub image_url: String,
    /// Original pixel extent of the image.
    pub image_extent: ImageExtent,
    /// Frame the display copy is fitted into.
    pub frame: ImageExtent,
    /// Recognized class names.
    pub label_list: Vec<String>,
    /// Boxes, tagged with `box_format`.
    pub boxes: Vec<BBox>,
    pub box_format: BoxFormat,
    /// Companion lists, fitted to the box count.
    pub box_ids: Vec<String>,
    pub box_labels: Vec<usize>,
    pub metadata: Vec<Vec<String>>,
    pub info: Vec<BTreeMap<String, String>>,
    pub read_only: bool,
    pub line_width: f64,
    pub show_box_label: bool,
    pub show_box_info: bool,
    pub ui: PanelOptions,
    pub key: Option<String>,
}

impl DetectionOptions {
    /// Minimal options for an image and its extent; everything else takes
    /// the widget's defaults.
    pub fn new(image_url: impl Into<String>, image_extent: ImageExtent) -> Self {
        Self {
            image_url: image_url.into(),
            image_extent,
            // 512x512 is always a valid extent.
            frame: ImageExtent::new(512, 512).expect("default frame is positive"),
            label_list: Vec::new(),
            boxes: Vec::new(),
            box_format: BoxFormat::absolute(Layout::Xywh),
            box_ids: Vec::new(),
            box_labels: Vec::new(),
            metadata: Vec::new(),
            info: Vec::new(),
            read_only: false,
            line_width: 1.0,
            show_box_label: false,
            show_box_info: false,
            ui: PanelOptions::default(),
            key: None,
        }
    }
}

/// One box entry in the payload, in display-space XYWH.
#[derive(Clone, Debug, Serialize)]
pub struct BoxEntry {
    pub bbox: BBox,
    pub label: String,
    pub meta: Vec<String>,
    pub additional_data: BTreeMap<String, String>,
    pub id: String,
}

/// The JSON document sent to the widget. Field names are the wire contract.
#[derive(Clone, Debug, Serialize)]
pub struct DetectionPayload {
    pub image_url: String,
    pub image_size: [u32; 2],
    pub label_list: Vec<String>,
    pub bbox_info: Vec<BoxEntry>,
    pub color_map: BTreeMap<String, String>,
    pub line_width: f64,
    pub ui_width: u32,
    pub ui_height: u32,
    pub edit_meta: bool,
    pub edit_description: bool,
    pub class_select_type: ClassSelector,
    pub item_editor: bool,
    pub item_selector: bool,
    pub class_select_position: DockSide,
    pub item_editor_position: PanelSide,
    pub item_selector_position: PanelSide,
    pub ui_left_size: u32,
    pub ui_bottom_size: u32,
    pub ui_right_size: u32,
    pub read_only: bool,
    pub bbox_show_label: bool,
    pub bbox_show_additional: bool,
    pub justify_content: &'static str,
    pub label_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Builds the detection payload.
///
/// Fails fast on a label index outside `label_list`; companion lists of the
/// wrong length are fitted to the box count instead.
pub fn build_detection_payload(
    opts: &DetectionOptions,
) -> Result<(DetectionPayload, DisplayGeometry), LabelKitError> {
    let geometry = DisplayGeometry::fit(opts.image_extent, &opts.frame);

    let count = opts.boxes.len();
    let ids = fit_to_len(opts.box_ids.clone(), count, |i| format!("bbox-{i}"));
    let label_indices = fit_to_len(opts.box_labels.clone(), count, |_| 0);
    let metadata = fit_to_len(opts.metadata.clone(), count, |_| Vec::new());
    let info = fit_to_len(opts.info.clone(), count, |_| BTreeMap::new());

    let mut bbox_info = Vec::with_capacity(count);
    for (i, bbox) in opts.boxes.iter().enumerate() {
        let label_index = label_indices[i];
        let label = opts.label_list.get(label_index).cloned().ok_or(
            LabelKitError::LabelIndexOutOfRange {
                index: label_index,
                len: opts.label_list.len(),
            },
        )?;

        let widget_box =
            bbox.into_layout(opts.box_format, Layout::Xywh, &opts.image_extent);

        bbox_info.push(BoxEntry {
            bbox: geometry.to_display(widget_box),
            label,
            meta: metadata[i].clone(),
            additional_data: info[i].clone(),
            id: ids[i].clone(),
        });
    }

    let payload = DetectionPayload {
        image_url: opts.image_url.clone(),
        image_size: geometry.display.as_array(),
        label_list: opts.label_list.clone(),
        bbox_info,
        color_map: label_colors(&opts.label_list),
        line_width: opts.line_width,
        ui_width: 20,
        ui_height: 20,
        edit_meta: opts.ui.edit_meta,
        edit_description: opts.ui.edit_description(),
        class_select_type: opts.ui.class_select_type,
        item_editor: opts.ui.item_editor,
        item_selector: opts.ui.item_selector,
        class_select_position: opts.ui.class_select_position(),
        item_editor_position: opts.ui.item_editor_position(),
        item_selector_position: opts.ui.item_selector_position(),
        ui_left_size: opts.ui.left_width(UI_WIDTH_WIDE),
        ui_bottom_size: opts.ui.bottom_height(UI_WIDTH_WIDE),
        ui_right_size: opts.ui.right_width(UI_WIDTH_WIDE),
        read_only: opts.read_only,
        bbox_show_label: opts.show_box_label,
        bbox_show_additional: opts.show_box_info,
        justify_content: opts.ui.alignment.justify_content(),
        label_type: "detection",
        key: opts.key.clone(),
    };

    Ok((payload, geometry))
}

/// One edited box as the widget reports it, in display-space XYWH.
#[derive(Clone, Debug, Deserialize)]
pub struct RawBoxEntry {
    pub bbox: BBox,
    pub id: String,
    pub label_id: usize,
    pub label: String,
    #[serde(default)]
    pub meta: Vec<String>,
    #[serde(default)]
    pub additional_data: BTreeMap<String, String>,
}

/// The JSON document the widget posts back.
#[derive(Clone, Debug, Deserialize)]
pub struct RawDetectionValue {
    pub bbox: Vec<RawBoxEntry>,
    #[serde(default, deserialize_with = "super::de_widget_key")]
    pub key: u64,
}

/// One edited box, restored to original pixels and the caller's format.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionItem {
    pub bbox: BBox,
    pub id: String,
    pub label_index: usize,
    pub label: String,
    pub meta: Vec<String>,
    pub info: BTreeMap<String, String>,
}

/// The edited state of the detection tool.
#[derive(Clone, Debug)]
pub struct DetectionOutcome {
    pub items: Vec<DetectionItem>,
    pub image_size: ImageExtent,
    pub display_size: ImageExtent,
    pub box_format: BoxFormat,
    pub key: u64,
}

/// Parses the widget's JSON result back into the caller's box format.
pub fn parse_detection_result(
    raw: &str,
    format: BoxFormat,
    geometry: &DisplayGeometry,
) -> Result<DetectionOutcome, LabelKitError> {
    let value: RawDetectionValue =
        serde_json::from_str(raw).map_err(LabelKitError::ResultParse)?;

    let items = value
        .bbox
        .into_iter()
        .map(|entry| {
            let original_px = geometry.to_original(entry.bbox);
            DetectionItem {
                bbox: original_px.from_layout(Layout::Xywh, format, &geometry.original),
                id: entry.id,
                label_index: entry.label_id,
                label: entry.label,
                meta: entry.meta,
                info: entry.additional_data,
            }
        })
        .collect();

    Ok(DetectionOutcome {
        items,
        image_size: geometry.original,
        display_size: geometry.display,
        box_format: format,
        key: value.key,
    })
}
