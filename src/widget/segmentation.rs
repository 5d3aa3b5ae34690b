//! Segmentation tool: boolean masks, optionally emitting new boxes.
//!
//! Masks stay in display space end to end (the widget edits the resized
//! copy), so only the auto-segmentation boxes run the geometry pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::colormap::label_colors;
use super::fit_to_len;
use super::ui::{DockSide, PanelOptions, PanelSide, UI_WIDTH_WIDE};
use crate::display::DisplayGeometry;
use crate::error::LabelKitError;
use crate::geometry::{BBox, BoxFormat, ImageExtent, Layout};

/// A boolean pixel mask in row-major order.
pub type Mask = Vec<Vec<bool>>;

/// Caller-facing configuration for the segmentation tool.
#[derive(Clone, Debug)]
pub struct SegmentationOptions {
    pub image_url: String,
    pub image_extent: ImageExtent,
    pub frame: ImageExtent,
    pub label_list: Vec<String>,
    pub masks: Vec<Mask>,
    pub mask_ids: Vec<String>,
    pub mask_labels: Vec<usize>,
    pub metadata: Vec<Vec<String>>,
    pub info: Vec<BTreeMap<String, String>>,
    /// Format newly drawn boxes are reported in (auto-segmentation mode).
    pub box_format: BoxFormat,
    pub read_only: bool,
    pub line_width: f64,
    /// The user draws boxes instead of full masks.
    pub auto_segmentation: bool,
    pub ui: PanelOptions,
    pub key: Option<String>,
}

impl SegmentationOptions {
    /// Minimal options for an image and its extent; everything else takes
    /// the widget's defaults.
    pub fn new(image_url: impl Into<String>, image_extent: ImageExtent) -> Self {
        Self {
            image_url: image_url.into(),
            image_extent,
            frame: ImageExtent::new(512, 512).expect("default frame is positive"),
            label_list: Vec::new(),
            masks: Vec::new(),
            mask_ids: Vec::new(),
            mask_labels: Vec::new(),
            metadata: Vec::new(),
            info: Vec::new(),
            box_format: BoxFormat::absolute(Layout::Xywh),
            read_only: false,
            line_width: 1.0,
            auto_segmentation: false,
            ui: PanelOptions::default(),
            key: None,
        }
    }
}

/// One mask entry in the payload.
#[derive(Clone, Debug, Serialize)]
pub struct MaskEntry {
    pub data: Mask,
    pub label: String,
    pub meta: Vec<String>,
    pub additional_data: BTreeMap<String, String>,
    pub id: String,
}

/// The JSON document sent to the widget. Field names are the wire contract.
#[derive(Clone, Debug, Serialize)]
pub struct SegmentationPayload {
    pub image_url: String,
    pub image_size: [u32; 2],
    pub label_list: Vec<String>,
    pub masks_info: Vec<MaskEntry>,
    pub color_map: BTreeMap<String, String>,
    pub line_width: f64,
    pub ui_width: u32,
    pub ui_height: u32,
    pub edit_meta: bool,
    pub edit_description: bool,
    pub item_editor: bool,
    pub item_selector: bool,
    pub class_select_position: DockSide,
    pub item_editor_position: PanelSide,
    pub item_selector_position: PanelSide,
    pub ui_left_size: u32,
    pub ui_bottom_size: u32,
    pub ui_right_size: u32,
    pub read_only: bool,
    pub auto_seg_mode: bool,
    pub justify_content: &'static str,
    pub label_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Builds the segmentation payload.
pub fn build_segmentation_payload(
    opts: &SegmentationOptions,
) -> Result<(SegmentationPayload, DisplayGeometry), LabelKitError> {
    let geometry = DisplayGeometry::fit(opts.image_extent, &opts.frame);

    let count = opts.masks.len();
    let ids = fit_to_len(opts.mask_ids.clone(), count, |i| format!("mask-{i}"));
    let label_indices = fit_to_len(opts.mask_labels.clone(), count, |_| 0);
    let metadata = fit_to_len(opts.metadata.clone(), count, |_| Vec::new());
    let info = fit_to_len(opts.info.clone(), count, |_| BTreeMap::new());

    let mut masks_info = Vec::with_capacity(count);
    for (i, mask) in opts.masks.iter().enumerate() {
        let label_index = label_indices[i];
        let label = opts.label_list.get(label_index).cloned().ok_or(
            LabelKitError::LabelIndexOutOfRange {
                index: label_index,
                len: opts.label_list.len(),
            },
        )?;

        masks_info.push(MaskEntry {
            data: mask.clone(),
            label,
            meta: metadata[i].clone(),
            additional_data: info[i].clone(),
            id: ids[i].clone(),
        });
    }

    let payload = SegmentationPayload {
        image_url: opts.image_url.clone(),
        image_size: geometry.display.as_array(),
        label_list: opts.label_list.clone(),
        masks_info,
        color_map: label_colors(&opts.label_list),
        line_width: opts.line_width,
        ui_width: 20,
        ui_height: 20,
        edit_meta: opts.ui.edit_meta,
        edit_description: opts.ui.edit_description(),
        item_editor: opts.ui.item_editor,
        item_selector: opts.ui.item_selector,
        class_select_position: opts.ui.class_select_position(),
        item_editor_position: opts.ui.item_editor_position(),
        item_selector_position: opts.ui.item_selector_position(),
        ui_left_size: opts.ui.left_width(UI_WIDTH_WIDE),
        ui_bottom_size: opts.ui.bottom_height(UI_WIDTH_WIDE),
        ui_right_size: opts.ui.right_width(UI_WIDTH_WIDE),
        read_only: opts.read_only,
        auto_seg_mode: opts.auto_segmentation,
        justify_content: opts.ui.alignment.justify_content(),
        label_type: "segmentation",
        key: opts.key.clone(),
    };

    Ok((payload, geometry))
}

/// One newly drawn box as the widget reports it, in display-space XYWH.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNewBox {
    pub bbox: BBox,
    pub label_id: usize,
    pub label: String,
}

/// One edited mask as the widget reports it.
#[derive(Clone, Debug, Deserialize)]
pub struct RawMaskEntry {
    pub data: Mask,
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
pub struct RawSegmentationValue {
    #[serde(default)]
    pub new: Vec<RawNewBox>,
    #[serde(default)]
    pub mask: Vec<RawMaskEntry>,
    #[serde(default, deserialize_with = "super::de_widget_key")]
    pub key: u64,
}

/// A newly drawn box, restored to the caller's format.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBoxItem {
    pub bbox: BBox,
    pub label_index: usize,
    pub label: String,
}

/// One edited mask with its companion data.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskItem {
    pub mask: Mask,
    pub id: String,
    pub label_index: usize,
    pub label: String,
    pub meta: Vec<String>,
    pub info: BTreeMap<String, String>,
}

/// The edited state of the segmentation tool.
#[derive(Clone, Debug)]
pub struct SegmentationOutcome {
    pub masks: Vec<MaskItem>,
    /// Present only in auto-segmentation mode, tagged `box_format`.
    pub new_boxes: Vec<NewBoxItem>,
    pub box_format: BoxFormat,
    /// Masks are reported against the display copy, so this is their size.
    pub mask_size: ImageExtent,
    pub image_size: ImageExtent,
    pub key: u64,
}

/// Parses the widget's JSON result; new boxes go back through the reverse
/// geometry pipeline into the caller's box format.
pub fn parse_segmentation_result(
    raw: &str,
    format: BoxFormat,
    geometry: &DisplayGeometry,
) -> Result<SegmentationOutcome, LabelKitError> {
    let value: RawSegmentationValue =
        serde_json::from_str(raw).map_err(LabelKitError::ResultParse)?;

    let new_boxes = value
        .new
        .into_iter()
        .map(|entry| {
            let original_px = geometry.to_original(entry.bbox);
            NewBoxItem {
                bbox: original_px.from_layout(Layout::Xywh, format, &geometry.original),
                label_index: entry.label_id,
                label: entry.label,
            }
        })
        .collect();

    let masks = value
        .mask
        .into_iter()
        .map(|entry| MaskItem {
            mask: entry.data,
            id: entry.id,
            label_index: entry.label_id,
            label: entry.label,
            meta: entry.meta,
            info: entry.additional_data,
        })
        .collect();

    Ok(SegmentationOutcome {
        masks,
        new_boxes,
        box_format: format,
        mask_size: geometry.display,
        image_size: geometry.original,
        key: value.key,
    })
}
