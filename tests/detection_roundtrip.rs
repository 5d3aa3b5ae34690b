//! End-to-end simulation of the detection tool: build a payload, echo it
//! back the way the widget runtime reports edits, and check the boxes come
//! home in the caller's original format.

use labelkit::geometry::{BBox, BoxFormat, ImageExtent, Layout};
use labelkit::widget::detection::{
    build_detection_payload, parse_detection_result, DetectionOptions,
};
use serde_json::json;

const EPS: f64 = 1e-6;

fn options_with_boxes(format: BoxFormat, boxes: Vec<BBox>) -> DetectionOptions {
    let mut opts = DetectionOptions::new(
        "media/wildlife.png",
        ImageExtent::new(700, 467).unwrap(),
    );
    opts.label_list = vec![
        "deer".to_string(),
        "human".to_string(),
        "penguin".to_string(),
    ];
    opts.boxes = boxes;
    opts.box_format = format;
    opts.box_labels = vec![2, 0];
    opts
}

/// Boxes for each layout that describe the same two regions.
fn boxes_in(format: BoxFormat, extent: &ImageExtent) -> Vec<BBox> {
    let regions = [
        BBox::new(10.0, 20.0, 100.0, 150.0),
        BBox::new(250.0, 120.0, 80.0, 40.0),
    ];
    regions
        .iter()
        .map(|b| b.from_layout(Layout::Xywh, format, extent))
        .collect()
}

/// Pretends to be the widget runtime: echoes every payload entry back
/// unchanged, in the result shape the widget posts.
fn echo_widget_result(payload_json: &serde_json::Value) -> String {
    let label_list: Vec<String> = payload_json["label_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();

    let entries: Vec<serde_json::Value> = payload_json["bbox_info"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            let label = entry["label"].as_str().unwrap();
            let label_id = label_list.iter().position(|l| l == label).unwrap();
            json!({
                "bbox": entry["bbox"],
                "id": entry["id"],
                "label_id": label_id,
                "label": label,
                "meta": entry["meta"],
                "additional_data": entry["additional_data"],
            })
        })
        .collect();

    json!({ "bbox": entries, "key": "1" }).to_string()
}

#[test]
fn unedited_boxes_roundtrip_in_all_six_formats() {
    let extent = ImageExtent::new(700, 467).unwrap();

    for layout in Layout::ALL {
        for relative in [false, true] {
            let format = BoxFormat::new(layout, relative);
            let boxes = boxes_in(format, &extent);
            let opts = options_with_boxes(format, boxes.clone());

            let (payload, geometry) = build_detection_payload(&opts).unwrap();
            let payload_json = serde_json::to_value(&payload).unwrap();
            let raw = echo_widget_result(&payload_json);

            let outcome = parse_detection_result(&raw, format, &geometry).unwrap();
            assert_eq!(outcome.key, 1);
            assert_eq!(outcome.box_format, format);
            assert_eq!(outcome.items.len(), boxes.len());

            for (item, original) in outcome.items.iter().zip(&boxes) {
                assert!(
                    item.bbox.approx_eq(original, EPS),
                    "format {format}: {original:?} came back as {:?}",
                    item.bbox
                );
            }
        }
    }
}

#[test]
fn labels_ids_and_metadata_survive_the_trip() {
    let format = BoxFormat::absolute(Layout::Xywh);
    let extent = ImageExtent::new(700, 467).unwrap();
    let mut opts = options_with_boxes(format, boxes_in(format, &extent));
    opts.box_ids = vec!["stag".to_string()];
    opts.metadata = vec![vec!["seen at dawn".to_string()]];

    let (payload, geometry) = build_detection_payload(&opts).unwrap();
    let payload_json = serde_json::to_value(&payload).unwrap();
    let outcome =
        parse_detection_result(&echo_widget_result(&payload_json), format, &geometry).unwrap();

    assert_eq!(outcome.items[0].id, "stag");
    assert_eq!(outcome.items[0].label, "penguin");
    assert_eq!(outcome.items[0].label_index, 2);
    assert_eq!(outcome.items[0].meta, vec!["seen at dawn".to_string()]);

    // Back-filled companions for the second box.
    assert_eq!(outcome.items[1].id, "bbox-1");
    assert_eq!(outcome.items[1].label, "deer");
    assert!(outcome.items[1].meta.is_empty());
}

#[test]
fn outcome_reports_both_extents() {
    let format = BoxFormat::absolute(Layout::Xywh);
    let extent = ImageExtent::new(700, 467).unwrap();
    let opts = options_with_boxes(format, boxes_in(format, &extent));

    let (payload, geometry) = build_detection_payload(&opts).unwrap();
    let payload_json = serde_json::to_value(&payload).unwrap();
    let outcome =
        parse_detection_result(&echo_widget_result(&payload_json), format, &geometry).unwrap();

    assert_eq!(outcome.image_size.as_array(), [700, 467]);
    assert_eq!(outcome.display_size.as_array(), [512, 342]);
}
