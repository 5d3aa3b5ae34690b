//! Widget payload construction and result unmarshaling.
//!
//! The browser widget is an external collaborator: this module builds the
//! JSON payload each labeling tool sends to it and parses the JSON the
//! widget posts back. The payload field names are the wire contract with
//! the widget runtime and are preserved verbatim.
//!
//! Three tools share the vocabulary in [`ui`]:
//!
//! - [`detection`]: bounding boxes with labels, ids, and metadata
//! - [`annotation`]: whole-image classification and metadata editing
//! - [`segmentation`]: boolean masks, optionally emitting new boxes

pub mod annotation;
pub mod colormap;
pub mod detection;
pub mod segmentation;
pub mod ui;

/// Fits a per-item companion list to the item count: entries beyond `len`
/// are dropped, missing entries are back-filled from `fill` (called with the
/// absolute index).
///
/// Mismatched companion lists are accepted silently rather than rejected;
/// see DESIGN.md for the policy discussion.
pub(crate) fn fit_to_len<T>(mut items: Vec<T>, len: usize, mut fill: impl FnMut(usize) -> T) -> Vec<T> {
    if items.len() > len {
        items.truncate(len);
    } else {
        for index in items.len()..len {
            items.push(fill(index));
        }
    }
    items
}

/// The widget reports its instance key as a decimal string; older runtimes
/// sent a bare number. Accept both.
pub(crate) fn de_widget_key<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WidgetKey {
        Number(u64),
        Text(String),
    }

    match WidgetKey::deserialize(deserializer)? {
        WidgetKey::Number(n) => Ok(n),
        WidgetKey::Text(s) => s.parse::<u64>().map_err(serde::de::Error::custom),
    }
}
