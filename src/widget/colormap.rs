//! Deterministic label colors.
//!
//! Labels are assigned evenly spaced hues over a red-to-violet rainbow
//! sweep, rendered as `#rrggbb` strings for the widget's stroke colors.

use std::collections::BTreeMap;

/// Assigns each label a distinct hex color.
///
/// Label `i` of `n` samples the sweep at `i / n`, so adding labels at the
/// end leaves earlier colors stable for the same list length.
pub fn label_colors(labels: &[String]) -> BTreeMap<String, String> {
    let n = labels.len();
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.clone(), rainbow_hex(i as f64 / n as f64)))
        .collect()
}

/// Samples the rainbow sweep at `fraction` in [0, 1).
fn rainbow_hex(fraction: f64) -> String {
    // Hue capped at 300 degrees so the sweep ends at violet instead of
    // wrapping back to red.
    let (r, g, b) = hsv_to_rgb(fraction * 300.0, 1.0, 1.0);
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn hsv_to_rgb(hue_degrees: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let c = value * saturation;
    let h = hue_degrees / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = value - c;
    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
