use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::presenter::ChartKind;

// ---------------------------------------------------------------------------
// Bar colours
// ---------------------------------------------------------------------------

/// Base hue per chart: blue for contaminants, green for commodities,
/// orange for level types.
fn base_hue(kind: ChartKind) -> f32 {
    match kind {
        ChartKind::Contaminants => 204.0,
        ChartKind::Commodities => 120.0,
        ChartKind::LevelTypes | ChartKind::LevelTypesByContaminant => 28.0,
        ChartKind::Heatmap => 262.0,
    }
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Accent colour of a chart kind.
pub fn accent(kind: ChartKind) -> Color32 {
    hsl_to_color32(Hsl::new(base_hue(kind), 0.70, 0.53))
}

/// `n` shades of the chart's hue, darkest first, so neighbouring bars stay
/// distinguishable.
pub fn bar_palette(kind: ChartKind, n: usize) -> Vec<Color32> {
    if n <= 1 {
        return vec![accent(kind); n];
    }
    let hue = base_hue(kind);
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            hsl_to_color32(Hsl::new(hue, 0.70, 0.40 + 0.25 * t))
        })
        .collect()
}

/// `n` visually distinct colours, evenly spaced hues, for stacked layers.
pub fn layer_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = base_hue(ChartKind::Contaminants) + (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue % 360.0, 0.70, 0.52))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Heatmap scale
// ---------------------------------------------------------------------------

/// Cell colour for `count` on a `0..=max` scale: pale violet through teal to
/// dark green-yellow.
pub fn heat(count: usize, max: usize) -> Color32 {
    let t = if max == 0 {
        0.0
    } else {
        count as f32 / max as f32
    };
    hsl_to_color32(Hsl::new(
        base_hue(ChartKind::Heatmap) - 190.0 * t,
        0.55 + 0.15 * t,
        0.92 - 0.55 * t,
    ))
}

/// Black or white, whichever reads better on `fill`.
pub fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
