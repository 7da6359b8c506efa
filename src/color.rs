use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: series name → Color32
// ---------------------------------------------------------------------------

/// Maps series names (countries) to distinct colours.
///
/// Built from the full country list so a country keeps its colour while the
/// selection changes.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl SeriesColors {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        let names: Vec<&String> = names.into_iter().collect();
        let palette = generate_palette(names.len());
        let mapping = names
            .into_iter()
            .zip(palette)
            .map(|(name, c)| (name.clone(), c))
            .collect();

        SeriesColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scale for values
// ---------------------------------------------------------------------------

/// ColorBrewer BuPu, light to dark.
const BUPU: [(u8, u8, u8); 9] = [
    (0xf7, 0xfc, 0xfd),
    (0xe0, 0xec, 0xf4),
    (0xbf, 0xd3, 0xe6),
    (0x9e, 0xbc, 0xda),
    (0x8c, 0x96, 0xc6),
    (0x8c, 0x6b, 0xb1),
    (0x88, 0x41, 0x9d),
    (0x81, 0x0f, 0x7c),
    (0x4d, 0x00, 0x4b),
];

/// Maps values in `[min, max]` onto the BuPu ramp; missing values are grey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
}

impl ValueScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` on the ramp, in `[0, 1]`.
    pub fn position(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: Option<f64>) -> Color32 {
        match value {
            Some(v) => bupu(self.position(v)),
            None => Color32::from_gray(200),
        }
    }
}

/// Interpolate the BuPu ramp in linear RGB at `t ∈ [0, 1]`.
pub fn bupu(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0) * (BUPU.len() - 1) as f32;
    let lo = (t.floor() as usize).min(BUPU.len() - 2);
    let frac = t - lo as f32;

    let a = stop(BUPU[lo]);
    let b = stop(BUPU[lo + 1]);
    let mixed: Srgb<u8> = Srgb::from_linear(a.mix(b, frac));
    Color32::from_rgb(mixed.red, mixed.green, mixed.blue)
}

fn stop((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_linear()
}
