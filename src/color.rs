use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.6);
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
// Composition class → Color32
// ---------------------------------------------------------------------------

/// Assigns each composition class in the current result set its own tint.
#[derive(Debug, Clone, Default)]
pub struct ClassColors {
    mapping: BTreeMap<String, Color32>,
}

impl ClassColors {
    pub fn new<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: BTreeSet<&str> = classes.into_iter().collect();
        let mapping = unique
            .iter()
            .zip(generate_palette(unique.len()))
            .map(|(class, color)| (class.to_string(), color))
            .collect();
        Self { mapping }
    }

    pub fn color_for(&self, class: &str) -> Color32 {
        self.mapping.get(class).copied().unwrap_or(Color32::GRAY)
    }
}
