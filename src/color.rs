use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::TestConfiguration;

/// Colour of the shared target series.
pub const TARGET_COLOR: Color32 = Color32::BLACK;

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
            srgb_to_color32(rgb)
        })
        .collect()
}

fn srgb_to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: run name → Color32
// ---------------------------------------------------------------------------

/// Colours of the estimate series, one per run.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Configured colours win; the remaining runs share an evenly spaced
    /// hue palette.
    pub fn new<'a>(runs: impl IntoIterator<Item = &'a TestConfiguration>) -> Self {
        let runs: Vec<&TestConfiguration> = runs.into_iter().collect();
        let unset = runs.iter().filter(|r| r.color.is_none()).count();
        let mut palette = generate_palette(unset).into_iter();

        let mapping = runs
            .iter()
            .map(|r| {
                let color = match r.color {
                    Some([red, green, blue]) => srgb_to_color32(Srgb::new(red, green, blue)),
                    None => palette.next().unwrap_or(Color32::GRAY),
                };
                (r.name.clone(), color)
            })
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a run.
    pub fn color_for(&self, run: &str) -> Color32 {
        self.mapping
            .get(run)
            .copied()
            .unwrap_or(self.default_color)
    }
}
