use std::collections::BTreeMap;

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
            let hsl = Hsl::new(hue, 0.75, 0.5);
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
// Color mapping: selected SOC code → Color32
// ---------------------------------------------------------------------------

/// One colour per selected occupation, shared by the CDF and PDF charts so
/// a given occupation has the same colour in both.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Assign colours in selection order.
    pub fn new(codes: &[String]) -> Self {
        let palette = generate_palette(codes.len());
        let mapping = codes.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    pub fn color_for(&self, code: &str) -> Color32 {
        self.mapping.get(code).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(6);
        assert_eq!(colours.len(), 6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_grey() {
        let map = ColorMap::new(&["15-1252".to_string()]);
        assert_ne!(map.color_for("15-1252"), Color32::GRAY);
        assert_eq!(map.color_for("11-1011"), Color32::GRAY);
    }
}
