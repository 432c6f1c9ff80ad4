use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::charts::scatter_matrix::ColorGroup;

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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Continuous gradient for numeric colour columns
// ---------------------------------------------------------------------------

/// Dark purple → teal → yellow, sampled at evenly spaced stops.
const GRADIENT_STOPS: [(u8, u8, u8); 4] = [
    (68, 1, 84),
    (49, 104, 142),
    (53, 183, 121),
    (253, 231, 37),
];

/// Colour at `t ∈ [0, 1]` on the gradient, interpolated in linear RGB.
pub fn gradient(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let segments = (GRADIENT_STOPS.len() - 1) as f32;
    let scaled = t * segments;
    let i = (scaled.floor() as usize).min(GRADIENT_STOPS.len() - 2);
    let local = scaled - i as f32;

    let stop = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = stop(GRADIENT_STOPS[i]).mix(stop(GRADIENT_STOPS[i + 1]), local);
    to_color32(Srgb::from_linear(mixed))
}

// ---------------------------------------------------------------------------
// Color mapping: label → Color32
// ---------------------------------------------------------------------------

/// Maps series labels (vehicle types, manufacturers) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Discrete colours for the given labels, in the given order.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(l, c)| (l.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(self.default_color)
    }
}

/// One colour per scatter-matrix group, indexed like `groups`: gradient
/// positions when the groups come from a numeric column, palette colours
/// otherwise.
pub fn group_colors(groups: &[ColorGroup]) -> Vec<Color32> {
    if !groups.is_empty() && groups.iter().all(|g| g.position.is_some()) {
        groups
            .iter()
            .map(|g| gradient(g.position.unwrap_or(0.0)))
            .collect()
    } else {
        generate_palette(groups.len())
    }
}

/// Same colour with its alpha scaled by `opacity`.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_colours_are_distinct() {
        let colours = generate_palette(6);
        assert_eq!(colours.len(), 6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(gradient(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(gradient(-3.0), gradient(0.0));
    }

    #[test]
    fn test_continuous_groups_get_their_own_colours() {
        let groups: Vec<ColorGroup> = (0..10)
            .map(|b| ColorGroup {
                // Labels may collide; colours must not.
                label: "0 – 0".to_string(),
                position: Some(b as f64 / 9.0),
            })
            .collect();

        let colours = group_colors(&groups);

        assert_eq!(colours.len(), 10);
        assert_eq!(colours[0], gradient(0.0));
        assert_eq!(colours[9], gradient(1.0));
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_discrete_groups_use_palette() {
        let groups = vec![
            ColorGroup {
                label: "ford".to_string(),
                position: None,
            },
            ColorGroup {
                label: "toyota".to_string(),
                position: None,
            },
        ];
        assert_eq!(group_colors(&groups), generate_palette(2));
    }

    #[test]
    fn test_unknown_label_is_gray() {
        let map = ColorMap::new(["ford", "toyota"]);
        assert_ne!(map.color_for("ford"), map.color_for("toyota"));
        assert_eq!(map.color_for("tesla"), Color32::GRAY);
    }
}
