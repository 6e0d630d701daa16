use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

const SATURATION: f32 = 0.75;
const LIGHTNESS: f32 = 0.55;

/// `n` hues spaced evenly around the colour wheel, starting at red.
pub fn hue_wheel(n: usize) -> Vec<Color32> {
    let step = 360.0 / n.max(1) as f32;
    (0..n)
        .map(|i| {
            let float: Srgb = Hsl::new(i as f32 * step, SATURATION, LIGHTNESS).into_color();
            let rgb: Srgb<u8> = float.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sweep colours: file position → Color32
// ---------------------------------------------------------------------------

/// One colour per sweep, keyed by the sweep's position in the file so the
/// legend order does not affect colouring.
#[derive(Debug, Clone)]
pub struct SweepColors {
    palette: Vec<Color32>,
    default_color: Color32,
}

impl SweepColors {
    pub fn new(sweep_count: usize) -> Self {
        SweepColors {
            palette: hue_wheel(sweep_count),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, sweep_index: usize) -> Color32 {
        self.palette
            .get(sweep_index)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wheel_has_distinct_colours() {
        let p = hue_wheel(6);
        assert_eq!(p.len(), 6);
        for i in 0..p.len() {
            for j in i + 1..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(hue_wheel(0).is_empty());
        // hue 0 is red
        assert!(p[0].r() > p[0].g() && p[0].g() == p[0].b());
    }

    #[test]
    fn out_of_range_sweep_gets_default() {
        let colors = SweepColors::new(6);
        assert_eq!(colors.color_for(6), Color32::GRAY);
        assert_eq!(colors.color_for(0), hue_wheel(6)[0]);
    }
}
