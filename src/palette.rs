//! Color selection for the lava lamp background.

use crate::color::{Hsl, Rgb};

/// Hue step between consecutive circles generated from a base color.
pub const HUE_STEP_DEG: f64 = 30.0;
/// Saturation and lightness of generated circle colors.
pub const BRIGHT_SATURATION: f64 = 70.0;
pub const BRIGHT_LIGHTNESS: f64 = 60.0;
/// Lightness of the background derived from a base color.
pub const DARK_LIGHTNESS: f64 = 20.0;
/// Background used with an explicit palette.
pub const PALETTE_BACKGROUND: Rgb = Rgb::new(0x12, 0x35, 0x24);

/// Where circle colors come from.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorSource {
    /// Use these colors verbatim, in order.
    Palette(Vec<Rgb>),
    /// Derive bright hue-rotated variants and a dark background from one color.
    BaseColor(Rgb),
}

/// Resolved colors for one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Scheme {
    pub background: Rgb,
    pub circles: Vec<Rgb>,
}

impl ColorSource {
    /// How many circle colors this source can supply, `None` if unbounded.
    pub fn available(&self) -> Option<usize> {
        match self {
            ColorSource::Palette(colors) => Some(colors.len()),
            ColorSource::BaseColor(_) => None,
        }
    }

    /// Resolves `count` circle colors (fewer if a palette runs out).
    pub fn resolve(&self, count: usize) -> Scheme {
        match self {
            ColorSource::Palette(colors) => Scheme {
                background: PALETTE_BACKGROUND,
                circles: colors.iter().copied().take(count).collect(),
            },
            ColorSource::BaseColor(base) => Scheme {
                background: dark_variant(*base),
                circles: bright_variants(*base, count),
            },
        }
    }
}

/// `count` bright colors rotating the base hue in fixed steps.
pub fn bright_variants(base: Rgb, count: usize) -> Vec<Rgb> {
    let hue = base.to_hsl().h;
    (0..count)
        .map(|i| {
            let h = (hue + i as f64 * HUE_STEP_DEG) % 360.0;
            Hsl::new(h, BRIGHT_SATURATION, BRIGHT_LIGHTNESS).to_rgb()
        })
        .collect()
}

/// The base color's hue and saturation at background lightness.
pub fn dark_variant(base: Rgb) -> Rgb {
    base.to_hsl().with_lightness(DARK_LIGHTNESS).to_rgb()
}
