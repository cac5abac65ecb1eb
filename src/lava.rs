//! Lava lamp scene planning.
//!
//! A [`Scene`] is everything the DOM layer needs to paint the background:
//! the container color and one [`Circle`] per resolved circle color. Planning
//! is pure; painting happens in the wasm glue.

use fastrand::Rng;

use crate::color::Rgb;
use crate::config::LavaLampConfig;
use crate::geometry::{Circle, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub background: Rgb,
    pub circles: Vec<Circle>,
}

impl Scene {
    /// Resolves colors and samples fresh geometry for every circle.
    pub fn plan(config: &LavaLampConfig, viewport: Viewport, rng: &mut Rng) -> Self {
        let count = match config.colors.available() {
            Some(available) => config.circle_count.min(available),
            None => config.circle_count,
        };
        let scheme = config.colors.resolve(count);
        let circles = scheme
            .circles
            .into_iter()
            .map(|color| Circle::sample(viewport, color, rng))
            .collect();
        Self {
            background: scheme.background,
            circles,
        }
    }
}
