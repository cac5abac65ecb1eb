//! Circle placement inside the viewport.

use fastrand::Rng;

use crate::color::Rgb;

/// Radius as a fraction of the viewport width, sampled from `[MIN, MAX)`.
pub const RADIUS_FACTOR_MIN: f64 = 0.15;
pub const RADIUS_FACTOR_MAX: f64 = 0.30;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub color: Rgb,
    /// Starting rotation angle in degrees, `[0, 360)`.
    pub phase_deg: f64,
}

impl Circle {
    /// Samples a circle whose bounding box lies inside `viewport`.
    ///
    /// The radius is clamped to half of the smaller viewport side when the
    /// sampled diameter would not fit.
    pub fn sample(viewport: Viewport, color: Rgb, rng: &mut Rng) -> Self {
        let factor = RADIUS_FACTOR_MIN + rng.f64() * (RADIUS_FACTOR_MAX - RADIUS_FACTOR_MIN);
        let radius = (viewport.width * factor).min(viewport.width.min(viewport.height) / 2.0);

        let center_x = radius + rng.f64() * (viewport.width - 2.0 * radius);
        let center_y = radius + rng.f64() * (viewport.height - 2.0 * radius);

        Self {
            radius,
            center_x,
            center_y,
            color,
            phase_deg: rng.f64() * 360.0,
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn left(&self) -> f64 {
        self.center_x - self.radius
    }

    pub fn top(&self) -> f64 {
        self.center_y - self.radius
    }

    /// Negative CSS animation delay that starts the rotation at `phase_deg`.
    pub fn animation_delay_secs(&self, period_secs: f64) -> f64 {
        -(self.phase_deg / 360.0 * period_secs)
    }

    /// Bounding box containment, tolerant of float error at the far edges.
    pub fn fits_in(&self, viewport: Viewport) -> bool {
        const EPS: f64 = 1e-9;
        self.left() >= -EPS
            && self.top() >= -EPS
            && self.left() + self.diameter() <= viewport.width + EPS
            && self.top() + self.diameter() <= viewport.height + EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(0x22, 0x8b, 0x22);

    #[test]
    fn radius_tracks_viewport_width() {
        let mut rng = Rng::with_seed(3);
        let viewport = Viewport::new(800.0, 2000.0);
        for _ in 0..200 {
            let c = Circle::sample(viewport, GREEN, &mut rng);
            assert!(c.radius >= 800.0 * RADIUS_FACTOR_MIN);
            assert!(c.radius <= 800.0 * RADIUS_FACTOR_MAX);
            assert!(c.fits_in(viewport), "{c:?}");
        }
    }

    #[test]
    fn wide_viewport_clamps_radius() {
        let mut rng = Rng::with_seed(11);
        let viewport = Viewport::new(2000.0, 300.0);
        for _ in 0..200 {
            let c = Circle::sample(viewport, GREEN, &mut rng);
            assert!(c.radius <= 150.0);
            assert!(c.fits_in(viewport), "{c:?}");
        }
    }

    #[test]
    fn landscape_radius_is_pinned_to_half_height() {
        let mut rng = Rng::with_seed(1366);
        let viewport = Viewport::new(1366.0, 768.0);
        let mut clamped = 0;
        for _ in 0..2_000 {
            let c = Circle::sample(viewport, GREEN, &mut rng);
            assert!(c.radius <= 384.0, "{c:?}");
            assert!(c.radius >= 1366.0 * RADIUS_FACTOR_MIN, "{c:?}");
            assert!(c.fits_in(viewport), "{c:?}");
            if c.radius == 384.0 {
                clamped += 1;
            }
        }
        // factors above 384/1366 (~0.281) all land on the clamp
        assert!(clamped > 100, "clamped={clamped}");
        assert!(clamped < 500, "clamped={clamped}");
    }

    #[test]
    fn delay_is_proportional_to_phase() {
        let c = Circle {
            radius: 10.0,
            center_x: 10.0,
            center_y: 10.0,
            color: GREEN,
            phase_deg: 90.0,
        };
        assert_eq!(c.animation_delay_secs(25.0), -6.25);
    }

    #[test]
    fn empty_viewport_yields_degenerate_circle() {
        let mut rng = Rng::with_seed(1);
        let c = Circle::sample(Viewport::new(0.0, 0.0), GREEN, &mut rng);
        assert_eq!(c.radius, 0.0);
        assert!(c.fits_in(Viewport::new(0.0, 0.0)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod props {
        use super::*;
        use proptest::prelude::*;
        use fastrand::Rng;

        proptest! {
            #[test]
            fn circle_stays_inside(
                w in 1.0f64..4000.0,
                h in 1.0f64..4000.0,
                seed in any::<u64>(),
            ) {
                let viewport = Viewport::new(w, h);
                let c = Circle::sample(viewport, GREEN, &mut Rng::with_seed(seed));
                prop_assert!(c.fits_in(viewport), "{:?}", c);
                prop_assert!((0.0..360.0).contains(&c.phase_deg));
            }
        }
    }
}
