//! Compile-time configuration for both effects.

use tracing::Level;

use crate::color::Rgb;
use crate::palette::ColorSource;

pub const CIRCLE_COUNT: usize = 4;

pub const PALETTE: [Rgb; 6] = [
    Rgb::new(0x2e, 0x8b, 0x57),
    Rgb::new(0x12, 0x35, 0x24),
    Rgb::new(0x22, 0x8b, 0x22),
    Rgb::new(0x6b, 0x8e, 0x23),
    Rgb::new(0x00, 0x64, 0x00),
    Rgb::new(0x55, 0x6b, 0x2f),
];

/// Sea green; used instead of [`PALETTE`] when `USE_PALETTE` is off.
pub const BASE_COLOR: Rgb = Rgb::new(0x2e, 0x8b, 0x57);
pub const USE_PALETTE: bool = true;

pub const TITLES: [&str; 4] = [
    "Data Analyst",
    "Fullstack Developer",
    "Business Operations Strategist",
    "Machine Learning Enthusiast",
];

pub const SHUFFLE_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%&*";

#[derive(Clone, Debug)]
pub struct LavaLampConfig {
    pub container_id: &'static str,
    pub circle_count: usize,
    pub colors: ColorSource,
    /// Seconds per full circle rotation.
    pub rotation_period_secs: f64,
    pub resize_debounce_ms: u32,
}

impl Default for LavaLampConfig {
    fn default() -> Self {
        let colors = if USE_PALETTE {
            ColorSource::Palette(PALETTE.to_vec())
        } else {
            ColorSource::BaseColor(BASE_COLOR)
        };
        Self {
            container_id: "lava-lamp-container",
            circle_count: CIRCLE_COUNT,
            colors,
            rotation_period_secs: 25.0,
            resize_debounce_ms: 250,
        }
    }
}

/// Millisecond timings of one title transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleTimings {
    /// How long a title stays on screen before the next transition.
    pub idle_ms: u32,
    pub shuffle_ticks: u32,
    pub shuffle_interval_ms: u32,
    /// Random flashes per cell before it locks.
    pub resolve_flashes: u32,
    pub resolve_interval_ms: u32,
    /// Delay between the start of consecutive cells' resolution.
    pub stagger_ms: u32,
    pub highlight_ms: u32,
    pub settle_ms: u32,
}

impl Default for CycleTimings {
    fn default() -> Self {
        Self {
            idle_ms: 3000,
            shuffle_ticks: 10,
            shuffle_interval_ms: 60,
            resolve_flashes: 4,
            resolve_interval_ms: 50,
            stagger_ms: 25,
            highlight_ms: 400,
            settle_ms: 500,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SlotMachineConfig {
    pub element_id: &'static str,
    /// Looked up when no element carries `element_id`.
    pub fallback_selector: &'static str,
    pub titles: Vec<String>,
    pub alphabet: String,
    /// The container is fixed to this string's rendered width.
    pub reference_title: &'static str,
    /// Delay before the first width measurement, giving fonts time to load.
    pub measure_delay_ms: u32,
    pub timings: CycleTimings,
}

impl Default for SlotMachineConfig {
    fn default() -> Self {
        Self {
            element_id: "slot-machine-text",
            fallback_selector: ".Iam b",
            titles: TITLES.iter().map(|t| t.to_string()).collect(),
            alphabet: SHUFFLE_ALPHABET.to_owned(),
            reference_title: "Data Analyst",
            measure_delay_ms: 100,
            timings: CycleTimings::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LoggingConfig {
    pub max_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let max_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        Self { max_level }
    }
}
