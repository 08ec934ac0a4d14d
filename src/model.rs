//! Core data model for the pick wheel.
//! Everything here is plain data with no browser dependency.

use serde::{Deserialize, Serialize};

/// Delay between `start()` and the forced switch into the fade.
pub const SPIN_DURATION_MS: u32 = 5000;
/// Opacity removed on every `Fading` tick.
pub const FADE_STEP: f64 = 0.01;

const VIEWPORT_FRACTION: f64 = 0.8;
const RADIUS_FRACTION: f64 = 0.45;
/// Distance of a ring tile from the centre, relative to the radius.
pub const RING_DISTANCE: f64 = 0.7;
/// Side of a ring tile, relative to `size`.
pub const TILE_FRACTION: f64 = 0.15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WheelState {
    /// Initial ring, nothing picked yet.
    #[default]
    Start,
    Spinning,
    StartFade,
    Fading,
    PickVictim,
    /// Victim is displayed.
    Stopped,
}

impl WheelState {
    pub const ALL: [WheelState; 6] = [
        WheelState::Start,
        WheelState::Spinning,
        WheelState::StartFade,
        WheelState::Fading,
        WheelState::PickVictim,
        WheelState::Stopped,
    ];

    /// States in which a new spin may begin.
    pub fn is_idle(self) -> bool {
        matches!(self, WheelState::Start | WheelState::Stopped)
    }
}

/// Whether the trigger control should accept a click.
pub fn trigger_enabled(pool_len: usize, state: WheelState) -> bool {
    pool_len > 0 && state.is_idle()
}

/// Canvas opacity during the fade. Nominally in `[0, 1]`, the last fading
/// step takes it just below zero.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FadeLevel(f64);

impl FadeLevel {
    pub const OPAQUE: FadeLevel = FadeLevel(1.0);

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn step_down(&mut self, step: f64) {
        self.0 -= step;
    }

    pub fn is_exhausted(self) -> bool {
        self.0 < 0.0
    }
}

impl Default for FadeLevel {
    fn default() -> Self {
        Self::OPAQUE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn geometry(self) -> Geometry {
        Geometry::from_viewport(self)
    }
}

/// Wheel dimensions derived from the viewport. Never stored, always
/// recomputed from the current `Viewport`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Canvas width and height.
    pub size: f64,
    pub radius: f64,
}

impl Geometry {
    pub fn from_viewport(viewport: Viewport) -> Self {
        let size = (VIEWPORT_FRACTION * viewport.height).min(VIEWPORT_FRACTION * viewport.width);
        Self {
            size,
            radius: RADIUS_FRACTION * size,
        }
    }

    pub fn half(self) -> f64 {
        self.size / 2.0
    }

    pub fn tile_side(self) -> f64 {
        self.size * TILE_FRACTION
    }

    pub fn ring_distance(self) -> f64 {
        self.radius * RING_DISTANCE
    }
}

/// Rotation of the first ring tile in degrees, a pure function of the clock.
pub fn ring_offset_degrees(timestamp_ms: f64) -> f64 {
    (timestamp_ms / 4.0) % 360.0
}

/// Serializable view of an engine, used for debug logging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    pub state: WheelState,
    pub pool_len: usize,
    pub has_victim: bool,
    pub fade: f64,
}
