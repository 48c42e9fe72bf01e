//! Starfield Hero - animated canvas background for a portfolio page
//!
//! Core modules:
//! - `sim`: Deterministic particle simulation (stars, shooting stars)
//! - `renderer`: Display list and Canvas 2D playback
//! - `platform`: Frame loop state machine and browser mounting
//! - `settings`: Persisted user preferences
//! - `profile`: Portfolio profile data

pub mod platform;
pub mod profile;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{FrameLoop, LoopState};
pub use profile::Profile;
pub use settings::{QualityPreset, Settings};
pub use sim::{FieldConfig, FieldState, tick};

#[cfg(target_arch = "wasm32")]
pub use platform::web::{Starfield, mount};

use glam::Vec2;

/// Field configuration constants
pub mod consts {
    /// Persistent star population
    pub const STAR_COUNT: usize = 250;

    /// Star radius range (pixels)
    pub const STAR_RADIUS_MIN: f32 = 0.0;
    pub const STAR_RADIUS_MAX: f32 = 1.5;
    /// Vertical drift per frame (pixels)
    pub const STAR_DRIFT_MIN: f32 = 0.05;
    pub const STAR_DRIFT_MAX: f32 = 0.25;
    /// Opacity change per frame while twinkling
    pub const STAR_TWINKLE_MIN: f32 = 0.005;
    pub const STAR_TWINKLE_MAX: f32 = 0.025;
    /// Stars never fade below this or exceed 1.0
    pub const STAR_MIN_OPACITY: f32 = 0.3;
    pub const STAR_MAX_OPACITY: f32 = 1.0;

    /// Per-frame chance of a new shooting star
    pub const SPAWN_PROBABILITY: f32 = 0.02;
    /// Shooting star trail length range (pixels)
    pub const TRAIL_LENGTH_MIN: f32 = 100.0;
    pub const TRAIL_LENGTH_MAX: f32 = 400.0;
    /// Shooting star speed range (pixels per frame)
    pub const SHOOTING_SPEED_MIN: f32 = 6.0;
    pub const SHOOTING_SPEED_MAX: f32 = 16.0;
    /// Travel angle: down-right diagonal (screen y grows downward)
    pub const SHOOTING_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    /// Opacity lost per frame
    pub const SHOOTING_FADE_STEP: f32 = 0.02;
    /// Stroke width of a trail
    pub const TRAIL_WIDTH: f32 = 2.0;

    /// Opacity at or below this counts as fully transparent (absorbs f32 drift)
    pub const OPACITY_EPSILON: f32 = 1e-4;
}

/// Unit vector for an angle in screen space (y down)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Map a unit sample in [0, 1) onto [lo, hi) (empty ranges give `lo`)
#[inline]
pub fn lerp_range(lo: f32, hi: f32, t: f32) -> f32 {
    lo + (hi - lo) * t
}
