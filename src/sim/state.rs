//! Field state and particle types
//!
//! Everything the animator mutates between frames lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lerp_range;
use crate::renderer::Rgba;

/// Tunable parameters of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Persistent star population (fixed for the lifetime of a field)
    pub star_count: usize,
    /// Per-frame chance of spawning a shooting star (0 disables)
    pub spawn_probability: f32,
    pub radius_range: (f32, f32),
    pub drift_range: (f32, f32),
    pub twinkle_range: (f32, f32),
    /// Clamp applied to star opacity after every twinkle step
    pub opacity_range: (f32, f32),
    pub trail_length_range: (f32, f32),
    pub shooting_speed_range: (f32, f32),
    /// Shooting star travel angle (radians, y down)
    pub shooting_angle: f32,
    /// Opacity a shooting star loses per frame
    pub fade_step: f32,
    pub trail_width: f32,
    /// Overlay painted over the whole surface every frame
    pub overlay: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            spawn_probability: SPAWN_PROBABILITY,
            radius_range: (STAR_RADIUS_MIN, STAR_RADIUS_MAX),
            drift_range: (STAR_DRIFT_MIN, STAR_DRIFT_MAX),
            twinkle_range: (STAR_TWINKLE_MIN, STAR_TWINKLE_MAX),
            opacity_range: (STAR_MIN_OPACITY, STAR_MAX_OPACITY),
            trail_length_range: (TRAIL_LENGTH_MIN, TRAIL_LENGTH_MAX),
            shooting_speed_range: (SHOOTING_SPEED_MIN, SHOOTING_SPEED_MAX),
            shooting_angle: SHOOTING_ANGLE,
            fade_step: SHOOTING_FADE_STEP,
            trail_width: TRAIL_WIDTH,
            // Space-like dark blue tint
            overlay: Rgba::new(0, 0, 15, 0.4),
        }
    }
}

/// A long-lived background star
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Downward drift per frame
    pub drift: f32,
    pub opacity: f32,
    /// Opacity step per frame (sign picked at random each frame)
    pub twinkle: f32,
}

impl Star {
    /// Star at a uniformly random spot on a `width` x `height` surface
    pub fn random(rng: &mut Pcg32, width: f32, height: f32, config: &FieldConfig) -> Self {
        let (r0, r1) = config.radius_range;
        let (d0, d1) = config.drift_range;
        let (t0, t1) = config.twinkle_range;
        Self {
            pos: Vec2::new(
                lerp_range(0.0, width, rng.random()),
                lerp_range(0.0, height, rng.random()),
            ),
            radius: lerp_range(r0, r1, rng.random()),
            drift: lerp_range(d0, d1, rng.random()),
            opacity: rng.random(),
            twinkle: lerp_range(t0, t1, rng.random()),
        }
    }
}

/// A short-lived streak that fades out along its path
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Head of the trail
    pub pos: Vec2,
    pub length: f32,
    pub speed: f32,
    pub angle: f32,
    /// 1.0 at spawn, removed once it reaches 0
    pub opacity: f32,
}

impl ShootingStar {
    /// Spawn somewhere in the top half of the surface
    pub fn random(rng: &mut Pcg32, width: f32, height: f32, config: &FieldConfig) -> Self {
        let (l0, l1) = config.trail_length_range;
        let (s0, s1) = config.shooting_speed_range;
        Self {
            pos: Vec2::new(
                lerp_range(0.0, width, rng.random()),
                lerp_range(0.0, height * 0.5, rng.random()),
            ),
            length: lerp_range(l0, l1, rng.random()),
            speed: lerp_range(s0, s1, rng.random()),
            angle: config.shooting_angle,
            opacity: 1.0,
        }
    }

    /// End of the trail, `length` behind the head
    pub fn tail(&self) -> Vec2 {
        self.pos - crate::direction(self.angle) * self.length
    }
}

/// Complete animator state
#[derive(Debug, Clone)]
pub struct FieldState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub config: FieldConfig,
    /// Current surface size in pixels
    pub width: f32,
    pub height: f32,
    /// Persistent stars (count never changes)
    pub stars: Vec<Star>,
    /// Active shooting stars, oldest first
    pub shooting_stars: Vec<ShootingStar>,
    /// Frames simulated so far
    pub frame: u64,
    /// Shooting stars spawned so far
    pub spawned: u64,
    pub(crate) rng: Pcg32,
}

impl FieldState {
    /// Populate a field for a surface of the given size
    pub fn new(width: f32, height: f32, config: FieldConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..config.star_count)
            .map(|_| Star::random(&mut rng, width, height, &config))
            .collect();

        Self {
            seed,
            config,
            width,
            height,
            stars,
            shooting_stars: Vec::new(),
            frame: 0,
            spawned: 0,
            rng,
        }
    }

    /// Track a new surface size
    ///
    /// Existing particles keep their absolute positions; only future wrap
    /// and spawn bounds change.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Add a shooting star directly, bypassing the spawn roll
    pub fn inject_shooting_star(&mut self, star: ShootingStar) {
        self.shooting_stars.push(star);
    }
}
