//! Per-frame simulation step
//!
//! Advances every particle once and records what to draw.

use rand::Rng;

use super::state::{FieldState, ShootingStar};
use crate::consts::OPACITY_EPSILON;
use crate::renderer::{DisplayList, DrawCmd, Rgba};
use crate::{direction, lerp_range};

/// Advance the field by one display frame
///
/// `out` is cleared and refilled with this frame's draw commands: the trail
/// overlay first, then one circle per star, then one trail per shooting star
/// that was alive when the frame began.
pub fn tick(state: &mut FieldState, out: &mut DisplayList) {
    out.clear();
    out.push(DrawCmd::Fill {
        color: state.config.overlay,
    });

    update_stars(state, out);
    update_shooting_stars(state, out);
    maybe_spawn(state);

    state.frame += 1;
}

/// Drift, wrap and twinkle the persistent stars
fn update_stars(state: &mut FieldState, out: &mut DisplayList) {
    let FieldState {
        stars,
        rng,
        config,
        width,
        height,
        ..
    } = state;
    let (min_opacity, max_opacity) = config.opacity_range;

    for star in stars.iter_mut() {
        star.pos.y += star.drift;
        if star.pos.y >= *height {
            star.pos.y = 0.0;
            star.pos.x = lerp_range(0.0, *width, rng.random());
        }

        // Random walk, not a sine: each frame brightens or dims with equal odds
        let step = if rng.random_bool(0.5) {
            star.twinkle
        } else {
            -star.twinkle
        };
        star.opacity = (star.opacity + step).clamp(min_opacity, max_opacity);

        out.push(DrawCmd::Circle {
            center: star.pos,
            radius: star.radius,
            color: Rgba::white(star.opacity),
        });
    }
}

/// Draw, move and fade shooting stars; drop the ones that faded out
fn update_shooting_stars(state: &mut FieldState, out: &mut DisplayList) {
    let FieldState {
        shooting_stars,
        config,
        ..
    } = state;

    shooting_stars.retain_mut(|s| {
        out.push(DrawCmd::Trail {
            head: s.pos,
            tail: s.tail(),
            color: Rgba::white(s.opacity),
            width: config.trail_width,
        });

        s.pos += direction(s.angle) * s.speed;
        s.opacity -= config.fade_step;
        s.opacity > OPACITY_EPSILON
    });
}

/// One roll per frame against the spawn probability
fn maybe_spawn(state: &mut FieldState) {
    let roll: f32 = state.rng.random();
    if roll < state.config.spawn_probability {
        let star = ShootingStar::random(&mut state.rng, state.width, state.height, &state.config);
        state.shooting_stars.push(star);
        state.spawned += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FieldConfig;
    use glam::Vec2;
    use proptest::prelude::*;

    fn quiet_config() -> FieldConfig {
        FieldConfig {
            spawn_probability: 0.0,
            ..Default::default()
        }
    }

    fn run(state: &mut FieldState, frames: usize) -> DisplayList {
        let mut out = DisplayList::new();
        for _ in 0..frames {
            tick(state, &mut out);
        }
        out
    }

    fn test_shooting_star() -> ShootingStar {
        ShootingStar {
            pos: Vec2::new(100.0, 100.0),
            length: 200.0,
            speed: 10.0,
            angle: std::f32::consts::FRAC_PI_4,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_no_spawn_keeps_field_stable() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 42);
        assert_eq!(state.stars.len(), 250);

        run(&mut state, 1000);

        assert!(state.shooting_stars.is_empty());
        assert_eq!(state.spawned, 0);
        assert_eq!(state.stars.len(), 250);
        assert_eq!(state.frame, 1000);
    }

    #[test]
    fn test_shooting_star_expires_after_fifty_frames() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 7);
        state.inject_shooting_star(test_shooting_star());

        run(&mut state, 49);
        assert_eq!(state.shooting_stars.len(), 1);
        assert!(state.shooting_stars[0].opacity > 0.0);

        run(&mut state, 1);
        assert!(state.shooting_stars.is_empty());
    }

    #[test]
    fn test_shooting_star_opacity_strictly_decreases() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 7);
        state.inject_shooting_star(test_shooting_star());

        let mut last = 1.0;
        let mut out = DisplayList::new();
        while let Some(s) = state.shooting_stars.first() {
            assert!(s.opacity <= last);
            last = s.opacity;
            tick(&mut state, &mut out);
            if let Some(next) = state.shooting_stars.first() {
                assert!(next.opacity < last);
            }
        }
        assert!(last > 0.0);
    }

    #[test]
    fn test_shooting_star_moves_along_angle() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 7);
        state.inject_shooting_star(test_shooting_star());

        run(&mut state, 1);

        let s = &state.shooting_stars[0];
        let step = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((s.pos.x - (100.0 + step)).abs() < 0.001);
        assert!((s.pos.y - (100.0 + step)).abs() < 0.001);
        assert!((s.opacity - 0.98).abs() < 0.0001);
    }

    #[test]
    fn test_trail_drawn_before_move() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 7);
        state.inject_shooting_star(test_shooting_star());

        let out = run(&mut state, 1);

        let trail = out
            .iter()
            .find_map(|c| match c {
                DrawCmd::Trail {
                    head,
                    tail,
                    color,
                    width,
                } => Some((*head, *tail, *color, *width)),
                _ => None,
            })
            .expect("trail command");
        let back = 200.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(trail.0, Vec2::new(100.0, 100.0));
        assert!((trail.1.x - (100.0 - back)).abs() < 0.001);
        assert!((trail.1.y - (100.0 - back)).abs() < 0.001);
        assert!((trail.2.a - 1.0).abs() < f32::EPSILON);
        assert!((trail.3 - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_star_wraps_to_top() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 3);
        state.stars[0].pos = Vec2::new(123.0, 599.5);
        state.stars[0].drift = 1.0;

        run(&mut state, 1);

        let star = &state.stars[0];
        assert_eq!(star.pos.y, 0.0);
        assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut state = FieldState::new(800.0, 600.0, FieldConfig::default(), 11);
        state.inject_shooting_star(test_shooting_star());
        let stars_before = state.stars.clone();
        let shooting_before = state.shooting_stars.clone();

        state.resize(1200.0, 900.0);

        assert_eq!(state.width, 1200.0);
        assert_eq!(state.height, 900.0);
        assert_eq!(state.stars, stars_before);
        assert_eq!(state.shooting_stars, shooting_before);
    }

    #[test]
    fn test_shrink_wraps_stars_next_frame() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 5);
        state.resize(800.0, 100.0);

        run(&mut state, 1);

        assert!(state.stars.iter().all(|s| s.pos.y >= 0.0 && s.pos.y < 100.0));
    }

    #[test]
    fn test_display_list_layout() {
        let mut state = FieldState::new(800.0, 600.0, quiet_config(), 9);
        state.inject_shooting_star(test_shooting_star());
        state.inject_shooting_star(test_shooting_star());

        let out = run(&mut state, 1);

        assert_eq!(
            out.commands.first(),
            Some(&DrawCmd::Fill {
                color: Rgba::new(0, 0, 15, 0.4)
            })
        );
        assert_eq!(out.circles(), 250);
        assert_eq!(out.trails(), 2);
        assert_eq!(out.len(), 1 + 250 + 2);
    }

    #[test]
    fn test_spawn_ranges() {
        let config = FieldConfig {
            spawn_probability: 1.0,
            ..Default::default()
        };
        let mut state = FieldState::new(800.0, 600.0, config, 1234);

        run(&mut state, 1);

        assert_eq!(state.shooting_stars.len(), 1);
        assert_eq!(state.spawned, 1);
        let s = &state.shooting_stars[0];
        assert!(s.pos.x >= 0.0 && s.pos.x < 800.0);
        assert!(s.pos.y >= 0.0 && s.pos.y < 300.0);
        assert!(s.length >= 100.0 && s.length < 400.0);
        assert!(s.speed >= 6.0 && s.speed < 16.0);
        assert_eq!(s.angle, std::f32::consts::FRAC_PI_4);
        assert_eq!(s.opacity, 1.0);
    }

    #[test]
    fn test_determinism() {
        // Two fields with the same seed should produce identical frames
        let mut a = FieldState::new(640.0, 480.0, FieldConfig::default(), 99999);
        let mut b = FieldState::new(640.0, 480.0, FieldConfig::default(), 99999);
        let mut out_a = DisplayList::new();
        let mut out_b = DisplayList::new();

        for _ in 0..300 {
            tick(&mut a, &mut out_a);
            tick(&mut b, &mut out_b);
            assert_eq!(out_a.commands, out_b.commands);
        }
        assert_eq!(a.spawned, b.spawned);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_stars_stay_in_bounds(
            seed in any::<u64>(),
            width in 1.0f32..2000.0,
            height in 1.0f32..2000.0,
            frames in 1usize..200,
        ) {
            let mut state = FieldState::new(width, height, FieldConfig::default(), seed);
            let mut out = DisplayList::new();
            for _ in 0..frames {
                tick(&mut state, &mut out);
                for star in &state.stars {
                    prop_assert!(star.pos.y >= 0.0 && star.pos.y < height);
                    prop_assert!(star.opacity >= 0.3 && star.opacity <= 1.0);
                }
            }
            prop_assert_eq!(state.stars.len(), 250);
        }

        #[test]
        fn prop_faded_shooting_stars_never_survive(
            seed in any::<u64>(),
            spawn in 0.0f32..1.0,
            frames in 1usize..300,
        ) {
            let config = FieldConfig {
                star_count: 8,
                spawn_probability: spawn,
                ..Default::default()
            };
            let mut state = FieldState::new(800.0, 600.0, config, seed);
            let mut out = DisplayList::new();
            for _ in 0..frames {
                let before = state.shooting_stars.len();
                tick(&mut state, &mut out);
                prop_assert_eq!(out.trails(), before);
                prop_assert!(state.shooting_stars.iter().all(|s| s.opacity > 0.0));
            }
        }
    }
}
