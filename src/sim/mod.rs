//! Deterministic particle simulation
//!
//! All animation logic lives here. This module must stay pure:
//! - One step per display frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No canvas or platform dependencies; output goes to a display list

pub mod state;
pub mod tick;

pub use state::{FieldConfig, FieldState, ShootingStar, Star};
pub use tick::tick;
