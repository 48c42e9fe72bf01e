//! Display list produced by one simulation frame

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Straight-alpha colour with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 (transparent) - 1.0 (opaque)
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// White at the given alpha
    pub const fn white(a: f32) -> Self {
        Self::new(255, 255, 255, a)
    }

    /// Same colour, different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for canvas style properties
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.clamp(0.0, 1.0))
    }
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Paint the whole surface
    Fill { color: Rgba },
    /// Filled circle
    Circle { center: Vec2, radius: f32, color: Rgba },
    /// Line stroked with a linear gradient from `head` (colour) to `tail`
    /// (same colour, fully transparent)
    Trail {
        head: Vec2,
        tail: Vec2,
        color: Rgba,
        width: f32,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands.iter()
    }

    /// Number of circle commands
    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Circle { .. }))
            .count()
    }

    /// Number of trail commands
    pub fn trails(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Trail { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_formatting() {
        assert_eq!(Rgba::new(0, 0, 15, 0.4).css(), "rgba(0, 0, 15, 0.4)");
        assert_eq!(Rgba::white(1.0).css(), "rgba(255, 255, 255, 1)");
        // Alpha is clamped for the canvas even if a caller overshoots
        assert_eq!(Rgba::white(-0.5).css(), "rgba(255, 255, 255, 0)");
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        let c = Rgba::new(10, 20, 30, 1.0).with_alpha(0.25);
        assert_eq!((c.r, c.g, c.b), (10, 20, 30));
        assert!((c.a - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_counts() {
        let mut list = DisplayList::new();
        assert!(list.is_empty());
        list.push(DrawCmd::Fill { color: Rgba::white(0.1) });
        list.push(DrawCmd::Circle {
            center: Vec2::ZERO,
            radius: 1.0,
            color: Rgba::white(1.0),
        });
        list.push(DrawCmd::Trail {
            head: Vec2::ZERO,
            tail: Vec2::ONE,
            color: Rgba::white(1.0),
            width: 2.0,
        });
        assert_eq!(list.len(), 3);
        assert_eq!(list.circles(), 1);
        assert_eq!(list.trails(), 1);

        list.clear();
        assert!(list.is_empty());
    }
}
