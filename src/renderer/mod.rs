//! Rendering module
//!
//! The simulation emits a display list; on the web it is replayed onto a
//! Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod display;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use display::{DisplayList, DrawCmd, Rgba};
