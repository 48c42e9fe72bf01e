//! Platform abstraction layer
//!
//! Handles the browser side of the animation:
//! - Frame scheduling (requestAnimationFrame re-arm)
//! - Viewport resize events
//! - Mount/unmount of the canvas animator

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Frames run and re-arm the next one
    #[default]
    Running,
    /// No further frames are requested; a frame already queued becomes a no-op
    Disposed,
}

/// Single-shot frame callback bookkeeping
///
/// The host calls back once per requested frame. Each frame asks
/// `begin_frame` whether to do any work and `should_rearm` whether to
/// request the next one, so disposal takes effect at the next callback
/// without cancelling anything.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames that actually ran
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Start a frame; returns false once disposed
    pub fn begin_frame(&mut self) -> bool {
        match self.state {
            LoopState::Running => {
                self.frames += 1;
                true
            }
            LoopState::Disposed => false,
        }
    }

    /// Whether the next frame should be requested
    pub fn should_rearm(&self) -> bool {
        self.is_running()
    }

    /// Stop the loop; returns true if it was running
    pub fn dispose(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = LoopState::Disposed;
        was_running
    }
}

/// A page restored from the back/forward cache gets a new starfield unless
/// one is still mounted
pub fn needs_remount(persisted: bool, mounted: bool) -> bool {
    persisted && !mounted
}
