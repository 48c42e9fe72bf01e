//! Browser mounting: canvas, requestAnimationFrame and resize wiring

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::FrameLoop;
use crate::renderer::{CanvasRenderer, DisplayList};
use crate::settings::Settings;
use crate::sim::{FieldState, tick};

/// Animator instance shared by the frame and resize callbacks
struct Animator {
    field: FieldState,
    display: DisplayList,
    renderer: CanvasRenderer,
    canvas: HtmlCanvasElement,
    frame_loop: FrameLoop,
    settings: Settings,
}

impl Animator {
    fn frame(&mut self) -> bool {
        if !self.frame_loop.begin_frame() {
            return false;
        }
        tick(&mut self.field, &mut self.display);
        self.renderer.render(&self.display);
        self.frame_loop.should_rearm()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.renderer.resize(width, height);
        self.field.resize(width as f32, height as f32);
    }
}

/// Handle to a mounted starfield
///
/// Dropping the handle unmounts it.
#[wasm_bindgen]
pub struct Starfield {
    animator: Rc<RefCell<Animator>>,
    on_resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl Starfield {
    /// Stop the frame loop and detach the resize listener
    pub fn unmount(&mut self) {
        if !self.animator.borrow_mut().frame_loop.dispose() {
            return;
        }
        if let (Some(window), Some(listener)) = (web_sys::window(), self.on_resize.take()) {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                listener.as_ref().unchecked_ref(),
            );
        }
        log::info!("Starfield unmounted");
    }

    pub fn star_count(&self) -> usize {
        self.animator.borrow().field.stars.len()
    }

    pub fn shooting_star_count(&self) -> usize {
        self.animator.borrow().field.shooting_stars.len()
    }

    /// Toggle reduced motion; persisted and applied to the running field
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        let mut animator = self.animator.borrow_mut();
        animator.settings.reduced_motion = reduced;
        animator.settings.save();
        let spawn = animator.settings.effective_spawn_probability();
        animator.field.config.spawn_probability = spawn;
    }
}

impl Drop for Starfield {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount an animated starfield on the canvas with the given element id
///
/// Fails only when the page has no usable canvas or 2D context; nothing is
/// scheduled in that case.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<Starfield, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| format!("no element #{}", canvas_id))?
        .dyn_into()
        .map_err(|_| format!("#{} is not a canvas", canvas_id))?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into()
        .map_err(|_| "unexpected 2d context type")?;

    let (width, height) = viewport_size(&window);
    canvas.set_width(width);
    canvas.set_height(height);

    let mut settings = Settings::load();
    if prefers_reduced_motion(&window) {
        settings.reduced_motion = true;
    }

    let seed = js_sys::Date::now() as u64;
    let field = FieldState::new(width as f32, height as f32, settings.field_config(), seed);
    log::info!(
        "Starfield mounted: {}x{}, {} stars, seed {}",
        width,
        height,
        field.stars.len(),
        seed
    );

    let animator = Rc::new(RefCell::new(Animator {
        field,
        display: DisplayList::new(),
        renderer: CanvasRenderer::new(ctx, width, height),
        canvas,
        frame_loop: FrameLoop::new(),
        settings,
    }));

    let on_resize = {
        let animator = animator.clone();
        Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (w, h) = viewport_size(&window);
            animator.borrow_mut().resize(w, h);
            log::debug!("Starfield resized to {}x{}", w, h);
        })
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    request_animation_frame(animator.clone());

    Ok(Starfield {
        animator,
        on_resize: Some(on_resize),
    })
}

fn viewport_size(window: &web_sys::Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn request_animation_frame(animator: Rc<RefCell<Animator>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    // Freed by the JS side once it has run
    let callback = Closure::once_into_js(move |_time: f64| {
        animation_loop(animator);
    });
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::error!("requestAnimationFrame failed, starfield stopped: {:?}", e);
    }
}

fn animation_loop(animator: Rc<RefCell<Animator>>) {
    let rearm = animator.borrow_mut().frame();
    if rearm {
        request_animation_frame(animator);
    }
}

/// Whether the page came back from the back/forward cache and needs a fresh
/// starfield (the previous one was unmounted on `pagehide`)
pub fn should_remount(event: &web_sys::PageTransitionEvent, mounted: bool) -> bool {
    super::needs_remount(event.persisted(), mounted)
}
