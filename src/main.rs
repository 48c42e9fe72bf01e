//! Starfield Hero entry point
//!
//! On the web: fills the hero text and mounts the starfield background.
//! Natively: runs a headless preview of the simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_page {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use starfield_hero::platform::web::should_remount;
    use starfield_hero::{Profile, Starfield, mount};

    /// Canvas element the background is drawn on
    const CANVAS_ID: &str = "starfield";

    thread_local! {
        static ACTIVE: RefCell<Option<Starfield>> = const { RefCell::new(None) };
    }

    /// Put the profile's hero text into the page
    fn fill_hero(profile: &Profile) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let fields = [
            ("hero-name", profile.name.as_str()),
            ("hero-title", profile.title.as_str()),
            ("hero-tagline", profile.tagline.as_str()),
        ];
        for (id, text) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
        if let Some(el) = document.get_element_by_id("contact-email") {
            el.set_text_content(Some(&profile.email));
            let _ = el.set_attribute("href", &profile.mailto());
        }
    }

    /// Mount the background and keep its handle alive
    fn start_starfield() {
        // A missing canvas only costs us the background
        match mount(CANVAS_ID) {
            Ok(starfield) => ACTIVE.with(|active| *active.borrow_mut() = Some(starfield)),
            Err(e) => log::error!("Starfield not started: {:?}", e),
        }
    }

    /// Unmount when the page goes away, remount on a back/forward cache restore
    fn setup_page_lifecycle() {
        let Some(window) = web_sys::window() else {
            return;
        };

        let on_hide = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            ACTIVE.with(|active| {
                if let Some(mut starfield) = active.borrow_mut().take() {
                    starfield.unmount();
                }
            });
        });
        if let Err(e) =
            window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())
        {
            log::warn!("pagehide listener not registered: {:?}", e);
        }
        on_hide.forget();

        let on_show = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
            let mounted = ACTIVE.with(|active| active.borrow().is_some());
            if should_remount(&event, mounted) {
                log::info!("Page restored from cache, remounting starfield");
                start_starfield();
            }
        });
        if let Err(e) =
            window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref())
        {
            log::warn!("pageshow listener not registered: {:?}", e);
        }
        on_show.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Starfield Hero starting...");

        match Profile::load_embedded() {
            Ok(profile) => fill_hero(&profile),
            Err(e) => log::error!("Profile unavailable: {:#}", e),
        }

        start_starfield();
        setup_page_lifecycle();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use starfield_hero::renderer::DisplayList;
    use starfield_hero::{FieldState, FrameLoop, Profile, QualityPreset, Settings, tick};

    env_logger::init();
    log::info!("Starfield Hero (native) starting...");
    log::info!("Native mode is a headless preview - run with `trunk serve` for the web version");

    match Profile::load_embedded() {
        Ok(profile) => log::info!("Profile: {} - {}", profile.name, profile.title),
        Err(e) => log::error!("Profile unavailable: {:#}", e),
    }

    // Usage: starfield-hero [frames] [low|medium|high]
    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    let settings = match args.next() {
        Some(arg) => match QualityPreset::from_str(&arg) {
            Some(preset) => Settings::from_preset(preset),
            None => {
                log::warn!("Unknown quality {:?}, using saved settings", arg);
                Settings::load()
            }
        },
        None => Settings::load(),
    };
    log::info!("Quality preset: {}", settings.quality.as_str());

    let mut field = FieldState::new(800.0, 600.0, settings.field_config(), 12345);
    let mut display = DisplayList::new();
    let mut frame_loop = FrameLoop::new();
    let mut peak = 0;
    if frames == 0 {
        frame_loop.dispose();
    }

    // Same Running/Disposed gating as the browser loop, disposed after N frames
    while frame_loop.begin_frame() {
        tick(&mut field, &mut display);
        peak = peak.max(field.shooting_stars.len());
        if frame_loop.frames() >= frames {
            frame_loop.dispose();
        }
    }

    println!(
        "{} frames: {} stars, {} shooting stars spawned, {} active (peak {}), {} draw commands in last frame",
        field.frame,
        field.stars.len(),
        field.spawned,
        field.shooting_stars.len(),
        peak,
        display.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
