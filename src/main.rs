//! Diagonal Waves entry point
//!
//! On the web: draws on `#canvas` with `requestAnimationFrame`. Natively:
//! renders a fixed number of frames headlessly into a raster surface.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use diagonal_waves::frame::Animator;
    use diagonal_waves::platform::BrowserFrames;
    use diagonal_waves::renderer::{Canvas2d, Stage};
    use diagonal_waves::sim::WaveBoard;
    use diagonal_waves::{FpsCounter, Settings};

    fn viewport(window: &web_sys::Window) -> (f64, f64) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w, h)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Diagonal Waves starting...");

        let settings = Settings::load();
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Resolve elements up front; the canvas is required
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;
        let fps_el = document.get_element_by_id("fps-counter");

        let surface = Canvas2d::new(canvas).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let stage = Stage::with_scale(surface, viewport(&window), DVec2::splat(settings.viewport_scale))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let animator = Rc::new(Animator::new(stage));

        // Recompute size and transform on every resize
        {
            let animator = animator.clone();
            let resize_window = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = viewport(&resize_window);
                animator.resize(w, h);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let board = settings.board().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let mut waves = WaveBoard::new(board, settings.spawn_policy(), seed);
        let mut fps = FpsCounter::new(settings.fps_interval_ms);
        let show_fps = settings.show_fps;

        log::info!(
            "Board {}x{} initialized with seed: {}",
            board.width,
            board.height,
            seed
        );

        let frames = Rc::new(BrowserFrames::new(window));
        wasm_bindgen_futures::spawn_local(async move {
            let exit = animator
                .animate(frames, move |surface, timestamp| {
                    if let Some(rate) = fps.record(timestamp) {
                        if let (true, Some(el)) = (show_fps, fps_el.as_ref()) {
                            el.set_text_content(Some(&format!("{rate:.1}")));
                        }
                    }
                    waves.draw_frame(surface, timestamp)
                })
                .await;
            log::warn!("Animation ended: {:?}", exit);
        });

        log::info!("Diagonal Waves running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use glam::DVec2;

    use diagonal_waves::frame::{Animator, LoopExit};
    use diagonal_waves::platform::ManualFrameSource;
    use diagonal_waves::renderer::{RasterSurface, Stage};
    use diagonal_waves::sim::WaveBoard;
    use diagonal_waves::{FpsCounter, Settings};

    /// Frames rendered per headless run
    const FRAMES: u32 = 600;
    /// Simulated frame interval (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(settings: &Settings) -> anyhow::Result<()> {
        let board = settings.board()?;
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        log::info!("Board {}x{} initialized with seed: {}", board.width, board.height, seed);

        // One pixel per cell
        let viewport = (board.width as f64, board.height as f64);
        let stage = Stage::with_scale(RasterSurface::new(1, 1), viewport, DVec2::ONE)?;
        let animator = Rc::new(Animator::new(stage));
        let source = Rc::new(ManualFrameSource::new());

        let mut waves = WaveBoard::new(board, settings.spawn_policy(), seed);
        let mut fps = FpsCounter::new(settings.fps_interval_ms);
        let live = Rc::new(RefCell::new(0usize));
        let exit = Rc::new(RefCell::new(None));

        let mut pool = LocalPool::new();
        {
            let (animator, source, live, exit) = (animator.clone(), source.clone(), live.clone(), exit.clone());
            let show_fps = settings.show_fps;
            pool.spawner().spawn_local(async move {
                let result = animator
                    .animate(source, move |surface, timestamp| {
                        if let Some(rate) = fps.record(timestamp) {
                            if show_fps {
                                log::info!("{:.1} fps (simulated), {} waves", rate, waves.waves().len());
                            }
                        }
                        let keep_going = waves.draw_frame(surface, timestamp)?;
                        *live.borrow_mut() = waves.waves().len();
                        Ok(keep_going)
                    })
                    .await;
                *exit.borrow_mut() = Some(result);
            })?;
        }

        pool.run_until_stalled();
        for frame in 1..=FRAMES {
            source.fire(frame as f64 * FRAME_MS);
            pool.run_until_stalled();
        }
        animator.control().stop();
        pool.run_until_stalled();

        let stage = animator.stage();
        let stage = stage.borrow();
        let surface = stage.surface();
        log::info!(
            "Rendered {} frames: {} waves live, {} of {} pixels painted",
            FRAMES,
            live.borrow(),
            surface.painted_count(),
            surface.pixels().len()
        );

        match exit.borrow_mut().take() {
            Some(LoopExit::Failed { error, .. } | LoopExit::RequestFailed { error, .. }) => Err(error),
            Some(other) => {
                log::info!("Animation ended: {:?}", other);
                Ok(())
            }
            None => anyhow::bail!("animation loop did not exit"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use diagonal_waves::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Diagonal Waves (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading settings from {path}"))?;
            Settings::from_json(&json).with_context(|| format!("parsing settings in {path}"))?
        }
        None => Settings::load(),
    };

    headless::run(&settings)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
