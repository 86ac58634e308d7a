//! Animation loop driver
//!
//! Calls a draw function once per frame, strictly one after another, until
//! it returns `false`, fails, or the loop is stopped from outside.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{FrameCanceler, FrameSource, FrameTime, request_frame};
use crate::renderer::{Stage, Surface};

/// Message reported when a draw callback fails
pub const DRAW_FAILURE_MESSAGE: &str = "Animation stopped: the draw callback failed";

/// Message reported when the platform refuses a frame request
pub const REQUEST_FAILURE_MESSAGE: &str = "Animation stopped: the next frame could not be requested";

/// Where draw failures are reported
pub trait Diagnostics {
    fn report(&self, message: &str, error: &anyhow::Error);
}

/// Reports through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, message: &str, error: &anyhow::Error) {
        log::error!("{message}: {error:#}");
    }
}

/// Why the loop ended
#[derive(Debug)]
pub enum LoopExit {
    /// The draw callback returned `false`
    Finished { frames: u64 },
    /// `LoopControl::stop` was called
    Stopped { frames: u64 },
    /// The draw callback failed on frame `frame` (1-based)
    Failed { frame: u64, error: anyhow::Error },
    /// The frame source refused a request after `frames` draws
    RequestFailed { frames: u64, error: anyhow::Error },
}

#[derive(Default)]
struct ControlState {
    stopped: Cell<bool>,
    current: RefCell<Option<FrameCanceler>>,
}

/// Outside handle on a running loop
#[derive(Clone, Default)]
pub struct LoopControl {
    state: Rc<ControlState>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop: the in-flight frame is canceled and nothing more is drawn
    ///
    /// Stays set until the next `Animator::animate` starts.
    pub fn stop(&self) {
        self.state.stopped.set(true);
        self.cancel_current_frame();
    }

    pub fn is_stopped(&self) -> bool {
        self.state.stopped.get()
    }

    /// Cancel only the in-flight frame; the loop skips it and requests another
    pub fn cancel_current_frame(&self) {
        let current = self.state.current.borrow_mut().take();
        if let Some(canceler) = current {
            canceler.cancel();
        }
    }

    fn reset(&self) {
        self.state.stopped.set(false);
        self.untrack();
    }

    fn track(&self, canceler: FrameCanceler) {
        *self.state.current.borrow_mut() = Some(canceler);
    }

    fn untrack(&self) {
        self.state.current.borrow_mut().take();
    }
}

/// Drive `draw` once per frame from `source` on the stage's surface
pub async fn run_loop<F, S, D>(
    source: Rc<F>,
    stage: &RefCell<Stage<S>>,
    mut draw: D,
    control: &LoopControl,
    diagnostics: &dyn Diagnostics,
) -> LoopExit
where
    F: FrameSource + 'static,
    S: Surface,
    D: FnMut(&mut S, f64) -> anyhow::Result<bool>,
{
    let mut frames = 0u64;
    loop {
        if control.is_stopped() {
            return LoopExit::Stopped { frames };
        }

        let handle = match request_frame(&source) {
            Ok(handle) => handle,
            Err(e) => {
                let error = anyhow::Error::from(e);
                diagnostics.report(REQUEST_FAILURE_MESSAGE, &error);
                return LoopExit::RequestFailed { frames, error };
            }
        };
        control.track(handle.canceler());
        let time = handle.await;
        control.untrack();

        if control.is_stopped() {
            return LoopExit::Stopped { frames };
        }
        let FrameTime::At(timestamp) = time else {
            log::trace!("Frame canceled, skipping draw");
            continue;
        };

        frames += 1;
        let result = {
            let mut stage = stage.borrow_mut();
            draw(stage.surface_mut(), timestamp)
        };
        match result {
            Ok(true) => {}
            Ok(false) => {
                log::info!("Animation finished after {} frames", frames);
                return LoopExit::Finished { frames };
            }
            Err(error) => {
                diagnostics.report(DRAW_FAILURE_MESSAGE, &error);
                return LoopExit::Failed { frame: frames, error };
            }
        }
    }
}

/// A stage, a diagnostics sink and a stop handle for running animations
pub struct Animator<S: Surface> {
    stage: Rc<RefCell<Stage<S>>>,
    diagnostics: Box<dyn Diagnostics>,
    control: LoopControl,
}

impl<S: Surface> Animator<S> {
    pub fn new(stage: Stage<S>) -> Self {
        Self::with_diagnostics(stage, Box::new(LogDiagnostics))
    }

    pub fn with_diagnostics(stage: Stage<S>, diagnostics: Box<dyn Diagnostics>) -> Self {
        Self {
            stage: Rc::new(RefCell::new(stage)),
            diagnostics,
            control: LoopControl::new(),
        }
    }

    /// Shared stage, for resize listeners
    pub fn stage(&self) -> Rc<RefCell<Stage<S>>> {
        self.stage.clone()
    }

    pub fn control(&self) -> LoopControl {
        self.control.clone()
    }

    /// Resize the stage; call on every viewport change
    pub fn resize(&self, viewport_width: f64, viewport_height: f64) {
        if let Err(e) = self.stage.borrow_mut().resize(viewport_width, viewport_height) {
            log::warn!("Resize failed: {e}");
        }
    }

    /// Run an animation until `draw` returns `false`, fails, or is stopped
    ///
    /// Clears a stop left over from an earlier run; a stop issued before this
    /// call is therefore ignored.
    pub async fn animate<F, D>(&self, source: Rc<F>, draw: D) -> LoopExit
    where
        F: FrameSource + 'static,
        D: FnMut(&mut S, f64) -> anyhow::Result<bool>,
    {
        self.control.reset();
        run_loop(source, &self.stage, draw, &self.control, self.diagnostics.as_ref()).await
    }
}
