//! Browser frame source over `requestAnimationFrame`

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::frame::{FrameCallback, FrameError, FrameId, FrameSource};

pub struct BrowserFrames {
    window: Window,
    /// Pending frame ids to the browser's request handles
    requests: Rc<RefCell<HashMap<FrameId, i32>>>,
    next_id: Cell<FrameId>,
}

impl BrowserFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            requests: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(0),
        }
    }
}

impl FrameSource for BrowserFrames {
    fn request(&self, callback: FrameCallback) -> Result<FrameId, FrameError> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let requests = self.requests.clone();
        // Freed by wasm-bindgen after its single call; a canceled one is never freed
        let closure = Closure::once_into_js(move |timestamp: f64| {
            requests.borrow_mut().remove(&id);
            callback(timestamp);
        });
        let handle = self
            .window
            .request_animation_frame(closure.unchecked_ref())
            .map_err(|e| FrameError::Refused(format!("requestAnimationFrame failed: {e:?}")))?;
        self.requests.borrow_mut().insert(id, handle);
        Ok(id)
    }

    fn cancel(&self, id: FrameId) {
        let handle = self.requests.borrow_mut().remove(&id);
        if let Some(handle) = handle {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}
