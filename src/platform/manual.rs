//! Frame source driven by hand: callbacks wait until `fire` is called

use std::cell::RefCell;

use crate::frame::{FrameCallback, FrameError, FrameId, FrameSource};

#[derive(Default)]
struct Inner {
    next_id: FrameId,
    pending: Vec<(FrameId, FrameCallback)>,
    requests: u64,
    cancels: u64,
    refusing: bool,
}

#[derive(Default)]
pub struct ManualFrameSource {
    inner: RefCell<Inner>,
}

impl ManualFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback pending right now with `timestamp`; returns how many ran
    ///
    /// Callbacks registered while firing wait for the next call.
    pub fn fire(&self, timestamp: f64) -> usize {
        let due = std::mem::take(&mut self.inner.borrow_mut().pending);
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        count
    }

    /// Drop pending callbacks without running them
    pub fn drop_pending(&self) {
        let dropped = std::mem::take(&mut self.inner.borrow_mut().pending);
        drop(dropped);
    }

    /// While set, every request fails and its callback is dropped
    pub fn refuse_requests(&self, refuse: bool) {
        self.inner.borrow_mut().refusing = refuse;
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Total callbacks ever accepted
    pub fn request_count(&self) -> u64 {
        self.inner.borrow().requests
    }

    /// Cancellations that removed a pending callback
    pub fn cancel_count(&self) -> u64 {
        self.inner.borrow().cancels
    }
}

impl FrameSource for ManualFrameSource {
    fn request(&self, callback: FrameCallback) -> Result<FrameId, FrameError> {
        let mut inner = self.inner.borrow_mut();
        if inner.refusing {
            return Err(FrameError::Refused("manual source is refusing requests".into()));
        }
        inner.next_id += 1;
        inner.requests += 1;
        let id = inner.next_id;
        inner.pending.push((id, callback));
        Ok(id)
    }

    fn cancel(&self, id: FrameId) {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let pos = inner.pending.iter().position(|(pending, _)| *pending == id);
            let removed = pos.map(|i| inner.pending.remove(i));
            if removed.is_some() {
                inner.cancels += 1;
            }
            removed
        };
        // Dropped outside the borrow
        drop(removed);
    }
}
