//! Cancellable frame requests
//!
//! A `FrameHandle` is one outstanding request for the next paint opportunity.
//! It resolves exactly once: with the paint timestamp, or with
//! `FrameTime::Canceled` if `cancel` ran first. Whichever side takes the
//! sender first wins; the other becomes a no-op.

pub mod animator;

pub use animator::{Animator, Diagnostics, LogDiagnostics, LoopControl, LoopExit, run_loop};

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use futures::channel::oneshot;
use thiserror::Error;

/// Platform id of a pending frame callback
pub type FrameId = u64;

/// Callback invoked with the paint timestamp (ms)
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// The platform would not register a frame callback
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame request refused: {0}")]
    Refused(String),
}

/// Platform per-frame callback mechanism (`requestAnimationFrame` and friends)
pub trait FrameSource {
    /// Register `callback` for the next paint opportunity
    ///
    /// On `Err` the callback is never invoked.
    fn request(&self, callback: FrameCallback) -> Result<FrameId, FrameError>;

    /// Deregister a pending callback; unknown or fired ids are ignored
    fn cancel(&self, id: FrameId);
}

/// Resolution of a frame request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameTime {
    /// Paint timestamp in milliseconds
    At(f64),
    /// The request was canceled before the paint opportunity
    Canceled,
}

impl FrameTime {
    pub fn timestamp(&self) -> Option<f64> {
        match self {
            FrameTime::At(t) => Some(*t),
            FrameTime::Canceled => None,
        }
    }
}

type Slot = RefCell<Option<oneshot::Sender<FrameTime>>>;

/// Cancels one frame request; cheap to clone
///
/// Only the platform callback holds the slot strongly, so a callback the
/// platform drops without firing closes the channel.
#[derive(Clone)]
pub struct FrameCanceler {
    id: FrameId,
    slot: Weak<Slot>,
    cancel: Rc<dyn Fn(FrameId)>,
}

impl FrameCanceler {
    /// Deregister the callback and resolve with `Canceled`, unless already resolved
    pub fn cancel(&self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let Some(sender) = slot.borrow_mut().take() else {
            return;
        };
        (self.cancel)(self.id);
        let _ = sender.send(FrameTime::Canceled);
    }

    pub fn is_pending(&self) -> bool {
        self.slot
            .upgrade()
            .is_some_and(|slot| slot.borrow().is_some())
    }
}

/// An awaitable, cancellable request for the next frame
pub struct FrameHandle {
    receiver: oneshot::Receiver<FrameTime>,
    canceler: FrameCanceler,
}

impl FrameHandle {
    pub fn id(&self) -> FrameId {
        self.canceler.id
    }

    pub fn cancel(&self) {
        self.canceler.cancel();
    }

    /// True until the frame fires or is canceled
    pub fn is_pending(&self) -> bool {
        self.canceler.is_pending()
    }

    pub fn canceler(&self) -> FrameCanceler {
        self.canceler.clone()
    }
}

impl Future for FrameHandle {
    type Output = FrameTime;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<FrameTime> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(time)) => Poll::Ready(time),
            // Platform dropped the callback without running it
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(FrameTime::Canceled),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Register exactly one platform callback for the next paint opportunity
pub fn request_frame<S: FrameSource + 'static>(source: &Rc<S>) -> Result<FrameHandle, FrameError> {
    let (sender, receiver) = oneshot::channel();
    let slot: Rc<Slot> = Rc::new(RefCell::new(Some(sender)));
    let weak = Rc::downgrade(&slot);

    let id = source.request(Box::new(move |timestamp| {
        if let Some(sender) = slot.borrow_mut().take() {
            let _ = sender.send(FrameTime::At(timestamp));
        }
    }))?;

    let cancel_source = source.clone();
    Ok(FrameHandle {
        receiver,
        canceler: FrameCanceler {
            id,
            slot: weak,
            cancel: Rc::new(move |id| cancel_source.cancel(id)),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualFrameSource;
    use futures::FutureExt;

    #[test]
    fn test_resolves_with_timestamp() {
        let source = Rc::new(ManualFrameSource::new());
        let mut handle = request_frame(&source).unwrap();
        assert_eq!(source.pending_count(), 1);
        assert!((&mut handle).now_or_never().is_none());

        source.fire(16.5);
        assert!(!handle.is_pending());
        assert_eq!(handle.now_or_never(), Some(FrameTime::At(16.5)));
    }

    #[test]
    fn test_cancel_before_paint_resolves_immediately() {
        let source = Rc::new(ManualFrameSource::new());
        let handle = request_frame(&source).unwrap();
        handle.cancel();
        assert_eq!(source.pending_count(), 0);
        assert_eq!(source.cancel_count(), 1);

        // Second cancel is a silent no-op
        handle.cancel();
        assert_eq!(source.cancel_count(), 1);

        // A late paint has nothing to fire
        assert_eq!(source.fire(33.0), 0);
        assert_eq!(handle.now_or_never(), Some(FrameTime::Canceled));
    }

    #[test]
    fn test_cancel_after_resolution_is_noop() {
        let source = Rc::new(ManualFrameSource::new());
        let handle = request_frame(&source).unwrap();
        source.fire(8.0);
        handle.cancel();
        assert_eq!(source.cancel_count(), 0);
        assert_eq!(handle.now_or_never(), Some(FrameTime::At(8.0)));
    }

    #[test]
    fn test_canceler_shares_resolution() {
        let source = Rc::new(ManualFrameSource::new());
        let handle = request_frame(&source).unwrap();
        let canceler = handle.canceler();
        assert!(canceler.is_pending());
        canceler.cancel();
        assert!(!handle.is_pending());
        assert_eq!(handle.now_or_never(), Some(FrameTime::Canceled));
    }

    #[test]
    fn test_dropped_callback_reads_as_canceled() {
        let source = Rc::new(ManualFrameSource::new());
        let handle = request_frame(&source).unwrap();
        source.drop_pending();
        assert_eq!(handle.now_or_never(), Some(FrameTime::Canceled));
    }

    #[test]
    fn test_each_request_registers_one_callback() {
        let source = Rc::new(ManualFrameSource::new());
        let a = request_frame(&source).unwrap();
        let b = request_frame(&source).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(source.request_count(), 2);
        assert_eq!(source.fire(1.0), 2);
    }

    #[test]
    fn test_refused_request_is_an_error() {
        let source = Rc::new(ManualFrameSource::new());
        source.refuse_requests(true);
        let err = request_frame(&source).err().unwrap();
        assert!(matches!(err, FrameError::Refused(_)));
        assert_eq!(source.pending_count(), 0);
        assert_eq!(source.request_count(), 0);

        source.refuse_requests(false);
        assert!(request_frame(&source).is_ok());
    }

    #[test]
    fn test_frame_time_timestamp() {
        assert_eq!(FrameTime::At(4.0).timestamp(), Some(4.0));
        assert_eq!(FrameTime::Canceled.timestamp(), None);
    }
}
