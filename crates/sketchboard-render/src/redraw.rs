//! Redraw requests from the core, polled by the host's frame loop.

use sketchboard_core::session::RedrawHandler;
use std::cell::Cell;
use std::rc::Rc;

/// Shared counter of pending redraw requests.
///
/// Clone one into the session with [`Session::with_redraw`] and keep the
/// other; the host calls [`RedrawSignal::take`] once per frame.
///
/// [`Session::with_redraw`]: sketchboard_core::session::Session::with_redraw
#[derive(Debug, Clone, Default)]
pub struct RedrawSignal {
    requests: Rc<Cell<usize>>,
}

impl RedrawSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests since the last take.
    pub fn pending(&self) -> usize {
        self.requests.get()
    }

    /// Return and reset the pending request count.
    pub fn take(&self) -> usize {
        self.requests.replace(0)
    }
}

impl RedrawHandler for RedrawSignal {
    fn request_redraw(&mut self) {
        self.requests.set(self.requests.get() + 1);
    }
}
