use std::cell::RefCell;

use crate::scroll::FrameScheduler;

/// Something that runs a callback later. Dropping the returned handle
/// cancels the callback if it has not fired yet.
pub trait Schedule {
    type Handle;

    fn schedule(&self, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Keeps only the most recently scheduled callback alive: scheduling a new
/// one drops, and so cancels, the previous handle.
pub struct LatestOnly<S: Schedule> {
    schedule: S,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Schedule> LatestOnly<S> {
    pub fn new(schedule: S) -> Self {
        Self {
            schedule,
            pending: RefCell::new(None),
        }
    }

    pub fn restart<F: FnOnce() + 'static>(&self, callback: F) {
        let handle = self.schedule.schedule(Box::new(callback));
        // The old handle is dropped after the borrow is released.
        let previous = self.pending.borrow_mut().replace(handle);
        drop(previous);
    }
}

impl<S: Schedule> FrameScheduler for LatestOnly<S> {
    fn after_frame(&self, callback: Box<dyn FnOnce()>) {
        self.restart(callback);
    }
}
