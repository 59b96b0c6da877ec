use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaneMetrics {
    pub offset: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl PaneMetrics {
    pub fn max_extent(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// A scrollable region whose offset can be read and written.
pub trait ScrollPane {
    fn metrics(&self) -> PaneMetrics;
    fn set_offset(&self, offset: f64);
}

/// Defers a callback to the next animation frame.
pub trait FrameScheduler {
    fn after_frame(&self, callback: Box<dyn FnOnce()>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncDirection {
    EditorToPreview,
    PreviewToEditor,
}

pub fn scroll_ratio(source: PaneMetrics) -> f64 {
    let max = source.max_extent();
    if max > 0.0 {
        source.offset / max
    } else {
        0.0
    }
}

pub fn mirrored_offset(source: PaneMetrics, target: PaneMetrics) -> f64 {
    scroll_ratio(source) * target.max_extent().max(0.0)
}

/// Single-slot request coalescer: at most one pass in flight, extra
/// triggers are dropped.
#[derive(Debug, Default)]
pub struct SyncSlot {
    busy: Cell<bool>,
}

impl SyncSlot {
    pub fn try_acquire(&self) -> bool {
        !self.busy.replace(true)
    }

    pub fn release(&self) {
        self.busy.set(false);
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

pub struct ScrollSynchronizer<F> {
    slot: Rc<SyncSlot>,
    scheduler: F,
}

impl<F: FrameScheduler> ScrollSynchronizer<F> {
    pub fn new(scheduler: F) -> Self {
        Self {
            slot: Rc::new(SyncSlot::default()),
            scheduler,
        }
    }

    /// Mirrors `source` onto `target`. The slot stays taken until the next
    /// frame so the scroll event raised on `target` is ignored. Returns
    /// `false` when the trigger was dropped.
    pub fn sync(&self, source: &impl ScrollPane, target: &impl ScrollPane) -> bool {
        if !self.slot.try_acquire() {
            return false;
        }
        target.set_offset(mirrored_offset(source.metrics(), target.metrics()));
        let slot = Rc::clone(&self.slot);
        self.scheduler.after_frame(Box::new(move || slot.release()));
        true
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }
}
