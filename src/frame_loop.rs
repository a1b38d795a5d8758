//! Owned handle for the per-frame tick loop
//!
//! The platform keeps requesting animation frames only while its
//! [`LoopToken`] is active. The controller holds the matching
//! [`LoopHandle`]; dropping that handle cancels the loop. At most one
//! handle is live at a time, so a stale loop cannot keep ticking.

use std::cell::Cell;
use std::rc::Rc;

/// Owning side of a running loop. Cancels on drop.
#[derive(Debug)]
pub struct LoopHandle {
    id: u64,
    active: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.active.set(false);
        log::debug!("Frame loop {} released", self.id);
    }
}

/// Platform side of a loop: check before scheduling the next frame
#[derive(Debug, Clone)]
pub struct LoopToken {
    id: u64,
    active: Rc<Cell<bool>>,
}

impl LoopToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// The single authoritative slot for the tick loop
#[derive(Debug, Default)]
pub struct FrameLoop {
    current: Option<LoopHandle>,
    next_id: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new loop, cancelling any previous one
    pub fn acquire(&mut self) -> LoopToken {
        self.next_id += 1;
        let active = Rc::new(Cell::new(true));
        let handle = LoopHandle {
            id: self.next_id,
            active: Rc::clone(&active),
        };
        // Replacing the old handle drops (and cancels) it
        self.current = Some(handle);
        log::debug!("Frame loop {} acquired", self.next_id);
        LoopToken {
            id: self.next_id,
            active,
        }
    }

    /// Cancel the current loop, if any
    pub fn release(&mut self) {
        self.current = None;
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Id of the live loop
    pub fn current_id(&self) -> Option<u64> {
        self.current.as_ref().map(LoopHandle::id)
    }
}
