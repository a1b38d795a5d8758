//! Two-control input
//!
//! Key events arrive whenever the platform delivers them; they are folded
//! into a boolean record that the engine samples once at the start of a tick.

use serde::{Deserialize, Serialize};

/// A logical control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Ascend,
    Descend,
}

impl Control {
    /// Map a keyboard key name (DOM `KeyboardEvent.key` style)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Control::Ascend),
            "ArrowDown" | "s" | "S" => Some(Control::Descend),
            _ => None,
        }
    }
}

/// Input for a single tick. Both may be held; ascend wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub ascend: bool,
    pub descend: bool,
}

/// Coalesced control state; the last event per control wins
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        self.set(control, true);
    }

    pub fn release(&mut self, control: Control) {
        self.set(control, false);
    }

    fn set(&mut self, control: Control, down: bool) {
        match control {
            Control::Ascend => self.held.ascend = down,
            Control::Descend => self.held.descend = down,
        }
    }

    /// Snapshot to feed the next tick
    pub fn current(&self) -> TickInput {
        self.held
    }

    pub fn clear(&mut self) {
        self.held = TickInput::default();
    }
}
