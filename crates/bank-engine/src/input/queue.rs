use crate::selection::state::Mode;
use crate::table::rail::RailId;

/// Input events the trainer understands.
/// Positions are in viewport space (y-up), the same space as the table rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
    /// A mode button was pressed.
    SetMode(Mode),
    /// A rail button was pressed.
    ToggleRail(RailId),
    ClearRails,
    ResetAll,
}

/// Pending trainer events, applied in arrival order by `Trainer::handle_input`.
/// The bridge pushes one event per browser callback and flushes immediately,
/// so the queue rarely holds more than a pointer drag's worth.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
