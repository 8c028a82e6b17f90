use crate::types::{ButtonEvent, ClassifierStateId, PinLevel};

/// Snapshot of the engine after one sample, for serial diagnostics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClassifierTraceSample {
    pub now_ms: u64,
    /// State the sample was handled in.
    pub state_id: ClassifierStateId,
    pub level: PinLevel,
    pub held_ms: u64,
    /// `None` until the first press.
    pub since_last_press_ms: Option<u64>,
    pub pending_presses: u8,
    pub event: ButtonEvent,
}
