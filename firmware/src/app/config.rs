use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use super::types::ButtonGesture;

pub(crate) const BUTTON_COUNT: usize = 2;
pub(crate) const GESTURE_QUEUE_DEPTH: usize = 8;

pub(crate) static BUTTON_GESTURES: Channel<
    CriticalSectionRawMutex,
    ButtonGesture,
    GESTURE_QUEUE_DEPTH,
> = Channel::new();
