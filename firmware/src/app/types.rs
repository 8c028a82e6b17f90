use button_gestures::{ButtonClassifier, ButtonEvent, EmbassyClock};
use esp_hal::gpio::{Input, Output};

pub(crate) type GestureButton = ButtonClassifier<Input<'static>, EmbassyClock>;
pub(crate) type StatusLed = Output<'static>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum ButtonId {
    Boot = 0,
    Aux = 1,
}

impl ButtonId {
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Aux => "aux",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ButtonGesture {
    pub(crate) button: ButtonId,
    pub(crate) event: ButtonEvent,
    pub(crate) at_ms: u64,
}
