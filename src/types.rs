/// Gesture resolved by a single poll.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum ButtonEvent {
    #[default]
    None = 0,
    SinglePress = 1,
    DoublePress = 2,
    LongPress = 3,
}

impl ButtonEvent {
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SinglePress => "single_press",
            Self::DoublePress => "double_press",
            Self::LongPress => "long_press",
        }
    }
}

/// Electrical level read from an active-low input. `Low` means pressed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum PinLevel {
    #[default]
    High,
    Low,
}

impl PinLevel {
    pub fn from_is_low(is_low: bool) -> Self {
        if is_low {
            Self::Low
        } else {
            Self::High
        }
    }

    pub fn is_pressed(self) -> bool {
        self == Self::Low
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct PinSample {
    pub now_ms: u64,
    pub level: PinLevel,
}

impl PinSample {
    pub const fn new(now_ms: u64, level: PinLevel) -> Self {
        Self { now_ms, level }
    }

    pub const fn pressed(now_ms: u64) -> Self {
        Self::new(now_ms, PinLevel::Low)
    }

    pub const fn released(now_ms: u64) -> Self {
        Self::new(now_ms, PinLevel::High)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum ClassifierStateId {
    #[default]
    Released = 0,
    Pressed = 1,
    LongPressLatched = 2,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GestureOutput {
    pub event: ButtonEvent,
    pub trace: crate::trace::ClassifierTraceSample,
}
