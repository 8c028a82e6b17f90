/// What a button still held after a mid-hold long press has to do before it can
/// start another press.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LongPressRearm {
    /// The next poll that still reads low is treated as a fresh press.
    #[default]
    OnTransition,
    /// Low samples are ignored until a release is observed.
    OnRelease,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClassifierConfig {
    pub double_click_window_ms: u64,
    pub long_press_threshold_ms: u64,
    pub long_press_rearm: LongPressRearm,
}

impl ClassifierConfig {
    pub const fn new(double_click_window_ms: u64, long_press_threshold_ms: u64) -> Self {
        Self {
            double_click_window_ms,
            long_press_threshold_ms,
            long_press_rearm: LongPressRearm::OnTransition,
        }
    }

    pub const fn with_double_click_window_ms(mut self, window_ms: u64) -> Self {
        self.double_click_window_ms = window_ms;
        self
    }

    pub const fn with_long_press_threshold_ms(mut self, threshold_ms: u64) -> Self {
        self.long_press_threshold_ms = threshold_ms;
        self
    }

    pub const fn with_long_press_rearm(mut self, rearm: LongPressRearm) -> Self {
        self.long_press_rearm = rearm;
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        active_config().classifier
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ButtonConfig {
    pub classifier: ClassifierConfig,
    pub polling: PollingConfig,
}

include!(concat!(env!("OUT_DIR"), "/button_config.rs"));

/// Settings compiled from `config/buttons.toml`.
pub fn active_config() -> &'static ButtonConfig {
    &BUTTON_CONFIG
}
