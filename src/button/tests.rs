use core::{cell::Cell, convert::Infallible};

use embedded_hal::digital::{self, ErrorKind, ErrorType};

use super::*;
use crate::{clock::EmbassyClock, types::ClassifierStateId};

const WINDOW_MS: u64 = 300;
const LONG_MS: u64 = 500;

struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
        }
    }

    fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// Active-low pin whose level the test flips from outside.
struct ScriptedPin<'a> {
    low: &'a Cell<bool>,
    reads: u32,
}

impl<'a> ScriptedPin<'a> {
    fn new(low: &'a Cell<bool>) -> Self {
        Self { low, reads: 0 }
    }
}

impl ErrorType for ScriptedPin<'_> {
    type Error = Infallible;
}

impl InputPin for ScriptedPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(!self.low.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(self.low.get())
    }
}

#[derive(Debug, PartialEq)]
struct BusFault;

impl digital::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Pin that fails every read while `failing` is set.
struct FlakyPin<'a> {
    low: &'a Cell<bool>,
    failing: &'a Cell<bool>,
}

impl ErrorType for FlakyPin<'_> {
    type Error = BusFault;
}

impl InputPin for FlakyPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        if self.failing.get() {
            Err(BusFault)
        } else {
            Ok(self.low.get())
        }
    }
}

fn step<P: InputPin>(
    button: &mut ButtonClassifier<P, &ManualClock>,
    clock: &ManualClock,
    low: &Cell<bool>,
    now_ms: u64,
    pressed: bool,
) -> ButtonEvent {
    clock.set(now_ms);
    low.set(pressed);
    match button.poll() {
        Ok(event) => event,
        Err(_) => panic!("pin read failed at {now_ms}"),
    }
}

#[test]
fn poll_reads_pin_once_and_stays_idle_while_high() {
    let clock = ManualClock::new();
    let low = Cell::new(false);
    let mut button = ButtonClassifier::new(ScriptedPin::new(&low), &clock, WINDOW_MS, LONG_MS);

    for now_ms in (0..1_000).step_by(25) {
        assert_eq!(step(&mut button, &clock, &low, now_ms, false), ButtonEvent::None);
    }

    assert_eq!(button.engine().last_press_at_ms(), None);
    assert_eq!(button.engine().press_started_at_ms(), 0);
    let (pin, _) = button.release();
    assert_eq!(pin.reads, 40);
}

#[test]
fn single_press_through_pin_and_clock() {
    let clock = ManualClock::new();
    let low = Cell::new(false);
    let mut button = ButtonClassifier::new(ScriptedPin::new(&low), &clock, WINDOW_MS, LONG_MS);

    assert_eq!(step(&mut button, &clock, &low, 0, true), ButtonEvent::None);
    assert!(button.is_pressed());
    assert_eq!(step(&mut button, &clock, &low, 100, false), ButtonEvent::SinglePress);
    assert!(!button.is_pressed());
}

#[test]
fn double_press_through_pin_and_clock() {
    let clock = ManualClock::new();
    let low = Cell::new(false);
    let mut button = ButtonClassifier::new(ScriptedPin::new(&low), &clock, WINDOW_MS, LONG_MS);

    let _ = step(&mut button, &clock, &low, 0, true);
    let _ = step(&mut button, &clock, &low, 50, false);
    assert_eq!(step(&mut button, &clock, &low, 150, true), ButtonEvent::DoublePress);
    assert_eq!(step(&mut button, &clock, &low, 200, false), ButtonEvent::None);
}

#[test]
fn long_press_fires_while_pin_still_low() {
    let clock = ManualClock::new();
    let low = Cell::new(false);
    let mut button = ButtonClassifier::new(ScriptedPin::new(&low), &clock, WINDOW_MS, LONG_MS);

    let _ = step(&mut button, &clock, &low, 0, true);
    assert_eq!(step(&mut button, &clock, &low, 490, true), ButtonEvent::None);
    assert_eq!(step(&mut button, &clock, &low, 510, true), ButtonEvent::LongPress);
    assert!(!button.is_pressed());
    assert_eq!(button.last_trace().level, PinLevel::Low);
}

#[test]
fn independent_buttons_do_not_share_state() {
    let clock = ManualClock::new();
    let low_a = Cell::new(false);
    let low_b = Cell::new(false);
    let mut a = ButtonClassifier::new(ScriptedPin::new(&low_a), &clock, WINDOW_MS, LONG_MS);
    let mut b = ButtonClassifier::new(ScriptedPin::new(&low_b), &clock, WINDOW_MS, LONG_MS);

    let script = [(0, true), (50, false), (150, true), (200, false), (900, true)];
    for (now_ms, pressed) in script {
        let _ = step(&mut a, &clock, &low_a, now_ms, pressed);
        assert_eq!(step(&mut b, &clock, &low_b, now_ms, false), ButtonEvent::None);
    }

    assert!(a.is_pressed());
    assert!(!b.is_pressed());
    assert_eq!(b.engine().last_press_at_ms(), None);
    assert_eq!(b.engine().pending_presses(), 0);

    // b's first press is its own single, unaffected by a's history.
    assert_eq!(step(&mut b, &clock, &low_b, 950, true), ButtonEvent::None);
    assert_eq!(step(&mut b, &clock, &low_b, 1_000, false), ButtonEvent::SinglePress);
}

#[test]
fn failed_read_surfaces_pin_error_and_keeps_state() {
    let clock = ManualClock::new();
    let low = Cell::new(false);
    let failing = Cell::new(false);
    let mut button = ButtonClassifier::new(
        FlakyPin {
            low: &low,
            failing: &failing,
        },
        &clock,
        WINDOW_MS,
        LONG_MS,
    );

    low.set(true);
    assert!(matches!(button.poll(), Ok(ButtonEvent::None)));

    failing.set(true);
    clock.set(100);
    low.set(false);
    assert!(matches!(button.poll(), Err(ButtonError::Pin(BusFault))));
    assert!(button.is_pressed());
    assert_eq!(button.last_trace().now_ms, 0);

    failing.set(false);
    assert!(matches!(button.poll(), Ok(ButtonEvent::SinglePress)));
}

#[test]
fn with_config_applies_release_rearm() {
    let clock = ManualClock::new();
    let low = Cell::new(false);
    let config = ClassifierConfig::new(WINDOW_MS, LONG_MS)
        .with_long_press_rearm(crate::config::LongPressRearm::OnRelease);
    let mut button = ButtonClassifier::with_config(ScriptedPin::new(&low), &clock, config);

    let _ = step(&mut button, &clock, &low, 0, true);
    assert_eq!(step(&mut button, &clock, &low, 500, true), ButtonEvent::LongPress);
    assert_eq!(step(&mut button, &clock, &low, 520, true), ButtonEvent::None);
    assert_eq!(
        button.engine().state_id(),
        ClassifierStateId::LongPressLatched
    );
    assert_eq!(*button.config(), config);
}

#[test]
fn infallible_pin_polls_without_result() {
    let low = Cell::new(false);
    let mut button = ButtonClassifier::new(ScriptedPin::new(&low), EmbassyClock, WINDOW_MS, LONG_MS);

    assert_eq!(button.poll_event(), ButtonEvent::None);
    assert!(button.last_trace().now_ms <= EmbassyClock.now_ms());
}
