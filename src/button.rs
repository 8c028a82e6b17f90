use core::convert::Infallible;

use embedded_hal::digital::InputPin;

use crate::{
    classifier::GestureEngine,
    clock::Clock,
    config::ClassifierConfig,
    trace::ClassifierTraceSample,
    types::{ButtonEvent, PinLevel, PinSample},
};

#[derive(Debug)]
pub enum ButtonError<E> {
    Pin(E),
}

impl<E> From<E> for ButtonError<E> {
    fn from(value: E) -> Self {
        Self::Pin(value)
    }
}

/// One physical active-low button sampled by polling.
///
/// The pin must already be configured as a pulled-up input, so it idles high and
/// reads low while pressed. Call [`ButtonClassifier::poll`] once per control loop
/// iteration; classification latency is bounded by the polling interval.
pub struct ButtonClassifier<P, C> {
    pin: P,
    clock: C,
    engine: GestureEngine,
}

impl<P, C> ButtonClassifier<P, C>
where
    P: InputPin,
    C: Clock,
{
    pub fn new(
        pin: P,
        clock: C,
        double_click_window_ms: u64,
        long_press_threshold_ms: u64,
    ) -> Self {
        Self::with_config(
            pin,
            clock,
            ClassifierConfig::new(double_click_window_ms, long_press_threshold_ms),
        )
    }

    pub fn with_config(pin: P, clock: C, config: ClassifierConfig) -> Self {
        Self {
            pin,
            clock,
            engine: GestureEngine::new(config),
        }
    }

    /// Samples the pin and the clock once and advances the gesture engine.
    ///
    /// A failed pin read leaves the engine untouched.
    pub fn poll(&mut self) -> Result<ButtonEvent, ButtonError<P::Error>> {
        let level = PinLevel::from_is_low(self.pin.is_low()?);
        let now_ms = self.clock.now_ms();
        Ok(self.engine.tick(PinSample::new(now_ms, level)).event)
    }

    pub fn is_pressed(&self) -> bool {
        self.engine.is_pressed()
    }

    pub fn config(&self) -> &ClassifierConfig {
        self.engine.config()
    }

    pub fn last_trace(&self) -> ClassifierTraceSample {
        self.engine.last_trace()
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

impl<P, C> ButtonClassifier<P, C>
where
    P: InputPin<Error = Infallible>,
    C: Clock,
{
    /// [`poll`](Self::poll) for pins whose reads cannot fail, such as esp-hal inputs.
    pub fn poll_event(&mut self) -> ButtonEvent {
        match self.poll() {
            Ok(event) => event,
            Err(ButtonError::Pin(never)) => match never {},
        }
    }
}

#[cfg(test)]
mod tests;
