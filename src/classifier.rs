use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::{
    config::{ClassifierConfig, LongPressRearm},
    trace::ClassifierTraceSample,
    types::{ButtonEvent, ClassifierStateId, GestureOutput, PinLevel, PinSample},
};

#[derive(Default)]
struct DispatchContext {
    event: ButtonEvent,
}

/// Gesture state machine for one active-low button.
///
/// Fed one [`PinSample`] per poll; never blocks and resolves at most one gesture per
/// sample. Long presses resolve on the first sample past the threshold, singles on
/// release, doubles on the second press.
pub struct GestureEngine {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl GestureEngine {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    pub fn tick(&mut self, sample: PinSample) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&sample, &mut context);
        GestureOutput {
            event: context.event,
            trace: self.machine.inner().last_trace,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.machine.inner().config
    }

    pub fn state_id(&self) -> ClassifierStateId {
        self.machine.inner().state_id
    }

    /// Logical press state. False while latched after a long press even though the
    /// pin may still read low.
    pub fn is_pressed(&self) -> bool {
        self.state_id() == ClassifierStateId::Pressed
    }

    pub fn last_press_at_ms(&self) -> Option<u64> {
        self.machine.inner().last_press_at_ms
    }

    pub fn press_started_at_ms(&self) -> u64 {
        self.machine.inner().press_started_at_ms
    }

    pub fn pending_presses(&self) -> u8 {
        self.machine.inner().pending_presses
    }

    pub fn last_trace(&self) -> ClassifierTraceSample {
        self.machine.inner().last_trace
    }
}

struct GestureHsm {
    config: ClassifierConfig,
    last_press_at_ms: Option<u64>,
    press_started_at_ms: u64,
    pending_presses: u8,
    state_id: ClassifierStateId,
    last_trace: ClassifierTraceSample,
}

impl GestureHsm {
    fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            last_press_at_ms: None,
            press_started_at_ms: 0,
            pending_presses: 0,
            state_id: ClassifierStateId::Released,
            last_trace: ClassifierTraceSample::default(),
        }
    }

    fn held_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.press_started_at_ms)
    }

    fn within_double_click_window(&self, now_ms: u64) -> bool {
        self.last_press_at_ms.is_some_and(|last| {
            now_ms.saturating_sub(last) < self.config.double_click_window_ms
        })
    }

    fn reached_long_press(&self, now_ms: u64) -> bool {
        self.held_ms(now_ms) >= self.config.long_press_threshold_ms
    }

    fn enter(&mut self, target: ClassifierStateId) -> Outcome<State> {
        self.state_id = target;
        match target {
            ClassifierStateId::Released => Transition(State::released()),
            ClassifierStateId::Pressed => Transition(State::pressed()),
            ClassifierStateId::LongPressLatched => Transition(State::long_press_latched()),
        }
    }

    fn emit(
        &mut self,
        context: &mut DispatchContext,
        state_id: ClassifierStateId,
        sample: PinSample,
        held_ms: u64,
        event: ButtonEvent,
    ) {
        context.event = event;
        self.last_trace = ClassifierTraceSample {
            now_ms: sample.now_ms,
            state_id,
            level: sample.level,
            held_ms,
            since_last_press_ms: self
                .last_press_at_ms
                .map(|last| sample.now_ms.saturating_sub(last)),
            pending_presses: self.pending_presses,
            event,
        };

        if !event.is_none() {
            log::debug!(
                "button: {} at_ms={} held_ms={}",
                event.as_str(),
                sample.now_ms,
                held_ms
            );
        }
    }
}

#[state_machine(initial = "State::released()")]
impl GestureHsm {
    #[state]
    fn released(&mut self, context: &mut DispatchContext, event: &PinSample) -> Outcome<State> {
        let sample = *event;
        if sample.level == PinLevel::High {
            self.emit(context, ClassifierStateId::Released, sample, 0, ButtonEvent::None);
            return Handled;
        }

        log::trace!("button: press at_ms={}", sample.now_ms);
        self.press_started_at_ms = sample.now_ms;
        self.pending_presses = self.pending_presses.saturating_add(1);

        let gesture = if self.within_double_click_window(sample.now_ms) {
            self.pending_presses = 0;
            ButtonEvent::DoublePress
        } else {
            ButtonEvent::None
        };
        // Updated even when a double fired, so the next press pairs with this one.
        self.last_press_at_ms = Some(sample.now_ms);

        self.emit(context, ClassifierStateId::Released, sample, 0, gesture);
        self.enter(ClassifierStateId::Pressed)
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &PinSample) -> Outcome<State> {
        let sample = *event;
        let held_ms = self.held_ms(sample.now_ms);
        let long_press = self.reached_long_press(sample.now_ms);

        match sample.level {
            PinLevel::High => {
                log::trace!("button: release at_ms={} held_ms={}", sample.now_ms, held_ms);
                let gesture = if long_press {
                    ButtonEvent::LongPress
                } else if self.pending_presses == 1 {
                    ButtonEvent::SinglePress
                } else {
                    ButtonEvent::None
                };
                self.pending_presses = 0;
                self.emit(context, ClassifierStateId::Pressed, sample, held_ms, gesture);
                self.enter(ClassifierStateId::Released)
            }
            PinLevel::Low if long_press => {
                self.pending_presses = 0;
                self.emit(
                    context,
                    ClassifierStateId::Pressed,
                    sample,
                    held_ms,
                    ButtonEvent::LongPress,
                );
                match self.config.long_press_rearm {
                    LongPressRearm::OnTransition => self.enter(ClassifierStateId::Released),
                    LongPressRearm::OnRelease => self.enter(ClassifierStateId::LongPressLatched),
                }
            }
            PinLevel::Low => {
                self.emit(
                    context,
                    ClassifierStateId::Pressed,
                    sample,
                    held_ms,
                    ButtonEvent::None,
                );
                Handled
            }
        }
    }

    #[state]
    fn long_press_latched(
        &mut self,
        context: &mut DispatchContext,
        event: &PinSample,
    ) -> Outcome<State> {
        let sample = *event;
        let held_ms = self.held_ms(sample.now_ms);
        self.emit(
            context,
            ClassifierStateId::LongPressLatched,
            sample,
            held_ms,
            ButtonEvent::None,
        );

        match sample.level {
            PinLevel::High => {
                log::trace!("button: release after long press at_ms={}", sample.now_ms);
                self.enter(ClassifierStateId::Released)
            }
            PinLevel::Low => Handled,
        }
    }
}
