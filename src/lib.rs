#![cfg_attr(not(test), no_std)]

//! Polling classifier that turns an active-low button into single, double and
//! long press gestures without blocking or interrupts.

pub mod button;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod trace;
pub mod types;

pub use button::{ButtonClassifier, ButtonError};
pub use classifier::GestureEngine;
pub use clock::{Clock, EmbassyClock};
pub use config::{active_config, ButtonConfig, ClassifierConfig, LongPressRearm, PollingConfig};
pub use trace::ClassifierTraceSample;
pub use types::{ButtonEvent, ClassifierStateId, GestureOutput, PinLevel, PinSample};
