use button_gestures::{active_config, ButtonEvent};
use embassy_time::{Duration, Ticker};

use super::{
    config::{BUTTON_COUNT, BUTTON_GESTURES},
    types::{ButtonGesture, ButtonId, GestureButton, StatusLed},
};

#[embassy_executor::task(pool_size = 2)]
pub(crate) async fn button_poll_task(id: ButtonId, mut button: GestureButton) {
    let mut ticker = Ticker::every(Duration::from_millis(active_config().polling.interval_ms));

    loop {
        ticker.next().await;
        let event = button.poll_event();
        if event.is_none() {
            continue;
        }

        let gesture = ButtonGesture {
            button: id,
            event,
            at_ms: button.last_trace().now_ms,
        };
        // Never stall polling on a slow consumer; a full queue drops the gesture.
        if BUTTON_GESTURES.try_send(gesture).is_err() {
            log::warn!("buttons: queue full, dropped {} {}", id.as_str(), event.as_str());
        }
    }
}

#[embassy_executor::task]
pub(crate) async fn gesture_dispatch_task(mut status_led: StatusLed) {
    let mut counts = [GestureCounts::default(); BUTTON_COUNT];

    loop {
        let gesture = BUTTON_GESTURES.receive().await;
        let tally = &mut counts[gesture.button.index()];
        tally.record(gesture.event);

        match gesture.event {
            ButtonEvent::SinglePress => status_led.toggle(),
            ButtonEvent::DoublePress => status_led.set_high(),
            ButtonEvent::LongPress => status_led.set_low(),
            ButtonEvent::None => {}
        }

        log::info!(
            "buttons: {} {} at_ms={} singles={} doubles={} longs={}",
            gesture.button.as_str(),
            gesture.event.as_str(),
            gesture.at_ms,
            tally.singles,
            tally.doubles,
            tally.longs
        );
    }
}

#[derive(Clone, Copy, Default)]
struct GestureCounts {
    singles: u32,
    doubles: u32,
    longs: u32,
}

impl GestureCounts {
    fn record(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::SinglePress => self.singles = self.singles.wrapping_add(1),
            ButtonEvent::DoublePress => self.doubles = self.doubles.wrapping_add(1),
            ButtonEvent::LongPress => self.longs = self.longs.wrapping_add(1),
            ButtonEvent::None => {}
        }
    }
}
