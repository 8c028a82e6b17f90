mod buttons;
pub(crate) mod config;
pub(crate) mod types;

use button_gestures::{active_config, ButtonClassifier, EmbassyClock};
use esp_hal::{
    gpio::{Input, InputConfig, InputPin, Level, Output, OutputConfig, Pull},
    timer::timg::TimerGroup,
};
use log::LevelFilter;

use self::types::{ButtonId, GestureButton, StatusLed};

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger_from_env();
    log::set_max_level(LevelFilter::Info);

    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let config = active_config();
    esp_println::println!(
        "buttons: boot double_click_window_ms={} long_press_threshold_ms={} poll_ms={}",
        config.classifier.double_click_window_ms,
        config.classifier.long_press_threshold_ms,
        config.polling.interval_ms
    );

    let boot_button = gesture_button(pulled_up_input(peripherals.GPIO0));
    let aux_button = gesture_button(pulled_up_input(peripherals.GPIO27));
    let status_led: StatusLed = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(buttons::button_poll_task(ButtonId::Boot, boot_button));
        spawner.must_spawn(buttons::button_poll_task(ButtonId::Aux, aux_button));
        spawner.must_spawn(buttons::gesture_dispatch_task(status_led));
    });
}

/// Idles high through the internal pull-up; pressing shorts the pin to ground.
fn pulled_up_input(pin: impl InputPin + 'static) -> Input<'static> {
    Input::new(pin, InputConfig::default().with_pull(Pull::Up))
}

fn gesture_button(input: Input<'static>) -> GestureButton {
    ButtonClassifier::with_config(input, EmbassyClock, active_config().classifier)
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}
