//! Compiles `config/buttons.toml` into Rust constants for the firmware.
//!
//! The firmware is `no_std`, so the TOML is parsed and validated on the host at
//! build time and rendered as a `static` the library `include!`s.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LongPressRearmSetting {
    #[default]
    Transition,
    Release,
}

impl LongPressRearmSetting {
    fn variant_path(self) -> &'static str {
        match self {
            Self::Transition => "LongPressRearm::OnTransition",
            Self::Release => "LongPressRearm::OnRelease",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierSection {
    pub double_click_window_ms: u64,
    pub long_press_threshold_ms: u64,
    #[serde(default)]
    pub long_press_rearm: LongPressRearmSetting,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollingSection {
    pub interval_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonsFile {
    pub classifier: ClassifierSection,
    pub polling: PollingSection,
}

pub fn parse_buttons_str(source: &str) -> Result<ButtonsFile, ConfigCompilerError> {
    toml::from_str(source).map_err(|err| ConfigCompilerError::Parse(err.to_string()))
}

pub fn parse_buttons_file(path: &Path) -> Result<ButtonsFile, ConfigCompilerError> {
    let source = fs::read_to_string(path)
        .map_err(|err| ConfigCompilerError::Io(format!("{}: {err}", path.display())))?;
    parse_buttons_str(&source)
}

pub fn validate_config(buttons: &ButtonsFile) -> Result<(), ConfigCompilerError> {
    let classifier = &buttons.classifier;
    let polling = &buttons.polling;

    if classifier.double_click_window_ms == 0 {
        return Err(validation("classifier.double_click_window_ms must be > 0"));
    }
    if classifier.long_press_threshold_ms == 0 {
        return Err(validation("classifier.long_press_threshold_ms must be > 0"));
    }
    if polling.interval_ms == 0 {
        return Err(validation("polling.interval_ms must be > 0"));
    }
    // A slower poll cannot observe release and re-press inside the window.
    if polling.interval_ms >= classifier.double_click_window_ms {
        return Err(validation(
            "polling.interval_ms must be < classifier.double_click_window_ms",
        ));
    }
    if classifier.long_press_threshold_ms <= polling.interval_ms {
        return Err(validation(
            "classifier.long_press_threshold_ms must be > polling.interval_ms",
        ));
    }

    Ok(())
}

pub fn render_generated_config(buttons: &ButtonsFile) -> String {
    let classifier = &buttons.classifier;
    format!(
        "// @generated by button_config_compiler. Do not edit.

pub static BUTTON_CONFIG: ButtonConfig = ButtonConfig {{
    classifier: ClassifierConfig {{
        double_click_window_ms: {double},
        long_press_threshold_ms: {long},
        long_press_rearm: {rearm},
    }},
    polling: PollingConfig {{
        interval_ms: {interval},
    }},
}};
",
        double = classifier.double_click_window_ms,
        long = classifier.long_press_threshold_ms,
        rearm = classifier.long_press_rearm.variant_path(),
        interval = buttons.polling.interval_ms,
    )
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let buttons = parse_buttons_file(path)?;
    validate_config(&buttons)?;
    Ok(render_generated_config(&buttons))
}

fn validation(msg: &str) -> ConfigCompilerError {
    ConfigCompilerError::Validation(msg.to_owned())
}
