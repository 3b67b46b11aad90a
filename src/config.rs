use crate::visibility::VisibilityOptions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;
use std::time::Duration;

pub const CONFIG_ATTRIBUTE: &str = "data-effects";

const DEFAULT_NARROW_VIEWPORT_WIDTH: f64 = 768.0;
const DEFAULT_SCROLL_THRESHOLD: f64 = 50.0;
const DEFAULT_NAVBAR_BACKGROUND: &str = "rgba(255, 255, 255, 0.9)";
const DEFAULT_NAVBAR_BACKGROUND_SCROLLED: &str = "rgba(255, 255, 255, 0.95)";
const DEFAULT_SECTION_OFFSET: f64 = 100.0;
const DEFAULT_COUNTER_DURATION_MS: u64 = 2_000;
const DEFAULT_COUNTER_TICK_MS: u64 = 16;
const DEFAULT_TYPING_START_DELAY_MS: u64 = 1_000;
const DEFAULT_TYPING_DELAY_MS: u64 = 80;
const DEFAULT_DELETING_DELAY_MS: u64 = 50;
const DEFAULT_TYPING_PAUSE_MS: u64 = 1_500;
const DEFAULT_TILT_DIVISOR: f64 = 20.0;
const DEFAULT_TILT_LIFT_PX: f64 = 8.0;
const DEFAULT_TILT_PERSPECTIVE_PX: f64 = 1_000.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_ROLES: [&str; 3] = [
    "Full Stack Web & AI Developer",
    "EdTech Platform Builder",
    "React & Next.js Expert",
];

const NARROW_VIEWPORT_WIDTH_BOUNDS: (f64, f64) = (320.0, 2_560.0);
const SCROLL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const SECTION_OFFSET_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const COUNTER_DURATION_MS_BOUNDS: (u64, u64) = (100, 60_000);
const COUNTER_TICK_MS_BOUNDS: (u64, u64) = (4, 1_000);
const TYPING_START_DELAY_MS_BOUNDS: (u64, u64) = (0, 60_000);
const TYPING_DELAY_MS_BOUNDS: (u64, u64) = (10, 5_000);
const DELETING_DELAY_MS_BOUNDS: (u64, u64) = (10, 5_000);
const TYPING_PAUSE_MS_BOUNDS: (u64, u64) = (0, 60_000);
const TILT_DIVISOR_BOUNDS: (f64, f64) = (1.0, 200.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub narrow_viewport_width: f64,
    pub scroll_threshold: f64,
    pub navbar_background: String,
    pub navbar_background_scrolled: String,
    pub section_offset: f64,
    pub counter_duration: Duration,
    pub counter_tick: Duration,
    pub counter_visibility: VisibilityOptions,
    pub typing_start_delay: Duration,
    pub typing_delay: Duration,
    pub deleting_delay: Duration,
    pub typing_pause: Duration,
    pub roles: Vec<String>,
    pub tilt_divisor: f64,
    pub tilt_lift_px: f64,
    pub tilt_perspective_px: f64,
    pub log_level: LogLevel,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            narrow_viewport_width: DEFAULT_NARROW_VIEWPORT_WIDTH,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            navbar_background: DEFAULT_NAVBAR_BACKGROUND.to_string(),
            navbar_background_scrolled: DEFAULT_NAVBAR_BACKGROUND_SCROLLED.to_string(),
            section_offset: DEFAULT_SECTION_OFFSET,
            counter_duration: Duration::from_millis(DEFAULT_COUNTER_DURATION_MS),
            counter_tick: Duration::from_millis(DEFAULT_COUNTER_TICK_MS),
            counter_visibility: VisibilityOptions::default(),
            typing_start_delay: Duration::from_millis(DEFAULT_TYPING_START_DELAY_MS),
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            deleting_delay: Duration::from_millis(DEFAULT_DELETING_DELAY_MS),
            typing_pause: Duration::from_millis(DEFAULT_TYPING_PAUSE_MS),
            roles: DEFAULT_ROLES.iter().map(|role| role.to_string()).collect(),
            tilt_divisor: DEFAULT_TILT_DIVISOR,
            tilt_lift_px: DEFAULT_TILT_LIFT_PX,
            tilt_perspective_px: DEFAULT_TILT_PERSPECTIVE_PX,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Page-supplied overrides, read from the JSON in `<body data-effects="...">`.
/// A value of the wrong shape only drops that one override.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EffectsOverrides {
    #[serde(deserialize_with = "lenient")]
    narrow_viewport_width: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    scroll_threshold: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    navbar_background: Option<String>,
    #[serde(deserialize_with = "lenient")]
    navbar_background_scrolled: Option<String>,
    #[serde(deserialize_with = "lenient")]
    section_offset: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    counter_duration_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    counter_tick_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    typing_start_delay_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    typing_delay_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    deleting_delay_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    typing_pause_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    roles: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    tilt_divisor: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    log_level: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl EffectsConfig {
    /// Builds the config from the raw `data-effects` attribute. A missing or
    /// malformed attribute yields the defaults; each override must fall inside
    /// its bounds or it is ignored.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let overrides = match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(raw) => match serde_json::from_str::<EffectsOverrides>(raw) {
                Ok(overrides) => overrides,
                Err(error) => {
                    log::warn!("ignoring malformed {CONFIG_ATTRIBUTE} attribute: {error}");
                    EffectsOverrides::default()
                }
            },
            None => EffectsOverrides::default(),
        };

        Self::from_overrides(overrides)
    }

    fn from_overrides(overrides: EffectsOverrides) -> Self {
        let defaults = Self::default();

        Self {
            narrow_viewport_width: bounded_f64(
                overrides.narrow_viewport_width,
                defaults.narrow_viewport_width,
                NARROW_VIEWPORT_WIDTH_BOUNDS,
            ),
            scroll_threshold: bounded_f64(
                overrides.scroll_threshold,
                defaults.scroll_threshold,
                SCROLL_THRESHOLD_BOUNDS,
            ),
            navbar_background: non_empty(overrides.navbar_background)
                .unwrap_or(defaults.navbar_background),
            navbar_background_scrolled: non_empty(overrides.navbar_background_scrolled)
                .unwrap_or(defaults.navbar_background_scrolled),
            section_offset: bounded_f64(
                overrides.section_offset,
                defaults.section_offset,
                SECTION_OFFSET_BOUNDS,
            ),
            counter_duration: bounded_ms(
                overrides.counter_duration_ms,
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            counter_tick: bounded_ms(
                overrides.counter_tick_ms,
                DEFAULT_COUNTER_TICK_MS,
                COUNTER_TICK_MS_BOUNDS,
            ),
            counter_visibility: defaults.counter_visibility,
            typing_start_delay: bounded_ms(
                overrides.typing_start_delay_ms,
                DEFAULT_TYPING_START_DELAY_MS,
                TYPING_START_DELAY_MS_BOUNDS,
            ),
            typing_delay: bounded_ms(
                overrides.typing_delay_ms,
                DEFAULT_TYPING_DELAY_MS,
                TYPING_DELAY_MS_BOUNDS,
            ),
            deleting_delay: bounded_ms(
                overrides.deleting_delay_ms,
                DEFAULT_DELETING_DELAY_MS,
                DELETING_DELAY_MS_BOUNDS,
            ),
            typing_pause: bounded_ms(
                overrides.typing_pause_ms,
                DEFAULT_TYPING_PAUSE_MS,
                TYPING_PAUSE_MS_BOUNDS,
            ),
            roles: overrides
                .roles
                .map(|roles| {
                    roles
                        .into_iter()
                        .filter(|role| !role.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|roles| !roles.is_empty())
                .unwrap_or(defaults.roles),
            tilt_divisor: bounded_f64(
                overrides.tilt_divisor,
                defaults.tilt_divisor,
                TILT_DIVISOR_BOUNDS,
            ),
            tilt_lift_px: defaults.tilt_lift_px,
            tilt_perspective_px: defaults.tilt_perspective_px,
            log_level: overrides
                .log_level
                .as_deref()
                .and_then(LogLevel::from_str)
                .unwrap_or(defaults.log_level),
        }
    }
}

fn bounded_f64(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn bounded_ms(value: Option<u64>, default: u64, bounds: (u64, u64)) -> Duration {
    Duration::from_millis(
        value
            .filter(|value| (bounds.0..=bounds.1).contains(value))
            .unwrap_or(default),
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
