use crate::config::EffectsConfig;
use crate::dom::{ElementRef, PageRef};
use crate::scheduler::{SchedulerRef, Tick};
use crate::visibility::VisibilityNotifier;
use std::rc::Rc;
use std::time::Duration;

pub const COUNTER_SELECTOR: &str = ".stat-number";
pub const COUNT_ATTRIBUTE: &str = "data-count";

/// Reads an integer the way `parseInt` does: optional sign, then leading
/// digits; anything after the digits is ignored. Digit runs too long for
/// `i64` saturate at `i64::MAX` / `i64::MIN`.
pub fn parse_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    match digits.parse::<i64>() {
        Ok(value) => Some(sign * value),
        Err(_) if sign < 0 => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// en-US thousands grouping, e.g. `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Linear count-up from zero. `step` yields the text to display, and whether
/// this was the final frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: i64, duration: Duration, tick: Duration) -> Self {
        let steps = duration.as_millis() as f64 / tick.as_millis().max(1) as f64;

        Self {
            target,
            increment: target as f64 / steps,
            current: 0.0,
        }
    }

    pub fn step(&mut self) -> (String, Tick) {
        self.current += self.increment;

        if self.current >= self.target as f64 {
            (group_thousands(self.target), Tick::Done)
        } else {
            (group_thousands(self.current.floor() as i64), Tick::Continue)
        }
    }
}

/// Drives `element` from 0 to `target` on a repeating timer, cancelled on the
/// frame that shows `target`.
pub fn animate_counter(
    scheduler: &SchedulerRef,
    element: ElementRef,
    target: i64,
    config: &EffectsConfig,
) {
    let mut animation = CounterAnimation::new(target, config.counter_duration, config.counter_tick);

    scheduler.every(
        config.counter_tick,
        Box::new(move || {
            let (text, tick) = animation.step();
            element.set_text(&text);
            tick
        }),
    );
}

/// Subscribes every counter with a parseable target to a fire-once visibility
/// notification that starts its animation. Returns how many were subscribed.
pub fn install(
    page: &PageRef,
    scheduler: &SchedulerRef,
    visibility: &Rc<dyn VisibilityNotifier>,
    config: &EffectsConfig,
) -> usize {
    let mut observed = 0;

    for element in page.query_all(COUNTER_SELECTOR) {
        let Some(target) = element.attribute(COUNT_ATTRIBUTE).as_deref().and_then(parse_count) else {
            log::debug!("counter without a numeric {COUNT_ATTRIBUTE}; skipped");
            continue;
        };

        let scheduler = scheduler.clone();
        let config = config.clone();
        visibility.observe_once(
            element,
            config.counter_visibility,
            Box::new(move |element| animate_counter(&scheduler, element, target, &config)),
        );
        observed += 1;
    }

    observed
}
