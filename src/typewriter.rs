use crate::config::EffectsConfig;
use crate::dom::PageRef;
use crate::scheduler::SchedulerRef;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub const TYPING_SELECTOR: &str = ".typing-text";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    /// Full role is on screen; the next step only waits.
    Paused,
    Deleting,
}

/// One step's output: text to display (if it changed) and when to step again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: Option<String>,
    pub next_delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub typing: Duration,
    pub deleting: Duration,
    pub pause: Duration,
}

impl TypewriterTiming {
    pub fn from_config(config: &EffectsConfig) -> Self {
        Self {
            typing: config.typing_delay,
            deleting: config.deleting_delay,
            pause: config.typing_pause,
        }
    }
}

/// Endless type / pause / delete cycle over a fixed role list.
#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<String>,
    timing: TypewriterTiming,
    role_index: usize,
    char_index: usize,
    phase: Phase,
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new(roles: Vec<String>, timing: TypewriterTiming) -> Option<Self> {
        let roles: Vec<String> = roles.into_iter().filter(|role| !role.is_empty()).collect();
        if roles.is_empty() {
            return None;
        }

        Some(Self {
            roles,
            timing,
            role_index: 0,
            char_index: 0,
            phase: Phase::Typing,
        })
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn role_index(&self) -> usize {
        self.role_index
    }

    fn visible_prefix(&self) -> String {
        self.roles[self.role_index]
            .chars()
            .take(self.char_index)
            .collect()
    }

    pub fn step(&mut self) -> Frame {
        let text = match self.phase {
            Phase::Paused => {
                self.phase = Phase::Deleting;
                return Frame {
                    text: None,
                    next_delay: self.timing.pause,
                };
            }
            Phase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                let text = self.visible_prefix();
                if self.char_index == 0 {
                    self.phase = Phase::Typing;
                    self.role_index = (self.role_index + 1) % self.roles.len();
                }
                text
            }
            Phase::Typing => {
                self.char_index += 1;
                let text = self.visible_prefix();
                if self.char_index >= self.roles[self.role_index].chars().count() {
                    self.phase = Phase::Paused;
                }
                text
            }
        };

        let next_delay = match self.phase {
            Phase::Deleting => self.timing.deleting,
            Phase::Typing | Phase::Paused => self.timing.typing,
        };

        Frame {
            text: Some(text),
            next_delay,
        }
    }
}

struct TypewriterDriver {
    page: PageRef,
    scheduler: SchedulerRef,
    state: RefCell<Typewriter>,
}

fn schedule(driver: Rc<TypewriterDriver>, delay: Duration) {
    let scheduler = driver.scheduler.clone();
    scheduler.once(delay, Box::new(move || tick(driver)));
}

fn tick(driver: Rc<TypewriterDriver>) {
    let Some(element) = driver.page.query(TYPING_SELECTOR) else {
        log::debug!("no {TYPING_SELECTOR}; typewriter stopped");
        return;
    };

    let frame = driver.state.borrow_mut().step();
    if let Some(text) = frame.text {
        element.set_text(&text);
    }

    schedule(driver, frame.next_delay);
}

/// Starts the loop after the configured initial delay. Returns `false` when
/// the role list is empty.
pub fn install(page: &PageRef, scheduler: &SchedulerRef, config: &EffectsConfig) -> bool {
    let Some(typewriter) = Typewriter::new(config.roles.clone(), TypewriterTiming::from_config(config)) else {
        return false;
    };

    let driver = Rc::new(TypewriterDriver {
        page: page.clone(),
        scheduler: scheduler.clone(),
        state: RefCell::new(typewriter),
    });
    schedule(driver, config.typing_start_delay);

    true
}
