use std::rc::Rc;
use std::time::Duration;

pub type SchedulerRef = Rc<dyn Scheduler>;

/// Returned by a repeating task after each run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// Cancels the repeating timer; the task is not invoked again.
    Done,
}

/// Deferred execution on the single event loop. Nothing here blocks.
pub trait Scheduler {
    fn once(&self, delay: Duration, task: Box<dyn FnOnce()>);
    fn every(&self, period: Duration, task: Box<dyn FnMut() -> Tick>);
}

pub fn millis_u32(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
