use crate::dom::ElementRef;

/// Entry criterion for a visibility subscription.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    /// How far the bottom edge of the viewport is pulled in.
    pub bottom_margin_px: f64,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            bottom_margin_px: 50.0,
        }
    }
}

impl VisibilityOptions {
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }

    pub fn qualifies(&self, is_intersecting: bool, ratio: f64) -> bool {
        is_intersecting && ratio >= self.threshold
    }
}

/// Fire-once visibility subscriptions: the element is unobserved before the
/// callback runs, so each registration yields at most one notification.
pub trait VisibilityNotifier {
    fn observe_once(
        &self,
        element: ElementRef,
        options: VisibilityOptions,
        callback: Box<dyn FnOnce(ElementRef)>,
    );
}
