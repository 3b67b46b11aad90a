use std::any::Any;
use std::rc::Rc;

pub type ElementRef = Rc<dyn Element>;
pub type PageRef = Rc<dyn Page>;

/// Viewport-relative box of an element, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// What a click handler wants done with the browser's default navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    Proceed,
    PreventDefault,
}

/// A single element of the page. Lookups that may miss return `Option` or an
/// empty `Vec`; writes to a detached element are silently dropped.
pub trait Element {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_style(&self, property: &str, value: &str);
    fn set_text(&self, text: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;
    fn bounding_rect(&self) -> Rect;
    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;
    fn on_click(&self, handler: Box<dyn FnMut() -> ClickAction>);
    /// Handler receives the pointer's client (viewport) coordinates.
    fn on_mouse_move(&self, handler: Box<dyn FnMut(f64, f64)>);
    fn on_mouse_leave(&self, handler: Box<dyn FnMut()>);
    /// Lets a platform binding recover its own element type.
    fn as_any(&self) -> &dyn Any;

    fn set_class(&self, class: &str, enabled: bool) {
        if enabled {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

/// Document plus window: everything the effects read from or write to outside
/// a single element.
pub trait Page {
    /// Invalid selectors are treated the same as selectors with no match.
    fn query(&self, selector: &str) -> Option<ElementRef>;
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;
    fn body(&self) -> Option<ElementRef>;
    fn scroll_y(&self) -> f64;
    fn viewport_width(&self) -> f64;
    /// Animated scroll to an absolute vertical offset.
    fn scroll_to(&self, top: f64);
    fn on_scroll(&self, handler: Box<dyn FnMut()>);
    /// Runs once the document has been parsed, immediately if it already has.
    fn on_ready(&self, handler: Box<dyn FnOnce()>);
    fn console_styled(&self, message: &str, style: &str);
}
