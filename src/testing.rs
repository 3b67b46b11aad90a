//! In-memory stand-ins for the browser, used by unit tests.

use crate::dom::{ClickAction, Element, ElementRef, Page, Rect};
use crate::scheduler::{Scheduler, Tick};
use crate::visibility::{VisibilityNotifier, VisibilityOptions};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
pub struct FakeElement {
    classes: RefCell<BTreeSet<String>>,
    styles: RefCell<HashMap<String, String>>,
    text: RefCell<String>,
    attributes: RefCell<HashMap<String, String>>,
    children: RefCell<HashMap<String, Vec<ElementRef>>>,
    rect: Cell<Rect>,
    offset_top: Cell<f64>,
    offset_height: Cell<f64>,
    click_handlers: RefCell<Vec<Box<dyn FnMut() -> ClickAction>>>,
    move_handlers: RefCell<Vec<Box<dyn FnMut(f64, f64)>>>,
    leave_handlers: RefCell<Vec<Box<dyn FnMut()>>>,
}

impl FakeElement {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_attribute(name: &str, value: &str) -> Rc<Self> {
        let element = Self::new();
        element.set_attribute(name, value);
        element
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_children(&self, selector: &str, children: &[Rc<FakeElement>]) {
        self.children.borrow_mut().insert(
            selector.to_string(),
            children.iter().map(element_ref).collect(),
        );
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    pub fn set_layout(&self, offset_top: f64, offset_height: f64) {
        self.offset_top.set(offset_top);
        self.offset_height.set(offset_height);
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Fires every click handler; reports whether any prevented the default.
    pub fn click(&self) -> ClickAction {
        let mut outcome = ClickAction::Proceed;
        for handler in self.click_handlers.borrow_mut().iter_mut() {
            if handler() == ClickAction::PreventDefault {
                outcome = ClickAction::PreventDefault;
            }
        }
        outcome
    }

    pub fn mouse_move(&self, client_x: f64, client_y: f64) {
        for handler in self.move_handlers.borrow_mut().iter_mut() {
            handler(client_x, client_y);
        }
    }

    pub fn mouse_leave(&self) {
        for handler in self.leave_handlers.borrow_mut().iter_mut() {
            handler();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.click_handlers.borrow().len()
            + self.move_handlers.borrow().len()
            + self.leave_handlers.borrow().len()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        self.children
            .borrow()
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn offset_top(&self) -> f64 {
        self.offset_top.get()
    }

    fn offset_height(&self) -> f64 {
        self.offset_height.get()
    }

    fn on_click(&self, handler: Box<dyn FnMut() -> ClickAction>) {
        self.click_handlers.borrow_mut().push(handler);
    }

    fn on_mouse_move(&self, handler: Box<dyn FnMut(f64, f64)>) {
        self.move_handlers.borrow_mut().push(handler);
    }

    fn on_mouse_leave(&self, handler: Box<dyn FnMut()>) {
        self.leave_handlers.borrow_mut().push(handler);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn element_ref(element: &Rc<FakeElement>) -> ElementRef {
    element.clone()
}

pub struct FakePage {
    elements: RefCell<HashMap<String, Vec<ElementRef>>>,
    body: Rc<FakeElement>,
    scroll_y: Cell<f64>,
    viewport_width: Cell<f64>,
    scrolled_to: RefCell<Vec<f64>>,
    scroll_handlers: RefCell<Vec<Box<dyn FnMut()>>>,
    ready_handlers: RefCell<Vec<Box<dyn FnOnce()>>>,
    console: RefCell<Vec<(String, String)>>,
}

impl FakePage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            elements: RefCell::new(HashMap::new()),
            body: FakeElement::new(),
            scroll_y: Cell::new(0.0),
            viewport_width: Cell::new(1280.0),
            scrolled_to: RefCell::new(Vec::new()),
            scroll_handlers: RefCell::new(Vec::new()),
            ready_handlers: RefCell::new(Vec::new()),
            console: RefCell::new(Vec::new()),
        })
    }

    pub fn insert(&self, selector: &str, elements: &[Rc<FakeElement>]) {
        self.elements.borrow_mut().insert(
            selector.to_string(),
            elements.iter().map(element_ref).collect(),
        );
    }

    pub fn fake_body(&self) -> Rc<FakeElement> {
        self.body.clone()
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.viewport_width.set(width);
    }

    /// Moves the scroll offset and dispatches the scroll event.
    pub fn scroll(&self, offset: f64) {
        self.scroll_y.set(offset);
        for handler in self.scroll_handlers.borrow_mut().iter_mut() {
            handler();
        }
    }

    pub fn make_ready(&self) {
        let handlers: Vec<_> = self.ready_handlers.borrow_mut().drain(..).collect();
        for handler in handlers {
            handler();
        }
    }

    pub fn scrolled_to(&self) -> Vec<f64> {
        self.scrolled_to.borrow().clone()
    }

    pub fn console_lines(&self) -> Vec<(String, String)> {
        self.console.borrow().clone()
    }
}

impl Page for FakePage {
    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.elements
            .borrow()
            .get(selector)
            .and_then(|elements| elements.first().cloned())
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        self.elements
            .borrow()
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    fn body(&self) -> Option<ElementRef> {
        Some(element_ref(&self.body))
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scrolled_to.borrow_mut().push(top);
    }

    fn on_scroll(&self, handler: Box<dyn FnMut()>) {
        self.scroll_handlers.borrow_mut().push(handler);
    }

    fn on_ready(&self, handler: Box<dyn FnOnce()>) {
        self.ready_handlers.borrow_mut().push(handler);
    }

    fn console_styled(&self, message: &str, style: &str) {
        self.console
            .borrow_mut()
            .push((message.to_string(), style.to_string()));
    }
}

enum Job {
    Once(Box<dyn FnOnce()>),
    Every {
        period: u64,
        task: Box<dyn FnMut() -> Tick>,
    },
}

struct Entry {
    due: u64,
    seq: u64,
    job: Job,
}

/// Virtual clock. Tasks fire in deadline order, ties in registration order.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Entry>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn push(&self, due: u64, job: Job) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Entry { due, seq, job });
    }

    fn pop_due(&self, until: u64) -> Option<Entry> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)?;
        Some(queue.remove(index))
    }

    /// Runs everything due within the next `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        let until = self.now.get() + ms;

        while let Some(entry) = self.pop_due(until) {
            self.now.set(entry.due);
            match entry.job {
                Job::Once(task) => task(),
                Job::Every { period, mut task } => {
                    if task() == Tick::Continue {
                        self.push(entry.due + period, Job::Every { period, task });
                    }
                }
            }
        }

        self.now.set(until);
    }
}

impl Scheduler for ManualScheduler {
    fn once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.push(self.now.get() + delay_ms(delay), Job::Once(task));
    }

    fn every(&self, period: Duration, task: Box<dyn FnMut() -> Tick>) {
        let period = delay_ms(period).max(1);
        self.push(self.now.get() + period, Job::Every { period, task });
    }
}

fn delay_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

pub fn same_element(left: &ElementRef, right: &ElementRef) -> bool {
    Rc::as_ptr(left) as *const () == Rc::as_ptr(right) as *const ()
}

struct Subscription {
    element: ElementRef,
    options: VisibilityOptions,
    callback: Box<dyn FnOnce(ElementRef)>,
}

#[derive(Default)]
pub struct FakeVisibility {
    subscriptions: RefCell<Vec<Subscription>>,
}

impl FakeVisibility {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn observed(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Reports `element` at the given visible ratio, firing and dropping any
    /// subscription whose criterion is met.
    pub fn reveal(&self, element: &Rc<FakeElement>, ratio: f64) {
        let target = element_ref(element);
        let fired: Vec<Subscription> = {
            let mut subscriptions = self.subscriptions.borrow_mut();
            let (fired, kept) = subscriptions.drain(..).partition(|subscription| {
                same_element(&subscription.element, &target)
                    && subscription.options.qualifies(ratio > 0.0, ratio)
            });
            *subscriptions = kept;
            fired
        };

        for subscription in fired {
            (subscription.callback)(subscription.element);
        }
    }
}

impl VisibilityNotifier for FakeVisibility {
    fn observe_once(
        &self,
        element: ElementRef,
        options: VisibilityOptions,
        callback: Box<dyn FnOnce(ElementRef)>,
    ) {
        self.subscriptions.borrow_mut().push(Subscription {
            element,
            options,
            callback,
        });
    }
}
