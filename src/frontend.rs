use crate::controller;
use crate::dom::{ClickAction, Element, ElementRef, Page, PageRef, Rect};
use crate::scheduler::{millis_u32, Scheduler, SchedulerRef, Tick};
use crate::visibility::{VisibilityNotifier, VisibilityOptions};
use gloo_timers::callback::{Interval, Timeout};
use js_sys::Array;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, NodeList, ScrollBehavior,
    ScrollToOptions, Window,
};

const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;

/// Registers `handler` for the rest of the page's life.
fn listen(target: &EventTarget, event_name: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);

    if let Err(error) =
        target.add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
    {
        log::warn!("could not listen for {event_name}: {error:?}");
        return;
    }

    callback.forget();
}

fn collect_elements(list: Result<NodeList, JsValue>) -> Vec<ElementRef> {
    let Ok(list) = list else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|element| Rc::new(BrowserElement(element)) as ElementRef)
        .collect()
}

struct BrowserElement(HtmlElement);

impl Element for BrowserElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        collect_elements(self.0.query_selector_all(selector))
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    fn offset_top(&self) -> f64 {
        f64::from(self.0.offset_top())
    }

    fn offset_height(&self) -> f64 {
        f64::from(self.0.offset_height())
    }

    fn on_click(&self, mut handler: Box<dyn FnMut() -> ClickAction>) {
        listen(&self.0, "click", move |event| {
            if handler() == ClickAction::PreventDefault {
                event.prevent_default();
            }
        });
    }

    fn on_mouse_move(&self, mut handler: Box<dyn FnMut(f64, f64)>) {
        listen(&self.0, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                handler(f64::from(event.client_x()), f64::from(event.client_y()));
            }
        });
    }

    fn on_mouse_leave(&self, mut handler: Box<dyn FnMut()>) {
        listen(&self.0, "mouseleave", move |_| handler());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct BrowserPage {
    window: Window,
    document: Document,
}

impl Page for BrowserPage {
    fn query(&self, selector: &str) -> Option<ElementRef> {
        let element = self.document.query_selector(selector).ok().flatten()?;
        let element = element.dyn_into::<HtmlElement>().ok()?;
        Some(Rc::new(BrowserElement(element)) as ElementRef)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        collect_elements(self.document.query_selector_all(selector))
    }

    fn body(&self) -> Option<ElementRef> {
        let body = self.document.body()?;
        Some(Rc::new(BrowserElement(body)) as ElementRef)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn on_scroll(&self, mut handler: Box<dyn FnMut()>) {
        listen(&self.window, "scroll", move |_| handler());
    }

    fn on_ready(&self, handler: Box<dyn FnOnce()>) {
        if self.document.ready_state() != "loading" {
            handler();
            return;
        }

        let mut handler = Some(handler);
        listen(&self.document, "DOMContentLoaded", move |_| {
            if let Some(handler) = handler.take() {
                handler();
            }
        });
    }

    fn console_styled(&self, message: &str, style: &str) {
        web_sys::console::log_2(
            &JsValue::from_str(&format!("%c{message}")),
            &JsValue::from_str(style),
        );
    }
}

/// `setTimeout` / `setInterval` through `gloo-timers`.
struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        Timeout::new(millis_u32(delay), task).forget();
    }

    fn every(&self, period: Duration, mut task: Box<dyn FnMut() -> Tick>) {
        let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
        let interval_slot = slot.clone();

        let interval = Interval::new(millis_u32(period), move || {
            if task() == Tick::Continue {
                return;
            }

            if let Some(interval) = interval_slot.borrow_mut().take() {
                // Clear now; free the closure once it is no longer on the stack.
                let callback = interval.cancel();
                Timeout::new(0, move || drop(callback)).forget();
            }
        });

        *slot.borrow_mut() = Some(interval);
    }
}

/// One `IntersectionObserver` per subscription, unobserved on first match.
struct BrowserVisibility;

impl VisibilityNotifier for BrowserVisibility {
    fn observe_once(
        &self,
        element: ElementRef,
        options: VisibilityOptions,
        callback: Box<dyn FnOnce(ElementRef)>,
    ) {
        let Some(target) = element
            .as_any()
            .downcast_ref::<BrowserElement>()
            .map(|browser| browser.0.clone())
        else {
            log::warn!("visibility subscription on a non-DOM element ignored");
            return;
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());

        let observed = target.clone();
        let mut pending = Some((element, callback));
        let on_entries = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let entered = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| options.qualifies(entry.is_intersecting(), entry.intersection_ratio()));
                if !entered {
                    return;
                }

                observer.unobserve(&observed);
                if let Some((element, callback)) = pending.take() {
                    callback(element);
                }
            },
        );

        match IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&target);
                on_entries.forget();
            }
            Err(error) => log::warn!("could not create IntersectionObserver: {error:?}"),
        }
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let window = window().expect("missing window");
    let document = window.document().expect("missing document");

    let page: PageRef = Rc::new(BrowserPage { window, document });
    let scheduler: SchedulerRef = Rc::new(BrowserScheduler);
    let visibility: Rc<dyn VisibilityNotifier> = Rc::new(BrowserVisibility);

    let config = controller::load_config(&page);
    log::set_max_level(config.log_level.to_level().to_level_filter());

    controller::install(&page, &scheduler, &visibility, &config);
}
