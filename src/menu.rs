use crate::dom::{ClickAction, ElementRef, PageRef};
use std::rc::Rc;

pub const MENU_BUTTON_SELECTOR: &str = ".mobile-menu-btn";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const NAV_ACTIONS_SELECTOR: &str = ".nav-actions";
pub const NAV_LINK_ANCHORS_SELECTOR: &str = ".nav-links a";
pub const ACTIVE_CLASS: &str = "active";
const BAR_SELECTOR: &str = "span";

/// Per-bar style writes: the first and last bars rotate into an X, the middle
/// one fades out.
const OPEN_BARS: [(&str, &str); 3] = [
    ("transform", "rotate(45deg) translate(5px, 5px)"),
    ("opacity", "0"),
    ("transform", "rotate(-45deg) translate(5px, -5px)"),
];
const CLOSED_BARS: [(&str, &str); 3] = [("transform", "none"), ("opacity", "1"), ("transform", "none")];

/// Hamburger control plus the two lists it reveals. The open state lives in
/// the `active` class of the three elements, always written together.
pub struct MobileMenu {
    button: Option<ElementRef>,
    links: Option<ElementRef>,
    actions: Option<ElementRef>,
}

impl MobileMenu {
    pub fn from_page(page: &PageRef) -> Self {
        Self {
            button: page.query(MENU_BUTTON_SELECTOR),
            links: page.query(NAV_LINKS_SELECTOR),
            actions: page.query(NAV_ACTIONS_SELECTOR),
        }
    }

    pub fn is_open(&self) -> bool {
        self.button
            .as_ref()
            .is_some_and(|button| button.has_class(ACTIVE_CLASS))
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    fn set_open(&self, open: bool) {
        for element in [&self.button, &self.links, &self.actions].into_iter().flatten() {
            element.set_class(ACTIVE_CLASS, open);
        }

        let Some(button) = self.button.as_ref() else {
            return;
        };

        let styles = if open { OPEN_BARS } else { CLOSED_BARS };
        let bars = button.query_all(BAR_SELECTOR);
        for (bar, (property, value)) in bars.iter().zip(styles) {
            bar.set_style(property, value);
        }
    }
}

/// Wires the control's click to `toggle` and every nav link's click to `close`.
/// Returns `false` when the page has no menu control.
pub fn install(page: &PageRef) -> bool {
    let menu = Rc::new(MobileMenu::from_page(page));

    let installed = match menu.button.as_ref() {
        Some(button) => {
            let menu = menu.clone();
            button.on_click(Box::new(move || {
                menu.toggle();
                ClickAction::Proceed
            }));
            true
        }
        None => false,
    };

    for link in page.query_all(NAV_LINK_ANCHORS_SELECTOR) {
        let menu = menu.clone();
        link.on_click(Box::new(move || {
            menu.close();
            ClickAction::Proceed
        }));
    }

    installed
}
