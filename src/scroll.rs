use crate::config::EffectsConfig;
use crate::dom::{ClickAction, ElementRef, PageRef};
use crate::menu::ACTIVE_CLASS;

pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const LOCAL_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

pub fn navbar_background(config: &EffectsConfig, scroll_y: f64) -> &str {
    if scroll_y > config.scroll_threshold {
        &config.navbar_background_scrolled
    } else {
        &config.navbar_background
    }
}

/// Half-open range of scroll offsets for which a section counts as current.
pub fn section_range(offset_top: f64, offset_height: f64, nav_offset: f64) -> (f64, f64) {
    let start = offset_top - nav_offset;
    (start, start + offset_height)
}

pub fn section_is_current(scroll_y: f64, range: (f64, f64)) -> bool {
    scroll_y >= range.0 && scroll_y < range.1
}

fn nav_link_selector(section_id: &str) -> String {
    format!(".nav-links a[href=\"#{section_id}\"]")
}

/// Scroll offset that lands `target` just below the fixed navbar.
pub fn anchor_scroll_top(target_top: f64, scroll_y: f64, navbar_height: f64) -> f64 {
    target_top + scroll_y - navbar_height
}

struct TrackedSection {
    element: ElementRef,
    link: Option<ElementRef>,
}

/// Registers the navbar background swap and the nav-link highlight on the
/// page's scroll event, in that order.
pub fn install_scroll_effects(page: &PageRef, config: &EffectsConfig) {
    if let Some(navbar) = page.query(NAVBAR_SELECTOR) {
        let scroll_page = page.clone();
        let config = config.clone();
        page.on_scroll(Box::new(move || {
            let background = navbar_background(&config, scroll_page.scroll_y());
            navbar.set_style("background", background);
        }));
    } else {
        log::debug!("no {NAVBAR_SELECTOR}; navbar background effect disabled");
    }

    let sections: Vec<TrackedSection> = page
        .query_all(SECTION_SELECTOR)
        .into_iter()
        .filter_map(|element| {
            let id = element.attribute("id").filter(|id| !id.is_empty())?;
            let link = page.query(&nav_link_selector(&id));
            Some(TrackedSection { element, link })
        })
        .collect();

    if sections.is_empty() {
        return;
    }

    let scroll_page = page.clone();
    let nav_offset = config.section_offset;
    page.on_scroll(Box::new(move || {
        let scroll_y = scroll_page.scroll_y();
        for section in &sections {
            let Some(link) = section.link.as_ref() else {
                continue;
            };
            let range = section_range(
                section.element.offset_top(),
                section.element.offset_height(),
                nav_offset,
            );
            link.set_class(ACTIVE_CLASS, section_is_current(scroll_y, range));
        }
    }));
}

/// Intercepts same-page anchor clicks and replaces the jump with a smooth
/// scroll offset by the navbar height. Returns how many anchors were bound.
pub fn install_smooth_anchors(page: &PageRef) -> usize {
    let anchors = page.query_all(LOCAL_ANCHOR_SELECTOR);
    let count = anchors.len();

    for anchor in anchors {
        let page = page.clone();
        let href = anchor.attribute("href");
        anchor.on_click(Box::new(move || {
            let target = href.as_deref().and_then(|href| page.query(href));
            if let Some(target) = target {
                let navbar_height = page
                    .query(NAVBAR_SELECTOR)
                    .map(|navbar| navbar.offset_height())
                    .unwrap_or(0.0);
                let top = anchor_scroll_top(target.bounding_rect().top, page.scroll_y(), navbar_height);
                page.scroll_to(top);
            }
            ClickAction::PreventDefault
        }));
    }

    count
}
