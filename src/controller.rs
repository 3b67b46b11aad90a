use crate::config::{EffectsConfig, CONFIG_ATTRIBUTE};
use crate::dom::PageRef;
use crate::scheduler::SchedulerRef;
use crate::visibility::VisibilityNotifier;
use crate::{console, counter, menu, scroll, tilt, typewriter};
use std::rc::Rc;

pub const LOADED_CLASS: &str = "loaded";

/// What got bound on this page; absent elements show up as `false` / `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Installed {
    pub narrow_viewport: bool,
    pub menu: bool,
    pub anchors: usize,
    pub counters: usize,
    pub typewriter: bool,
    pub tilt_cards: usize,
}

pub fn load_config(page: &PageRef) -> EffectsConfig {
    let raw = page.body().and_then(|body| body.attribute(CONFIG_ATTRIBUTE));
    EffectsConfig::from_attribute(raw.as_deref())
}

/// Binds every effect to the page. The viewport is classified once, here;
/// resizing later does not add or remove the tilt handlers.
pub fn install(
    page: &PageRef,
    scheduler: &SchedulerRef,
    visibility: &Rc<dyn VisibilityNotifier>,
    config: &EffectsConfig,
) -> Installed {
    let narrow_viewport = tilt::is_narrow_viewport(page.viewport_width(), config);

    let menu = menu::install(page);
    scroll::install_scroll_effects(page, config);
    let anchors = scroll::install_smooth_anchors(page);
    let counters = counter::install(page, scheduler, visibility, config);
    let typewriter = typewriter::install(page, scheduler, config);
    let tilt_cards = if narrow_viewport {
        0
    } else {
        tilt::install(page, config)
    };

    console::print_greeting(page);

    let ready_page = page.clone();
    page.on_ready(Box::new(move || {
        if let Some(body) = ready_page.body() {
            body.add_class(LOADED_CLASS);
        }
    }));

    let installed = Installed {
        narrow_viewport,
        menu,
        anchors,
        counters,
        typewriter,
        tilt_cards,
    };
    log::debug!(
        "effects bound: menu {}, anchors {}, counters {}, typewriter {}, tilt cards {}",
        installed.menu,
        installed.anchors,
        installed.counters,
        installed.typewriter,
        installed.tilt_cards
    );
    log::info!(
        "page effects ready (narrow viewport: {}, log level: {})",
        installed.narrow_viewport,
        config.log_level.as_str()
    );

    installed
}
