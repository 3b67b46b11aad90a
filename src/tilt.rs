use crate::config::EffectsConfig;
use crate::dom::{PageRef, Rect};

pub const CARD_SELECTOR: &str = ".project-card";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

/// Rotation for a pointer at client coordinates `(client_x, client_y)` over a
/// card occupying `rect`. Zero at the card's center.
pub fn tilt_for_pointer(rect: Rect, client_x: f64, client_y: f64, divisor: f64) -> Tilt {
    let x = client_x - rect.left;
    let y = client_y - rect.top;
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;

    // `+ 0.0` folds -0.0 into 0.0 so it formats as "0".
    Tilt {
        rotate_x: (y - center_y) / divisor + 0.0,
        rotate_y: (center_x - x) / divisor + 0.0,
    }
}

pub fn tilt_transform(tilt: Tilt, config: &EffectsConfig) -> String {
    format!(
        "perspective({}px) rotateX({}deg) rotateY({}deg) translateY(-{}px)",
        config.tilt_perspective_px, tilt.rotate_x, tilt.rotate_y, config.tilt_lift_px
    )
}

pub fn neutral_transform(config: &EffectsConfig) -> String {
    format!(
        "perspective({}px) rotateX(0) rotateY(0) translateY(0)",
        config.tilt_perspective_px
    )
}

/// Narrow viewports are treated as touch devices and get no tilt.
pub fn is_narrow_viewport(viewport_width: f64, config: &EffectsConfig) -> bool {
    viewport_width < config.narrow_viewport_width
}

/// Binds the tilt handlers to every card. Returns the number of cards bound.
pub fn install(page: &PageRef, config: &EffectsConfig) -> usize {
    let cards = page.query_all(CARD_SELECTOR);
    let count = cards.len();

    for card in cards {
        let moved = card.clone();
        let move_config = config.clone();
        card.on_mouse_move(Box::new(move |client_x, client_y| {
            let tilt = tilt_for_pointer(
                moved.bounding_rect(),
                client_x,
                client_y,
                move_config.tilt_divisor,
            );
            moved.set_style("transform", &tilt_transform(tilt, &move_config));
        }));

        let left = card.clone();
        let neutral = neutral_transform(config);
        card.on_mouse_leave(Box::new(move || {
            left.set_style("transform", &neutral);
        }));
    }

    count
}
