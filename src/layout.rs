//! Layout Constants and Laws
//!
//! The fixed geometry of the concept, plus the handful of layout rules
//! that are worth checking on their own: overflow truncation, the toggle
//! knob position, and the tag chip width. All pure so tests never have
//! to read pixels.

/// Canvas dimensions. The render is always exactly this size.
pub const CANVAS_WIDTH: u32 = 1920;
pub const CANVAS_HEIGHT: u32 = 1080;

pub const HEADER_HEIGHT: i64 = 80;
pub const LEFT_PANEL_WIDTH: i64 = 320;
pub const RIGHT_PANEL_WIDTH: i64 = 300;

pub const CARD_HEIGHT: i64 = 200;
pub const CARD_GAP: i64 = 20;
/// First opportunity card's top edge.
pub const CARDS_TOP: i64 = 180;

pub const ALERT_ROW_HEIGHT: i64 = 50;
pub const ALERT_VISIBLE_HEIGHT: i64 = 45;

pub const TOGGLE_SIZE: i64 = 20;
pub const TAG_PADDING: i64 = 8;
pub const CHART_POINTS: usize = 8;

/// Left edge and width of the main content region for a given canvas width.
pub fn content_bounds(canvas_width: u32) -> (i64, i64) {
    let x = LEFT_PANEL_WIDTH + 20;
    let w = canvas_width as i64 - LEFT_PANEL_WIDTH - RIGHT_PANEL_WIDTH - 40;
    (x, w)
}

/// An opportunity card is painted only while it fits above the bottom
/// margin: `top + CARD_HEIGHT < canvas_height - 100`.
pub fn card_fits(card_top: i64, canvas_height: u32) -> bool {
    card_top + CARD_HEIGHT < canvas_height as i64 - 100
}

/// Top edge of opportunity card `index` in the vertical stack.
pub fn card_top(index: usize) -> i64 {
    CARDS_TOP + index as i64 * (CARD_HEIGHT + CARD_GAP)
}

/// How many cards of a stack of `total` are painted before truncation.
pub fn visible_cards(total: usize, canvas_height: u32) -> usize {
    (0..total)
        .take_while(|&i| card_fits(card_top(i), canvas_height))
        .count()
}

/// An alert row is painted only while `top + 45 < canvas_height - 20`.
pub fn alert_fits(alert_top: i64, canvas_height: u32) -> bool {
    alert_top + ALERT_VISIBLE_HEIGHT < canvas_height as i64 - 20
}

/// Toggle knob center x. Strictly two-valued: right of the pill when
/// active, left when not.
pub fn toggle_knob_x(toggle_x: i64, active: bool) -> i64 {
    if active {
        toggle_x + TOGGLE_SIZE * 3 / 2
    } else {
        toggle_x + 5
    }
}

/// Tag chip width: 8px per character plus padding on both sides.
pub fn tag_width(label: &str) -> i64 {
    label.chars().count() as i64 * 8 + TAG_PADDING * 2
}

/// X position of chart point `i` of `CHART_POINTS`, evenly spaced with a
/// 10px inset on both sides.
pub fn chart_point_x(chart_x: i64, chart_width: i64, i: usize) -> i64 {
    chart_x + 10 + i as i64 * (chart_width - 20) / (CHART_POINTS as i64 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_region_excludes_both_panels() {
        let (x, w) = content_bounds(CANVAS_WIDTH);
        assert_eq!(x, 340);
        assert_eq!(w, 1920 - 320 - 300 - 40);
    }

    #[test]
    fn card_truncation_boundary() {
        // 1080 - 100 = 980; a card topped at 779 ends at 979 and fits,
        // one at 780 ends at 980 and is skipped.
        assert!(card_fits(779, CANVAS_HEIGHT));
        assert!(!card_fits(780, CANVAS_HEIGHT));
    }

    #[test]
    fn ten_cards_truncate_to_prefix() {
        // Tops at 180, 400, 620, 840: the fourth already overflows.
        assert_eq!(visible_cards(10, CANVAS_HEIGHT), 3);
        // Shorter lists are unaffected.
        assert_eq!(visible_cards(2, CANVAS_HEIGHT), 2);
    }

    #[test]
    fn alert_truncation_boundary() {
        // 1080 - 20 = 1060; top 1014 -> bottom 1059 fits, 1015 does not.
        assert!(alert_fits(1014, CANVAS_HEIGHT));
        assert!(!alert_fits(1015, CANVAS_HEIGHT));
    }

    #[test]
    fn toggle_knob_is_two_valued() {
        assert_eq!(toggle_knob_x(100, true), 130);
        assert_eq!(toggle_knob_x(100, false), 105);
    }

    #[test]
    fn tag_width_by_length() {
        assert_eq!(tag_width(""), 16);
        assert_eq!(tag_width("A"), 24);
        assert_eq!(tag_width("01234567890123456789"), 176);
    }

    #[test]
    fn chart_points_span_inset_width() {
        assert_eq!(chart_point_x(0, 260, 0), 10);
        assert_eq!(chart_point_x(0, 260, 7), 250);
    }
}
