//! Image Composer - Single Render Entry Point
//!
//! One struct owns the theme and the resolved font stack; `render` runs
//! the fixed paint sequence over a shared canvas: base gradient, header,
//! left panel, main content, right panel, then the smoothing pass.
//! Regions never depend on each other's output.

use std::path::Path;

use image::RgbImage;
use log::debug;
use rand::Rng;

use crate::canvas::Canvas;
use crate::data::{format_mentions, AlertItem, DashboardData, Keyword, Opportunity, TrendingItem, Urgency};
use crate::font::FontStack;
use crate::layout::{
    self, alert_fits, card_fits, card_top, chart_point_x, content_bounds, toggle_knob_x, CANVAS_HEIGHT,
    CANVAS_WIDTH, CHART_POINTS, HEADER_HEIGHT, LEFT_PANEL_WIDTH, RIGHT_PANEL_WIDTH,
};
use crate::theme::{Color, Theme};

/// Placeholder glyphs. Anything unlisted paints as a filled square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Bell,
    Search,
    TrendingUp,
    AlertTriangle,
    PenTool,
    Square,
}

pub struct Composer {
    theme: Theme,
    fonts: FontStack,
}

impl Composer {
    /// Build a composer with the resolved font chain, optionally headed
    /// by a preferred TTF path.
    pub fn new(theme: Theme, preferred_font: Option<&Path>) -> Self {
        Self {
            fonts: FontStack::resolve(preferred_font),
            theme,
        }
    }

    /// Builtin bitmap face only; text output is fully deterministic.
    pub fn with_builtin_face(theme: Theme) -> Self {
        Self {
            fonts: FontStack::builtin(),
            theme,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Paint the full dashboard. The RNG drives only the decorative
    /// trending chart; seed it for reproducible output.
    pub fn render<R: Rng>(&self, data: &DashboardData, rng: &mut R) -> RgbImage {
        let mut canvas = self.base_canvas();
        self.paint_header(&mut canvas);
        self.paint_left_panel(&mut canvas, data);
        self.paint_main_content(&mut canvas, data);
        self.paint_right_panel(&mut canvas, data, rng);
        debug!("render complete, applying smoothing pass");
        canvas.smoothed()
    }

    /// Base canvas with the subtle top fade.
    fn base_canvas(&self) -> Canvas {
        let t = &self.theme;
        let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, t.gray_50);
        for band in 0..50i64 {
            let alpha = 1.0 - band as f32 / 50.0;
            canvas.blend_rect(0, band * 20, CANVAS_WIDTH as i64, 20, t.gray_100, alpha);
        }
        canvas
    }

    // --- Header ---

    fn paint_header(&self, canvas: &mut Canvas) {
        debug!("painting header");
        let t = &self.theme;
        let w = canvas.width() as i64;

        canvas.fill_rect(0, 0, w, HEADER_HEIGHT, t.white);
        canvas.fill_rect(0, HEADER_HEIGHT, w, 1, t.gray_200);

        // Logo and app title
        self.draw_icon(canvas, 30, 20, Icon::PenTool, t.primary);
        self.text(canvas, 65, 15, "Social Writer", t.sizes.title, t.gray_800);
        self.text(
            canvas,
            65,
            45,
            "AI-Powered Newsjacking Dashboard",
            t.sizes.body,
            t.gray_600,
        );

        // User profile area
        let profile_x = w - 200;
        let profile_y = 20;
        canvas.fill_circle(profile_x, profile_y, 20, t.primary_light);
        self.text(canvas, profile_x, profile_y - 5, "JD", t.sizes.small, t.white);
        self.text(canvas, profile_x + 30, 20, "John Doe", t.sizes.body, t.gray_800);
        self.text(canvas, profile_x + 30, 40, "Premium Plan", t.sizes.small, t.success);

        // Notification bell with badge dot
        let bell_x = profile_x - 40;
        self.draw_icon(canvas, bell_x, profile_y + 5, Icon::Bell, t.gray_500);
        canvas.fill_circle(bell_x + 12, profile_y - 2, 4, t.danger);
    }

    // --- Left panel ---

    fn paint_left_panel(&self, canvas: &mut Canvas, data: &DashboardData) {
        debug!("painting left panel ({} categories)", data.categories.len());
        let t = &self.theme;
        let h = canvas.height() as i64;

        canvas.fill_rect(0, HEADER_HEIGHT, LEFT_PANEL_WIDTH, h - HEADER_HEIGHT, t.sidebar_bg);
        canvas.fill_rect(LEFT_PANEL_WIDTH, HEADER_HEIGHT, 1, h - HEADER_HEIGHT, t.gray_200);

        let x = 20;
        self.text(canvas, x, 100, "Brand Keywords", t.sizes.heading, t.gray_800);
        self.text(
            canvas,
            x,
            125,
            "Active keywords searched every 6 hours",
            t.sizes.small,
            t.gray_500,
        );
        self.draw_button(canvas, x, 155, 280, 35, "Add Brand Guide", t.primary, t.white, None);

        let mut y = 210;
        for category in &data.categories {
            self.text(canvas, x, y, &category.name, t.sizes.subheading, t.gray_700);
            y += 25;
            for keyword in &category.keywords {
                self.draw_keyword_card(canvas, x, y, keyword);
                y += 60;
            }
            y += 15;
        }
    }

    fn draw_keyword_card(&self, canvas: &mut Canvas, x: i64, y: i64, keyword: &Keyword) {
        let t = &self.theme;
        canvas.fill_rect(x, y, 280, 50, t.white);
        canvas.stroke_rect(x, y, 280, 50, t.gray_200);

        // Toggle pill + knob, strictly positioned by `active`
        let toggle_x = x + 15;
        let toggle_y = y + 15;
        let pill = if keyword.active { t.success } else { t.gray_300 };
        canvas.fill_rounded_rect(toggle_x, toggle_y, layout::TOGGLE_SIZE * 2, layout::TOGGLE_SIZE, 10, pill);
        canvas.fill_circle(
            toggle_knob_x(toggle_x, keyword.active),
            toggle_y + layout::TOGGLE_SIZE / 2,
            8,
            t.white,
        );

        let text_x = toggle_x + 50;
        let label_color = if keyword.active { t.gray_800 } else { t.gray_400 };
        self.text(canvas, text_x, y + 8, &keyword.term, t.sizes.body, label_color);
        self.text(
            canvas,
            text_x,
            y + 28,
            &format!("Weight: {}%", keyword.weight),
            t.sizes.small,
            t.gray_500,
        );

        // Weight bar: track plus tier-colored fill
        let bar_x = x + 180;
        let bar_y = y + 20;
        canvas.fill_rounded_rect(bar_x, bar_y, 80, 8, 4, t.gray_200);
        let filled = 80 * keyword.weight as i64 / 100;
        if filled > 0 {
            canvas.fill_rounded_rect(bar_x, bar_y, filled, 8, 4, t.tier_color(keyword.weight));
        }
    }

    // --- Main content ---

    fn paint_main_content(&self, canvas: &mut Canvas, data: &DashboardData) {
        let t = &self.theme;
        let (x, width) = content_bounds(canvas.width());
        debug!("painting main content at x={x} width={width}");

        self.text(canvas, x, 100, "Newsjacking Opportunities", t.sizes.heading, t.gray_800);
        self.draw_filter_bar(canvas, x, 135);

        for (i, opportunity) in data.opportunities.iter().enumerate() {
            let top = card_top(i);
            if card_fits(top, canvas.height()) {
                self.draw_opportunity_card(canvas, x, top, width, opportunity);
            } else {
                debug!("skipping opportunity card {i} past canvas bottom");
            }
        }
    }

    fn draw_filter_bar(&self, canvas: &mut Canvas, x: i64, y: i64) {
        let t = &self.theme;

        // Search field
        canvas.rounded_rect(x, y, 300, 35, 17, t.white, Some(t.gray_300));
        self.draw_icon(canvas, x + 12, y + 8, Icon::Search, t.gray_400);
        self.text(canvas, x + 35, y + 8, "Search opportunities...", t.sizes.body, t.gray_400);

        // Filter buttons, first one active
        let filter_x = x + 315;
        for (i, label) in ["All", "Trending", "High Relevance", "Recent"].iter().enumerate() {
            let active = i == 0;
            let bg = if active { t.primary } else { t.white };
            let fg = if active { t.white } else { t.gray_600 };
            self.draw_button(canvas, filter_x + i as i64 * 110, y, 100, 35, label, bg, fg, Some(t.gray_300));
        }
    }

    fn draw_opportunity_card(&self, canvas: &mut Canvas, x: i64, y: i64, width: i64, card: &Opportunity) {
        let t = &self.theme;
        let height = layout::CARD_HEIGHT;

        // Offset shadow behind the card
        canvas.blend_rect(x + 3, y + 3, width, height, t.gray_300, 0.2);
        canvas.rounded_rect(x, y, width, height, 12, t.white, Some(t.gray_200));

        // Header strip with source and time
        canvas.fill_rounded_rect(x + 1, y + 1, width - 2, 59, 11, t.gray_50);
        self.text(canvas, x + 20, y + 15, &card.source, t.sizes.body, t.gray_600);
        self.text(canvas, x + 20, y + 35, &card.time, t.sizes.small, t.gray_500);

        if card.trending {
            let trending_x = x + width - 80;
            self.draw_icon(canvas, trending_x, y + 20, Icon::TrendingUp, t.success);
            self.text(canvas, trending_x + 20, y + 20, "Trending", t.sizes.small, t.success);
        }

        self.text(canvas, x + 20, y + 75, &card.title, t.sizes.subheading, t.gray_800);
        self.text(canvas, x + 20, y + 100, &card.summary, t.sizes.body, t.gray_600);

        // Keyword chips
        for (i, keyword) in card.keywords.iter().enumerate() {
            self.draw_tag(canvas, x + 20 + i as i64 * 120, y + 135, keyword, t.primary_light);
        }

        // Relevance score
        let score_y = y + height - 50;
        self.text(canvas, x + 20, score_y, "Relevance Score", t.sizes.small, t.gray_500);
        self.draw_progress_bar(canvas, x + 20, score_y + 20, width - 200, card.relevance);

        // Call to action
        self.draw_button(
            canvas,
            x + width - 160,
            y + height - 45,
            140,
            35,
            "Generate Article",
            t.primary,
            t.white,
            None,
        );
    }

    // --- Right panel ---

    fn paint_right_panel<R: Rng>(&self, canvas: &mut Canvas, data: &DashboardData, rng: &mut R) {
        debug!("painting right panel ({} trending, {} alerts)", data.trending.len(), data.alerts.len());
        let t = &self.theme;
        let w = canvas.width() as i64;
        let h = canvas.height() as i64;
        let panel_x = w - RIGHT_PANEL_WIDTH;

        canvas.fill_rect(panel_x, HEADER_HEIGHT, RIGHT_PANEL_WIDTH, h - HEADER_HEIGHT, t.sidebar_bg);
        canvas.fill_rect(panel_x, HEADER_HEIGHT, 1, h - HEADER_HEIGHT, t.gray_200);

        let x = panel_x + 20;
        self.text(canvas, x, 100, "Trending Topics", t.sizes.heading, t.gray_800);

        let chart_height = 120;
        self.draw_mini_chart(canvas, x, 135, RIGHT_PANEL_WIDTH - 40, chart_height, rng);

        let trending_y = 135 + chart_height + 20;
        for (i, item) in data.trending.iter().enumerate() {
            self.draw_trending_item(canvas, x, trending_y + i as i64 * 35, item);
        }

        let alerts_y = trending_y + data.trending.len() as i64 * 35 + 30;
        self.text(canvas, x, alerts_y, "Breaking Alerts", t.sizes.heading, t.gray_800);
        for (i, alert) in data.alerts.iter().enumerate() {
            let alert_y = alerts_y + 30 + i as i64 * layout::ALERT_ROW_HEIGHT;
            if alert_fits(alert_y, canvas.height()) {
                self.draw_alert_item(canvas, x, alert_y, alert);
            } else {
                debug!("skipping alert row {i} past canvas bottom");
            }
        }
    }

    /// Decorative line chart: evenly spaced x, random y within a band.
    fn draw_mini_chart<R: Rng>(&self, canvas: &mut Canvas, x: i64, y: i64, width: i64, height: i64, rng: &mut R) {
        let t = &self.theme;
        canvas.fill_rect(x, y, width, height, t.white);
        canvas.stroke_rect(x, y, width, height, t.gray_200);

        let mut points = Vec::with_capacity(CHART_POINTS);
        for i in 0..CHART_POINTS {
            let px = chart_point_x(x, width, i);
            let py = y + height - 20 - rng.gen_range(10..=height - 40);
            points.push((px, py));
        }
        for pair in points.windows(2) {
            canvas.line(pair[0].0, pair[0].1, pair[1].0, pair[1].1, t.primary, 2);
        }
        for &(px, py) in &points {
            canvas.fill_circle(px, py, 3, t.primary);
        }
    }

    fn draw_trending_item(&self, canvas: &mut Canvas, x: i64, y: i64, item: &TrendingItem) {
        let t = &self.theme;
        self.text(canvas, x, y, &item.topic, t.sizes.body, t.gray_800);
        let change_color = if item.change.starts_with('+') { t.success } else { t.danger };
        self.text(canvas, x + 150, y, &format_mentions(item.mentions), t.sizes.small, t.gray_600);
        self.text(canvas, x + 230, y, &item.change, t.sizes.small, change_color);
    }

    fn draw_alert_item(&self, canvas: &mut Canvas, x: i64, y: i64, alert: &AlertItem) {
        let t = &self.theme;
        let glyph_color = match alert.urgency {
            Urgency::High => t.danger,
            Urgency::Medium => t.warning,
            Urgency::Low => t.gray_400,
        };
        self.draw_icon(canvas, x, y + 2, Icon::AlertTriangle, glyph_color);
        self.text(canvas, x + 25, y, &alert.title, t.sizes.small, t.gray_800);
        self.text(canvas, x + 25, y + 18, &alert.time, t.sizes.tiny, t.gray_500);
    }

    // --- Shared widgets ---

    fn draw_button(
        &self,
        canvas: &mut Canvas,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        label: &str,
        bg: Color,
        fg: Color,
        border: Option<Color>,
    ) {
        let t = &self.theme;
        canvas.rounded_rect(x, y, width, height, 17, bg, border);
        let (tw, th) = self.fonts.measure(label, t.sizes.body);
        self.text(canvas, x + (width - tw) / 2, y + (height - th) / 2, label, t.sizes.body, fg);
    }

    fn draw_tag(&self, canvas: &mut Canvas, x: i64, y: i64, label: &str, bg: Color) {
        let t = &self.theme;
        canvas.fill_rounded_rect(x, y, layout::tag_width(label), 20, 10, bg);
        self.text(canvas, x + layout::TAG_PADDING, y + 2, label, t.sizes.small, t.white);
    }

    fn draw_progress_bar(&self, canvas: &mut Canvas, x: i64, y: i64, width: i64, percentage: u8) {
        let t = &self.theme;
        canvas.fill_rounded_rect(x, y, width, 8, 4, t.gray_200);
        let filled = width * percentage as i64 / 100;
        if filled > 0 {
            canvas.fill_rounded_rect(x, y, filled, 8, 4, t.tier_color(percentage));
        }
        self.text(canvas, x + width + 10, y - 2, &format!("{percentage}%"), t.sizes.small, t.gray_600);
    }

    /// Geometric stand-ins for icons; no asset library involved.
    pub fn draw_icon(&self, canvas: &mut Canvas, x: i64, y: i64, icon: Icon, color: Color) {
        match icon {
            Icon::Bell => {
                canvas.fill_circle(x + 8, y + 8, 8, color);
                canvas.fill_rect(x + 5, y + 16, 6, 5, color);
            }
            Icon::Search => {
                canvas.fill_circle(x + 8, y + 8, 8, color);
                canvas.line(x + 12, y + 12, x + 16, y + 16, color, 2);
            }
            Icon::TrendingUp => {
                canvas.line(x, y + 16, x + 8, y + 8, color, 2);
                canvas.line(x + 8, y + 8, x + 16, y, color, 2);
                canvas.line(x + 12, y + 4, x + 16, y, color, 2);
            }
            Icon::AlertTriangle => {
                canvas.fill_triangle((x + 8, y), (x, y + 16), (x + 16, y + 16), color);
            }
            Icon::PenTool => {
                canvas.fill_triangle((x, y), (x + 24, y + 12), (x + 12, y + 24), color);
            }
            Icon::Square => {
                canvas.fill_rect(x, y, 16, 16, color);
            }
        }
    }

    fn text(&self, canvas: &mut Canvas, x: i64, y: i64, text: &str, size: u32, color: Color) {
        self.fonts.draw_text(canvas, x, y, text, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn render_default() -> RgbImage {
        let composer = Composer::with_builtin_face(Theme::default());
        let mut rng = StdRng::seed_from_u64(7);
        composer.render(&DashboardData::default(), &mut rng)
    }

    #[test]
    fn render_is_full_hd() {
        let img = render_default();
        assert_eq!(img.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn header_background_is_white() {
        let img = render_default();
        assert_eq!(img.get_pixel(10, 10).0, Theme::default().white.0);
    }

    #[test]
    fn side_panels_use_sidebar_background() {
        let img = render_default();
        let sidebar = Theme::default().sidebar_bg.0;
        // Deep inside each panel, clear of cards and separators.
        assert_eq!(img.get_pixel(300, 1050).0, sidebar);
        assert_eq!(img.get_pixel(1910, 1050).0, sidebar);
    }

    #[test]
    fn unknown_icon_is_a_filled_square() {
        let composer = Composer::with_builtin_face(Theme::default());
        let mut canvas = Canvas::new(20, 20, Color([0, 0, 0]));
        composer.draw_icon(&mut canvas, 2, 2, Icon::Square, Color([255, 0, 0]));
        assert_eq!(canvas.pixel(10, 10), Color([255, 0, 0]));
        assert_eq!(canvas.pixel(0, 0), Color([0, 0, 0]));
    }

    #[test]
    fn empty_data_still_renders_frame() {
        let composer = Composer::with_builtin_face(Theme::default());
        let empty = DashboardData {
            categories: vec![],
            opportunities: vec![],
            trending: vec![],
            alerts: vec![],
        };
        let mut rng = StdRng::seed_from_u64(0);
        let img = composer.render(&empty, &mut rng);
        assert_eq!(img.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(img.get_pixel(10, 10).0, Theme::default().white.0);
    }
}
