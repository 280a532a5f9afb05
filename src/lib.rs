//! NewsDash Core - Dashboard UI Concept Renderer
//!
//! Renders a single 1920x1080 PNG mockup of a newsjacking dashboard
//! (header, two sidebars, opportunity cards) from embedded sample data.
//! One shot, no inputs: build canvas, paint regions in a fixed order,
//! smooth, write the file.

pub mod canvas;
pub mod compose;
pub mod data;
pub mod font;
pub mod layout;
pub mod output;
pub mod theme;

pub use compose::{Composer, Icon};
pub use data::{AlertItem, Category, DashboardData, Keyword, Opportunity, TrendingItem, Urgency};
pub use output::{save_png, OutputError, SavedImage};
pub use theme::{Color, Theme, Tier};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default output filename.
pub const DEFAULT_OUTPUT: &str = "social-writer-dashboard.png";
