//! HTML templates and styling for the viewer.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `components` - Shared HTML components (nav bar, error banner, base template)
//! - `dependency` - Dependency parse page with zoom/pan controls
//! - `paper` - Paper, search, entity and index pages

mod components;
mod dependency;
mod paper;
mod styles;

pub use components::{base_html, error_banner, html_escape, nav_bar};
pub use dependency::{render_parse_page, sentence_form, view_link};
pub use paper::{
    render_entity_page, render_entity_table, render_index_page, render_legend, render_paper_page,
    render_search_page, sanitize_highlight_html, search_form,
};
pub use styles::STYLE;
