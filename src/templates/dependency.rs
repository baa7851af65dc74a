//! Dependency parse page.
//!
//! Zoom and pan are plain links: each one carries the current transform plus
//! the action to apply, so the server holds no per-user view state.

use super::components::{error_banner, html_escape};
use crate::layout::SkippedArc;
use crate::viewport::{ViewTransform, ZoomAction};
use crate::visualization::Rendered;

const PAN_STEP: f64 = 40.0;

/// Link back to `/parse` that applies `action` (and/or a pan) to `transform`.
pub fn view_link(text: &str, transform: &ViewTransform, action: Option<ZoomAction>, pan: (f64, f64)) -> String {
    let mut link = format!(
        "/parse?text={}&scale={}&tx={}&ty={}",
        urlencoding::encode(text),
        transform.scale,
        transform.translate_x,
        transform.translate_y
    );
    if let Some(action) = action {
        link.push_str("&zoom=");
        link.push_str(action.as_str());
    }
    if pan.0 != 0.0 {
        link.push_str(&format!("&dx={}", pan.0));
    }
    if pan.1 != 0.0 {
        link.push_str(&format!("&dy={}", pan.1));
    }
    link
}

fn zoom_controls(text: &str, transform: &ViewTransform) -> String {
    let button = |label: &str, title: &str, action: Option<ZoomAction>, pan: (f64, f64)| {
        format!(
            r#"<a class="btn secondary" title="{title}" href="{href}">{label}</a>"#,
            title = title,
            href = html_escape(&view_link(text, transform, action, pan)),
            label = label,
        )
    };

    format!(
        r#"<div class="zoom-controls">
            {zin}{zout}{reset}
            {left}{right}{up}{down}
            <span class="scale">scale {scale:.2}</span>
        </div>"#,
        zin = button("+", "Zoom in", Some(ZoomAction::In), (0.0, 0.0)),
        zout = button("&minus;", "Zoom out", Some(ZoomAction::Out), (0.0, 0.0)),
        reset = button("Reset", "Reset zoom", Some(ZoomAction::Reset), (0.0, 0.0)),
        left = button("&larr;", "Pan left", None, (-PAN_STEP, 0.0)),
        right = button("&rarr;", "Pan right", None, (PAN_STEP, 0.0)),
        up = button("&uarr;", "Pan up", None, (0.0, -PAN_STEP)),
        down = button("&darr;", "Pan down", None, (0.0, PAN_STEP)),
        scale = transform.scale,
    )
}

fn skipped_note(skipped: &[SkippedArc]) -> String {
    if skipped.is_empty() {
        return String::new();
    }
    let items: Vec<String> = skipped
        .iter()
        .map(|s| {
            format!(
                "{} ({}&rarr;{})",
                html_escape(&s.arc.label),
                s.arc.start,
                s.arc.end
            )
        })
        .collect();
    format!(
        r#"<p class="warning-message">Skipped {} arc(s) referencing unknown tokens: {}</p>"#,
        skipped.len(),
        items.join(", ")
    )
}

pub fn sentence_form(text: &str) -> String {
    format!(
        r#"<form action="/parse" method="get" class="viewer-form">
            <textarea name="text" placeholder="Enter a sentence to parse">{}</textarea>
            <button class="btn" type="submit">Parse</button>
        </form>"#,
        html_escape(text)
    )
}

/// Body of the parse page. `rendered` is `None` when nothing was requested
/// or the request failed.
pub fn render_parse_page(
    text: &str,
    rendered: Option<&Rendered>,
    transform: &ViewTransform,
    error: Option<&str>,
) -> String {
    let viz = match rendered {
        Some(Rendered::Graph { svg, skipped }) => format!(
            r#"{controls}{skipped}<div class="dependency-visualization" id="dependency-visualization">{svg}</div>"#,
            controls = zoom_controls(text, transform),
            skipped = skipped_note(skipped),
            svg = svg,
        ),
        Some(no_data @ Rendered::NoData) => format!(
            r#"<div class="dependency-visualization" id="dependency-visualization">{}</div>"#,
            no_data.to_html()
        ),
        None if error.is_some() => r#"<div class="dependency-visualization" id="dependency-visualization"><p class="error-text">Could not generate dependency parse.</p></div>"#.to_string(),
        None => String::new(),
    };

    format!(
        r#"<h1>Dependency Parse</h1>
        {form}
        {error}
        {viz}"#,
        form = sentence_form(text),
        error = error_banner(error),
        viz = viz,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArcDirection, DependencyArc};

    #[test]
    fn test_view_link_carries_state() {
        let t = ViewTransform { scale: 1.2, translate_x: -40.0, translate_y: 0.0 };
        assert_eq!(
            view_link("IL-6 binds", &t, Some(ZoomAction::Out), (0.0, 0.0)),
            "/parse?text=IL-6%20binds&scale=1.2&tx=-40&ty=0&zoom=out"
        );
        assert_eq!(
            view_link("a", &ViewTransform::default(), None, (40.0, 0.0)),
            "/parse?text=a&scale=1&tx=0&ty=0&dx=40"
        );
    }

    #[test]
    fn test_page_variants() {
        let t = ViewTransform::default();
        let empty = render_parse_page("", None, &t, None);
        assert!(!empty.contains("dependency-visualization"));

        let failed = render_parse_page("x", None, &t, Some("Empty input text"));
        assert!(failed.contains("Could not generate dependency parse."));
        assert!(failed.contains("Empty input text"));

        let no_data = render_parse_page("x", Some(&Rendered::NoData), &t, None);
        assert!(no_data.contains("No parsing data available."));
        assert!(!no_data.contains("zoom-controls"));

        let graph = Rendered::Graph {
            svg: "<svg></svg>".to_string(),
            skipped: vec![SkippedArc {
                arc: DependencyArc::new(1, 7, "punct", ArcDirection::Right),
                missing: vec![7],
            }],
        };
        let page = render_parse_page("x", Some(&graph), &t, None);
        assert!(page.contains("zoom-controls"));
        assert!(page.contains("Skipped 1 arc(s)"));
        assert!(page.contains("<svg></svg>"));
    }
}
