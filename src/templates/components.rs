//! Shared HTML components: page shell, nav bar, escaping helpers.

use super::styles::STYLE;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar() -> String {
    r#"<nav class="nav-bar">
            <a href="/">Home</a>
            <a href="/parse">Parse</a>
            <span class="spacer"></span>
            <form action="/paper" method="get" class="viewer-form" style="margin: 0;">
                <input type="text" name="pmid" placeholder="PMID">
                <button class="btn secondary" type="submit">Go</button>
            </form>
        </nav>"#
        .to_string()
}

/// Error box shown above page content. Empty input gives an empty string.
pub fn error_banner(message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => format!(
            r#"<div class="error-message" id="error-message">{}</div>"#,
            html_escape(msg)
        ),
        _ => String::new(),
    }
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        STYLE = STYLE,
        nav = nav_bar(),
        content = content,
    )
}
