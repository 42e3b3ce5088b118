//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders Markdown to HTML for the news preview.
///
/// Raw HTML in the source is not passed through. Usage: `{{ article.body|markdown|safe }}`
#[askama::filter_fn]
pub fn markdown(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(render_markdown(&value.to_string()))
}

/// Markdown to HTML. comrak's defaults drop raw HTML.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    comrak::markdown_to_html(source, &comrak::Options::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_escapes_html() {
        let html = render_markdown("**Скидка** <script>alert(1)</script>");
        assert!(html.contains("<strong>Скидка</strong>"));
        assert!(!html.contains("<script>"));
    }
}
