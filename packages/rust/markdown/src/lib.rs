//! Markdown-to-HTML page rendering for the project README.
//!
//! The Markdown body is converted with `comrak` (bare URLs are auto-linked),
//! then wrapped in a standalone HTML document carrying its own stylesheet.

use tracing::{debug, instrument};

/// Embedded stylesheet for rendered pages.
const PAGE_STYLE: &str = include_str!("style.css");

/// Title used by [`render`].
pub const DEFAULT_TITLE: &str = "README - Victory.css";

/// Presentation options for the page shell.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Contents of the `<title>` element.
    pub title: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
        }
    }
}

/// Render a Markdown document to a complete HTML page with the default title.
pub fn render(markdown: &str) -> String {
    render_page(markdown, &PageOptions::default())
}

/// Render a Markdown document to a complete HTML page.
#[instrument(skip_all, fields(title = %opts.title, source_len = markdown.len()))]
pub fn render_page(markdown: &str, opts: &PageOptions) -> String {
    let body = render_fragment(markdown);
    debug!(html_len = body.len(), "markdown converted");
    wrap_page(&body, &opts.title)
}

/// Convert Markdown to an HTML fragment.
///
/// Raw HTML in the source is not passed through. Tables and strikethrough are
/// enabled alongside autolinking.
pub fn render_fragment(markdown: &str) -> String {
    let mut options = comrak::Options::default();
    options.extension.autolink = true;
    options.extension.table = true;
    options.extension.strikethrough = true;
    comrak::markdown_to_html(markdown, &options)
}

fn wrap_page(body: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<meta name="viewport" content="width=device-width, initial-scale=1">
<style type="text/css">
{PAGE_STYLE}</style>

<main>
    <article>{body}</article>
</main>
</body>
</html>"#
    )
}
