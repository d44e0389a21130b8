//! The examples index page.

/// Build the index page linking every example.
///
/// `entries` are paths relative to the examples directory; each becomes a
/// list item linking to itself, in the given order.
pub fn examples_index_page(project_title: &str, entries: &[String]) -> String {
    let items = entries
        .iter()
        .map(|entry| {
            let entry = escape_html(entry);
            format!(r#"<li><a href="{entry}">{entry}</a></li>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let title = escape_html(project_title);

    format!(
        "<!DOCTYPE html>
<html>
<head>
<title>{title} examples</title>
</head>
<body>
<ul>
{items}
</ul>
</html>"
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
