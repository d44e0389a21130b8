//! License header comments.
//!
//! Two variants are produced from the same three core lines
//! (`name version`, copyright, license):
//!
//! ```text
//! /*
//!  * victory.css 1.4.0
//!  * Copyright (c) 2026 Jane Doe (jane@example.com)
//!  * Released under the MIT license
//!  *
//!  * https://example.com/victory
//!  */
//!
//! /* victory.css 1.4.0 | Copyright (c) 2026 Jane Doe (jane@example.com) | Released under the MIT license */
//! ```

use victory_shared::PackageDescriptor;

/// Formats header comments for one build run.
#[derive(Debug, Clone, Copy)]
pub struct CommentStamper<'a> {
    package: &'a PackageDescriptor,
    year: i32,
}

impl<'a> CommentStamper<'a> {
    /// `year` is the build year stamped into the copyright line.
    pub fn new(package: &'a PackageDescriptor, year: i32) -> Self {
        Self { package, year }
    }

    /// Multi-line block comment ending with the homepage and a blank line.
    pub fn block_comment(&self) -> String {
        let mut lines = self.core_lines().to_vec();
        lines.push(String::new());
        lines.push(self.package.homepage().to_string());
        format!("/*\n * {}\n */\n\n", lines.join("\n * "))
    }

    /// Single-line comment for minified artifacts. Never includes the homepage.
    pub fn inline_comment(&self) -> String {
        format!("/* {} */\n", self.core_lines().join(" | "))
    }

    fn core_lines(&self) -> [String; 3] {
        let p = self.package;
        [
            format!("{} {}", p.name(), p.version()),
            format!("Copyright (c) {} {} ({})", self.year, p.author(), p.email()),
            format!("Released under the {} license", p.license()),
        ]
    }
}

/// Prepend a header to artifact content.
pub fn prepend(header: &str, content: &str) -> String {
    let mut out = String::with_capacity(header.len() + content.len());
    out.push_str(header);
    out.push_str(content);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> PackageDescriptor {
        PackageDescriptor {
            name: Some("victory.css".into()),
            version: Some("1.4.0".into()),
            author: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            license: Some("MIT".into()),
            homepage: Some("https://example.com/victory".into()),
        }
    }

    #[test]
    fn block_comment_exact_layout() {
        let pkg = package();
        let stamper = CommentStamper::new(&pkg, 2026);
        assert_eq!(
            stamper.block_comment(),
            "/*\n * victory.css 1.4.0\n * Copyright (c) 2026 Jane Doe (jane@example.com)\n \
             * Released under the MIT license\n * \n * https://example.com/victory\n */\n\n"
        );
    }

    #[test]
    fn inline_comment_exact_layout() {
        let pkg = package();
        let stamper = CommentStamper::new(&pkg, 2026);
        assert_eq!(
            stamper.inline_comment(),
            "/* victory.css 1.4.0 | Copyright (c) 2026 Jane Doe (jane@example.com) | \
             Released under the MIT license */\n"
        );
    }

    #[test]
    fn inline_comment_never_contains_homepage() {
        let pkg = package();
        let stamper = CommentStamper::new(&pkg, 1999);
        let inline = stamper.inline_comment();
        assert!(!inline.contains("https://example.com/victory"));
        assert!(inline.contains("victory.css 1.4.0"));
        assert!(inline.contains("MIT"));
    }

    #[test]
    fn missing_fields_render_undefined() {
        let pkg = PackageDescriptor {
            name: Some("victory.css".into()),
            ..PackageDescriptor::default()
        };
        let block = CommentStamper::new(&pkg, 2026).block_comment();
        assert!(block.contains("victory.css undefined"));
        assert!(block.contains("Released under the undefined license"));
    }

    #[test]
    fn prepend_keeps_content_intact() {
        assert_eq!(prepend("/* h */\n", "a{b:c}"), "/* h */\na{b:c}");
    }
}
