//! Recursive discovery of example pages.
//!
//! Walks an examples tree and collects the relative paths of every page that
//! should appear in the generated index. The index file itself is never
//! listed, and neither is anything beneath a directory sharing its name.

use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use victory_shared::{Result, VictoryError};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What the indexer includes and excludes.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Entry name skipped at every depth (normally the generated index).
    pub index_file: String,
    /// Required file extension without the dot, compared case-insensitively.
    pub extension: String,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            index_file: "index.html".into(),
            extension: "html".into(),
        }
    }
}

impl From<&victory_shared::ExamplesConfig> for IndexOptions {
    fn from(config: &victory_shared::ExamplesConfig) -> Self {
        Self {
            index_file: config.index_file.clone(),
            extension: config.extension.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Indexer
// ---------------------------------------------------------------------------

/// List every matching file under `root`, depth first.
///
/// Paths are relative to `root` and `/`-separated. Siblings are visited in
/// file-name order so the result does not depend on the platform's directory
/// listing order. Symlinks are not followed.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn list_matching_files(root: &Path, opts: &IndexOptions) -> Result<Vec<String>> {
    // Surface a missing or unreadable root as an I/O error up front.
    std::fs::read_dir(root).map_err(|e| VictoryError::io(root, e))?;

    let suffix = suffix_pattern(&opts.extension)?;
    let mut items = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != opts.index_file.as_str());

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            VictoryError::io(path, std::io::Error::from(e))
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !suffix.is_match(&name) {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            items.push(to_slash_path(relative));
        }
    }

    debug!(count = items.len(), "indexed matching files");
    Ok(items)
}

/// Case-insensitive `\.{ext}$` matcher.
fn suffix_pattern(extension: &str) -> Result<Regex> {
    let ext = extension.trim_start_matches('.');
    Regex::new(&format!(r"(?i)\.{}$", regex::escape(ext)))
        .map_err(|e| VictoryError::config(format!("invalid extension filter '{extension}': {e}")))
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<p>example</p>").unwrap();
    }

    #[test]
    fn lists_html_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "buttons.html");
        touch(tmp.path(), "forms/inputs.html");
        touch(tmp.path(), "forms/advanced/select.html");

        let items = list_matching_files(tmp.path(), &IndexOptions::default()).unwrap();
        assert_eq!(
            items,
            vec!["buttons.html", "forms/advanced/select.html", "forms/inputs.html"]
        );
    }

    #[test]
    fn excludes_index_file_at_every_depth() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "index.html");
        touch(tmp.path(), "grid.html");
        touch(tmp.path(), "nav/index.html");
        touch(tmp.path(), "nav/navbar.html");

        let items = list_matching_files(tmp.path(), &IndexOptions::default()).unwrap();
        assert_eq!(items, vec!["grid.html", "nav/navbar.html"]);
    }

    #[test]
    fn directory_named_like_index_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "index.html/hidden.html");
        touch(tmp.path(), "shown.html");

        let items = list_matching_files(tmp.path(), &IndexOptions::default()).unwrap();
        assert_eq!(items, vec!["shown.html"]);
    }

    #[test]
    fn suffix_filter_is_case_insensitive_and_strict() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "UPPER.HTML");
        touch(tmp.path(), "style.css");
        touch(tmp.path(), "notes.html.bak");
        touch(tmp.path(), "page.htm");

        let items = list_matching_files(tmp.path(), &IndexOptions::default()).unwrap();
        assert_eq!(items, vec!["UPPER.HTML"]);
    }

    #[test]
    fn custom_extension_with_leading_dot() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.md");
        touch(tmp.path(), "b.html");

        let opts = IndexOptions {
            index_file: "index.md".into(),
            extension: ".md".into(),
        };
        let items = list_matching_files(tmp.path(), &opts).unwrap();
        assert_eq!(items, vec!["a.md"]);
    }

    #[test]
    fn empty_root_yields_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let items = list_matching_files(tmp.path(), &IndexOptions::default()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn missing_root_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = list_matching_files(&tmp.path().join("missing"), &IndexOptions::default())
            .unwrap_err();
        assert!(matches!(err, VictoryError::Io { .. }));
    }
}
