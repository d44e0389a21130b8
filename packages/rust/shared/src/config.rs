//! Build configuration for the Victory.css pipeline.
//!
//! The project config lives at `<root>/victory.toml`. Every field is optional;
//! defaults reproduce the stock Victory.css source layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VictoryError};
use crate::types::Variant;

/// Default configuration file name, resolved against the project root.
pub const CONFIG_FILE_NAME: &str = "victory.toml";

// ---------------------------------------------------------------------------
// Config structs (matching victory.toml schema)
// ---------------------------------------------------------------------------

/// Top-level build config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Display name used in generated page titles.
    #[serde(default = "default_project_title")]
    pub project_title: String,

    /// Directory receiving all pipeline artifacts.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Package descriptor consumed for header comments.
    #[serde(default = "default_package_file")]
    pub package_file: PathBuf,

    /// Treat Sass compile errors as fatal instead of logging them.
    #[serde(default)]
    pub strict_styles: bool,

    /// Browser targets for prefixing and minification.
    #[serde(default)]
    pub styles: StylesConfig,

    /// `[standard]` variant.
    #[serde(default = "VariantConfig::standard")]
    pub standard: VariantConfig,

    /// `[basic]` variant.
    #[serde(default = "VariantConfig::basic")]
    pub basic: VariantConfig,

    /// Examples index generator.
    #[serde(default)]
    pub examples: ExamplesConfig,

    /// README page generator.
    #[serde(default)]
    pub readme: ReadmeConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            project_title: default_project_title(),
            dist_dir: default_dist_dir(),
            package_file: default_package_file(),
            strict_styles: false,
            styles: StylesConfig::default(),
            standard: VariantConfig::standard(),
            basic: VariantConfig::basic(),
            examples: ExamplesConfig::default(),
            readme: ReadmeConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Source and output settings for one build variant.
    pub fn variant(&self, variant: Variant) -> &VariantConfig {
        match variant {
            Variant::Standard => &self.standard,
            Variant::Basic => &self.basic,
        }
    }
}

fn default_project_title() -> String {
    "Victory.css".into()
}
fn default_dist_dir() -> PathBuf {
    "dist".into()
}
fn default_package_file() -> PathBuf {
    "package.json".into()
}

/// `[styles]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesConfig {
    /// Browserslist queries used when adding vendor prefixes.
    #[serde(default = "default_prefix_browsers")]
    pub prefix_browsers: Vec<String>,

    /// Browserslist queries used for the minified stylesheet.
    #[serde(default = "default_minify_browsers")]
    pub minify_browsers: Vec<String>,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            prefix_browsers: default_prefix_browsers(),
            minify_browsers: default_minify_browsers(),
        }
    }
}

fn default_prefix_browsers() -> Vec<String> {
    vec!["defaults".into()]
}
fn default_minify_browsers() -> Vec<String> {
    vec!["defaults".into(), "ie 8".into()]
}

/// Per-variant inputs and output naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Sass entry point, relative to the project root.
    pub style_entry: PathBuf,
    /// Output basename; artifacts are `{basename}.css`, `{basename}.min.css`, etc.
    pub basename: String,
    /// Script fragments, concatenated in this exact order.
    pub scripts: Vec<PathBuf>,
}

impl VariantConfig {
    /// Full framework: core script plus every plugin.
    pub fn standard() -> Self {
        Self {
            style_entry: "src/scss/victory.scss".into(),
            basename: "victory".into(),
            scripts: vec![
                "src/js/victory.js".into(),
                "src/js/_polyfill.js".into(),
                "src/js/_toggle.js".into(),
                "src/js/_navbar.js".into(),
                "src/js/_slide.js".into(),
            ],
        }
    }

    /// Reduced build: core script and polyfill only.
    pub fn basic() -> Self {
        Self {
            style_entry: "src/scss/basic.scss".into(),
            basename: "victory-basic".into(),
            scripts: vec!["src/js/victory.js".into(), "src/js/_polyfill.js".into()],
        }
    }

    pub fn css_file(&self) -> String {
        format!("{}.css", self.basename)
    }

    pub fn min_css_file(&self) -> String {
        format!("{}.min.css", self.basename)
    }

    pub fn js_file(&self) -> String {
        format!("{}.js", self.basename)
    }

    pub fn min_js_file(&self) -> String {
        format!("{}.min.js", self.basename)
    }
}

/// `[examples]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesConfig {
    /// Directory tree scanned for example pages.
    #[serde(default = "default_examples_dir")]
    pub dir: PathBuf,

    /// Generated index file; never listed in its own index.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Extension (without dot) an example page must carry, matched case-insensitively.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        Self {
            dir: default_examples_dir(),
            index_file: default_index_file(),
            extension: default_extension(),
        }
    }
}

fn default_examples_dir() -> PathBuf {
    "examples".into()
}
fn default_index_file() -> String {
    "index.html".into()
}
fn default_extension() -> String {
    "html".into()
}

/// `[readme]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeConfig {
    #[serde(default = "default_readme_source")]
    pub source: PathBuf,

    #[serde(default = "default_readme_output")]
    pub output: PathBuf,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            source: default_readme_source(),
            output: default_readme_output(),
        }
    }
}

fn default_readme_source() -> PathBuf {
    "README.md".into()
}
fn default_readme_output() -> PathBuf {
    "README.html".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a project root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the build config for `root`. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<BuildConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(BuildConfig::default());
    }

    load_config_from(&path)
}

/// Load the build config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<BuildConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VictoryError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| VictoryError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file into `root`. Returns the path to the created file.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(VictoryError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&BuildConfig::default())
        .map_err(|e| VictoryError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| VictoryError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
