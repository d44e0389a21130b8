//! Per-run build context.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use chrono::Datelike;

use victory_artifacts::CommentStamper;
use victory_shared::{BuildConfig, PackageDescriptor, Result, load_package};

/// Everything a pipeline step needs, constructed once per process.
///
/// Relative paths in the config resolve against `root`. The package
/// descriptor is parsed on first use so that tasks which never stamp headers
/// do not require it.
#[derive(Debug)]
pub struct BuildContext {
    root: PathBuf,
    config: BuildConfig,
    build_year: i32,
    package: OnceCell<PackageDescriptor>,
}

impl BuildContext {
    /// Create a context stamped with the current UTC year.
    pub fn new(root: impl Into<PathBuf>, config: BuildConfig) -> Self {
        Self {
            root: root.into(),
            config,
            build_year: chrono::Utc::now().year(),
            package: OnceCell::new(),
        }
    }

    /// Override the year stamped into header comments.
    pub fn with_build_year(mut self, year: i32) -> Self {
        self.build_year = year;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn build_year(&self) -> i32 {
        self.build_year
    }

    /// Resolve a project-relative path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Path of an artifact inside the dist directory.
    pub fn dist_path(&self, filename: &str) -> PathBuf {
        self.root.join(&self.config.dist_dir).join(filename)
    }

    /// The package descriptor, loaded on first access.
    pub fn package(&self) -> Result<&PackageDescriptor> {
        if let Some(package) = self.package.get() {
            return Ok(package);
        }
        let loaded = load_package(&self.resolve(&self.config.package_file))?;
        Ok(self.package.get_or_init(|| loaded))
    }

    /// Header comment formatter for this run.
    pub fn stamper(&self) -> Result<CommentStamper<'_>> {
        Ok(CommentStamper::new(self.package()?, self.build_year))
    }
}
