//! Shared types, error model, and configuration for the Victory.css build.
//!
//! This crate is the foundation depended on by all other build crates.
//! It provides:
//! - [`VictoryError`] — the unified error type
//! - Domain types ([`Variant`], [`ArtifactMeta`])
//! - Configuration ([`BuildConfig`], [`PackageDescriptor`], config loading)
//! - Artifact I/O ([`read_source`], [`write_artifact`])

pub mod config;
pub mod error;
pub mod fs;
pub mod package;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    BuildConfig, CONFIG_FILE_NAME, ExamplesConfig, ReadmeConfig, StylesConfig, VariantConfig,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, VictoryError};
pub use fs::{read_source, write_artifact};
pub use package::{PackageDescriptor, load_package};
pub use types::{ArtifactMeta, Variant};
