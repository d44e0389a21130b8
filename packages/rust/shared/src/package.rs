//! Package descriptor (`package.json`) consumed for license headers.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, VictoryError};

/// Placeholder rendered for descriptor fields that are absent.
const MISSING_FIELD: &str = "undefined";

/// The subset of `package.json` used to stamp artifacts.
///
/// Fields are not validated: an absent field renders as `undefined`
/// wherever it is interpolated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

impl PackageDescriptor {
    pub fn name(&self) -> &str {
        display(&self.name)
    }

    pub fn version(&self) -> &str {
        display(&self.version)
    }

    pub fn author(&self) -> &str {
        display(&self.author)
    }

    pub fn email(&self) -> &str {
        display(&self.email)
    }

    pub fn license(&self) -> &str {
        display(&self.license)
    }

    pub fn homepage(&self) -> &str {
        display(&self.homepage)
    }

    /// Names of descriptor fields that are not set.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("version", &self.version),
            ("author", &self.author),
            ("email", &self.email),
            ("license", &self.license),
            ("homepage", &self.homepage),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| field)
        .collect()
    }
}

fn display(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(MISSING_FIELD)
}

/// Parse the package descriptor at `path`.
pub fn load_package(path: &Path) -> Result<PackageDescriptor> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        VictoryError::config(format!("failed to read {}: {e}", path.display()))
    })?;

    let package: PackageDescriptor = serde_json::from_str(&content).map_err(|e| {
        VictoryError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    let missing = package.missing_fields();
    if missing.is_empty() {
        debug!(name = package.name(), version = package.version(), "package descriptor loaded");
    } else {
        warn!(?path, ?missing, "package descriptor is missing fields");
    }

    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descriptor_and_ignores_extra_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        std::fs::write(
            &path,
            r#"{
                "name": "victory.css",
                "version": "1.4.0",
                "author": "Jane Doe",
                "email": "jane@example.com",
                "license": "MIT",
                "homepage": "https://example.com/victory",
                "devDependencies": { "gulp": "^4.0.0" }
            }"#,
        )
        .unwrap();

        let package = load_package(&path).unwrap();
        assert_eq!(package.name(), "victory.css");
        assert_eq!(package.homepage(), "https://example.com/victory");
        assert!(package.missing_fields().is_empty());
    }

    #[test]
    fn missing_fields_render_as_undefined() {
        let package: PackageDescriptor = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(package.version(), "undefined");
        assert_eq!(
            package.missing_fields(),
            vec!["version", "author", "email", "license", "homepage"]
        );
    }

    #[test]
    fn missing_file_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        let err = load_package(&path).unwrap_err();
        assert!(matches!(err, VictoryError::Config { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn invalid_json_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        std::fs::write(&path, "{ name: ").unwrap();
        let err = load_package(&path).unwrap_err();
        assert!(matches!(err, VictoryError::Config { .. }));
    }
}
