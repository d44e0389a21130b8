//! Core domain types for the build pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// One of the two build configurations producing an artifact set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Full framework with every script plugin.
    Standard,
    /// Reduced stylesheet with the core script and polyfill.
    Basic,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Standard, Variant::Basic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Basic => "basic",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArtifactMeta
// ---------------------------------------------------------------------------

/// Metadata for a single file written by a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactMeta {
    /// File name within its output directory (e.g. `victory.min.css`).
    pub filename: String,
    /// Hex-encoded SHA-256 of the written content.
    pub sha256: String,
    pub size_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_display_and_serde_agree() {
        for variant in Variant::ALL {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, format!("\"{variant}\""));
        }
    }
}
