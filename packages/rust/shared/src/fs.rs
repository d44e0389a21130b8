//! Reading pipeline inputs and writing artifacts.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, VictoryError};
use crate::types::ArtifactMeta;

/// Read a UTF-8 source file, attaching the path to any I/O error.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| VictoryError::io(path, e))
}

/// Write an artifact, fully replacing any previous version.
///
/// The content goes to a hidden temp file in the same directory first and is
/// then renamed over the target, so readers never observe a partial file.
/// Missing parent directories are created.
pub fn write_artifact(path: &Path, content: &str) -> Result<ArtifactMeta> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| VictoryError::config(format!("not a file path: {}", path.display())))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| VictoryError::io(dir, e))?;

    let temp = dir.join(format!(".{filename}.tmp"));
    std::fs::write(&temp, content).map_err(|e| VictoryError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| VictoryError::io(path, e))?;

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    debug!(file = %filename, size = content.len(), "wrote artifact");

    Ok(ArtifactMeta {
        filename,
        sha256,
        size_bytes: content.len(),
    })
}
