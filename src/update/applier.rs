//! Artifact replacement.
//!
//! Installs a downloaded payload over the local artifact the host loads
//! the running code from. The payload is staged to a sibling file and
//! swapped in with a rename, so a failed download or write never leaves
//! the artifact half-written.

use crate::error::{AutosaveError, Result};
use std::path::Path;

/// Write `payload` over the artifact at `artifact_path`.
///
/// The payload is rejected if it is empty after trimming. Staging happens
/// in the artifact's own directory so the final rename stays on one
/// filesystem.
///
/// # Errors
///
/// Returns [`AutosaveError::Update`] on an empty payload or any staging /
/// rename failure. The artifact is unmodified on error.
pub fn install_payload(payload: &str, artifact_path: &Path) -> Result<()> {
    if payload.trim().is_empty() {
        return Err(AutosaveError::Update(
            "downloaded payload is empty; refusing to replace artifact".to_owned(),
        ));
    }

    let parent = artifact_path.parent().ok_or_else(|| {
        AutosaveError::Update(format!(
            "artifact path {} has no parent directory",
            artifact_path.display()
        ))
    })?;

    std::fs::create_dir_all(parent).map_err(|e| {
        AutosaveError::Update(format!(
            "cannot create artifact directory {}: {e}",
            parent.display()
        ))
    })?;

    let staged = artifact_path.with_extension("staged");
    std::fs::write(&staged, payload).map_err(|e| {
        AutosaveError::Update(format!("cannot stage payload to {}: {e}", staged.display()))
    })?;

    std::fs::rename(&staged, artifact_path).map_err(|e| {
        let _ = std::fs::remove_file(&staged);
        AutosaveError::Update(format!(
            "cannot replace artifact {}: {e}",
            artifact_path.display()
        ))
    })?;

    tracing::info!("artifact updated at {}", artifact_path.display());
    Ok(())
}
