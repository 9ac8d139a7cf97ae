//! Stored OAuth credential housekeeping
//!
//! The authorization flow itself is handled by the host; this crate only
//! knows where the stored credential lives so it can be discarded once the
//! API reports it as expired or revoked.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::utils::Result;

pub const STORED_CREDENTIAL_FILE: &str = "StoredCredential";

pub fn stored_credential_path(auth_dir: &Path) -> PathBuf {
    auth_dir.join(STORED_CREDENTIAL_FILE)
}

/// Delete the stored credential so the next attempt re-authenticates.
///
/// Returns `true` if a credential was deleted.
pub async fn invalidate_stored_credential(auth_dir: &Path) -> Result<bool> {
    let path = stored_credential_path(auth_dir);
    match fs::remove_file(&path).await {
        Ok(()) => {
            info!("Deleted invalid stored credential {:?}", path);
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("No stored credential to delete at {:?}", path);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_removes_file_once() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(stored_credential_path(temp.path()), b"{}").unwrap();

        assert!(invalidate_stored_credential(temp.path()).await.unwrap());
        assert!(!stored_credential_path(temp.path()).exists());
        assert!(!invalidate_stored_credential(temp.path()).await.unwrap());
    }
}
