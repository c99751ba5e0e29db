//! Capture artifact persistence.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::session::CaptureResult;

// ============================================================================
// Artifact Writing
// ============================================================================

/// Writes a capture to `path`, readable by everyone, writable by the owner.
///
/// The buffer is written verbatim; no re-encoding happens on the way out.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the file cannot be written.
pub fn write_artifact(path: impl AsRef<Path>, capture: &CaptureResult) -> Result<()> {
    let path = path.as_ref();

    fs::write(path, &capture.bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    }

    debug!(path = %path.display(), bytes = capture.bytes.len(), "Wrote capture artifact");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifact_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.png");
        let capture = CaptureResult::new(vec![0x89, b'P', b'N', b'G'], Some(90));

        write_artifact(&path, &capture).unwrap();
        assert_eq!(fs::read(&path).unwrap(), capture.bytes);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_artifact_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.png");

        write_artifact(&path, &CaptureResult::new(vec![1, 2, 3], None)).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_write_artifact_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("capture.png");

        let err = write_artifact(&path, &CaptureResult::new(vec![1], None)).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
