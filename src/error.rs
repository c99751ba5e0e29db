//! Error types for page capture.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use page_snap::{Result, Session};
//!
//! async fn example<S: Session>(session: &S) -> Result<()> {
//!     session.navigate("https://example.com").await?;
//!     Ok(())
//! }
//! ```
//!
//! Every error is terminal for the capture procedure in which it occurs:
//! there is no retry and no partial result. The variants map one-to-one onto
//! the remote round-trips a capture performs.
//!
//! | Category | Variants |
//! |----------|----------|
//! | Session lifecycle | [`Error::Launch`] |
//! | Navigation | [`Error::Navigation`] |
//! | Element lookup | [`Error::ElementNotFound`] |
//! | Layout | [`Error::LayoutQuery`] |
//! | Emulation | [`Error::ViewportOverride`] |
//! | Capture | [`Error::Capture`] |
//! | External | [`Error::Io`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Session Lifecycle Errors
    // ========================================================================
    /// Browser session could not be established.
    ///
    /// Returned when the headless browser fails to launch or the DevTools
    /// connection cannot be set up.
    #[error("Failed to launch browser session: {message}")]
    Launch {
        /// Description of the launch failure.
        message: String,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Page navigation failed.
    ///
    /// Returned when a URL is malformed, unreachable, or the load signal
    /// never completes.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// The URL that could not be loaded.
        url: String,
        /// Description of the navigation failure.
        message: String,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// No visible element matches the selector.
    ///
    /// Returned when an element-scoped capture finds no visible match within
    /// the session's default wait policy.
    #[error("No visible element matches selector: {selector}")]
    ElementNotFound {
        /// CSS selector used.
        selector: String,
    },

    // ========================================================================
    // Layout Errors
    // ========================================================================
    /// Page layout metrics could not be obtained.
    ///
    /// Returned when the layout query fails, e.g. the session is closed or
    /// the page has not rendered.
    #[error("Layout metrics query failed: {message}")]
    LayoutQuery {
        /// Description of the layout failure.
        message: String,
    },

    // ========================================================================
    // Emulation Errors
    // ========================================================================
    /// The device metrics override was rejected by the session.
    #[error("Viewport override to {width}x{height} rejected: {message}")]
    ViewportOverride {
        /// Requested emulated width in pixels.
        width: u32,
        /// Requested emulated height in pixels.
        height: u32,
        /// Description of the rejection.
        message: String,
    },

    // ========================================================================
    // Capture Errors
    // ========================================================================
    /// The pixel capture request failed.
    ///
    /// Returned when the screenshot command errors or its payload cannot be
    /// decoded.
    #[error("Screenshot capture failed: {message}")]
    Capture {
        /// Description of the capture failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error while persisting an artifact.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a launch error.
    #[inline]
    pub fn launch(message: impl Into<String>) -> Self {
        Self::Launch {
            message: message.into(),
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Creates a layout query error.
    #[inline]
    pub fn layout_query(message: impl Into<String>) -> Self {
        Self::LayoutQuery {
            message: message.into(),
        }
    }

    /// Creates a viewport override error.
    #[inline]
    pub fn viewport_override(width: u32, height: u32, message: impl Into<String>) -> Self {
        Self::ViewportOverride {
            width,
            height,
            message: message.into(),
        }
    }

    /// Creates a capture error.
    #[inline]
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error originated in the remote browser rather
    /// than locally.
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_navigation_display() {
        let err = Error::navigation("https://example.com", "net::ERR_NAME_NOT_RESOLVED");
        assert_eq!(
            err.to_string(),
            "Navigation to https://example.com failed: net::ERR_NAME_NOT_RESOLVED"
        );
    }

    #[test]
    fn test_element_not_found_display() {
        let err = Error::element_not_found("img.Homepage-logo");
        assert_eq!(
            err.to_string(),
            "No visible element matches selector: img.Homepage-logo"
        );
    }

    #[test]
    fn test_viewport_override_display() {
        let err = Error::viewport_override(1025, 2049, "session closed");
        assert_eq!(
            err.to_string(),
            "Viewport override to 1025x2049 rejected: session closed"
        );
    }

    #[test]
    fn test_is_remote() {
        let io_err: Error = IoError::new(ErrorKind::PermissionDenied, "denied").into();
        let capture_err = Error::capture("encoder failure");

        assert!(!io_err.is_remote());
        assert!(capture_err.is_remote());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
