//! page-snap - Headless Chromium element and full-page screenshot capture.
//!
//! This library drives a single headless browser session to capture two
//! kinds of screenshots: the visible pixels of one DOM element, and the
//! entire rendered content area of a page.
//!
//! # Architecture
//!
//! The browser is an out-of-process engine reached over the Chrome DevTools
//! Protocol; this crate treats it as an opaque remote service behind the
//! [`Session`] trait. The capture procedures are flat, sequential sequences
//! of remote round-trips:
//!
//! - [`capture_element`] - navigate, then one element-scoped capture
//! - [`capture_full_page`] - navigate, query the content extent, force the
//!   emulated viewport to its ceiling, capture clipped to the fractional box
//!
//! There is no retry, no concurrency and no recovery logic; any failed
//! round-trip aborts the procedure.
//!
//! # Quick Start
//!
//! ```no_run
//! use page_snap::{ChromeSession, Result, capture_full_page, write_artifact};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = ChromeSession::launch().await?;
//!
//!     let capture = capture_full_page(&session, "https://example.com", 90).await?;
//!     write_artifact("fullScreenshot.png", &capture)?;
//!
//!     session.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`capture`] | The element and full-page capture procedures |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`geometry`] | [`BoundingBox`] and the ceil/fractional split |
//! | [`output`] | Artifact persistence |
//! | [`session`] | [`Session`] contract and the Chromium-backed implementation |

// ============================================================================
// Modules
// ============================================================================

/// Element and full-page capture procedures.
pub mod capture;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Page geometry in CSS pixels.
pub mod geometry;

/// Capture artifact persistence.
pub mod output;

/// Browser session contract and implementations.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Capture procedures
pub use capture::{capture_element, capture_full_page};

// Error types
pub use error::{Error, Result};

// Geometry
pub use geometry::BoundingBox;

// Output
pub use output::write_artifact;

// Session types
pub use session::chrome::ChromeSession;
pub use session::{
    CaptureRequest, CaptureResult, ClipRegion, LayoutMetrics, Orientation, Session,
    ViewportOverride,
};
