//! Browser session contract and wire-shaped value types.
//!
//! A [`Session`] is one live connection to a browser-automation backend,
//! capable of exactly the four operations the capture procedures need:
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`navigate`](Session::navigate) | URL | completion or `Navigation` error |
//! | [`layout_metrics`](Session::layout_metrics) | — | [`LayoutMetrics`] |
//! | [`override_viewport`](Session::override_viewport) | [`ViewportOverride`] | success or `ViewportOverride` error |
//! | [`capture`](Session::capture) | [`CaptureRequest`] | [`CaptureResult`] |
//!
//! The production implementation is [`ChromeSession`](chrome::ChromeSession),
//! backed by a headless Chromium over the DevTools protocol. Tests substitute
//! a recording stub.

// ============================================================================
// Submodules
// ============================================================================

pub mod chrome;

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::Result;
use crate::geometry::BoundingBox;

// ============================================================================
// Orientation
// ============================================================================

/// Emulated screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Portrait, 0° rotation.
    #[default]
    PortraitPrimary,
    /// Portrait, 180° rotation.
    PortraitSecondary,
    /// Landscape, 90° rotation.
    LandscapePrimary,
    /// Landscape, 270° rotation.
    LandscapeSecondary,
}

impl Orientation {
    /// Returns the rotation angle in degrees.
    #[must_use]
    pub fn angle(&self) -> i64 {
        match self {
            Self::PortraitPrimary => 0,
            Self::LandscapePrimary => 90,
            Self::PortraitSecondary => 180,
            Self::LandscapeSecondary => 270,
        }
    }
}

// ============================================================================
// ViewportOverride
// ============================================================================

/// Forced device metrics for a session's emulated browsing surface.
///
/// Applying an override **replaces** the session's current emulation state
/// and stays in effect for the remainder of the session unless overridden
/// again. It is not reverted after a capture; any later operation on the
/// same session observes the overridden size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportOverride {
    /// Emulated width in whole pixels.
    pub width: u32,
    /// Emulated height in whole pixels.
    pub height: u32,
    /// Device scale factor.
    pub device_scale_factor: f64,
    /// Whether to emulate a mobile device.
    pub mobile: bool,
    /// Emulated screen orientation.
    pub orientation: Orientation,
}

impl ViewportOverride {
    /// Creates the override used by full-page capture: the given size at
    /// scale factor 1, mobile emulation off, portrait at 0°.
    #[must_use]
    pub fn full_page(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_scale_factor: 1.0,
            mobile: false,
            orientation: Orientation::PortraitPrimary,
        }
    }
}

// ============================================================================
// ClipRegion
// ============================================================================

/// The rectangle, in page coordinates, to which a capture is restricted.
///
/// Clip values keep the fractional precision of the layout query that
/// produced them; only the viewport override is rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    /// Left edge in CSS pixels.
    pub x: f64,
    /// Top edge in CSS pixels.
    pub y: f64,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Scale applied to the clipped region.
    pub scale: f64,
}

impl ClipRegion {
    /// Creates a clip covering `bounds` at the given scale.
    #[must_use]
    pub fn of(bounds: BoundingBox, scale: f64) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            scale,
        }
    }
}

// ============================================================================
// CaptureRequest
// ============================================================================

/// A pixel capture request.
///
/// Exactly one addressing mode is used per request: element captures set
/// `selector`, page captures set `clip` (or neither, for the default
/// viewport).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureRequest {
    /// CSS selector scoping the capture to the first visible match.
    pub selector: Option<String>,
    /// Clip region restricting the capture, in page coordinates.
    pub clip: Option<ClipRegion>,
    /// Encoder quality (0-100, higher is less compressed), passed through
    /// uninterpreted.
    pub quality: Option<i64>,
}

impl CaptureRequest {
    /// Creates an element-scoped capture request.
    #[must_use]
    pub fn element(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    /// Creates a clipped capture request at the given quality.
    #[must_use]
    pub fn clipped(clip: ClipRegion, quality: i64) -> Self {
        Self {
            selector: None,
            clip: Some(clip),
            quality: Some(quality),
        }
    }
}

// ============================================================================
// CaptureResult
// ============================================================================

/// An encoded pixel buffer produced by the session, owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    /// Encoded image bytes (PNG unless the encoder decided otherwise).
    pub bytes: Vec<u8>,
    /// Quality the capture was requested at, if any.
    pub quality: Option<i64>,
}

impl CaptureResult {
    /// Creates a capture result.
    #[must_use]
    pub fn new(bytes: Vec<u8>, quality: Option<i64>) -> Self {
        Self { bytes, quality }
    }

    /// Returns `true` if the buffer holds no pixels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ============================================================================
// LayoutMetrics
// ============================================================================

/// Layout geometry of the current document, fresh per query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutMetrics {
    /// The currently visible viewport.
    pub viewport: BoundingBox,
    /// The full scrollable document extent, typically at `x = y = 0`.
    pub content: BoundingBox,
}

// ============================================================================
// Session Trait
// ============================================================================

/// One connected browser instance.
///
/// A session is exclusively owned by its calling sequence for its entire
/// lifetime and released exactly once. Every operation is a blocking
/// round-trip to the browser; timeout policy belongs to the backing client,
/// not to this contract.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigates the session's page to `url`, blocking until the load
    /// signal completes.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Queries the page's layout metrics.
    async fn layout_metrics(&self) -> Result<LayoutMetrics>;

    /// Forces the emulated browsing surface to the given metrics, replacing
    /// any prior emulation state for this session.
    async fn override_viewport(&self, viewport: ViewportOverride) -> Result<()>;

    /// Requests a pixel capture.
    async fn capture(&self, request: CaptureRequest) -> Result<CaptureResult>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_page_override_shape() {
        let viewport = ViewportOverride::full_page(1025, 2049);
        assert_eq!(viewport.width, 1025);
        assert_eq!(viewport.height, 2049);
        assert_eq!(viewport.device_scale_factor, 1.0);
        assert!(!viewport.mobile);
        assert_eq!(viewport.orientation, Orientation::PortraitPrimary);
        assert_eq!(viewport.orientation.angle(), 0);
    }

    #[test]
    fn test_clip_keeps_fractional_precision() {
        let bounds = BoundingBox::new(0.0, 0.0, 1024.4, 2048.6);
        let clip = ClipRegion::of(bounds, 1.0);
        assert_eq!(clip.width, 1024.4);
        assert_eq!(clip.height, 2048.6);
        assert_eq!(clip.scale, 1.0);
    }

    #[test]
    fn test_request_addressing_modes() {
        let element = CaptureRequest::element("img.logo");
        assert_eq!(element.selector.as_deref(), Some("img.logo"));
        assert!(element.clip.is_none());
        assert!(element.quality.is_none());

        let clip = ClipRegion::of(BoundingBox::new(0.0, 0.0, 100.0, 100.0), 1.0);
        let clipped = CaptureRequest::clipped(clip, 90);
        assert!(clipped.selector.is_none());
        assert_eq!(clipped.clip, Some(clip));
        assert_eq!(clipped.quality, Some(90));
    }

    #[test]
    fn test_orientation_angles() {
        assert_eq!(Orientation::PortraitPrimary.angle(), 0);
        assert_eq!(Orientation::LandscapePrimary.angle(), 90);
        assert_eq!(Orientation::PortraitSecondary.angle(), 180);
        assert_eq!(Orientation::LandscapeSecondary.angle(), 270);
    }
}
