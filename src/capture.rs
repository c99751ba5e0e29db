//! Element and full-page capture procedures.
//!
//! Both procedures run strictly sequentially against one [`Session`]: every
//! step is a blocking round-trip to the browser, any failure aborts the
//! remaining steps, and nothing is retried.
//!
//! # Example
//!
//! ```ignore
//! use page_snap::{ChromeSession, capture_element, capture_full_page};
//!
//! let session = ChromeSession::launch().await?;
//! let logo = capture_element(&session, "https://pkg.go.dev/", "img.Homepage-logo").await?;
//! let page = capture_full_page(&session, "https://www.monitorapp.com/", 90).await?;
//! session.close().await;
//! ```

use tracing::debug;

use crate::error::Result;
use crate::session::{CaptureRequest, CaptureResult, ClipRegion, Session, ViewportOverride};

// ============================================================================
// Element Capture
// ============================================================================

/// Captures exactly the visible pixels of the first element matching
/// `selector` on the page at `url`.
///
/// Navigates the session and blocks until the load signal completes, then
/// issues a single element-scoped capture. The element must be visible;
/// whether hidden matches are waited for is the session's default policy.
///
/// # Errors
///
/// Returns [`Error::Navigation`](crate::Error::Navigation) if the URL cannot
/// be loaded, [`Error::ElementNotFound`](crate::Error::ElementNotFound) if no
/// visible element matches.
pub async fn capture_element<S>(session: &S, url: &str, selector: &str) -> Result<CaptureResult>
where
    S: Session + ?Sized,
{
    debug!(url = %url, selector = %selector, "Element capture");

    session.navigate(url).await?;
    session.capture(CaptureRequest::element(selector)).await
}

// ============================================================================
// Full-Page Capture
// ============================================================================

/// Captures the entire rendered content area of the page at `url`, not just
/// the initially visible viewport.
///
/// The procedure, in order:
///
/// 1. navigate and block until load completes
/// 2. query layout metrics and take the **content** bounding box — the full
///    scrollable document extent in CSS pixels
/// 3. round its width and height **up** to whole pixels
/// 4. force the emulated viewport to that integer size (scale factor 1,
///    mobile off, portrait at 0°)
/// 5. capture clipped to the **original fractional** box at clip scale 1,
///    passing `quality` through uninterpreted
///
/// The integer override versus fractional clip split is deliberate: rounding
/// the clip would shift pixels, truncating the viewport would cut off the
/// bottom/right edge.
///
/// The device metrics override is left in effect afterwards; any later
/// operation on the same session observes the overridden size unless it
/// overrides it again.
///
/// A zero-area content box is not an error: the degenerate capture request
/// is issued and yields whatever empty image the encoder produces.
///
/// # Errors
///
/// Fails with the error of whichever round-trip breaks first:
/// [`Navigation`](crate::Error::Navigation),
/// [`LayoutQuery`](crate::Error::LayoutQuery),
/// [`ViewportOverride`](crate::Error::ViewportOverride) or
/// [`Capture`](crate::Error::Capture). All remaining steps are skipped.
pub async fn capture_full_page<S>(session: &S, url: &str, quality: i64) -> Result<CaptureResult>
where
    S: Session + ?Sized,
{
    debug!(url = %url, quality, "Full-page capture");

    session.navigate(url).await?;

    let content = session.layout_metrics().await?.content;
    let (width, height) = content.ceil_size();

    debug!(
        content_width = content.width,
        content_height = content.height,
        width,
        height,
        "Content extent"
    );

    session
        .override_viewport(ViewportOverride::full_page(width, height))
        .await?;

    session
        .capture(CaptureRequest::clipped(ClipRegion::of(content, 1.0), quality))
        .await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::Error;
    use crate::geometry::BoundingBox;
    use crate::session::{LayoutMetrics, Orientation};

    /// One recorded round-trip to the stub session.
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Navigate(String),
        LayoutMetrics,
        OverrideViewport(ViewportOverride),
        Capture(CaptureRequest),
    }

    /// In-memory session recording every round-trip in order.
    struct StubSession {
        calls: Mutex<Vec<Call>>,
        content: BoundingBox,
        /// Selector → rendered element box. Lookups outside the map fail.
        element: Option<(String, BoundingBox)>,
        fail_navigation: bool,
        fail_override: bool,
    }

    impl StubSession {
        fn with_content(content: BoundingBox) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                content,
                element: None,
                fail_navigation: false,
                fail_override: false,
            }
        }

        fn with_element(selector: &str, bounds: BoundingBox) -> Self {
            let mut stub = Self::with_content(BoundingBox::new(0.0, 0.0, 1280.0, 720.0));
            stub.element = Some((selector.to_string(), bounds));
            stub
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl Session for StubSession {
        async fn navigate(&self, url: &str) -> Result<()> {
            self.record(Call::Navigate(url.to_string()));
            if self.fail_navigation {
                return Err(Error::navigation(url, "net::ERR_NAME_NOT_RESOLVED"));
            }
            Ok(())
        }

        async fn layout_metrics(&self) -> Result<LayoutMetrics> {
            self.record(Call::LayoutMetrics);
            Ok(LayoutMetrics {
                viewport: BoundingBox::new(0.0, 0.0, 1280.0, 720.0),
                content: self.content,
            })
        }

        async fn override_viewport(&self, viewport: ViewportOverride) -> Result<()> {
            self.record(Call::OverrideViewport(viewport));
            if self.fail_override {
                return Err(Error::viewport_override(
                    viewport.width,
                    viewport.height,
                    "rejected",
                ));
            }
            Ok(())
        }

        async fn capture(&self, request: CaptureRequest) -> Result<CaptureResult> {
            self.record(Call::Capture(request.clone()));

            if let Some(selector) = &request.selector {
                let Some((known, bounds)) = &self.element else {
                    return Err(Error::element_not_found(selector.clone()));
                };
                if known != selector {
                    return Err(Error::element_not_found(selector.clone()));
                }
                // Synthesize a buffer sized by the element's rendered box.
                let pixels = (bounds.width * bounds.height) as usize;
                return Ok(CaptureResult::new(vec![0u8; pixels], request.quality));
            }

            let area = request
                .clip
                .map(|c| (c.width * c.height) as usize)
                .unwrap_or(1280 * 720);
            Ok(CaptureResult::new(vec![0u8; area], request.quality))
        }
    }

    // ========================================================================
    // Full-Page Capture
    // ========================================================================

    #[tokio::test]
    async fn full_page_ceils_override_and_keeps_fractional_clip() {
        let stub = StubSession::with_content(BoundingBox::new(0.0, 0.0, 1024.4, 2048.6));

        let result = capture_full_page(&stub, "https://www.monitorapp.com/", 90)
            .await
            .unwrap();
        assert!(!result.is_empty());
        assert_eq!(result.quality, Some(90));

        let calls = stub.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls[0],
            Call::Navigate("https://www.monitorapp.com/".to_string())
        );
        assert_eq!(calls[1], Call::LayoutMetrics);
        assert_eq!(
            calls[2],
            Call::OverrideViewport(ViewportOverride {
                width: 1025,
                height: 2049,
                device_scale_factor: 1.0,
                mobile: false,
                orientation: Orientation::PortraitPrimary,
            })
        );
        assert_eq!(
            calls[3],
            Call::Capture(CaptureRequest::clipped(
                ClipRegion {
                    x: 0.0,
                    y: 0.0,
                    width: 1024.4,
                    height: 2048.6,
                    scale: 1.0,
                },
                90,
            ))
        );
    }

    #[tokio::test]
    async fn full_page_passes_quality_bounds_through() {
        for quality in [0, 100] {
            let stub = StubSession::with_content(BoundingBox::new(0.0, 0.0, 800.0, 600.0));
            let result = capture_full_page(&stub, "https://example.com", quality)
                .await
                .unwrap();
            assert_eq!(result.quality, Some(quality));

            let Call::Capture(request) = stub.calls().pop().unwrap() else {
                panic!("last call must be the capture");
            };
            assert_eq!(request.quality, Some(quality));
        }
    }

    #[tokio::test]
    async fn full_page_zero_area_content_is_not_an_error() {
        let stub = StubSession::with_content(BoundingBox::new(0.0, 0.0, 0.0, 0.0));

        let result = capture_full_page(&stub, "https://example.com", 90)
            .await
            .unwrap();
        assert!(result.is_empty());

        // The degenerate clip still goes out, unguarded.
        let Call::Capture(request) = stub.calls().pop().unwrap() else {
            panic!("last call must be the capture");
        };
        let clip = request.clip.unwrap();
        assert_eq!(clip.width, 0.0);
        assert_eq!(clip.height, 0.0);
    }

    #[tokio::test]
    async fn full_page_navigation_failure_aborts_remaining_steps() {
        let mut stub = StubSession::with_content(BoundingBox::new(0.0, 0.0, 800.0, 600.0));
        stub.fail_navigation = true;

        let err = capture_full_page(&stub, "https://unreachable.invalid/", 90)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }));
        assert_eq!(
            stub.calls(),
            vec![Call::Navigate("https://unreachable.invalid/".to_string())]
        );
    }

    #[tokio::test]
    async fn full_page_override_rejection_aborts_capture() {
        let mut stub = StubSession::with_content(BoundingBox::new(0.0, 0.0, 800.0, 600.0));
        stub.fail_override = true;

        let err = capture_full_page(&stub, "https://example.com", 90)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ViewportOverride { .. }));

        let calls = stub.calls();
        assert_eq!(calls.len(), 3);
        assert!(!calls.iter().any(|c| matches!(c, Call::Capture(_))));
    }

    // ========================================================================
    // Element Capture
    // ========================================================================

    #[tokio::test]
    async fn element_capture_returns_buffer_bounded_by_element_box() {
        let bounds = BoundingBox::new(10.0, 20.0, 300.0, 150.0);
        let stub = StubSession::with_element("img.Homepage-logo", bounds);

        let result = capture_element(&stub, "https://pkg.go.dev/", "img.Homepage-logo")
            .await
            .unwrap();
        assert!(!result.is_empty());
        assert!(result.bytes.len() <= (bounds.width * bounds.height) as usize);

        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Navigate("https://pkg.go.dev/".to_string()));
        assert_eq!(
            calls[1],
            Call::Capture(CaptureRequest::element("img.Homepage-logo"))
        );
    }

    #[tokio::test]
    async fn element_capture_unknown_selector_fails() {
        let stub = StubSession::with_element("img.logo", BoundingBox::new(0.0, 0.0, 64.0, 64.0));

        let err = capture_element(&stub, "https://example.com", "#missing")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn element_capture_does_not_touch_layout_or_emulation() {
        let stub = StubSession::with_element("img.logo", BoundingBox::new(0.0, 0.0, 64.0, 64.0));

        capture_element(&stub, "https://example.com", "img.logo")
            .await
            .unwrap();

        let calls = stub.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::LayoutMetrics)));
        assert!(!calls.iter().any(|c| matches!(c, Call::OverrideViewport(_))));
    }
}
