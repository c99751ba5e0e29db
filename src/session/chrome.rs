//! Production session backed by headless Chromium over CDP.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::{
    ScreenOrientation, ScreenOrientationType, SetDeviceMetricsOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, Viewport,
};
use chromiumoxide::page::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;

use super::{CaptureRequest, CaptureResult, LayoutMetrics, Orientation, Session, ViewportOverride};

// ============================================================================
// ChromeSession
// ============================================================================

/// A [`Session`] driving one headless Chromium instance.
///
/// Owns the browser process, the page it captures from, and the task
/// draining the DevTools event stream. Created once, used for the whole
/// run, released exactly once via [`close`](Self::close).
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    /// Launches a headless browser and opens a blank page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Launch`] if the browser cannot be started or the
    /// DevTools connection cannot be established.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(Error::launch)?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(|e| Error::launch(e.to_string()))?;

        // The event stream must be drained for commands to make progress.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::launch(e.to_string()))?;

        debug!("Browser session established");

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Closes the browser and joins the event task.
    ///
    /// Teardown is best effort: failures are logged, not surfaced, since
    /// every capture result has already been handed to the caller by the
    /// time the session is released.
    pub async fn close(mut self) {
        if let Err(error) = self.browser.close().await {
            debug!(%error, "Browser close reported an error");
        }
        let _ = self.browser.wait().await;
        let _ = self.handler.await;
        debug!("Browser session released");
    }
}

// ============================================================================
// Session Implementation
// ============================================================================

#[async_trait]
impl Session for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url = %url, "Navigating");

        // Reject malformed URLs before touching the wire.
        Url::parse(url).map_err(|e| Error::navigation(url, e.to_string()))?;

        self.page
            .goto(url)
            .await
            .map_err(|e| Error::navigation(url, e.to_string()))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| Error::navigation(url, e.to_string()))?;
        Ok(())
    }

    async fn layout_metrics(&self) -> Result<LayoutMetrics> {
        debug!("Querying layout metrics");

        let metrics = self
            .page
            .layout_metrics()
            .await
            .map_err(|e| Error::layout_query(e.to_string()))?;

        let viewport = &metrics.css_visual_viewport;
        let content = &metrics.css_content_size;

        Ok(LayoutMetrics {
            viewport: BoundingBox::new(
                viewport.page_x,
                viewport.page_y,
                viewport.client_width,
                viewport.client_height,
            ),
            content: BoundingBox::new(content.x, content.y, content.width, content.height),
        })
    }

    async fn override_viewport(&self, viewport: ViewportOverride) -> Result<()> {
        debug!(
            width = viewport.width,
            height = viewport.height,
            mobile = viewport.mobile,
            "Overriding device metrics"
        );

        let orientation = ScreenOrientation {
            r#type: screen_orientation_type(viewport.orientation),
            angle: viewport.orientation.angle(),
        };

        let params = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(viewport.width))
            .height(i64::from(viewport.height))
            .device_scale_factor(viewport.device_scale_factor)
            .mobile(viewport.mobile)
            .screen_orientation(orientation)
            .build()
            .map_err(|e| Error::viewport_override(viewport.width, viewport.height, e))?;

        self.page
            .execute(params)
            .await
            .map_err(|e| Error::viewport_override(viewport.width, viewport.height, e.to_string()))?;
        Ok(())
    }

    async fn capture(&self, request: CaptureRequest) -> Result<CaptureResult> {
        debug!(
            selector = request.selector.as_deref(),
            clip = ?request.clip,
            quality = request.quality,
            "Capturing screenshot"
        );

        // Element-scoped capture: resolve the selector, then let the client
        // scroll the node into view and capture its box.
        if let Some(selector) = &request.selector {
            let element = self
                .page
                .find_element(selector.as_str())
                .await
                .map_err(|_| Error::element_not_found(selector.clone()))?;

            let bytes = element
                .screenshot(CaptureScreenshotFormat::Png)
                .await
                .map_err(|e| Error::capture(e.to_string()))?;

            return Ok(CaptureResult::new(bytes, request.quality));
        }

        let mut params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .from_surface(true);

        if let Some(clip) = request.clip {
            params = params.clip(Viewport {
                x: clip.x,
                y: clip.y,
                width: clip.width,
                height: clip.height,
                scale: clip.scale,
            });
        }
        if let Some(quality) = request.quality {
            params = params.quality(quality);
        }

        let response = self
            .page
            .execute(params.build())
            .await
            .map_err(|e| Error::capture(e.to_string()))?;

        let encoded: &str = response.data.as_ref();
        let bytes = Base64Standard
            .decode(encoded)
            .map_err(|e| Error::capture(format!("base64 decode failed: {e}")))?;

        Ok(CaptureResult::new(bytes, request.quality))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn screen_orientation_type(orientation: Orientation) -> ScreenOrientationType {
    match orientation {
        Orientation::PortraitPrimary => ScreenOrientationType::PortraitPrimary,
        Orientation::PortraitSecondary => ScreenOrientationType::PortraitSecondary,
        Orientation::LandscapePrimary => ScreenOrientationType::LandscapePrimary,
        Orientation::LandscapeSecondary => ScreenOrientationType::LandscapeSecondary,
    }
}
