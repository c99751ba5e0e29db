//! Run-once capture demonstration.
//!
//! Establishes one headless browser session, captures an element screenshot
//! and a full-page screenshot, writes both to the working directory and
//! tears the session down.
//!
//! Usage:
//!   page-snap
//!   page-snap --debug

// ============================================================================
// Imports
// ============================================================================

use tracing::info;
use tracing_subscriber::EnvFilter;

use page_snap::{ChromeSession, Result, capture_element, capture_full_page, write_artifact};

// ============================================================================
// Constants
// ============================================================================

const ELEMENT_URL: &str = "https://pkg.go.dev/";
const ELEMENT_SELECTOR: &str = "img.Homepage-logo";
const ELEMENT_OUTPUT: &str = "elementScreenshot.png";

const FULL_PAGE_URL: &str = "https://www.monitorapp.com/";
const FULL_PAGE_QUALITY: i64 = 90;
const FULL_PAGE_OUTPUT: &str = "fullScreenshot.png";

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let debug = std::env::args().any(|a| a == "--debug");
    init_logging(debug);

    if let Err(e) = run().await {
        eprintln!("[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let session = ChromeSession::launch().await?;

    // Close the session on every exit path, error included.
    let outcome = captures(&session).await;
    session.close().await;
    outcome
}

/// Runs both captures against the shared session, in order.
async fn captures(session: &ChromeSession) -> Result<()> {
    let element = capture_element(session, ELEMENT_URL, ELEMENT_SELECTOR).await?;
    write_artifact(ELEMENT_OUTPUT, &element)?;

    let full_page = capture_full_page(session, FULL_PAGE_URL, FULL_PAGE_QUALITY).await?;
    write_artifact(FULL_PAGE_OUTPUT, &full_page)?;

    info!("wrote {ELEMENT_OUTPUT} and {FULL_PAGE_OUTPUT}");
    Ok(())
}

// ============================================================================
// Logging
// ============================================================================

fn init_logging(debug: bool) {
    let filter = if debug {
        "page_snap=debug"
    } else {
        "page_snap=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
