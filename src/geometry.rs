//! Page geometry in CSS pixels.

// ============================================================================
// BoundingBox
// ============================================================================

/// A rectangle in CSS pixels, as reported by the page layout subsystem.
///
/// Layout values are fractional. A box is produced fresh on each layout
/// query, never cached and never mutated; the full-page capture procedure
/// consumes it twice, in two different precisions:
///
/// - the **viewport override** uses [`ceil_size`](Self::ceil_size) — integer
///   pixel counts rounded up, so fractional content is never clipped at the
///   bottom/right edge
/// - the **capture clip** uses the original fractional values unchanged
///
/// That asymmetry is part of the capture contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Left edge in CSS pixels.
    pub x: f64,
    /// Top edge in CSS pixels.
    pub y: f64,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl BoundingBox {
    /// Creates a bounding box.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the size rounded up to whole pixels, for device emulation.
    ///
    /// Truncating down would clip the bottom/right edge of fractional
    /// content.
    #[must_use]
    pub fn ceil_size(&self) -> (u32, u32) {
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }

    /// Returns `true` if the box covers no area.
    ///
    /// A degenerate box is not an error: the capture request for it is
    /// issued as-is and yields whatever empty image the encoder produces.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ============================================================================
// Tests
// ============================================================================
