pub mod polyline;

pub use polyline::{PlotCommand, PlotSegment, Polyline};

/// Parameters controlling the accuracy of primitive-to-polyline conversion.
#[derive(Debug, Clone, Copy)]
pub struct PlotParams {
    /// Maximum allowed deviation from the true curve, as a fraction of the
    /// curve's radius.
    pub tolerance: f64,
    /// Minimum number of chords for a full circle.
    pub min_segments: u32,
    /// Maximum number of chords for a full circle.
    pub max_segments: u32,
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 8,
            max_segments: 256,
        }
    }
}

impl PlotParams {
    /// Number of chords approximating a full circle within the tolerance.
    ///
    /// From the sagitta formula `s = r * (1 - cos(theta / 2))`: a relative
    /// tolerance `s/r` bounds the chord angle at `2 * acos(1 - s/r)`, so the
    /// count is independent of the radius.
    #[must_use]
    pub fn circle_segments(&self) -> u32 {
        if self.tolerance <= 0.0 {
            return self.max_segments;
        }
        let max_angle = if self.tolerance >= 1.0 {
            std::f64::consts::PI
        } else {
            2.0 * (1.0 - self.tolerance).acos()
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (std::f64::consts::TAU / max_angle).ceil() as u32;
        n.clamp(self.min_segments, self.max_segments)
    }
}
