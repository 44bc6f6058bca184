use crate::geometry::PlotCommand;
use crate::math::{Point3, Vector3};
use crate::wireframe::SolidRegistry;

/// Axis-aligned bounding box accumulated over polyline points.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

impl BoundingBox {
    /// Creates an empty bounding box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows the box to enclose `point`.
    pub fn expand(&mut self, point: &Point3) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(point[i]);
            self.max[i] = self.max[i].max(point[i]);
        }
    }

    /// Returns `true` if no point has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Per-axis extent, `max - min`.
    #[must_use]
    pub fn diff(&self) -> Vector3 {
        self.max - self.min
    }

    /// Box center, `min + diff / 2`.
    #[must_use]
    pub fn center(&self) -> Point3 {
        self.min + self.diff() * 0.5
    }
}

/// A contiguous run of global vertex positions forming one connected stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRun {
    pub start: usize,
    pub len: usize,
}

/// Half-open range of global vertex positions owned by one solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidRange {
    pub start: usize,
    pub count: usize,
}

/// Derived read-only views over a frozen registry: bounding box, global
/// vertex index, and flattened color buffer.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub bounds: BoundingBox,
    /// One entry per stroke, split at each MOVE; runs partition
    /// `[0, total_points)` in registry-then-polyline order.
    pub runs: Vec<VertexRun>,
    /// One entry per solid, in registry order, with no gaps or overlaps.
    pub ranges: Vec<SolidRange>,
    /// Per-point RGBA of the owning solid, channels normalized to [0, 1].
    pub colors: Vec<[f32; 4]>,
}

impl Aggregate {
    /// Computes all derived views in one pass over the registry.
    #[must_use]
    pub fn compute(registry: &SolidRegistry) -> Self {
        let mut bounds = BoundingBox::new();
        let mut runs = Vec::new();
        let mut ranges = Vec::with_capacity(registry.len());
        let mut colors = Vec::with_capacity(registry.total_points());
        let mut position = 0usize;

        for solid in registry.iter() {
            let solid_start = position;
            let mut run_start = position;
            let mut run_len = 0usize;
            let rgba = normalized_color(solid.color);

            for segment in solid.polyline.segments() {
                if segment.command == PlotCommand::Move && run_len > 0 {
                    runs.push(VertexRun {
                        start: run_start,
                        len: run_len,
                    });
                    run_start = position;
                    run_len = 0;
                }
                bounds.expand(&segment.point);
                colors.push(rgba);
                position += 1;
                run_len += 1;
            }
            if run_len > 0 {
                runs.push(VertexRun {
                    start: run_start,
                    len: run_len,
                });
            }
            ranges.push(SolidRange {
                start: solid_start,
                count: position - solid_start,
            });
        }

        Self {
            bounds,
            runs,
            ranges,
            colors,
        }
    }

    /// Total number of points across all solids.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.colors.len()
    }
}

fn normalized_color(color: [u8; 3]) -> [f32; 4] {
    [
        f32::from(color[0]) / 255.0,
        f32::from(color[1]) / 255.0,
        f32::from(color[2]) / 255.0,
        1.0,
    ]
}
