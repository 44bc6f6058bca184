use crate::math::{Matrix4, Point3};

/// Command tag for a polyline segment.
///
/// A `Move` starts a new disconnected stroke; a `Draw` connects the previous
/// point to this segment's point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotCommand {
    Move,
    Draw,
}

/// A single polyline segment: a command paired with its endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSegment {
    pub command: PlotCommand,
    pub point: Point3,
}

/// An ordered sequence of move/draw segments approximating wireframe curves.
///
/// Produced once per unique leaf; frozen once its owning solid takes it.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    segments: Vec<PlotSegment>,
}

impl Polyline {
    /// Creates an empty polyline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new disconnected stroke at `point`.
    pub fn move_to(&mut self, point: Point3) {
        self.segments.push(PlotSegment {
            command: PlotCommand::Move,
            point,
        });
    }

    /// Continues the current stroke to `point`.
    pub fn draw_to(&mut self, point: Point3) {
        self.segments.push(PlotSegment {
            command: PlotCommand::Draw,
            point,
        });
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PlotSegment] {
        &self.segments
    }

    /// Iterates the points in order, ignoring command tags.
    pub fn points(&self) -> impl Iterator<Item = &Point3> {
        self.segments.iter().map(|segment| &segment.point)
    }

    /// Returns the number of points (one per segment).
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the polyline holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Applies an affine transform to every point in place.
    pub fn apply_transform(&mut self, transform: &Matrix4) {
        for segment in &mut self.segments {
            segment.point = transform.transform_point(&segment.point);
        }
    }
}
