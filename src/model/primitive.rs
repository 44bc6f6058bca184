use crate::error::PlotError;
use crate::geometry::{PlotParams, Polyline};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A leaf geometric primitive referenced at the end of an instance path.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Cuboid(Cuboid),
    Cylinder(Cylinder),
    /// Infinite half space; carries no wireframe representation.
    Halfspace(Halfspace),
}

impl Primitive {
    /// Converts the primitive into a polyline approximation under `params`.
    ///
    /// # Errors
    ///
    /// Returns an error for degenerate geometry or for primitives with no
    /// wireframe representation.
    pub fn plot(&self, params: &PlotParams) -> Result<Polyline, PlotError> {
        match self {
            Self::Sphere(sphere) => sphere.plot(params),
            Self::Cuboid(cuboid) => cuboid.plot(),
            Self::Cylinder(cylinder) => cylinder.plot(params),
            Self::Halfspace(_) => Err(PlotError::Unsupported("halfspace".to_owned())),
        }
    }
}

/// A sphere defined by center and radius.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
}

impl Sphere {
    /// Plots the sphere as three great circles in the XY, XZ and YZ planes.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn plot(&self, params: &PlotParams) -> Result<Polyline, PlotError> {
        if self.radius < TOLERANCE {
            return Err(PlotError::Degenerate(
                "sphere radius must be positive".to_owned(),
            ));
        }
        let segments = params.circle_segments();
        let mut pline = Polyline::new();
        plot_circle(&mut pline, &self.center, &Vector3::x(), &Vector3::y(), self.radius, segments);
        plot_circle(&mut pline, &self.center, &Vector3::x(), &Vector3::z(), self.radius, segments);
        plot_circle(&mut pline, &self.center, &Vector3::y(), &Vector3::z(), self.radius, segments);
        Ok(pline)
    }
}

/// An axis-aligned box defined by its two extreme corners.
#[derive(Debug, Clone)]
pub struct Cuboid {
    pub min: Point3,
    pub max: Point3,
}

impl Cuboid {
    /// Plots the twelve edges: bottom loop, top loop, four verticals.
    ///
    /// # Errors
    ///
    /// Returns an error if any extent is non-positive.
    pub fn plot(&self) -> Result<Polyline, PlotError> {
        if self.max.x - self.min.x < TOLERANCE
            || self.max.y - self.min.y < TOLERANCE
            || self.max.z - self.min.z < TOLERANCE
        {
            return Err(PlotError::Degenerate(
                "cuboid extents must be positive".to_owned(),
            ));
        }

        let (lo, hi) = (&self.min, &self.max);
        let corner = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let mut pline = Polyline::new();

        // Bottom loop.
        pline.move_to(corner(lo.x, lo.y, lo.z));
        pline.draw_to(corner(hi.x, lo.y, lo.z));
        pline.draw_to(corner(hi.x, hi.y, lo.z));
        pline.draw_to(corner(lo.x, hi.y, lo.z));
        pline.draw_to(corner(lo.x, lo.y, lo.z));

        // Top loop.
        pline.move_to(corner(lo.x, lo.y, hi.z));
        pline.draw_to(corner(hi.x, lo.y, hi.z));
        pline.draw_to(corner(hi.x, hi.y, hi.z));
        pline.draw_to(corner(lo.x, hi.y, hi.z));
        pline.draw_to(corner(lo.x, lo.y, hi.z));

        // Verticals.
        for (x, y) in [(lo.x, lo.y), (hi.x, lo.y), (hi.x, hi.y), (lo.x, hi.y)] {
            pline.move_to(corner(x, y, lo.z));
            pline.draw_to(corner(x, y, hi.z));
        }

        Ok(pline)
    }
}

/// A right circular cylinder with its axis along +Z from `base`.
#[derive(Debug, Clone)]
pub struct Cylinder {
    pub base: Point3,
    pub radius: f64,
    pub height: f64,
}

impl Cylinder {
    /// Plots both end circles plus four side lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or height is non-positive.
    pub fn plot(&self, params: &PlotParams) -> Result<Polyline, PlotError> {
        if self.radius < TOLERANCE {
            return Err(PlotError::Degenerate(
                "cylinder radius must be positive".to_owned(),
            ));
        }
        if self.height < TOLERANCE {
            return Err(PlotError::Degenerate(
                "cylinder height must be positive".to_owned(),
            ));
        }

        let segments = params.circle_segments();
        let top = self.base + Vector3::new(0.0, 0.0, self.height);
        let mut pline = Polyline::new();
        plot_circle(&mut pline, &self.base, &Vector3::x(), &Vector3::y(), self.radius, segments);
        plot_circle(&mut pline, &top, &Vector3::x(), &Vector3::y(), self.radius, segments);

        for (dx, dy) in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)] {
            let offset = Vector3::new(dx * self.radius, dy * self.radius, 0.0);
            pline.move_to(self.base + offset);
            pline.draw_to(top + offset);
        }

        Ok(pline)
    }
}

/// An infinite half space `normal . p >= distance`.
///
/// Parses and participates in combinations, but cannot be plotted.
#[derive(Debug, Clone)]
pub struct Halfspace {
    pub normal: Vector3,
    pub distance: f64,
}

/// Appends a closed circle in the plane spanned by `u` and `v`.
fn plot_circle(
    pline: &mut Polyline,
    center: &Point3,
    u: &Vector3,
    v: &Vector3,
    radius: f64,
    segments: u32,
) {
    for i in 0..=segments {
        let angle = std::f64::consts::TAU * f64::from(i) / f64::from(segments);
        let point = center + radius * (angle.cos() * u + angle.sin() * v);
        if i == 0 {
            pline.move_to(point);
        } else {
            pline.draw_to(point);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::PlotCommand;

    fn params() -> PlotParams {
        PlotParams::default()
    }

    fn move_count(pline: &Polyline) -> usize {
        pline
            .segments()
            .iter()
            .filter(|s| s.command == PlotCommand::Move)
            .count()
    }

    #[test]
    fn sphere_plots_three_circles() {
        let sphere = Sphere {
            center: Point3::new(1.0, 2.0, 3.0),
            radius: 5.0,
        };
        let pline = sphere.plot(&params()).unwrap();
        let per_circle = params().circle_segments() as usize + 1;
        assert_eq!(pline.point_count(), 3 * per_circle);
        assert_eq!(move_count(&pline), 3);
        // Every point lies on the sphere.
        for p in pline.points() {
            let r = (p - sphere.center).norm();
            assert!((r - 5.0).abs() < 1e-9, "point off sphere: r = {r}");
        }
    }

    #[test]
    fn sphere_zero_radius_fails() {
        let sphere = Sphere {
            center: Point3::origin(),
            radius: 0.0,
        };
        assert!(sphere.plot(&params()).is_err());
    }

    #[test]
    fn cuboid_plots_twelve_edges() {
        let cuboid = Cuboid {
            min: Point3::new(-1.0, -2.0, -3.0),
            max: Point3::new(1.0, 2.0, 3.0),
        };
        let pline = cuboid.plot().unwrap();
        // 5 points per loop, 2 per vertical edge.
        assert_eq!(pline.point_count(), 5 + 5 + 8);
        assert_eq!(move_count(&pline), 6);
        for p in pline.points() {
            assert!(p.x.abs() <= 1.0 + 1e-12);
            assert!(p.y.abs() <= 2.0 + 1e-12);
            assert!(p.z.abs() <= 3.0 + 1e-12);
        }
    }

    #[test]
    fn cuboid_inverted_fails() {
        let cuboid = Cuboid {
            min: Point3::new(1.0, 0.0, 0.0),
            max: Point3::new(0.0, 1.0, 1.0),
        };
        assert!(cuboid.plot().is_err());
    }

    #[test]
    fn cylinder_plots_end_circles_and_sides() {
        let cylinder = Cylinder {
            base: Point3::new(0.0, 0.0, 1.0),
            radius: 2.0,
            height: 4.0,
        };
        let pline = cylinder.plot(&params()).unwrap();
        let per_circle = params().circle_segments() as usize + 1;
        assert_eq!(pline.point_count(), 2 * per_circle + 8);
        assert_eq!(move_count(&pline), 6);
        for p in pline.points() {
            assert!(p.z >= 1.0 - 1e-12 && p.z <= 5.0 + 1e-12);
        }
    }

    #[test]
    fn cylinder_negative_height_fails() {
        let cylinder = Cylinder {
            base: Point3::origin(),
            radius: 1.0,
            height: -1.0,
        };
        assert!(cylinder.plot(&params()).is_err());
    }

    #[test]
    fn halfspace_has_no_plot() {
        let primitive = Primitive::Halfspace(Halfspace {
            normal: Vector3::z(),
            distance: 0.0,
        });
        let err = primitive.plot(&params()).unwrap_err();
        assert!(matches!(err, PlotError::Unsupported(_)));
    }
}
