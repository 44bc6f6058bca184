use std::io::Write;

use crate::aggregate::{Aggregate, BoundingBox};
use crate::error::Result;
use crate::math::Point3;
use crate::wireframe::SolidRegistry;

/// Number of point/color tuples emitted per output line.
const TUPLES_PER_LINE: usize = 4;

/// Serializes the gathered wireframe data as a text record stream.
///
/// Order is fixed: title (if non-empty), unique solid count, point block,
/// index block, color block, bounding-box summary.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn emit(
    out: &mut impl Write,
    title: &str,
    registry: &SolidRegistry,
    aggregate: &Aggregate,
) -> Result<()> {
    if !title.is_empty() {
        writeln!(out, "Title: {title}")?;
    }
    writeln!(out, "number of solids ({})", registry.len())?;

    for solid in registry.iter() {
        let mut in_line = 0;
        for point in solid.polyline.points() {
            write!(out, "{:.6}, {:.6}, {:.6},", point.x, point.y, point.z)?;
            in_line += 1;
            if in_line == TUPLES_PER_LINE {
                writeln!(out)?;
                in_line = 0;
            }
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    for run in &aggregate.runs {
        writeln!(out, "  [{}, {}],", run.start, run.len)?;
    }

    for range in &aggregate.ranges {
        let mut in_line = 0;
        for rgba in &aggregate.colors[range.start..range.start + range.count] {
            write!(
                out,
                "{:.6}, {:.6}, {:.6}, {:.1}, ",
                rgba[0], rgba[1], rgba[2], rgba[3]
            )?;
            in_line += 1;
            if in_line == TUPLES_PER_LINE {
                writeln!(out)?;
                in_line = 0;
            }
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    // A registry with no points would otherwise print infinities; emit a
    // zero box instead.
    let bounds = if aggregate.bounds.is_empty() {
        BoundingBox {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    } else {
        aggregate.bounds
    };
    let diff = bounds.diff();
    let center = bounds.center();
    writeln!(
        out,
        "min ({:.6}, {:.6}, {:.6})",
        bounds.min.x, bounds.min.y, bounds.min.z
    )?;
    writeln!(
        out,
        "max ({:.6}, {:.6}, {:.6})",
        bounds.max.x, bounds.max.y, bounds.max.z
    )?;
    writeln!(out, "diff ({:.6}, {:.6}, {:.6})", diff.x, diff.y, diff.z)?;
    writeln!(
        out,
        "center ({:.6}, {:.6}, {:.6})",
        center.x, center.y, center.z
    )?;
    Ok(())
}
