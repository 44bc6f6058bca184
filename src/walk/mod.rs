use crate::error::WalkError;
use crate::geometry::PlotParams;
use crate::math::Matrix4;
use crate::model::{BoolOp, Database, Object, Primitive};

/// Maximum instance-path depth before a subtree is abandoned.
///
/// Model files are expected to be acyclic; the cap keeps a cyclic file from
/// recursing without bound.
const MAX_DEPTH: usize = 64;

/// Accumulated traversal state along one instance path.
#[derive(Debug, Clone)]
pub struct TreeState {
    /// Combined instancing transform from the top-level object down to here.
    pub transform: Matrix4,
    /// True once the path has passed through a subtract or intersect member.
    pub subtracted: bool,
    /// Material color inherited from the nearest colored ancestor,
    /// normalized [0, 1] channels.
    pub color: [f64; 3],
    /// Tessellation tolerances for leaf plots.
    pub params: PlotParams,
}

impl Default for TreeState {
    fn default() -> Self {
        Self {
            transform: Matrix4::identity(),
            subtracted: false,
            color: [1.0, 1.0, 1.0],
            params: PlotParams::default(),
        }
    }
}

/// Result of visiting one resolved leaf instance path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// A new solid was created for this leaf.
    NewSolid,
    /// The leaf was already registered via an earlier path.
    Duplicate,
    /// The leaf could not be converted; the path is skipped.
    Failure,
}

/// Callback invoked once per resolved leaf instance path.
///
/// `path` is the sequence of object names from the top-level object down to
/// the leaf (the leaf name is the last element).
pub trait LeafVisitor {
    fn visit(&mut self, path: &[&str], state: &TreeState, primitive: &Primitive) -> VisitOutcome;
}

/// Adapts a plain closure into a [`LeafVisitor`].
pub struct VisitorFn<F>(pub F);

impl<F> LeafVisitor for VisitorFn<F>
where
    F: FnMut(&[&str], &TreeState, &Primitive) -> VisitOutcome,
{
    fn visit(&mut self, path: &[&str], state: &TreeState, primitive: &Primitive) -> VisitOutcome {
        (self.0)(path, state, primitive)
    }
}

/// Counters reported by a completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Leaves that produced a new solid.
    pub new_solids: usize,
    /// Instance paths ending at an already-registered leaf.
    pub duplicates: usize,
    /// Paths skipped because the leaf could not be converted.
    pub failures: usize,
}

/// Expands the named top-level objects depth-first and invokes `visitor`
/// once per resolved leaf instance path.
///
/// Unresolvable names, dangling member references and failed leaves are
/// logged and skipped; sibling paths continue.
///
/// # Errors
///
/// Returns an error only if none of the requested objects exist.
pub fn walk_tree(
    db: &Database,
    names: &[&str],
    state: &TreeState,
    visitor: &mut dyn LeafVisitor,
) -> Result<WalkStats, WalkError> {
    let mut stats = WalkStats::default();
    let mut resolved = 0usize;

    for &name in names {
        if !db.contains(name) {
            tracing::warn!("loading the geometry for [{name}] failed");
            continue;
        }
        tracing::info!("load ({name})");
        resolved += 1;
        let mut path = Vec::new();
        descend(db, name, state.clone(), &mut path, visitor, &mut stats);
    }

    if resolved == 0 {
        return Err(WalkError::NoObjects);
    }
    Ok(stats)
}

fn descend<'a>(
    db: &'a Database,
    name: &'a str,
    state: TreeState,
    path: &mut Vec<&'a str>,
    visitor: &mut dyn LeafVisitor,
    stats: &mut WalkStats,
) {
    if path.len() >= MAX_DEPTH {
        tracing::warn!("instance path exceeds depth limit at [{name}], skipping subtree");
        return;
    }
    let Some(object) = db.object(name) else {
        tracing::warn!("dangling reference to [{name}], skipping");
        return;
    };

    path.push(name);
    match object {
        Object::Primitive(primitive) => match visitor.visit(path, &state, primitive) {
            VisitOutcome::NewSolid => stats.new_solids += 1,
            VisitOutcome::Duplicate => stats.duplicates += 1,
            VisitOutcome::Failure => stats.failures += 1,
        },
        Object::Combination(comb) => {
            let mut inherited = state;
            if let Some(color) = comb.color {
                inherited.color = color;
            }
            for member in &comb.members {
                let mut child = inherited.clone();
                child.transform = inherited.transform * member.transform;
                if matches!(member.op, BoolOp::Subtract | BoolOp::Intersect) {
                    child.subtracted = true;
                }
                descend(db, &member.name, child, path, visitor, stats);
            }
        }
    }
    path.pop();
}
