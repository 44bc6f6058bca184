use std::collections::HashMap;

use slotmap::SlotMap;

use crate::geometry::Polyline;
use crate::model::Primitive;
use crate::walk::{LeafVisitor, TreeState, VisitOutcome};

slotmap::new_key_type! {
    /// Unique identifier for a solid in the registry.
    pub struct SolidKey;
}

/// Display parameters fixed before the walk begins.
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    /// Paint every solid with `fixed_color` instead of its material color.
    pub use_fixed_color: bool,
    /// Override color, 8-bit channels.
    pub fixed_color: [u8; 3],
    /// Permit dashed styling for subtracted/intersected solids.
    pub allow_dash: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_fixed_color: false,
            fixed_color: [255, 0, 0],
            allow_dash: true,
        }
    }
}

/// One unique leaf geometric object with its display attributes.
#[derive(Debug, Clone)]
pub struct Solid {
    pub name: String,
    /// Render dashed: first reached through a subtract or intersect member.
    pub dash: bool,
    /// Display color, 8-bit channels.
    pub color: [u8; 3],
    pub polyline: Polyline,
}

/// Insertion-ordered collection of solids, unique by name.
///
/// Insertion order is the order used for all later position assignment and
/// emission (first seen, first listed).
#[derive(Debug, Default)]
pub struct SolidRegistry {
    arena: SlotMap<SolidKey, Solid>,
    order: Vec<SolidKey>,
    by_name: HashMap<String, SolidKey>,
}

impl SolidRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a solid with this name is already registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Appends a solid, preserving insertion order.
    ///
    /// If the name is already registered the registry is left untouched and
    /// the existing solid's key is returned (first-seen attributes win).
    pub fn insert(&mut self, solid: Solid) -> SolidKey {
        if let Some(&key) = self.by_name.get(&solid.name) {
            return key;
        }
        let name = solid.name.clone();
        let key = self.arena.insert(solid);
        self.order.push(key);
        self.by_name.insert(name, key);
        key
    }

    /// Looks up a solid by key.
    #[must_use]
    pub fn get(&self, key: SolidKey) -> Option<&Solid> {
        self.arena.get(key)
    }

    /// Number of unique solids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no solid is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates solids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Solid> {
        self.order.iter().map(move |&key| &self.arena[key])
    }

    /// Total number of polyline points across all solids.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.iter().map(|solid| solid.polyline.point_count()).sum()
    }
}

/// Leaf visitor that gathers deduplicated wireframe solids.
#[derive(Debug, Default)]
pub struct WireframeCollector {
    config: DisplayConfig,
    registry: SolidRegistry,
}

impl WireframeCollector {
    /// Creates a collector with the given display configuration.
    #[must_use]
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            registry: SolidRegistry::new(),
        }
    }

    /// Returns the registry gathered so far.
    #[must_use]
    pub fn registry(&self) -> &SolidRegistry {
        &self.registry
    }

    /// Consumes the collector, returning the frozen registry.
    #[must_use]
    pub fn into_registry(self) -> SolidRegistry {
        self.registry
    }

    fn display_color(&self, material: [f64; 3]) -> [u8; 3] {
        if self.config.use_fixed_color {
            return self.config.fixed_color;
        }
        // Truncation, not rounding: a 0.999 channel maps to 254.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        [
            channel(material[0]),
            channel(material[1]),
            channel(material[2]),
        ]
    }
}

impl LeafVisitor for WireframeCollector {
    fn visit(&mut self, path: &[&str], state: &TreeState, primitive: &Primitive) -> VisitOutcome {
        let Some(&name) = path.last() else {
            return VisitOutcome::Failure;
        };
        if self.registry.contains(name) {
            return VisitOutcome::Duplicate;
        }

        let mut polyline = match primitive.plot(&state.params) {
            Ok(polyline) => polyline,
            Err(err) => {
                tracing::warn!("{name}: plot failure: {err}");
                return VisitOutcome::Failure;
            }
        };
        polyline.apply_transform(&state.transform);

        self.registry.insert(Solid {
            name: name.to_owned(),
            dash: self.config.allow_dash && state.subtracted,
            color: self.display_color(state.color),
            polyline,
        });
        VisitOutcome::NewSolid
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Matrix4, Point3, Vector3};
    use crate::model::Sphere;

    fn sphere_primitive() -> Primitive {
        Primitive::Sphere(Sphere {
            center: Point3::origin(),
            radius: 1.0,
        })
    }

    fn state_with_color(color: [f64; 3]) -> TreeState {
        TreeState {
            color,
            ..TreeState::default()
        }
    }

    #[test]
    fn first_path_wins_on_duplicate_names() {
        let mut collector = WireframeCollector::new(DisplayConfig::default());
        let primitive = sphere_primitive();

        let first = collector.visit(
            &["a", "part"],
            &state_with_color([0.0, 1.0, 0.0]),
            &primitive,
        );
        let second = collector.visit(
            &["b", "part"],
            &state_with_color([1.0, 0.0, 0.0]),
            &primitive,
        );

        assert_eq!(first, VisitOutcome::NewSolid);
        assert_eq!(second, VisitOutcome::Duplicate);
        let registry = collector.registry();
        assert_eq!(registry.len(), 1);
        let solid = registry.iter().next().unwrap();
        assert_eq!(solid.color, [0, 255, 0], "first path's color must win");
    }

    #[test]
    fn material_color_truncates_instead_of_rounding() {
        let mut collector = WireframeCollector::new(DisplayConfig::default());
        collector.visit(
            &["part"],
            &state_with_color([0.999, 0.5, 0.0]),
            &sphere_primitive(),
        );
        let solid = collector.registry().iter().next().unwrap();
        assert_eq!(solid.color[0], 254); // floor(0.999 * 255), not 255
        assert_eq!(solid.color[1], 127);
        assert_eq!(solid.color[2], 0);
    }

    #[test]
    fn fixed_color_overrides_material() {
        let config = DisplayConfig {
            use_fixed_color: true,
            fixed_color: [255, 0, 0],
            allow_dash: true,
        };
        let mut collector = WireframeCollector::new(config);
        collector.visit(
            &["part"],
            &state_with_color([0.0, 1.0, 0.0]),
            &sphere_primitive(),
        );
        let solid = collector.registry().iter().next().unwrap();
        assert_eq!(solid.color, [255, 0, 0]);
    }

    #[test]
    fn dash_follows_boolean_state_when_allowed() {
        let mut collector = WireframeCollector::new(DisplayConfig::default());
        let state = TreeState {
            subtracted: true,
            ..TreeState::default()
        };
        collector.visit(&["part"], &state, &sphere_primitive());
        assert!(collector.registry().iter().next().unwrap().dash);
    }

    #[test]
    fn dash_suppressed_when_not_allowed() {
        let config = DisplayConfig {
            allow_dash: false,
            ..DisplayConfig::default()
        };
        let mut collector = WireframeCollector::new(config);
        let state = TreeState {
            subtracted: true,
            ..TreeState::default()
        };
        collector.visit(&["part"], &state, &sphere_primitive());
        assert!(!collector.registry().iter().next().unwrap().dash);
    }

    #[test]
    fn plot_failure_leaves_registry_untouched() {
        let mut collector = WireframeCollector::new(DisplayConfig::default());
        let degenerate = Primitive::Sphere(Sphere {
            center: Point3::origin(),
            radius: 0.0,
        });
        let outcome = collector.visit(&["bad"], &TreeState::default(), &degenerate);
        assert_eq!(outcome, VisitOutcome::Failure);
        assert!(collector.registry().is_empty());
        assert!(!collector.registry().contains("bad"));
    }

    #[test]
    fn polyline_carries_the_accumulated_transform() {
        let mut collector = WireframeCollector::new(DisplayConfig::default());
        let state = TreeState {
            transform: Matrix4::new_translation(&Vector3::new(100.0, 0.0, 0.0)),
            ..TreeState::default()
        };
        collector.visit(&["part"], &state, &sphere_primitive());
        let solid = collector.registry().iter().next().unwrap();
        for point in solid.polyline.points() {
            assert!((point.x - 100.0).abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn walk_dedups_repeated_instances_of_one_leaf() {
        use crate::model::{BoolOp, Combination, Database, Member, Object};
        use crate::walk::walk_tree;

        let mut db = Database::new();
        db.add_object("X.s1", Object::Primitive(sphere_primitive()))
            .unwrap();
        let instance = |offset: f64| Member {
            op: BoolOp::Union,
            name: "X.s1".to_owned(),
            transform: Matrix4::new_translation(&Vector3::new(offset, 0.0, 0.0)),
        };
        let comb = Combination {
            color: None,
            members: vec![instance(0.0), instance(10.0)],
        };
        db.add_object("pair", Object::Combination(comb)).unwrap();

        let mut collector = WireframeCollector::new(DisplayConfig::default());
        let stats = walk_tree(&db, &["pair"], &TreeState::default(), &mut collector).unwrap();

        assert_eq!(stats.new_solids, 1);
        assert_eq!(stats.duplicates, 1);
        let registry = collector.into_registry();
        assert_eq!(registry.len(), 1);
        // First instance path wins; its geometry sits at the origin.
        let solid = registry.iter().next().unwrap();
        for point in solid.polyline.points() {
            assert!(point.x.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn registry_preserves_insertion_order() {
        let mut registry = SolidRegistry::new();
        for name in ["c", "a", "b"] {
            registry.insert(Solid {
                name: name.to_owned(),
                dash: false,
                color: [0, 0, 0],
                polyline: Polyline::new(),
            });
        }
        let names: Vec<&str> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
