mod parse;
pub mod primitive;

pub use primitive::{Cuboid, Cylinder, Halfspace, Primitive, Sphere};

use std::collections::HashMap;
use std::path::Path;

use crate::error::DatabaseError;
use crate::math::Matrix4;

/// Maximum number of bytes of a model title retained on open.
pub const TITLE_CAPACITY: usize = 1024;

/// Boolean operator attaching a member to its parent combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    Union,
    Subtract,
    Intersect,
}

/// One reference from a combination to a child object.
#[derive(Debug, Clone)]
pub struct Member {
    pub op: BoolOp,
    pub name: String,
    /// Instancing transform applied to the child's subtree.
    pub transform: Matrix4,
}

/// A named grouping of members combined with boolean operators.
#[derive(Debug, Clone, Default)]
pub struct Combination {
    /// Material color, normalized [0, 1] channels; inherited by the subtree.
    pub color: Option<[f64; 3]>,
    pub members: Vec<Member>,
}

/// A named object in the database: either a grouping or a leaf primitive.
#[derive(Debug, Clone)]
pub enum Object {
    Combination(Combination),
    Primitive(Primitive),
}

/// An in-memory solid-model database: a title plus named objects.
#[derive(Debug, Default)]
pub struct Database {
    title: String,
    objects: HashMap<String, Object>,
}

impl Database {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens and parses a model file.
    ///
    /// The stored title is truncated to [`TITLE_CAPACITY`] bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let text = std::fs::read_to_string(path).map_err(|source| DatabaseError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses a model database from its text form.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first offending line.
    pub fn parse(text: &str) -> Result<Self, DatabaseError> {
        parse::parse(text)
    }

    /// Returns the model title (possibly empty).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Stores the title, truncated to [`TITLE_CAPACITY`] bytes on a
    /// character boundary.
    pub fn set_title(&mut self, title: &str) {
        let mut end = title.len().min(TITLE_CAPACITY);
        while !title.is_char_boundary(end) {
            end -= 1;
        }
        self.title = title[..end].to_owned();
    }

    /// Looks up an object by name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    /// Returns `true` if an object with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Adds a named object.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken.
    pub fn add_object(&mut self, name: &str, object: Object) -> Result<(), DatabaseError> {
        if self.objects.contains_key(name) {
            return Err(DatabaseError::DuplicateObject(name.to_owned()));
        }
        self.objects.insert(name.to_owned(), object);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    #[test]
    fn set_title_truncates_to_capacity() {
        let mut db = Database::new();
        let long = "x".repeat(TITLE_CAPACITY + 100);
        db.set_title(&long);
        assert_eq!(db.title().len(), TITLE_CAPACITY);
    }

    #[test]
    fn set_title_truncates_on_char_boundary() {
        let mut db = Database::new();
        // Multi-byte character straddling the capacity boundary.
        let mut long = "x".repeat(TITLE_CAPACITY - 1);
        long.push('é');
        long.push_str("tail");
        db.set_title(&long);
        assert!(db.title().len() <= TITLE_CAPACITY);
        assert!(db.title().ends_with('x'));
    }

    #[test]
    fn add_object_rejects_duplicates() {
        let mut db = Database::new();
        let sphere = Object::Primitive(Primitive::Sphere(Sphere {
            center: Point3::origin(),
            radius: 1.0,
        }));
        db.add_object("ball", sphere.clone()).unwrap();
        let err = db.add_object("ball", sphere).unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateObject(_)));
    }

    #[test]
    fn object_lookup() {
        let mut db = Database::new();
        db.add_object(
            "ball",
            Object::Primitive(Primitive::Sphere(Sphere {
                center: Point3::origin(),
                radius: 1.0,
            })),
        )
        .unwrap();
        assert!(db.contains("ball"));
        assert!(db.object("ball").is_some());
        assert!(db.object("missing").is_none());
    }
}
