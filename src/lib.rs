pub mod aggregate;
pub mod emit;
pub mod error;
pub mod geometry;
pub mod math;
pub mod model;
pub mod walk;
pub mod wireframe;

pub use error::{FiligreeError, Result};
