use thiserror::Error;

/// Top-level error type for the filigree wireframe extractor.
#[derive(Debug, Error)]
pub enum FiligreeError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors opening or parsing a model database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to read model file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("duplicate object name: {0}")]
    DuplicateObject(String),
}

/// Errors converting a primitive into its polyline representation.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("no wireframe representation for {0}")]
    Unsupported(String),
}

/// Errors from tree expansion.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("none of the requested objects exist in the database")]
    NoObjects,
}

/// Convenience type alias for results using [`FiligreeError`].
pub type Result<T> = std::result::Result<T, FiligreeError>;
