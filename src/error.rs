use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the spiral callbacks and their tooling.
#[derive(Debug, Error)]
pub enum SpiralError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Callback(#[from] CallbackError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while registering or invoking named callbacks.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("function {0} is already registered")]
    Duplicate(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("function {name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },
}

/// Errors related to curve sampling.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised while loading solver output files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("missing input {path}: {source}")]
    MissingInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}:{line}: cannot parse {token:?} as a number")]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{path}:{line}: expected {expected} column(s), found {found}")]
    Ragged {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}: expected a single column, found {found}")]
    NotAColumn { path: PathBuf, found: usize },

    #[error("{0}: no numeric data")]
    Empty(PathBuf),

    #[error("sample count mismatch: {x} x value(s) but {y} y value(s)")]
    LengthMismatch { x: usize, y: usize },
}

/// Errors raised by the plot renderer.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot")]
    NoData,

    #[error("rendering failed: {0}")]
    Backend(String),
}

/// Convenience type alias for results using [`SpiralError`].
pub type Result<T> = std::result::Result<T, SpiralError>;
