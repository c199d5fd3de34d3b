use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reformatting or inspecting a puzzle set.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("puzzle root {0:?} is not a readable directory")]
    RootUnreadable(PathBuf, #[source] std::io::Error),

    #[error("source file {0:?} not found")]
    SourceMissing(PathBuf),

    #[error("output directory {0:?} does not exist")]
    OutputDirMissing(PathBuf),

    #[error("puzzle set {set:?} is empty")]
    EmptyPuzzleSet { set: String },

    /// First line trims to nothing, so no grid size can be derived.
    #[error("puzzle set {set:?} has an empty first line")]
    ZeroChunkSize { set: String },

    #[error("puzzle set {set:?}: line {line} has length {actual}, expected {expected}")]
    RaggedPuzzleSet {
        set: String,
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("malformed grid: {cells} cells cannot fill a {size}x{size} grid")]
    MalformedGrid { size: usize, cells: usize },

    #[error("no solver for a {size}x{size} grid (sizes 4, 9, 16 and 25 are supported)")]
    UnsupportedGridSize { size: usize },

    #[error("symbol {symbol:?} at row {row}, column {col} is not a value for this grid")]
    InvalidSymbol { symbol: char, row: usize, col: usize },

    #[error("puzzle has no solution")]
    Unsolvable,

    #[error("invalid set filter {0:?}")]
    InvalidFilter(String, #[source] glob::PatternError),

    #[error("I/O error on {0:?}")]
    Io(PathBuf, #[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
