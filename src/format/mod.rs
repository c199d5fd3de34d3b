pub mod chunker;
pub mod puzzle_set;
pub mod reformatter;
pub mod report;
pub mod verify;
pub mod walker;
