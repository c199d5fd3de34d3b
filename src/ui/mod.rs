pub mod grid_view;
pub mod summary;
pub mod theme;
