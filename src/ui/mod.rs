//! Text front-end pieces used by the binary

pub mod tiles;
pub mod viewer;

pub use tiles::{render_grid, EMPTY_STATE};
pub use viewer::ViewRequest;
