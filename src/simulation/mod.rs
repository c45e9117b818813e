mod direction;
mod grid;
pub mod rules;

pub use direction::{Direction, DirectionControl};
pub use grid::Grid;
