//! **mazes** generates perfect mazes on a grid of walls and passages and finds the shortest route
//! through them.
//!
//! `generators` carves a maze with a randomized depth first backtracker and marks its entrance and
//! exit, `pathing` runs a breadth first search between any two cells. The display and renderer
//! modules draw a grid, with or without a route, as text or as an image.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;
