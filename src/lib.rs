//! **kruskal_mazes** generates perfect mazes on rectangular grids with randomized Kruskal's
//! algorithm and exposes the walls of every cell to whatever draws or walks the maze.

pub mod cells;
pub mod disjoint_sets;
pub mod errors;
pub mod generators;
pub mod maze;
pub mod units;
