use log::{debug, trace};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::cells::{MazeCell, WallSide};
use crate::disjoint_sets::DisjointSets;
use crate::units::{ColumnsCount, RowsCount};

/// Chooses which of the remaining candidate walls the generator tries next.
pub trait IndexSource {
    /// An index in the range `0..upper`. `upper` is never zero.
    /// Values outside the range are reduced modulo `upper` by the generator.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Uniformly random indices from any `rand` random number generator.
#[derive(Debug, Clone)]
pub struct RandomIndices<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomIndices<R> {
    pub fn new(rng: R) -> RandomIndices<R> {
        RandomIndices { rng }
    }
}

impl RandomIndices<ThreadRng> {
    pub fn from_thread_rng() -> RandomIndices<ThreadRng> {
        RandomIndices::new(rand::thread_rng())
    }
}

impl RandomIndices<StdRng> {
    /// Reproducible indices: the same seed always draws the same sequence.
    pub fn from_seed(seed: u64) -> RandomIndices<StdRng> {
        RandomIndices::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IndexSource for RandomIndices<R> {
    #[inline]
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// A predetermined sequence of draws, for building an exact maze.
/// Each draw is taken modulo the number of remaining candidates. Once exhausted it always draws 0.
#[derive(Debug, Clone)]
pub struct FixedIndices {
    draws: VecDeque<usize>,
}

impl FixedIndices {
    pub fn new<I: IntoIterator<Item = usize>>(draws: I) -> FixedIndices {
        FixedIndices { draws: draws.into_iter().collect() }
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl IndexSource for FixedIndices {
    fn next_index(&mut self, upper: usize) -> usize {
        self.draws.pop_front().map_or(0, |draw| draw % upper)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallOrientation {
    /// Between a cell and the cell directly above it.
    Top,
    /// Between a cell and the cell directly to its left.
    Left,
}

impl WallOrientation {
    /// The cell's side and the matching side of its neighbour.
    fn sides(self) -> (WallSide, WallSide) {
        match self {
            WallOrientation::Top => (WallSide::Top, WallSide::Bottom),
            WallOrientation::Left => (WallSide::Left, WallSide::Right),
        }
    }
}

/// An interior wall that could be knocked down: an edge of the grid graph.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CandidateWall {
    pub cell_index: usize,
    pub orientation: WallOrientation,
}

impl CandidateWall {
    pub fn new(cell_index: usize, orientation: WallOrientation) -> CandidateWall {
        CandidateWall { cell_index, orientation }
    }

    /// The row major index of the cell on the other side of the wall.
    /// None when the wall is on the grid's top or left boundary.
    pub fn neighbour_index(&self, columns: ColumnsCount) -> Option<usize> {
        match self.orientation {
            WallOrientation::Top => self.cell_index.checked_sub(columns.0),
            WallOrientation::Left => {
                if columns.0 == 0 || self.cell_index % columns.0 == 0 {
                    None
                } else {
                    Some(self.cell_index - 1)
                }
            }
        }
    }
}

/// Every interior wall of a `rows` x `columns` grid, in row major cell order with a cell's top
/// wall before its left wall.
///
/// Only top and left walls are candidates, a bottom or right wall is the same wall seen from the
/// neighbouring cell. Cells in row 0 have no top candidate and cells in column 0 no left candidate.
pub fn inner_walls(rows: RowsCount, columns: ColumnsCount) -> Vec<CandidateWall> {
    let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
    let capacity = rows.saturating_sub(1) * columns + rows * columns.saturating_sub(1);
    let mut walls = Vec::with_capacity(capacity);

    for row in 0..rows {
        for column in 0..columns {
            let cell_index = row * columns + column;
            if row > 0 {
                walls.push(CandidateWall::new(cell_index, WallOrientation::Top));
            }
            if column > 0 {
                walls.push(CandidateWall::new(cell_index, WallOrientation::Left));
            }
        }
    }

    walls
}

/// Apply randomized Kruskal's algorithm to a grid of fully walled cells.
///
/// Candidate walls are drawn one at a time from `walls` using `source` and each is only ever tried
/// once. A wall is knocked down, on both of its sides, only when the cells either side of it are
/// not yet connected, so no loops are ever created. Carving stops as soon as every cell is
/// connected, leaving a perfect maze: exactly one path between any two cells.
///
/// Returns the final partition of the cells, a single set when `walls` held the full grid.
pub fn kruskal<S>(cells: &mut [MazeCell],
                  columns: ColumnsCount,
                  mut walls: Vec<CandidateWall>,
                  source: &mut S)
                  -> DisjointSets
    where S: IndexSource
{
    let mut sets = DisjointSets::new(cells.len());
    debug!("Carving {} cells with {} candidate walls", cells.len(), walls.len());

    let mut trials = 0;
    let mut knocked_down = 0;
    while sets.size() > 1 && !walls.is_empty() {
        let wall_index = source.next_index(walls.len()) % walls.len();
        // order of the remaining candidates does not matter
        let wall = walls.swap_remove(wall_index);
        trials += 1;

        if let Some(neighbour_index) = wall.neighbour_index(columns) {
            if sets.union(wall.cell_index, neighbour_index) {
                let (cell_side, neighbour_side) = wall.orientation.sides();
                cells[wall.cell_index].set_wall(cell_side, false);
                cells[neighbour_index].set_wall(neighbour_side, false);
                knocked_down += 1;
                trace!("Knocked down {:?} wall of cell {}", cell_side, wall.cell_index);
            }
        }
    }

    debug!("Carving done: {} walls knocked down in {} trials, {} set(s) left",
           knocked_down,
           trials,
           sets.size());
    sets
}

#[cfg(test)]
mod tests {

    use super::*;

    fn walled_cells(count: usize) -> Vec<MazeCell> {
        vec![MazeCell::new(); count]
    }

    fn top(cell_index: usize) -> CandidateWall {
        CandidateWall::new(cell_index, WallOrientation::Top)
    }

    fn left(cell_index: usize) -> CandidateWall {
        CandidateWall::new(cell_index, WallOrientation::Left)
    }

    #[test]
    fn inner_walls_exclude_boundaries() {
        let walls = inner_walls(RowsCount(2), ColumnsCount(2));
        assert_eq!(walls, vec![left(1), top(2), top(3), left(3)]);

        let top_count = walls.iter().filter(|w| w.orientation == WallOrientation::Top).count();
        assert_eq!(top_count, 2);
    }

    #[test]
    fn inner_walls_count() {
        assert!(inner_walls(RowsCount(1), ColumnsCount(1)).is_empty());
        assert_eq!(inner_walls(RowsCount(1), ColumnsCount(5)),
                   vec![left(1), left(2), left(3), left(4)]);
        assert_eq!(inner_walls(RowsCount(3), ColumnsCount(1)), vec![top(1), top(2)]);
        // rows * (columns - 1) + (rows - 1) * columns
        assert_eq!(inner_walls(RowsCount(4), ColumnsCount(7)).len(), 4 * 6 + 3 * 7);
    }

    #[test]
    fn neighbour_indices() {
        let columns = ColumnsCount(3);
        assert_eq!(top(4).neighbour_index(columns), Some(1));
        assert_eq!(left(4).neighbour_index(columns), Some(3));
        assert_eq!(top(2).neighbour_index(columns), None);
        assert_eq!(left(3).neighbour_index(columns), None);
        assert_eq!(left(0).neighbour_index(columns), None);
    }

    #[test]
    fn fixed_indices_wrap_and_run_out() {
        let mut draws = FixedIndices::new(vec![1, 7, 2]);
        assert_eq!(draws.remaining(), 3);
        assert_eq!(draws.next_index(4), 1);
        assert_eq!(draws.next_index(4), 3);
        assert_eq!(draws.next_index(4), 2);
        assert_eq!(draws.remaining(), 0);
        assert_eq!(draws.next_index(4), 0);
    }

    #[test]
    fn random_indices_in_range() {
        let mut indices = RandomIndices::from_thread_rng();
        for upper in 1..50 {
            for _ in 0..20 {
                assert!(indices.next_index(upper) < upper);
            }
        }
    }

    #[test]
    fn seeded_indices_repeat() {
        let mut a = RandomIndices::from_seed(42);
        let mut b = RandomIndices::from_seed(42);
        let draws_a: Vec<usize> = (0..100).map(|_| a.next_index(1000)).collect();
        let draws_b: Vec<usize> = (0..100).map(|_| b.next_index(1000)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn first_draw_knocks_down_matching_wall_pair() {
        let mut cells = walled_cells(4);
        let walls = inner_walls(RowsCount(2), ColumnsCount(2));
        let mut draws = FixedIndices::new(vec![0, 0, 0]);
        let mut sets = kruskal(&mut cells, ColumnsCount(2), walls, &mut draws);

        assert_eq!(sets.size(), 1);
        assert!(sets.same_set(0, 3));
        // left(1), then left(3) swapped into slot 0, then top(3)
        assert!(!cells[1].has_left_wall() && !cells[0].has_right_wall());
        assert!(!cells[3].has_left_wall() && !cells[2].has_right_wall());
        assert!(!cells[3].has_top_wall() && !cells[1].has_bottom_wall());
        assert!(cells[2].has_top_wall() && cells[0].has_bottom_wall());
    }

    #[test]
    fn connected_cells_keep_their_wall() {
        // 0 1 2
        // 3 4 5
        let mut cells = walled_cells(6);
        let walls = inner_walls(RowsCount(2), ColumnsCount(3));
        assert_eq!(walls, vec![left(1), left(2), top(3), top(4), left(4), top(5), left(5)]);

        // left(1), top(3), top(4), left(4) is tried with 3 and 4 already connected
        let mut draws = FixedIndices::new(vec![0, 2, 3, 3, 0, 1]);
        let sets = kruskal(&mut cells, ColumnsCount(3), walls, &mut draws);

        assert_eq!(sets.size(), 1);
        assert_eq!(draws.remaining(), 0);
        assert!(cells[4].has_left_wall() && cells[3].has_right_wall());
        assert!(cells[5].has_top_wall() && cells[2].has_bottom_wall());
        assert!(!cells[5].has_left_wall() && !cells[4].has_right_wall());
        assert!(!cells[2].has_left_wall() && !cells[1].has_right_wall());
    }

    #[test]
    fn single_cell_needs_no_carving() {
        let mut cells = walled_cells(1);
        let mut draws = FixedIndices::new(vec![]);
        let sets = kruskal(&mut cells, ColumnsCount(1), vec![], &mut draws);
        assert_eq!(sets.size(), 1);
        assert_eq!(cells[0], MazeCell::new());
    }

    #[test]
    fn boundary_walls_are_never_knocked_down() {
        let mut cells = walled_cells(4);
        let walls = vec![top(0), left(2), top(1)];
        let sets = kruskal(&mut cells, ColumnsCount(2), walls, &mut RandomIndices::from_seed(1));
        assert_eq!(sets.size(), 4);
        assert!(cells.iter().all(|cell| cell.open_sides().is_empty()));
    }
}
