use bit_set::BitSet;
use error_chain::bail;
use log::debug;
use smallvec::SmallVec;
use std::fmt;
use std::slice;

use crate::cells::{MazeCell, WallSide};
use crate::errors::*;
use crate::generators::{self, IndexSource, RandomIndices};
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

pub type IndexSmallVec = SmallVec<[usize; 4]>;

/// A perfect maze over a rectangular grid of cells.
///
/// The maze is carved once, when it is built, and is read only afterwards. Cells are stored in row
/// major order: the cell at `(row, column)` has index `row * columns + column`. Row 0 is the top
/// row. The start cell is always the first cell and the end cell the last.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Maze {
    rows: RowsCount,
    columns: ColumnsCount,
    cells: Vec<MazeCell>,
}

impl Maze {
    /// Carve a new maze using the thread local random number generator.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Maze> {
        Maze::with_index_source(rows, columns, &mut RandomIndices::from_thread_rng())
    }

    /// Carve a maze that is the same every time for the same seed and dimensions.
    pub fn from_seed(rows: RowsCount, columns: ColumnsCount, seed: u64) -> Result<Maze> {
        Maze::with_index_source(rows, columns, &mut RandomIndices::from_seed(seed))
    }

    /// Carve a maze choosing the next wall to try with `source`.
    ///
    /// Fails if either dimension is zero or the grid is too large to index.
    pub fn with_index_source<S>(rows: RowsCount, columns: ColumnsCount, source: &mut S) -> Result<Maze>
        where S: IndexSource
    {
        let size = checked_size(rows, columns)?;
        debug!("Generating {} x {} maze", rows.0, columns.0);

        let mut cells = vec![MazeCell::new(); size];
        let walls = generators::inner_walls(rows, columns);
        let _ = generators::kruskal(&mut cells, columns, walls, source);

        // A 1x1 maze has both tags on the same cell
        cells[size - 1].set_as_end_cell(true);
        cells[0].set_as_start_cell(true);

        Ok(Maze { rows, columns, cells })
    }

    #[inline]
    pub fn dimensions(&self) -> (RowsCount, ColumnsCount) {
        (self.rows, self.columns)
    }

    /// The number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn start_index(&self) -> usize {
        0
    }

    #[inline]
    pub fn end_index(&self) -> usize {
        self.cells.len() - 1
    }

    /// Returns None if the row or column is outside the maze.
    pub fn cell_at(&self, row: RowIndex, column: ColumnIndex) -> Option<&MazeCell> {
        self.index_of(row, column).map(|index| &self.cells[index])
    }

    /// The cell with the given row major index, None if out of range.
    #[inline]
    pub fn cell(&self, index: usize) -> Option<&MazeCell> {
        self.cells.get(index)
    }

    /// Convert a row and column to a row major index. Returns None if outside the maze.
    pub fn index_of(&self, row: RowIndex, column: ColumnIndex) -> Option<usize> {
        if row.0 >= self.rows.0 || column.0 >= self.columns.0 {
            None
        } else {
            Some(row.0 * self.columns.0 + column.0)
        }
    }

    pub fn row_column_of(&self, index: usize) -> Option<(RowIndex, ColumnIndex)> {
        if index < self.cells.len() {
            Some((RowIndex(index / self.columns.0), ColumnIndex(index % self.columns.0)))
        } else {
            None
        }
    }

    /// Iterate the cells in row major order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, MazeCell> {
        self.cells.iter()
    }

    /// The index of the cell adjacent to `index` on the given side, whether or not there is a
    /// wall between them. None at the edge of the maze.
    pub fn neighbour_index(&self, index: usize, side: WallSide) -> Option<usize> {
        let (RowIndex(row), ColumnIndex(column)) = self.row_column_of(index)?;
        match side {
            WallSide::Top if row > 0 => Some(index - self.columns.0),
            WallSide::Bottom if row + 1 < self.rows.0 => Some(index + self.columns.0),
            WallSide::Left if column > 0 => Some(index - 1),
            WallSide::Right if column + 1 < self.columns.0 => Some(index + 1),
            _ => None,
        }
    }

    /// Cells that can be walked to in one step from the cell at `index`.
    pub fn open_neighbours(&self, index: usize) -> Option<IndexSmallVec> {
        let cell = self.cells.get(index)?;
        let neighbours = cell.open_sides()
            .iter()
            .filter_map(|side| self.neighbour_index(index, *side))
            .collect();
        Some(neighbours)
    }

    /// Every knocked down wall as a pair of cell indices, lower index first.
    /// A perfect maze has exactly `size() - 1` passages.
    pub fn passages(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(index, cell)| {
            let above = if cell.has_top_wall() {
                None
            } else {
                self.neighbour_index(index, WallSide::Top)
            };
            let left = if cell.has_left_wall() {
                None
            } else {
                self.neighbour_index(index, WallSide::Left)
            };
            above.into_iter().chain(left).map(move |neighbour| (neighbour, index))
        })
    }

    /// The set of cell indices reachable from `index` without crossing a wall.
    /// Returns None if the index is out of range.
    pub fn reachable_from(&self, index: usize) -> Option<BitSet> {
        if index >= self.cells.len() {
            return None;
        }

        let mut visited = BitSet::with_capacity(self.cells.len());
        visited.insert(index);

        // Every step costs the same so a plain frontier flood fill is enough.
        let mut frontier = vec![index];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_index in &frontier {
                let neighbours = self.open_neighbours(*cell_index)
                    .expect("Frontier holds only valid cell indices");
                for neighbour in neighbours {
                    if visited.insert(neighbour) {
                        new_frontier.push(neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(visited)
    }

    /// Does every knocked down wall have its mirror knocked down, is every cell reachable and are
    /// there no loops?
    pub fn is_perfect(&self) -> bool {
        let symmetric = (0..self.cells.len()).all(|index| {
            self.cells[index].open_sides().iter().all(|side| {
                self.neighbour_index(index, *side)
                    .map_or(false, |n| !self.cells[n].has_wall(side.opposite()))
            })
        });
        let all_reachable = self.reachable_from(self.start_index())
            .map_or(false, |reached| reached.len() == self.cells.len());

        symmetric && all_reachable && self.passages().count() == self.cells.len() - 1
    }
}

fn checked_size(rows: RowsCount, columns: ColumnsCount) -> Result<usize> {
    let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
    match r.checked_mul(c) {
        // cell indices must also fit the signed disjoint set slots
        Some(size) if size > 0 && size <= isize::MAX as usize => Ok(size),
        _ => bail!(ErrorKind::InvalidDimensions(r, c)),
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const WALL_UD: &str = "|";
        const OPEN_3: &str = "   ";
        const OPEN: &str = " ";

        let columns = self.columns.0;

        // The north most boundary; after that each row draws its own south boundary
        let mut output = String::from(CORNER);
        for cell in &self.cells[..columns] {
            output.push_str(if cell.has_top_wall() { WALL_LR_3 } else { OPEN_3 });
            output.push_str(CORNER);
        }
        output.push('\n');

        for row in self.cells.chunks(columns) {
            let mut middle = String::from(if row[0].has_left_wall() { WALL_UD } else { OPEN });
            let mut bottom = String::from(CORNER);

            for cell in row {
                let body = match (cell.is_start_cell(), cell.is_end_cell()) {
                    (true, true) => "S E",
                    (true, false) => " S ",
                    (false, true) => " E ",
                    (false, false) => OPEN_3,
                };
                middle.push_str(body);
                middle.push_str(if cell.has_right_wall() { WALL_UD } else { OPEN });

                bottom.push_str(if cell.has_bottom_wall() { WALL_LR_3 } else { OPEN_3 });
                bottom.push_str(CORNER);
            }

            output.push_str(&middle);
            output.push('\n');
            output.push_str(&bottom);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
