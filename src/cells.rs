use smallvec::SmallVec;

/// One of the four walls around a grid cell.
/// Top is towards row 0, left is towards column 0.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
}

pub const ALL_SIDES: [WallSide; 4] = [WallSide::Top, WallSide::Bottom, WallSide::Left, WallSide::Right];

impl WallSide {
    /// The wall the adjacent cell sees on the other side of this one.
    pub fn opposite(self) -> WallSide {
        match self {
            WallSide::Top => WallSide::Bottom,
            WallSide::Bottom => WallSide::Top,
            WallSide::Left => WallSide::Right,
            WallSide::Right => WallSide::Left,
        }
    }
}

pub type SideSmallVec = SmallVec<[WallSide; 4]>;

/// A single maze grid cell: which walls surround it and whether it is the start or end point.
///
/// Cells are created fully walled in. Walls are only knocked down while a maze is generated,
/// afterwards consumers only get shared references.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeCell {
    top_wall: bool,
    bottom_wall: bool,
    left_wall: bool,
    right_wall: bool,
    start_cell: bool,
    end_cell: bool,
}

impl Default for MazeCell {
    fn default() -> MazeCell {
        MazeCell {
            top_wall: true,
            bottom_wall: true,
            left_wall: true,
            right_wall: true,
            start_cell: false,
            end_cell: false,
        }
    }
}

impl MazeCell {
    pub fn new() -> MazeCell {
        MazeCell::default()
    }

    #[inline]
    pub fn has_top_wall(&self) -> bool {
        self.top_wall
    }

    #[inline]
    pub fn has_bottom_wall(&self) -> bool {
        self.bottom_wall
    }

    #[inline]
    pub fn has_left_wall(&self) -> bool {
        self.left_wall
    }

    #[inline]
    pub fn has_right_wall(&self) -> bool {
        self.right_wall
    }

    #[inline]
    pub fn is_start_cell(&self) -> bool {
        self.start_cell
    }

    #[inline]
    pub fn is_end_cell(&self) -> bool {
        self.end_cell
    }

    pub fn has_wall(&self, side: WallSide) -> bool {
        match side {
            WallSide::Top => self.top_wall,
            WallSide::Bottom => self.bottom_wall,
            WallSide::Left => self.left_wall,
            WallSide::Right => self.right_wall,
        }
    }

    /// The sides of this cell with no wall, in `ALL_SIDES` order.
    pub fn open_sides(&self) -> SideSmallVec {
        ALL_SIDES.iter()
            .cloned()
            .filter(|side| !self.has_wall(*side))
            .collect()
    }

    pub(crate) fn set_wall(&mut self, side: WallSide, has_wall: bool) {
        match side {
            WallSide::Top => self.top_wall = has_wall,
            WallSide::Bottom => self.bottom_wall = has_wall,
            WallSide::Left => self.left_wall = has_wall,
            WallSide::Right => self.right_wall = has_wall,
        }
    }

    pub(crate) fn set_as_start_cell(&mut self, start_cell: bool) {
        self.start_cell = start_cell;
    }

    pub(crate) fn set_as_end_cell(&mut self, end_cell: bool) {
        self.end_cell = end_cell;
    }
}
