/// Flat cell addressing: `index = row * width + col`.
///
/// Indices are signed because shots leave the grid through the top,
/// i.e. through negative indices.
pub type CellIndex = i32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Grid { width, height }
    }

    #[inline]
    pub fn index(&self, col: i32, row: i32) -> CellIndex {
        row * self.width + col
    }

    #[inline]
    pub fn column(&self, index: CellIndex) -> i32 {
        index % self.width
    }

    #[inline]
    pub fn row(&self, index: CellIndex) -> i32 {
        index / self.width
    }

    /// One past the last valid index.
    #[inline]
    pub fn cell_count(&self) -> CellIndex {
        self.width * self.height
    }

    pub fn bottom_row(&self) -> i32 {
        self.height - 1
    }
}
