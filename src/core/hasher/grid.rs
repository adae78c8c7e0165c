//! The fixed 9x8 downsample grid.

use crate::error::HashError;

/// Grid columns; one more than the comparisons per row
pub const GRID_WIDTH: usize = 9;

/// Grid rows
pub const GRID_HEIGHT: usize = 8;

/// Averaged luminance of a 9-wide, 8-tall grid of image regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownsampleGrid {
    cells: [[u32; GRID_WIDTH]; GRID_HEIGHT],
}

impl DownsampleGrid {
    /// Create a grid from rows of cells
    pub fn new(cells: [[u32; GRID_WIDTH]; GRID_HEIGHT]) -> Self {
        Self { cells }
    }

    /// Build a grid from 72 values in row-major order.
    ///
    /// Extra values are ignored; missing values are left at zero.
    pub fn from_row_major(values: impl IntoIterator<Item = u32>) -> Self {
        let mut cells = [[0u32; GRID_WIDTH]; GRID_HEIGHT];
        for (index, value) in values.into_iter().take(GRID_WIDTH * GRID_HEIGHT).enumerate() {
            cells[index / GRID_WIDTH][index % GRID_WIDTH] = value;
        }
        Self { cells }
    }

    /// Value of cell `(x, y)`; panics outside the grid
    pub fn cell(&self, x: usize, y: usize) -> u32 {
        self.cells[y][x]
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[[u32; GRID_WIDTH]; GRID_HEIGHT] {
        &self.cells
    }
}

/// Reject images that cannot fill every grid cell with at least one pixel
pub fn check_dimensions(width: u32, height: u32) -> Result<(), HashError> {
    if (width as usize) < GRID_WIDTH || (height as usize) < GRID_HEIGHT {
        return Err(HashError::ImageTooSmall { width, height });
    }
    Ok(())
}
