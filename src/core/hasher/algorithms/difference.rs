//! Difference Hash (dHash) bit encoding.
//!
//! dHash works by:
//! 1. Reducing the image to a 9x8 grid of luminance values
//! 2. Comparing each cell to the one to its right
//! 3. If left cell is brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes. The last grid
//! column only ever appears as a right-hand neighbour.

use super::super::fingerprint::Fingerprint;
use super::super::grid::{DownsampleGrid, GRID_HEIGHT, GRID_WIDTH};

/// Pack the 64 horizontal comparisons of `grid` into a fingerprint.
///
/// Bit `y * 8 + x` is set iff cell `(x, y)` is strictly greater than
/// cell `(x + 1, y)`.
pub fn encode(grid: &DownsampleGrid) -> Fingerprint {
    let mut bits: u64 = 0;

    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH - 1 {
            if grid.cell(x, y) > grid.cell(x + 1, y) {
                bits |= 1 << (y * (GRID_WIDTH - 1) + x);
            }
        }
    }

    Fingerprint::new(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_row_packs_low_byte_0xaa() {
        let mut cells = [[0u32; GRID_WIDTH]; GRID_HEIGHT];
        cells[0] = [10, 20, 10, 20, 10, 20, 10, 20, 10];
        let hash = encode(&DownsampleGrid::new(cells));

        let bits: Vec<bool> = (0..8).map(|i| hash.bit(i)).collect();
        assert_eq!(bits, [false, true, false, true, false, true, false, true]);
        assert_eq!(hash.value(), 0b1010_1010);
    }

    #[test]
    fn decreasing_row_sets_every_bit_in_row() {
        let mut cells = [[0u32; GRID_WIDTH]; GRID_HEIGHT];
        cells[0] = [90, 80, 70, 60, 50, 40, 30, 20, 10];
        let hash = encode(&DownsampleGrid::new(cells));
        assert_eq!(hash.value(), 0xFF);
    }

    #[test]
    fn left_greater_than_right_sets_bit() {
        let mut cells = [[0u32; GRID_WIDTH]; GRID_HEIGHT];
        cells[0] = [20, 10, 20, 10, 20, 10, 20, 10, 20];
        let hash = encode(&DownsampleGrid::new(cells));

        let bits: Vec<bool> = (0..8).map(|i| hash.bit(i)).collect();
        assert_eq!(bits, [true, false, true, false, true, false, true, false]);
    }

    #[test]
    fn equal_neighbours_leave_bit_clear() {
        let grid = DownsampleGrid::new([[7; GRID_WIDTH]; GRID_HEIGHT]);
        assert_eq!(encode(&grid).value(), 0);
    }

    #[test]
    fn rows_map_to_consecutive_bytes() {
        let mut cells = [[0u32; GRID_WIDTH]; GRID_HEIGHT];
        // Only cell (0, 7) is brighter than its right neighbour
        cells[7][0] = 1;
        let hash = encode(&DownsampleGrid::new(cells));
        assert_eq!(hash.value(), 1 << 56);
    }

    #[test]
    fn last_column_only_compared_as_right_neighbour() {
        let mut cells = [[0u32; GRID_WIDTH]; GRID_HEIGHT];
        cells[3][8] = 100;
        // Cell (7, 3) is now dimmer than its neighbour; nothing is brighter
        assert_eq!(encode(&DownsampleGrid::new(cells)).value(), 0);

        cells[3][7] = 200;
        assert_eq!(encode(&DownsampleGrid::new(cells)).value(), 1 << 31);
    }
}
