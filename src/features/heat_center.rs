//! Hot-spot locator: argmax over the thermal grid.

use crate::types::ThermalGrid;

/// Return the zero-based (row, col) of the hottest grid cell.
///
/// Ties resolve to the first maximum in row-major scan order. This
/// tie-break is deterministic and relied upon by regression tests —
/// do not change the scan order.
pub fn heat_center(grid: &ThermalGrid) -> (usize, usize) {
    let mut best = (0usize, 0usize);
    let mut best_temp = grid[0][0];
    for (row, cells) in grid.iter().enumerate() {
        for (col, &temp) in cells.iter().enumerate() {
            if temp > best_temp {
                best_temp = temp;
                best = (row, col);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRID_DIM;

    #[test]
    fn test_locates_single_maximum() {
        let mut grid = [[22.0; GRID_DIM]; GRID_DIM];
        grid[5][3] = 36.0;
        assert_eq!(heat_center(&grid), (5, 3));
    }

    #[test]
    fn test_tie_resolves_row_major_first() {
        let mut grid = [[22.0; GRID_DIM]; GRID_DIM];
        grid[2][6] = 36.0;
        grid[4][1] = 36.0;
        assert_eq!(heat_center(&grid), (2, 6));
    }

    #[test]
    fn test_uniform_grid_returns_origin() {
        let grid = [[24.0; GRID_DIM]; GRID_DIM];
        assert_eq!(heat_center(&grid), (0, 0));
    }

    #[test]
    fn test_idempotent() {
        let mut grid = [[22.0; GRID_DIM]; GRID_DIM];
        grid[7][7] = 40.0;
        assert_eq!(heat_center(&grid), heat_center(&grid));
    }
}
