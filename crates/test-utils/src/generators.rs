//! Test data generators for creating synthetic raster data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite. All grids are row-major.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that data is being reoriented correctly
/// by checking that grid[row][col] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a test grid with temperature-like values in Kelvin.
///
/// The values range from approximately 250K (-23C) to 310K (37C),
/// creating a gradient from cold (top-left) to warm (bottom-right).
pub fn create_temperature_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x_factor = col as f32 / width.max(1) as f32;
            let y_factor = row as f32 / height.max(1) as f32;
            let temp = 250.0 + (x_factor * 30.0) + (y_factor * 30.0);
            data.push(temp);
        }
    }
    data
}

/// No-data marker in sea-ice fraction files.
pub const ICE_NO_DATA: i8 = -128;

/// Creates a valid sea-ice fraction grid.
///
/// Every fifth cell is no-data (`-128`); the rest cycle through 0..=100.
pub fn create_ice_fraction_grid(width: usize, height: usize) -> Vec<i8> {
    (0..width * height)
        .map(|i| {
            if i % 5 == 0 {
                ICE_NO_DATA
            } else {
                (i % 101) as i8
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid() {
        let grid = create_test_grid(10, 5);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[9], 9000.0);
        assert_eq!(grid[49], 9004.0);
    }

    #[test]
    fn test_create_temperature_grid_range() {
        let grid = create_temperature_grid(100, 50);
        assert!(grid.iter().all(|&t| (250.0..=310.0).contains(&t)));
    }

    #[test]
    fn test_create_ice_fraction_grid_values_are_valid() {
        let grid = create_ice_fraction_grid(37, 11);
        assert_eq!(grid.len(), 37 * 11);
        assert!(grid
            .iter()
            .all(|&v| v == ICE_NO_DATA || (0..=100).contains(&v)));
        assert_eq!(grid[0], ICE_NO_DATA);
    }
}
