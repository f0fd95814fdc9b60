//! Grid reorientation.
//!
//! Model grids start at longitude 0° with the southernmost row first. Image
//! rows run north to south from -180°. `roll_and_flipud` moves the
//! antimeridian to the left edge and puts north on top.

use crate::grid::Raster;

/// Roll columns right by `width / 2`, then reverse the row order.
pub fn roll_and_flipud<T: Copy>(raster: &Raster<T>) -> Raster<T> {
    let width = raster.width();
    let shift = width / 2;
    let mut data = Vec::with_capacity(raster.data().len());

    for row in raster.rows().rev() {
        // out[shift + k] = row[k]
        data.extend_from_slice(&row[width - shift..]);
        data.extend_from_slice(&row[..width - shift]);
    }

    raster.with_data(data)
}

/// Reverse the row order only.
pub fn flipud<T: Copy>(raster: &Raster<T>) -> Raster<T> {
    let mut data = Vec::with_capacity(raster.data().len());
    for row in raster.rows().rev() {
        data.extend_from_slice(row);
    }
    raster.with_data(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize) -> Raster<i32> {
        let data = (0..(width * height) as i32).collect();
        Raster::new(data, width, height).unwrap()
    }

    #[test]
    fn test_roll_and_flipud_small() {
        // [[0, 1, 2, 3],
        //  [4, 5, 6, 7]]
        let out = roll_and_flipud(&grid(4, 2));
        assert_eq!(out.data(), &[6, 7, 4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_roll_odd_width() {
        // roll by 5 // 2 = 2
        let out = roll_and_flipud(&grid(5, 1));
        assert_eq!(out.data(), &[3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_flipud() {
        let out = flipud(&grid(2, 3));
        assert_eq!(out.data(), &[4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_single_column_is_only_flipped() {
        let out = roll_and_flipud(&grid(1, 3));
        assert_eq!(out.data(), &[2, 1, 0]);
    }

    #[test]
    fn test_empty_raster() {
        let empty: Raster<f32> = Raster::new(Vec::new(), 0, 0).unwrap();
        assert_eq!(roll_and_flipud(&empty).shape(), (0, 0));
        assert_eq!(flipud(&empty).shape(), (0, 0));
    }
}
