//! Row-major 2-D grid.

use crate::error::{RasterError, RasterResult};

/// A 2-D grid of samples stored row by row (row 0 first).
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Raster<T> {
    /// Create a raster, checking that `data` holds exactly `width * height` samples.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> RasterResult<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            RasterError::InvalidShape(format!("{}x{} overflows", height, width))
        })?;

        if data.len() != expected {
            return Err(RasterError::InvalidShape(format!(
                "{} samples for a {}x{} grid",
                data.len(),
                height,
                width
            )));
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a raster from an array shape as stored by NumPy/HDF5 (`[rows, cols]`).
    pub fn from_shape(shape: &[usize], data: Vec<T>) -> RasterResult<Self> {
        match shape {
            [height, width] => Self::new(data, *width, *height),
            other => Err(RasterError::InvalidShape(format!(
                "expected 2 dimensions, got {}",
                other.len()
            ))),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)`, the NumPy shape convention.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn row(&self, index: usize) -> Option<&[T]> {
        if index >= self.height {
            return None;
        }
        let start = index * self.width;
        Some(&self.data[start..start + self.width])
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[T]> {
        // chunks_exact(0) panics; an empty-width grid has no samples anyway
        self.data.chunks_exact(self.width.max(1))
    }

    /// Same shape, new samples. Rows are copied whole by every caller.
    pub(crate) fn with_data<U>(&self, data: Vec<U>) -> Raster<U> {
        debug_assert_eq!(data.len(), self.data.len());
        Raster {
            data,
            width: self.width,
            height: self.height,
        }
    }

    /// Apply `f` to every sample, keeping the shape.
    pub fn map<U, F>(&self, f: F) -> Raster<U>
    where
        F: FnMut(&T) -> U,
    {
        Raster {
            data: self.data.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}
