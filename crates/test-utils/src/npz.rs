//! In-memory `.npz` archives, as written by `numpy.savez`.

use std::io::{Cursor, Write};

use bytes::Bytes;
use npyz::{AutoSerialize, WriterBuilder};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds an `.npz` archive of named arrays.
///
/// # Example
///
/// ```
/// use test_utils::{create_test_grid, NpzBuilder};
///
/// let archive = NpzBuilder::new()
///     .array_f32("AirTemperature", 4, 2, create_test_grid(4, 2))
///     .build();
/// assert!(!archive.is_empty());
/// ```
#[derive(Default)]
pub struct NpzBuilder {
    entries: Vec<(String, Vec<u8>)>,
    compressed: bool,
}

impl NpzBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deflate entries, like `numpy.savez_compressed`.
    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    /// Add a `[height, width]` float32 array.
    pub fn array_f32(self, name: &str, width: usize, height: usize, data: Vec<f32>) -> Self {
        self.array(name, &[height as u64, width as u64], data)
    }

    /// Add a `[height, width]` float64 array.
    pub fn array_f64(self, name: &str, width: usize, height: usize, data: Vec<f64>) -> Self {
        self.array(name, &[height as u64, width as u64], data)
    }

    /// Add a one-dimensional float32 array.
    pub fn array_1d_f32(self, name: &str, data: Vec<f32>) -> Self {
        let len = data.len() as u64;
        self.array(name, &[len], data)
    }

    fn array<T: AutoSerialize>(mut self, name: &str, shape: &[u64], data: Vec<T>) -> Self {
        let expected: u64 = shape.iter().product();
        assert_eq!(
            expected,
            data.len() as u64,
            "array {} has {} values for shape {:?}",
            name,
            data.len(),
            shape
        );

        let mut npy = Vec::new();
        {
            let mut writer = npyz::WriteOptions::<T>::new()
                .default_dtype()
                .shape(shape)
                .writer(&mut npy)
                .begin_nd()
                .expect("failed to start npy writer");
            writer.extend(data).expect("failed to write npy data");
            writer.finish().expect("failed to finish npy");
        }

        self.entries.push((format!("{}.npy", name), npy));
        self
    }

    /// Finish the archive.
    pub fn build(self) -> Bytes {
        let method = if self.compressed {
            CompressionMethod::Deflated
        } else {
            CompressionMethod::Stored
        };
        let options = FileOptions::default().compression_method(method);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (file_name, npy) in &self.entries {
            zip.start_file(file_name.as_str(), options)
                .expect("failed to start zip entry");
            zip.write_all(npy).expect("failed to write zip entry");
        }

        let cursor = zip.finish().expect("failed to finish zip");
        Bytes::from(cursor.into_inner())
    }
}
