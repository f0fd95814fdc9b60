//! Listing manifest and outbound transfer notification.

use serde::{Deserialize, Serialize};

use crate::time::{serde_timestamp, Timestamp};

/// Raster keys produced for one forecast file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastTiffFiles {
    pub air_pressure: String,
    pub air_temperature: String,
    /// Unset when the archive carried no visibility array.
    pub visibility: Option<String>,
    #[serde(with = "serde_timestamp")]
    pub date: Timestamp,
}

/// Index of every raster written for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub sea_temperature: String,
    pub forecast: Vec<ForecastTiffFiles>,
}

impl Listing {
    pub fn new(sea_temperature: impl Into<String>) -> Self {
        Self {
            sea_temperature: sea_temperature.into(),
            forecast: Vec::new(),
        }
    }

    pub fn push(&mut self, files: ForecastTiffFiles) {
        self.forecast.push(files);
    }

    /// Serialize to the wire form written to the blob store.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Kind of object announced downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// A weather listing manifest
    Tiff,
    /// A single ice raster
    Ice,
}

/// Message published once a run's objects are in the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMessage {
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub bucket_name: String,
    pub blob_file: String,
}

impl TransferMessage {
    pub fn new(kind: TransferKind, bucket_name: impl Into<String>, blob_file: impl Into<String>) -> Self {
        Self {
            kind,
            bucket_name: bucket_name.into(),
            blob_file: blob_file.into(),
        }
    }
}
