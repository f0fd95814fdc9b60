//! Payload schemas carried in record bodies.

use serde::{Deserialize, Serialize};

use crate::error::CommonResult;
use crate::time::{serde_timestamp, Timestamp};

/// Response of the weather service's `/forecast` endpoint.
///
/// The weather service emits snake_case field names; TitleCase aliases are
/// accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(alias = "Files")]
    pub files: Vec<ForecastFile>,

    #[serde(
        alias = "NearestAnalysisDateRelativeToRequestedDate",
        with = "serde_timestamp"
    )]
    pub nearest_analysis_date_relative_to_requested_date: Timestamp,
}

/// One forecast archive in a [`ForecastResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastFile {
    #[serde(alias = "FileName", default)]
    pub file_name: String,

    #[serde(alias = "Url")]
    pub url: String,

    #[serde(alias = "RequestedForecastDate", with = "serde_timestamp")]
    pub requested_forecast_date: Timestamp,

    #[serde(alias = "ResponseAnalysisDate", with = "serde_timestamp")]
    pub response_analysis_date: Timestamp,

    #[serde(alias = "ResponseForecastDate", with = "serde_timestamp")]
    pub response_forecast_date: Timestamp,
}

impl ForecastResponse {
    pub fn from_json(body: &str) -> CommonResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Model run the whole response belongs to.
    pub fn analysis_date(&self) -> &Timestamp {
        &self.nearest_analysis_date_relative_to_requested_date
    }
}

/// Notification that a new sea-ice fraction file is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IceDataEvent {
    #[serde(alias = "ice_url")]
    pub ice_url: String,

    #[serde(alias = "ice_release", with = "serde_timestamp")]
    pub ice_release: Timestamp,
}

impl IceDataEvent {
    pub fn from_json(body: &str) -> CommonResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}
