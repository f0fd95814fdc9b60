//! Deterministic blob-store keys.
//!
//! Layout:
//! - `v2/{analysis}/{parameter}{forecast}.tif` per-parameter weather raster
//! - `v2/ice/{release}.tif` ice raster
//! - `v2/list-{analysis}.json` latest listing (pruned)
//! - `v2/listings/list-{analysis}.json` historic listing (kept)
//!
//! Hour stamps are `YYYYMMDDHH`, day stamps `YYYYMMDD`. Zero padding makes
//! lexicographic key order chronological.

use std::fmt;

use crate::time::{day_stamp, hour_stamp, Timestamp};

/// Key prefix shared by all latest listings.
pub const LATEST_LISTING_PREFIX: &str = "v2/list-";

/// Weather parameters written as rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherParameter {
    SeaTemperature,
    AirPressure,
    AirTemperature,
    Visibility,
}

impl WeatherParameter {
    /// Name used in object keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherParameter::SeaTemperature => "seaTemperature",
            WeatherParameter::AirPressure => "airPressure",
            WeatherParameter::AirTemperature => "airTemperature",
            WeatherParameter::Visibility => "visibility",
        }
    }

    /// Name of the array holding this parameter in a forecast archive.
    pub fn array_name(&self) -> &'static str {
        match self {
            WeatherParameter::SeaTemperature => "SeaSurfaceTemperature",
            WeatherParameter::AirPressure => "SeaSurfacePressure",
            WeatherParameter::AirTemperature => "AirTemperature",
            WeatherParameter::Visibility => "Visibility",
        }
    }
}

impl fmt::Display for WeatherParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn weather_key(
    analysis_date: &Timestamp,
    forecast_date: &Timestamp,
    parameter: WeatherParameter,
) -> String {
    format!(
        "v2/{}/{}{}.tif",
        hour_stamp(analysis_date),
        parameter,
        hour_stamp(forecast_date)
    )
}

pub fn ice_key(release_date: &Timestamp) -> String {
    format!("v2/ice/{}.tif", day_stamp(release_date))
}

pub fn latest_listing_key(analysis_date: &Timestamp) -> String {
    format!("{}{}.json", LATEST_LISTING_PREFIX, hour_stamp(analysis_date))
}

pub fn historic_listing_key(analysis_date: &Timestamp) -> String {
    format!("v2/listings/list-{}.json", hour_stamp(analysis_date))
}
