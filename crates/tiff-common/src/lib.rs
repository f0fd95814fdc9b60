//! Common types shared across the TIFF generation pipeline crates.

pub mod error;
pub mod event;
pub mod forecast;
pub mod keys;
pub mod listing;
pub mod time;

pub use error::{CommonError, CommonResult};
pub use event::{EventKind, SnsEvent, SnsMessage, SnsMessageAttribute, SnsRecord};
pub use forecast::{ForecastFile, ForecastResponse, IceDataEvent};
pub use keys::{
    historic_listing_key, ice_key, latest_listing_key, weather_key, WeatherParameter,
    LATEST_LISTING_PREFIX,
};
pub use listing::{ForecastTiffFiles, Listing, TransferKind, TransferMessage};
pub use time::{format_timestamp, parse_timestamp, Timestamp};
