//! Timestamp handling for forecast and ice events.
//!
//! Upstream producers are not consistent about offsets: the weather service
//! emits naive ISO 8601 timestamps while the ice notifier may include one.
//! Both are accepted here. Naive values are taken as UTC, and offset values
//! keep their offset so that formatted keys use the producer's wall-clock.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::{CommonError, CommonResult};

/// Timestamp type carried by every wire model.
pub type Timestamp = DateTime<FixedOffset>;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp in RFC 3339 or naive ISO 8601 form.
pub fn parse_timestamp(s: &str) -> CommonResult<Timestamp> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    for format in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.fix().from_utc_datetime(&ndt));
        }
    }

    // Date only, midnight
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.fix().from_utc_datetime(&ndt));
        }
    }

    Err(CommonError::InvalidTime(s.to_string()))
}

/// ISO 8601 text for a timestamp, as the weather service writes it.
///
/// Zero-offset values are written naive (`2023-03-15T06:00:00`); others keep
/// their offset. Fractional seconds appear only when non-zero.
pub fn format_timestamp(dt: &Timestamp) -> String {
    let time_format = if dt.timestamp_subsec_nanos() == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M:%S%.6f"
    };

    if dt.offset().local_minus_utc() == 0 {
        dt.format(time_format).to_string()
    } else {
        format!("{}{}", dt.format(time_format), dt.format("%:z"))
    }
}

/// `YYYYMMDDHH` stamp used in weather keys and listing names.
pub fn hour_stamp(dt: &Timestamp) -> String {
    dt.format("%Y%m%d%H").to_string()
}

/// `YYYYMMDD` stamp used in ice keys.
pub fn day_stamp(dt: &Timestamp) -> String {
    dt.format("%Y%m%d").to_string()
}

/// Serde adapter for [`Timestamp`] fields.
pub mod serde_timestamp {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_timestamp, parse_timestamp, Timestamp};

    pub fn serialize<S>(dt: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}
