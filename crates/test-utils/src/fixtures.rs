//! Event and payload fixtures.
//!
//! Builders return JSON text in the shapes the upstream publishers emit.

use serde_json::{json, Value};

pub const TEST_BUCKET: &str = "tiff-test-bucket";

/// One record of an SNS envelope: optional `Type` attribute and message body.
pub fn sns_record(kind: Option<&str>, message: &str) -> Value {
    let attributes = match kind {
        Some(kind) => json!({ "Type": { "Type": "String", "Value": kind } }),
        None => json!({}),
    };

    json!({
        "EventSource": "aws:sns",
        "EventSubscriptionArn": "arn:aws:sns:eu-west-1:000000000000:weather:subscription",
        "EventVersion": "1.0",
        "Sns": {
            "Type": "Notification",
            "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
            "TopicArn": "arn:aws:sns:eu-west-1:000000000000:weather",
            "Subject": null,
            "Message": message,
            "Timestamp": "2023-03-15T06:00:00.000Z",
            "SignatureVersion": "1",
            "Signature": "EXAMPLE",
            "SigningCertUrl": "https://sns.example.com/cert.pem",
            "UnsubscribeUrl": "https://sns.example.com/unsubscribe",
            "MessageAttributes": attributes
        }
    })
}

/// Envelope with the given records.
pub fn sns_event(records: Vec<Value>) -> String {
    json!({ "Records": records }).to_string()
}

/// Envelope with a single record.
pub fn single_record_event(kind: Option<&str>, message: &str) -> String {
    sns_event(vec![sns_record(kind, message)])
}

/// One entry of a forecast response.
pub fn forecast_file(url: &str, analysis: &str, forecast: &str) -> Value {
    let file_name = url.rsplit('/').next().unwrap_or(url);
    json!({
        "file_name": file_name,
        "url": url,
        "requested_forecast_date": forecast,
        "response_analysis_date": analysis,
        "response_forecast_date": forecast
    })
}

/// Forecast response body (snake_case, as the weather service emits it).
pub fn forecast_response(analysis: &str, files: Vec<Value>) -> String {
    json!({
        "files": files,
        "nearest_analysis_date_relative_to_requested_date": analysis
    })
    .to_string()
}

/// Ice notification body.
pub fn ice_event(url: &str, release: &str) -> String {
    json!({ "IceUrl": url, "IceRelease": release }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sns_record_attribute_omitted() {
        let record = sns_record(None, "{}");
        assert_eq!(record["Sns"]["MessageAttributes"], json!({}));
    }

    #[test]
    fn test_forecast_file_name_from_url() {
        let file = forecast_file(
            "https://weather.example.com/2023031500/f006.npz",
            "2023-03-15T00:00:00",
            "2023-03-15T06:00:00",
        );
        assert_eq!(file["file_name"], "f006.npz");
    }
}
