//! Inbound SNS notification envelope.
//!
//! Field names follow the envelope the Lambda runtime delivers for SNS
//! subscriptions (TitleCase on the wire).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CommonError;

/// Message attribute that selects the payload schema of a record.
pub const TYPE_ATTRIBUTE: &str = "Type";

/// Envelope delivered per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEvent {
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsRecord {
    #[serde(default)]
    pub event_source: String,
    #[serde(default)]
    pub event_subscription_arn: String,
    #[serde(default)]
    pub event_version: String,
    pub sns: SnsMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    /// Opaque body; JSON for both payload schemas.
    pub message: String,
    #[serde(default)]
    pub message_attributes: HashMap<String, SnsMessageAttribute>,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub signature_version: Option<String>,
    #[serde(default)]
    pub signing_cert_url: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub topic_arn: Option<String>,
    #[serde(rename = "Type", default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub unsubscribe_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsMessageAttribute {
    #[serde(rename = "Type")]
    pub data_type: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl SnsRecord {
    /// Raw value of the `Type` message attribute, if the publisher set one.
    pub fn type_attribute(&self) -> Option<&str> {
        self.sns
            .message_attributes
            .get(TYPE_ATTRIBUTE)
            .map(|attr| attr.value.as_str())
    }
}

/// Payload schema carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Weather,
    Ice,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Weather => "Weather",
            EventKind::Ice => "Ice",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Weather" => Ok(EventKind::Weather),
            "Ice" => Ok(EventKind::Ice),
            other => Err(CommonError::UnknownEventType(other.to_string())),
        }
    }
}
