//! Record classification by the `Type` message attribute.

use std::str::FromStr;

use tiff_common::{EventKind, SnsRecord};

use crate::error::{PipelineError, PipelineResult};

/// What to do with a record that carries no `Type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTypePolicy {
    /// Treat it as this kind. Publishers predating the attribute only
    /// sent weather responses.
    Default(EventKind),
    /// Fail the record with [`PipelineError::MissingEventType`].
    Reject,
}

impl Default for MissingTypePolicy {
    fn default() -> Self {
        MissingTypePolicy::Default(EventKind::Weather)
    }
}

impl FromStr for MissingTypePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weather" => Ok(MissingTypePolicy::Default(EventKind::Weather)),
            "ice" => Ok(MissingTypePolicy::Default(EventKind::Ice)),
            "reject" => Ok(MissingTypePolicy::Reject),
            other => Err(format!(
                "unknown missing-type policy '{}', expected weather, ice or reject",
                other
            )),
        }
    }
}

/// Picks the payload schema of a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventClassifier {
    missing: MissingTypePolicy,
}

impl EventClassifier {
    pub fn new(missing: MissingTypePolicy) -> Self {
        Self { missing }
    }

    pub fn classify(&self, record: &SnsRecord) -> PipelineResult<EventKind> {
        match record.type_attribute() {
            Some(value) => Ok(value.parse::<EventKind>()?),
            None => match self.missing {
                MissingTypePolicy::Default(kind) => Ok(kind),
                MissingTypePolicy::Reject => Err(PipelineError::MissingEventType),
            },
        }
    }
}
