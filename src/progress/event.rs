//! Notification schema for in-flight build operations.

use serde::{Deserialize, Serialize};

/// A notification raised by a connection while long-running work is in
/// flight.
///
/// `Started` opens an operation, any number of `Tick`s may follow, and
/// `Completed` closes it. Payloads beyond the start description are
/// intentionally small: consumers that want full progress detail subscribe
/// to the stream directly rather than through the coarse caller callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressNotification {
    Started {
        description: String,
    },
    Tick {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },
    Completed,
}

impl ProgressNotification {
    pub fn started(description: impl Into<String>) -> Self {
        Self::Started {
            description: description.into(),
        }
    }

    pub fn tick(status: impl Into<String>) -> Self {
        Self::Tick {
            status: Some(status.into()),
        }
    }

    /// Description carried by a `Started` notification.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Started { description } => Some(description),
            _ => None,
        }
    }
}
