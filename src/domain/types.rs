//! Shared domain enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Workflow state of a task. Encoded by its canonical label (`"In Process"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Assigned,
    #[serde(rename = "In Process")]
    InProcess,
    Pending,
    Closed,
    Canceled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Assigned,
        TaskStatus::InProcess,
        TaskStatus::Pending,
        TaskStatus::Closed,
        TaskStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Assigned => "Assigned",
            TaskStatus::InProcess => "In Process",
            TaskStatus::Pending => "Pending",
            TaskStatus::Closed => "Closed",
            TaskStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Assigned" => Ok(TaskStatus::Assigned),
            "In Process" => Ok(TaskStatus::InProcess),
            "Pending" => Ok(TaskStatus::Pending),
            "Closed" => Ok(TaskStatus::Closed),
            "Canceled" => Ok(TaskStatus::Canceled),
            other => Err(DomainError::validation(format!(
                "unknown task status `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_try_from() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::try_from(status.as_str()).ok(), Some(status));
        }
    }

    #[test]
    fn serde_uses_canonical_labels() {
        let encoded = serde_json::to_string(&TaskStatus::InProcess).expect("encode");
        assert_eq!(encoded, "\"In Process\"");

        let decoded: TaskStatus = serde_json::from_str("\"Canceled\"").expect("decode");
        assert_eq!(decoded, TaskStatus::Canceled);
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!(serde_json::from_str::<TaskStatus>("\"Done\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"in_process\"").is_err());
        assert!(TaskStatus::try_from("Done").is_err());
    }

    #[test]
    fn default_status_is_assigned() {
        assert_eq!(TaskStatus::default(), TaskStatus::Assigned);
    }
}
