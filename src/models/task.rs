#[cfg(test)]
#[path = "task_test.rs"]
mod tests;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task status. The wire values are the French labels the remote
/// collection stores, so they are kept as the serde names.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "En cours")]
    InProgress,
    #[serde(rename = "Terminé")]
    Done,
    #[serde(rename = "Annulé")]
    Cancelled,
}

impl Status {
    /// Advance to the next status in the fixed three-state cycle:
    /// in progress -> done -> cancelled -> in progress.
    pub fn next(self) -> Status {
        match self {
            Status::InProgress => Status::Done,
            Status::Done => Status::Cancelled,
            Status::Cancelled => Status::InProgress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::InProgress => "in-progress",
            Status::Done => "done",
            Status::Cancelled => "cancelled",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the CLI spellings and the wire spellings.
        match s.to_lowercase().as_str() {
            "in-progress" | "in_progress" | "en cours" => Ok(Status::InProgress),
            "done" | "terminé" => Ok(Status::Done),
            "cancelled" | "annulé" => Ok(Status::Cancelled),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A single entry of the remote task collection.
///
/// Tasks are value data: every mutation builds a new `Task` instead of
/// editing one in place. An `id` of `0` (or absent on the wire) marks a
/// draft that has not been persisted yet; the server assigns the real id
/// on create.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    id: u64,
    #[serde(rename = "nom")]
    name: String,
    #[serde(rename = "statut")]
    status: Status,
    #[serde(rename = "priorite")]
    priority: String,
}

impl Task {
    /// Build a draft task: no id yet, status starts in progress.
    pub fn new(name: impl Into<String>, priority: impl Into<String>) -> Task {
        Task {
            id: 0,
            name: name.into(),
            status: Status::InProgress,
            priority: priority.into(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Task {
        self.id = id;
        self
    }

    pub fn with_status(mut self, status: Status) -> Task {
        self.status = status;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }
}
