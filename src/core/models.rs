use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::TodoError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: &str, deadline: DateTime<Utc>, created_at: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            deadline,
            completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Remaining time against the given clock sample; negative once the
    /// deadline has passed.
    pub fn time_until_deadline(&self, now: DateTime<Utc>) -> Duration {
        self.deadline - now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Deadline,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Deadline => "deadline",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortKey::Title),
            "deadline" => Ok(SortKey::Deadline),
            _ => Err(TodoError::InvalidCriteria(s.to_string())),
        }
    }
}
