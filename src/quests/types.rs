//! Quest records and the timestamp formats they are stored with.

use crate::leveling::QuestReward;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestStatus {
    New,
    InProgress,
    Completed,
}

impl QuestStatus {
    pub fn name(&self) -> &'static str {
        match self {
            QuestStatus::New => "New",
            QuestStatus::InProgress => "In progress",
            QuestStatus::Completed => "Completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, QuestStatus::Completed)
    }
}

/// A savings or budgeting challenge.
///
/// Timestamps are stored exactly as the storage layer wrote them and parsed
/// on read (see [`parse_timestamp`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub status: QuestStatus,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub exp_reward: f64,
    /// Savings target, in the user's currency.
    #[serde(default)]
    pub goal: f64,
}

impl Quest {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        goal: f64,
        exp_reward: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            status: QuestStatus::New,
            created_at: format_timestamp(now),
            updated_at: None,
            completed_at: None,
            category: category.into(),
            exp_reward,
            goal,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// When the quest was finished: `completed_at`, or `updated_at` for
    /// records that never stored a completion time.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        let raw = match self.completed_at.as_deref() {
            Some(completed) if !completed.trim().is_empty() => completed,
            _ => self.updated_at.as_deref()?,
        };
        parse_timestamp(raw)
    }

    pub fn reward(&self) -> QuestReward {
        QuestReward::from(self)
    }
}

impl From<&Quest> for QuestReward {
    fn from(quest: &Quest) -> Self {
        QuestReward::exp(quest.exp_reward)
    }
}

/// Parses RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` (as UTC) or `YYYY-MM-DD`
/// (midnight UTC). Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
