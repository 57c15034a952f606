//! Quests: records, lifecycle, and the dashboard activity selector.

mod lifecycle;
mod selector;
mod types;

pub use lifecycle::{complete_quest, QuestBoard};
pub use selector::{get_completed_quests, get_recently_created_quests};
pub use types::{format_timestamp, parse_timestamp, Quest, QuestStatus};
