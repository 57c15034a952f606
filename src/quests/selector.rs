//! Dashboard selection of recent quest activity.
//!
//! Both selectors sort newest first with a stable sort, so quests with equal
//! timestamps keep their input order. Quests whose timestamp is missing or
//! unparseable go after every dated quest.

use super::types::Quest;
use crate::constants::RECENT_QUESTS_LIMIT;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// The most recently completed quests, newest first, at most five.
pub fn get_completed_quests(quests: &[Quest]) -> Vec<Quest> {
    newest_first(
        quests.iter().filter(|q| q.status.is_completed()),
        Quest::finished_at,
    )
}

/// The most recently created quests that are still open, newest first, at most five.
pub fn get_recently_created_quests(quests: &[Quest]) -> Vec<Quest> {
    newest_first(
        quests.iter().filter(|q| !q.status.is_completed()),
        Quest::created_at,
    )
}

fn newest_first<'a>(
    quests: impl Iterator<Item = &'a Quest>,
    key: impl Fn(&Quest) -> Option<DateTime<Utc>>,
) -> Vec<Quest> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &Quest)> = quests.map(|q| (key(q), q)).collect();
    keyed.sort_by(|(a, _), (b, _)| descending_undated_last(a, b));

    keyed
        .into_iter()
        .take(RECENT_QUESTS_LIMIT)
        .map(|(_, quest)| quest.clone())
        .collect()
}

fn descending_undated_last(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
