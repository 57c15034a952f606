//! Quest status transitions and reward payout.

use super::selector::{get_completed_quests, get_recently_created_quests};
use super::types::{format_timestamp, Quest, QuestStatus};
use crate::error::{FinquestError, QuestError};
use crate::leveling::{apply_quest_reward, LevelState, XpCurve, XpGain};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

impl Quest {
    pub fn validate(&self) -> Result<(), QuestError> {
        for (field, value) in [("reward", self.exp_reward), ("goal", self.goal)] {
            if !value.is_finite() {
                return Err(QuestError::NonFiniteAmount { field, value });
            }
        }
        Ok(())
    }

    /// Moves a new quest into progress. Starting an in-progress quest is a no-op.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), QuestError> {
        match self.status {
            QuestStatus::Completed => Err(QuestError::AlreadyCompleted(self.id.clone())),
            QuestStatus::InProgress => Ok(()),
            QuestStatus::New => {
                self.status = QuestStatus::InProgress;
                self.updated_at = Some(format_timestamp(now));
                tracing::debug!(quest = %self.id, "quest started");
                Ok(())
            }
        }
    }

    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), QuestError> {
        if self.status.is_completed() {
            return Err(QuestError::AlreadyCompleted(self.id.clone()));
        }
        let stamp = format_timestamp(now);
        self.status = QuestStatus::Completed;
        self.completed_at = Some(stamp.clone());
        self.updated_at = Some(stamp);
        tracing::debug!(quest = %self.id, "quest completed");
        Ok(())
    }
}

/// Completes `quest` and pays its reward into `state`.
///
/// A quest that is already completed is rejected, so each quest pays out once.
pub fn complete_quest(
    state: &LevelState,
    quest: &mut Quest,
    curve: &XpCurve,
    now: DateTime<Utc>,
) -> Result<XpGain, QuestError> {
    quest.complete(now)?;
    let gain = apply_quest_reward(state, &quest.reward(), curve);
    tracing::info!(
        quest = %quest.id,
        xp = quest.exp_reward,
        level = gain.state.level,
        levels_gained = gain.gained,
        "quest reward applied"
    );
    Ok(gain)
}

/// A user's quest collection, as persisted in `quests.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestBoard {
    quests: Vec<Quest>,
}

impl QuestBoard {
    pub fn new(quests: Vec<Quest>) -> Self {
        Self { quests }
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Adds `quest` and returns its id. Quests with a non-finite reward or goal
    /// are rejected, since JSON cannot store them.
    pub fn add(&mut self, quest: Quest) -> Result<String, QuestError> {
        quest.validate()?;
        let id = quest.id.clone();
        self.quests.push(quest);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.id == id)
    }

    pub fn start(&mut self, id: &str, now: DateTime<Utc>) -> Result<(), FinquestError> {
        let quest = self
            .find_mut(id)
            .ok_or_else(|| FinquestError::QuestNotFound(id.to_string()))?;
        quest.start(now)?;
        Ok(())
    }

    pub fn complete(
        &mut self,
        id: &str,
        state: &LevelState,
        curve: &XpCurve,
        now: DateTime<Utc>,
    ) -> Result<XpGain, FinquestError> {
        let quest = self
            .find_mut(id)
            .ok_or_else(|| FinquestError::QuestNotFound(id.to_string()))?;
        Ok(complete_quest(state, quest, curve, now)?)
    }

    pub fn recently_completed(&self) -> Vec<Quest> {
        get_completed_quests(&self.quests)
    }

    pub fn recently_created(&self) -> Vec<Quest> {
        get_recently_created_quests(&self.quests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 18, 12, 0, 0).unwrap()
    }

    fn sample() -> Quest {
        Quest::new("Save $200", "savings", 200.0, 150.0, now())
    }

    #[test]
    fn test_start_new_quest() {
        let mut quest = sample();
        quest.start(now()).unwrap();
        assert_eq!(quest.status, QuestStatus::InProgress);
        assert!(quest.updated_at.is_some());
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut quest = sample();
        quest.start(now()).unwrap();
        let snapshot = quest.clone();
        quest.start(now() + chrono::Duration::hours(1)).unwrap();
        assert_eq!(quest, snapshot);
    }

    #[test]
    fn test_cannot_start_completed_quest() {
        let mut quest = sample();
        quest.complete(now()).unwrap();
        assert!(matches!(
            quest.start(now()),
            Err(QuestError::AlreadyCompleted(_))
        ));
    }

    #[test]
    fn test_complete_sets_timestamps() {
        let mut quest = sample();
        quest.complete(now()).unwrap();
        assert_eq!(quest.status, QuestStatus::Completed);
        assert_eq!(quest.finished_at(), Some(now()));
        assert_eq!(quest.updated_at, quest.completed_at);
    }

    #[test]
    fn test_complete_quest_pays_once() {
        let curve = XpCurve::default();
        let mut quest = sample();

        let gain = complete_quest(&LevelState::new(), &mut quest, &curve, now()).unwrap();
        assert_eq!(gain.gained, 1);
        assert_eq!(gain.state.level, 2);
        assert_eq!(gain.state.xp, 50.0);

        let again = complete_quest(&gain.state, &mut quest, &curve, now());
        assert!(again.is_err());
    }

    #[test]
    fn test_board_complete_unknown_id() {
        let mut board = QuestBoard::default();
        let result = board.complete("missing", &LevelState::new(), &XpCurve::default(), now());
        assert!(matches!(result, Err(FinquestError::QuestNotFound(_))));
    }

    #[test]
    fn test_board_flow() {
        let mut board = QuestBoard::default();
        let id = board.add(sample()).unwrap();
        board
            .add(Quest::new("Cancel a subscription", "budgeting", 0.0, 30.0, now()))
            .unwrap();

        board.start(&id, now()).unwrap();
        let gain = board
            .complete(&id, &LevelState::new(), &XpCurve::default(), now())
            .unwrap();

        assert_eq!(gain.state.total_xp, Some(150.0));
        assert_eq!(board.recently_completed().len(), 1);
        assert_eq!(board.recently_created().len(), 1);
        assert_eq!(board.get(&id).map(|q| q.status), Some(QuestStatus::Completed));
    }

    #[test]
    fn test_board_rejects_non_finite_amounts() {
        let mut board = QuestBoard::default();
        for (goal, reward) in [(100.0, f64::NAN), (100.0, f64::INFINITY), (f64::NEG_INFINITY, 10.0)] {
            let result = board.add(Quest::new("Broken", "savings", goal, reward, now()));
            assert!(matches!(result, Err(QuestError::NonFiniteAmount { .. })));
        }
        assert!(board.is_empty());

        board.add(Quest::new("Fine", "savings", -5.0, 0.0, now())).unwrap();
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_board_serializes_as_list() {
        let board = QuestBoard::new(vec![sample()]);
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with('['));
        let loaded: QuestBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, board);
    }
}
