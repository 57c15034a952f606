//! Quest reward extraction.

use super::curve::XpCurve;
use super::state::{add_xp, LevelState, XpGain};
use serde::{Deserialize, Serialize};

/// Reward fields a quest-like record may carry, checked in declaration order.
///
/// Records written by different app versions name the reward differently, so
/// every known spelling is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestReward {
    #[serde(default, rename = "expReward", alias = "exp_reward")]
    pub exp_reward: Option<f64>,
    #[serde(default, rename = "xpReward", alias = "xp_reward")]
    pub xp_reward: Option<f64>,
    #[serde(default)]
    pub xp: Option<f64>,
    #[serde(default)]
    pub reward: Option<f64>,
}

impl QuestReward {
    pub fn exp(amount: f64) -> Self {
        Self {
            exp_reward: Some(amount),
            ..Default::default()
        }
    }
}

/// XP a quest pays out: the first finite reward field, or 0.
pub fn quest_xp(reward: &QuestReward) -> f64 {
    [reward.exp_reward, reward.xp_reward, reward.xp, reward.reward]
        .into_iter()
        .flatten()
        .find(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

pub fn apply_quest_reward(state: &LevelState, reward: &QuestReward, curve: &XpCurve) -> XpGain {
    add_xp(state, quest_xp(reward), curve)
}
