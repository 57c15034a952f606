//! Leveling engine.
//!
//! Converts accumulated XP into a level and a progress fraction using a
//! configurable [`XpCurve`]. Every function here is pure.

mod curve;
mod reward;
mod state;

pub use curve::{curve_table, xp_needed_for_next, CurveMode, CurveRow, XpCurve};
pub use reward::{apply_quest_reward, quest_xp, QuestReward};
pub use state::{add_xp, to_progress, try_add_xp, LevelProgress, LevelState, XpGain};
