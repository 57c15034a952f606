//! Level state and XP accumulation.

use super::curve::{xp_needed_for_next, XpCurve};
use crate::constants::STARTING_LEVEL;
use crate::error::LevelingError;
use serde::{Deserialize, Serialize};

/// Persisted progression of a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelState {
    pub level: u32,
    /// XP accumulated inside the current level.
    pub xp: f64,
    /// Lifetime XP. Older profiles may not carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_xp: Option<f64>,
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelState {
    pub fn new() -> Self {
        Self {
            level: STARTING_LEVEL,
            xp: 0.0,
            total_xp: Some(0.0),
        }
    }

    /// Rebuilds the state a user would have after earning `total_xp` from scratch.
    pub fn from_total_xp(total_xp: f64, curve: &XpCurve) -> Self {
        add_xp(&Self::new(), total_xp, curve).state
    }

    pub fn total_xp(&self) -> f64 {
        self.total_xp.unwrap_or(0.0)
    }
}

/// Result of adding XP.
#[derive(Debug, Clone, PartialEq)]
pub struct XpGain {
    pub state: LevelState,
    /// Levels gained by this call.
    pub gained: u32,
}

/// `LevelState` plus the values a level badge needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub xp: f64,
    pub total_xp: Option<f64>,
    /// Threshold for the current level; infinite once the cap is reached.
    pub next_level_xp: f64,
    /// Fraction of the way to the next level, always within [0, 1].
    pub progress: f64,
}

impl LevelProgress {
    pub fn is_maxed(&self) -> bool {
        self.next_level_xp.is_infinite()
    }

    /// XP still missing before the next level-up; `None` once maxed.
    pub fn xp_remaining(&self) -> Option<f64> {
        if self.is_maxed() {
            None
        } else {
            Some((self.next_level_xp - self.xp).max(0.0))
        }
    }
}

/// Adds `amount` XP and converts any excess into level-ups.
///
/// Negative amounts reduce XP (floored at 0) but never remove a level.
/// Non-finite amounts leave the state untouched; use [`try_add_xp`] to
/// surface them as errors instead.
pub fn add_xp(state: &LevelState, amount: f64, curve: &XpCurve) -> XpGain {
    if !amount.is_finite() {
        tracing::warn!(amount, "ignoring non-finite XP amount");
        return XpGain {
            state: state.clone(),
            gained: 0,
        };
    }

    let mut level = state.level.max(STARTING_LEVEL);
    let mut xp = (state.xp + amount).max(0.0);
    let mut gained: u32 = 0;

    while !curve.is_capped(level) {
        let needed = xp_needed_for_next(level, curve);

        if needed <= 0.0 {
            // A free level is granted once per call; looping on it would never end.
            level += 1;
            gained += 1;
            break;
        }
        if needed.is_nan() || xp < needed {
            break;
        }

        if curve.has_constant_threshold() {
            let room = curve.levels_until_cap(level);
            let whole = ((xp - xp % needed) / needed).round();
            if whole <= room as f64 {
                let levels = whole as u32;
                level += levels;
                gained += levels;
                xp %= needed;
            } else {
                level += room;
                gained += room;
                xp = (xp - room as f64 * needed).max(0.0);
            }
            break;
        }

        let remaining = xp - needed;
        if remaining == xp {
            tracing::warn!(
                level,
                remaining_xp = xp,
                needed,
                "XP threshold below float precision, stopping level-ups"
            );
            break;
        }

        xp = remaining;
        level += 1;
        gained += 1;
    }

    if gained > 0 {
        tracing::debug!(from = state.level, to = level, gained, "level up");
    }

    XpGain {
        state: LevelState {
            level,
            xp,
            total_xp: Some((state.total_xp() + amount).max(0.0)),
        },
        gained,
    }
}

/// Boundary variant of [`add_xp`] for amounts that come from user input.
pub fn try_add_xp(
    state: &LevelState,
    amount: f64,
    curve: &XpCurve,
) -> Result<XpGain, LevelingError> {
    if !amount.is_finite() {
        return Err(LevelingError::NonFiniteAmount(amount));
    }
    Ok(add_xp(state, amount, curve))
}

/// Derives the badge view of `state`.
pub fn to_progress(state: &LevelState, curve: &XpCurve) -> LevelProgress {
    let next_level_xp = xp_needed_for_next(state.level, curve);

    let progress = if next_level_xp.is_infinite() || next_level_xp <= 0.0 {
        1.0
    } else {
        let ratio = state.xp / next_level_xp;
        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    };

    LevelProgress {
        level: state.level,
        xp: state.xp,
        total_xp: state.total_xp,
        next_level_xp,
        progress,
    }
}
