//! XP curve: how much XP each level costs.

use crate::constants::{
    DEFAULT_CURVE_BASE, DEFAULT_CURVE_FACTOR, DEFAULT_EXPONENTIAL_GROWTH, MAX_CURVE_TABLE_LEVELS,
};
use crate::error::LevelingError;
use serde::{Deserialize, Serialize};

/// Growth shape of the per-level XP threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CurveMode {
    Linear,
    #[default]
    Quadratic,
    Exponential,
}

impl CurveMode {
    pub fn name(&self) -> &'static str {
        match self {
            CurveMode::Linear => "linear",
            CurveMode::Quadratic => "quadratic",
            CurveMode::Exponential => "exponential",
        }
    }
}

// Unknown mode strings in settings files degrade to quadratic instead of failing the load.
impl From<String> for CurveMode {
    fn from(mode: String) -> Self {
        match mode.trim().to_ascii_lowercase().as_str() {
            "linear" => CurveMode::Linear,
            "exponential" => CurveMode::Exponential,
            _ => CurveMode::Quadratic,
        }
    }
}

/// Curve configuration. Immutable once built; `XpCurve::default()` is the
/// curve used when the caller supplies none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XpCurve {
    pub base: f64,
    pub factor: f64,
    pub mode: CurveMode,
    /// Per-level multiplier for `Exponential`; 1.1 when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<f64>,
    /// Highest reachable level. No XP threshold exists at or above it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_level: Option<u32>,
}

impl Default for XpCurve {
    fn default() -> Self {
        Self {
            base: DEFAULT_CURVE_BASE,
            factor: DEFAULT_CURVE_FACTOR,
            mode: CurveMode::Quadratic,
            growth: None,
            max_level: None,
        }
    }
}

impl XpCurve {
    pub fn linear(base: f64, factor: f64) -> Self {
        Self {
            base,
            factor,
            mode: CurveMode::Linear,
            ..Default::default()
        }
    }

    pub fn quadratic(base: f64, factor: f64) -> Self {
        Self {
            base,
            factor,
            mode: CurveMode::Quadratic,
            ..Default::default()
        }
    }

    pub fn exponential(base: f64, growth: f64) -> Self {
        Self {
            base,
            factor: 0.0,
            mode: CurveMode::Exponential,
            growth: Some(growth),
            ..Default::default()
        }
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = Some(max_level);
        self
    }

    pub fn growth(&self) -> f64 {
        self.growth.unwrap_or(DEFAULT_EXPONENTIAL_GROWTH)
    }

    /// True when `level` has reached the configured cap. `u32::MAX` is always capped.
    pub fn is_capped(&self, level: u32) -> bool {
        level == u32::MAX || self.max_level.is_some_and(|max| level >= max)
    }

    /// Level-ups still possible from `level`.
    pub fn levels_until_cap(&self, level: u32) -> u32 {
        self.max_level.unwrap_or(u32::MAX).saturating_sub(level)
    }

    /// True when every level costs the same XP.
    pub fn has_constant_threshold(&self) -> bool {
        match self.mode {
            CurveMode::Linear | CurveMode::Quadratic => self.factor == 0.0,
            CurveMode::Exponential => self.growth() == 1.0,
        }
    }

    /// Rejects curves that would produce meaningless thresholds.
    ///
    /// The leveling functions tolerate any curve; call this where curves come
    /// from untrusted input such as a settings file.
    pub fn validate(&self) -> Result<(), LevelingError> {
        if !self.base.is_finite() || self.base < 0.0 {
            return Err(LevelingError::InvalidCurve(format!(
                "base must be a non-negative number, got {}",
                self.base
            )));
        }
        if !self.factor.is_finite() || self.factor < 0.0 {
            return Err(LevelingError::InvalidCurve(format!(
                "factor must be a non-negative number, got {}",
                self.factor
            )));
        }
        if let Some(growth) = self.growth {
            if !growth.is_finite() || growth <= 0.0 {
                return Err(LevelingError::InvalidCurve(format!(
                    "growth must be a positive number, got {}",
                    growth
                )));
            }
        }
        if self.max_level == Some(0) {
            return Err(LevelingError::InvalidCurve(
                "maxLevel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// XP required to advance past `level`.
///
/// Returns `f64::INFINITY` once `level` reaches `curve.max_level`.
pub fn xp_needed_for_next(level: u32, curve: &XpCurve) -> f64 {
    if curve.is_capped(level) {
        return f64::INFINITY;
    }

    let steps = level.saturating_sub(1) as f64;
    match curve.mode {
        CurveMode::Linear => curve.base + curve.factor * steps,
        CurveMode::Exponential => curve.base * curve.growth().powf(steps),
        CurveMode::Quadratic => curve.base + curve.factor * steps * steps,
    }
}

/// One row of a printed level curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRow {
    pub level: u32,
    /// XP needed to advance past this level.
    pub xp_to_next: f64,
    /// Lifetime XP needed to reach this level from level 1.
    pub total_to_reach: f64,
}

/// Thresholds for levels `1..=levels`, stopping early at the level cap.
/// At most `MAX_CURVE_TABLE_LEVELS` rows are produced.
pub fn curve_table(curve: &XpCurve, levels: u32) -> Vec<CurveRow> {
    let mut rows = Vec::new();
    let mut total = 0.0;

    for level in 1..=levels.min(MAX_CURVE_TABLE_LEVELS) {
        let xp_to_next = xp_needed_for_next(level, curve);
        rows.push(CurveRow {
            level,
            xp_to_next,
            total_to_reach: total,
        });
        if xp_to_next.is_infinite() {
            break;
        }
        total += xp_to_next;
    }

    rows
}
