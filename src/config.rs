//! User settings (`settings.json`).

use crate::constants::SETTINGS_FILE;
use crate::leveling::XpCurve;
use crate::utils::DataDir;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Curve used for every XP grant.
    pub curve: XpCurve,
}

impl Settings {
    /// Loads settings, replacing an invalid curve with the default one.
    pub fn load(dir: &DataDir) -> Self {
        let mut settings: Settings = dir.load_json_or_default(SETTINGS_FILE);
        if let Err(e) = settings.curve.validate() {
            tracing::warn!(error = %e, "invalid XP curve in settings, using default curve");
            settings.curve = XpCurve::default();
        }
        settings
    }

    pub fn save(&self, dir: &DataDir) -> crate::error::Result<()> {
        dir.save_json(SETTINGS_FILE, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leveling::CurveMode;
    use std::fs;

    fn temp_data_dir() -> (tempfile::TempDir, DataDir) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::at(tmp.path()).unwrap();
        (tmp, dir)
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let (_tmp, dir) = temp_data_dir();
        assert_eq!(Settings::load(&dir), Settings::default());
    }

    #[test]
    fn test_settings_roundtrip() {
        let (_tmp, dir) = temp_data_dir();
        let settings = Settings {
            curve: XpCurve::exponential(80.0, 1.25).with_max_level(60),
        };
        settings.save(&dir).unwrap();
        assert_eq!(Settings::load(&dir), settings);
    }

    #[test]
    fn test_invalid_curve_replaced() {
        let (_tmp, dir) = temp_data_dir();
        fs::write(
            dir.settings_path(),
            r#"{"curve": {"base": -10, "factor": 5, "mode": "linear"}}"#,
        )
        .unwrap();
        assert_eq!(Settings::load(&dir).curve, XpCurve::default());
    }

    #[test]
    fn test_unknown_mode_kept_as_quadratic() {
        let (_tmp, dir) = temp_data_dir();
        fs::write(
            dir.settings_path(),
            r#"{"curve": {"base": 10, "factor": 5, "mode": "logarithmic"}}"#,
        )
        .unwrap();
        let curve = Settings::load(&dir).curve;
        assert_eq!(curve.mode, CurveMode::Quadratic);
        assert_eq!(curve.base, 10.0);
    }
}
