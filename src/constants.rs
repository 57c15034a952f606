//! Tunable constants for leveling, the dashboard and data files.

// XP curve defaults
pub const DEFAULT_CURVE_BASE: f64 = 100.0;
pub const DEFAULT_CURVE_FACTOR: f64 = 50.0;
pub const DEFAULT_EXPONENTIAL_GROWTH: f64 = 1.1;

// Leveling
pub const STARTING_LEVEL: u32 = 1;

// Dashboard
pub const RECENT_QUESTS_LIMIT: usize = 5;
pub const DEFAULT_CURVE_TABLE_LEVELS: u32 = 20;
pub const MAX_CURVE_TABLE_LEVELS: u32 = 1_000;
pub const PROGRESS_BAR_WIDTH: usize = 24;

// Data files (under ~/.finquest/)
pub const DATA_DIR_NAME: &str = ".finquest";
pub const PROFILE_FILE: &str = "profile.json";
pub const QUESTS_FILE: &str = "quests.json";
pub const SETTINGS_FILE: &str = "settings.json";
