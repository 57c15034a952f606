//! finquest - leveling and quest tracking for a gamified savings app.
//!
//! The [`leveling`] and [`quests`] modules are pure and side-effect free;
//! [`utils::persistence`] and [`config`] handle the on-disk data used by the
//! `finquest` binary.

pub mod config;
pub mod constants;
pub mod error;
pub mod leveling;
pub mod quests;
pub mod utils;

pub use error::{FinquestError, LevelingError, QuestError, Result};
