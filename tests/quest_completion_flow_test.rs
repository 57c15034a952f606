//! End-to-end quest completion: create, start, complete, persist, reload.

use chrono::{Duration, TimeZone, Utc};
use finquest::config::Settings;
use finquest::leveling::{to_progress, LevelState, XpCurve};
use finquest::quests::{Quest, QuestStatus};
use finquest::utils::DataDir;
use finquest::FinquestError;

fn data_dir() -> (tempfile::TempDir, DataDir) {
    let tmp = tempfile::tempdir().unwrap();
    let dir = DataDir::at(tmp.path()).unwrap();
    (tmp, dir)
}

#[test]
fn test_complete_quest_persists_level_and_status() {
    let (_tmp, dir) = data_dir();
    let t0 = Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap();
    let settings = Settings::load(&dir);

    let mut board = dir.load_quests().unwrap();
    let bike = board
        .add(Quest::new("Bike fund", "savings", 300.0, 180.0, t0))
        .unwrap();
    let coffee = board
        .add(Quest::new("Brew coffee at home", "budgeting", 60.0, 40.0, t0 + Duration::days(1)))
        .unwrap();
    dir.save_quests(&board).unwrap();

    let mut board = dir.load_quests().unwrap();
    board.start(&bike, t0 + Duration::days(2)).unwrap();
    let profile = dir.load_profile().unwrap();
    let gain = board
        .complete(&bike, &profile, &settings.curve, t0 + Duration::days(5))
        .unwrap();
    dir.save_quests(&board).unwrap();
    dir.save_profile(&gain.state).unwrap();

    // default curve: 100 for level 1, 150 for level 2
    assert_eq!(gain.gained, 1);

    let reloaded_profile = dir.load_profile().unwrap();
    assert_eq!(reloaded_profile.level, 2);
    assert_eq!(reloaded_profile.xp, 80.0);
    assert_eq!(reloaded_profile.total_xp, Some(180.0));

    let progress = to_progress(&reloaded_profile, &settings.curve);
    assert_eq!(progress.next_level_xp, 150.0);
    assert!((progress.progress - 80.0 / 150.0).abs() < 1e-12);

    let reloaded_board = dir.load_quests().unwrap();
    let completed = reloaded_board.recently_completed();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, bike);
    let open = reloaded_board.recently_created();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, coffee);
    assert_eq!(open[0].status, QuestStatus::New);
}

#[test]
fn test_completed_quest_cannot_pay_twice() {
    let (_tmp, dir) = data_dir();
    let now = Utc::now();
    let curve = XpCurve::default();

    let mut board = dir.load_quests().unwrap();
    let id = board
        .add(Quest::new("Pay off card", "debt", 500.0, 90.0, now))
        .unwrap();

    let first = board.complete(&id, &LevelState::new(), &curve, now).unwrap();
    let second = board.complete(&id, &first.state, &curve, now);
    assert!(matches!(second, Err(FinquestError::Quest(_))));
}

#[test]
fn test_settings_curve_drives_leveling() {
    let (_tmp, dir) = data_dir();
    Settings {
        curve: XpCurve::linear(50.0, 0.0).with_max_level(3),
    }
    .save(&dir)
    .unwrap();

    let settings = Settings::load(&dir);
    let mut board = dir.load_quests().unwrap();
    let now = Utc::now();
    let id = board
        .add(Quest::new("Big win", "investing", 0.0, 500.0, now))
        .unwrap();

    let gain = board
        .complete(&id, &LevelState::new(), &settings.curve, now)
        .unwrap();
    assert_eq!(gain.state.level, 3);
    assert_eq!(gain.gained, 2);

    let progress = to_progress(&gain.state, &settings.curve);
    assert!(progress.is_maxed());
    assert_eq!(progress.progress, 1.0);
}

#[test]
fn test_unknown_quest_id() {
    let (_tmp, dir) = data_dir();
    let mut board = dir.load_quests().unwrap();
    assert!(matches!(
        board.start("nope", Utc::now()),
        Err(FinquestError::QuestNotFound(_))
    ));
}
