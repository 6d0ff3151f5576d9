//! Tests for the daily reset background task and the shared critical section.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone;
use common::{body_json, build_game, build_test_app, entry, get, RunningClock, StubImages};
use guessr_api::background::daily_reset;
use guessr_core::player::backup_pool;
use guessr_game::DailyCheckOutcome;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn task_exits_when_cancelled() {
    let t = build_test_app(
        vec![entry(7, "Seven", "S", "Club S")],
        backup_pool(),
        StubImages::default(),
    );
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(daily_reset::run(
        Arc::clone(&t.game),
        Duration::from_secs(86_400),
        cancel.clone(),
    ));
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("task should stop promptly")
        .unwrap();
}

#[tokio::test]
async fn task_fires_at_midnight() {
    let t = build_test_app(
        vec![entry(7, "Seven", "S", "Club S")],
        backup_pool(),
        StubImages::default(),
    );
    get(t.app.clone(), "/api/game-state").await;

    // One second before midnight; the first tick is due in one second.
    t.clock.set(chrono::Utc.with_ymd_and_hms(2024, 11, 9, 23, 59, 59).unwrap());
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(daily_reset::run(
        Arc::clone(&t.game),
        Duration::from_secs(86_400),
        cancel.clone(),
    ));
    // Let the task read the countdown before the clock moves on.
    tokio::time::sleep(Duration::from_millis(50)).await;

    t.clock.set(chrono::Utc.with_ymd_and_hms(2024, 11, 10, 0, 0, 0).unwrap());
    let mut rolled = false;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Some(state) = t.game.current().await {
            if state.day.to_string() == "2024-11-10" {
                rolled = true;
                break;
            }
        }
    }
    cancel.cancel();
    handle.await.unwrap();

    assert!(rolled, "daily reset should have loaded the new day's player");
}

#[tokio::test]
async fn task_rolls_over_with_a_fractional_second_left() {
    let dir = tempfile::tempdir().unwrap();
    let start = chrono::Utc.with_ymd_and_hms(2024, 11, 9, 23, 59, 58).unwrap()
        + chrono::Duration::milliseconds(500);
    let game = Arc::new(build_game(
        Arc::new(RunningClock::starting_at(start)),
        vec![entry(7, "Seven", "S", "Club S")],
        dir.path(),
    ));
    assert_eq!(game.daily_player().await.unwrap().day.to_string(), "2024-11-09");

    let cancel = CancellationToken::new();
    let handle = tokio::spawn(daily_reset::run(
        Arc::clone(&game),
        Duration::from_secs(86_400),
        cancel.clone(),
    ));

    let mut held = String::new();
    for _ in 0..60 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Some(state) = game.current().await {
            held = state.day.to_string();
            if held == "2024-11-10" {
                break;
            }
        }
    }
    cancel.cancel();
    handle.await.unwrap();

    assert_eq!(held, "2024-11-10");
}

#[tokio::test]
async fn daily_check_and_requests_agree_after_rollover() {
    let t = build_test_app(
        vec![entry(1, "Alpha", "A", "Club A"), entry(2, "Beta", "B", "Club B")],
        backup_pool(),
        StubImages::default(),
    );
    get(t.app.clone(), "/api/game-state").await;

    t.clock.advance(chrono::Duration::days(1));
    let outcome = t.game.daily_check().await;
    let json = body_json(get(t.app.clone(), "/api/game-state").await).await;

    assert_eq!(
        outcome,
        DailyCheckOutcome::Refreshed(json["game_id"].as_i64().unwrap())
    );
    assert_eq!(json["current_date"], "2024-11-10");
    assert_eq!(t.game.daily_check().await, DailyCheckOutcome::Current);
}
