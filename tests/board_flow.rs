//! Scenarios that drive a board against a mocked server, the way a frontend would

use chrono::NaiveDate;

use taskboard::mock::{MockBehaviour, MockServer, RecordedRequest};
use taskboard::traits::TaskSource;
use taskboard::{NewTask, TaskBoard, TaskStatus, ViewMode};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A board pinned to a known date, with a handle on its mock server
fn board_at(today: NaiveDate) -> (TaskBoard<MockServer>, MockServer) {
    let server = MockServer::new();
    let board = TaskBoard::anchored_at(server.clone(), ViewMode::Week, today);
    (board, server)
}

#[tokio::test]
async fn load_replaces_the_snapshot_wholesale() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 10));
    server.seed_task("Buy milk", "2%", TaskStatus::InProgress, date(2024, 6, 10));
    server.seed_task("Old", "gone soon", TaskStatus::Done, date(2024, 6, 10));

    board.load().await;
    assert_eq!(board.tasks().len(), 2);

    // The server collection changes entirely behind our back; the next load must
    // not merge anything
    let victim = board.tasks()[0].id();
    server.delete_task(victim).await.unwrap();
    board.load().await;
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].title(), "Old");
    assert!(board.is_loading() == false);
}

#[tokio::test]
async fn load_without_credential_is_silent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::logged_out();
    let mut board = TaskBoard::anchored_at(server.clone(), ViewMode::Day, date(2024, 6, 10));

    board.load().await;

    // No request was sent, and the user saw nothing
    assert!(server.requests().is_empty());
    assert!(board.take_notices().is_empty());
    assert!(board.tasks().is_empty());
}

#[tokio::test]
async fn failed_load_keeps_the_stale_snapshot() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 10));
    server.seed_task("Keep me", "around", TaskStatus::InProgress, date(2024, 6, 10));
    board.load().await;
    let _ = board.take_notices();

    server.set_behaviour(MockBehaviour::fail_now(1));
    board.load().await;

    // Stale but available, plus a transient error notice
    assert_eq!(board.tasks().len(), 1);
    let notices = board.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, taskboard::NoticeLevel::Error);
}

#[tokio::test]
async fn creating_a_task_posts_resets_and_refetches() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 12));
    board.select_date(date(2024, 6, 10));
    board.set_draft_title("Buy milk");
    board.set_draft_description("2%");

    board.submit_new_task().await;

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], RecordedRequest::CreateTask(NewTask::new(
        "Buy milk".to_string(),
        "2%".to_string(),
        date(2024, 6, 10),
    )));
    assert_eq!(requests[1], RecordedRequest::FetchTasks);

    assert_eq!(board.draft_title(), "");
    assert_eq!(board.draft_description(), "");
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].due_date(), date(2024, 6, 10));

    let notices = board.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, taskboard::NoticeLevel::Success);
    assert_eq!(notices[0].message, "Task added.");
}

#[tokio::test]
async fn blank_fields_make_creation_a_silent_noop() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 10));

    board.set_draft_title("   ");
    board.set_draft_description("something");
    board.submit_new_task().await;

    board.set_draft_title("something");
    board.set_draft_description("");
    board.submit_new_task().await;

    assert!(server.requests().is_empty());
    assert!(board.take_notices().is_empty());
    assert!(board.tasks().is_empty());
}

#[tokio::test]
async fn status_toggle_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 10));
    let id = server.seed_task("Chore", "do it", TaskStatus::InProgress, date(2024, 6, 10));
    board.load().await;
    server.clear_requests();

    board.mark_completed(id).await;
    board.reactivate(id).await;

    assert_eq!(server.requests(), vec![
        RecordedRequest::SetStatus(id, TaskStatus::Done),
        RecordedRequest::FetchTasks,
        RecordedRequest::SetStatus(id, TaskStatus::InProgress),
        RecordedRequest::FetchTasks,
    ]);
    assert_eq!(board.tasks()[0].status(), TaskStatus::InProgress);
}

#[tokio::test]
async fn deleting_refetches_exactly_once() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 10));
    let id = server.seed_task("Chore", "do it", TaskStatus::InProgress, date(2024, 6, 10));
    board.load().await;
    server.clear_requests();

    board.delete_task(id).await;

    assert_eq!(server.requests(), vec![
        RecordedRequest::DeleteTask(id),
        RecordedRequest::FetchTasks,
    ]);
    assert!(board.tasks().is_empty());
}

#[tokio::test]
async fn failed_mutation_skips_the_refetch() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 10));
    let id = server.seed_task("Survivor", "still here", TaskStatus::InProgress, date(2024, 6, 10));
    board.load().await;
    let _ = board.take_notices();
    server.clear_requests();

    server.set_behaviour(MockBehaviour {
        delete_task_behaviour: (0, 1),
        ..MockBehaviour::default()
    });
    board.delete_task(id).await;

    // The delete was attempted, but no refetch followed; the snapshot is unchanged
    assert_eq!(server.requests(), vec![RecordedRequest::DeleteTask(id)]);
    assert_eq!(board.tasks().len(), 1);
    let notices = board.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, taskboard::NoticeLevel::Error);
}

#[tokio::test]
async fn derived_views_partition_by_selected_date_and_status() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, server) = board_at(date(2024, 6, 10));
    server.seed_task("A", "today", TaskStatus::InProgress, date(2024, 6, 10));
    server.seed_task("B", "today, done", TaskStatus::Done, date(2024, 6, 10));
    server.seed_task("C", "tomorrow", TaskStatus::InProgress, date(2024, 6, 11));
    server.seed_task("D", "today too", TaskStatus::InProgress, date(2024, 6, 10));
    board.load().await;

    let today_tasks = board.tasks_for_selected_date();
    assert_eq!(today_tasks.len(), 3);

    // Partitions keep the API order
    let in_progress: Vec<&str> = board.in_progress().iter().map(|t| t.title()).collect();
    assert_eq!(in_progress, vec!["A", "D"]);
    let done: Vec<&str> = board.done().iter().map(|t| t.title()).collect();
    assert_eq!(done, vec!["B"]);

    board.select_date(date(2024, 6, 11));
    let tomorrow: Vec<&str> = board.tasks_for_selected_date().iter().map(|t| t.title()).collect();
    assert_eq!(tomorrow, vec!["C"]);
}

#[tokio::test]
async fn selecting_a_date_clears_the_draft() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut board, _server) = board_at(date(2024, 6, 10));
    board.set_draft_title("half typed");
    board.set_draft_description("oops");

    board.select_date(date(2024, 6, 11));
    assert_eq!(board.selected_date(), date(2024, 6, 11));
    assert_eq!(board.draft_title(), "");
    assert_eq!(board.draft_description(), "");
}

#[tokio::test]
async fn selection_is_confined_to_the_window_but_survives_week_navigation() {
    let _ = env_logger::builder().is_test(true).try_init();

    // 2024-06-12 is a Wednesday; its week is Mon 10 .. Sun 16
    let (mut board, _server) = board_at(date(2024, 6, 12));
    assert_eq!(board.selected_date(), date(2024, 6, 12));

    // A date outside the computed week is ignored
    board.select_date(date(2024, 6, 20));
    assert_eq!(board.selected_date(), date(2024, 6, 12));

    // Navigating weeks does not reset the selection
    board.next_week();
    assert_eq!(board.window().dates()[0], date(2024, 6, 17));
    assert_eq!(board.selected_date(), date(2024, 6, 12));
}

#[tokio::test]
async fn month_board_centers_today_and_clamps_scrolling() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::new();
    let mut board = TaskBoard::anchored_at(server, ViewMode::Month, date(2024, 2, 15));

    assert_eq!(board.window().dates().len(), 29);
    assert_eq!(board.window().offset(), 12);
    assert_eq!(board.selected_date(), date(2024, 2, 15));

    for _ in 0..40 {
        board.scroll_forward();
    }
    assert_eq!(board.window().offset(), 24);
    for _ in 0..40 {
        board.scroll_back();
    }
    assert_eq!(board.window().offset(), 0);
}
