//! A self-contained tour of the boards, driven against the in-memory mock server.
//! No credentials needed: `cargo run --example special-days`

use chrono::NaiveDate;

use taskboard::mock::MockServer;
use taskboard::storage::MemoryStore;
use taskboard::{SpecialDayRegistry, TaskBoard, TaskStatus, ViewMode};

#[tokio::main]
async fn main() {
    env_logger::init();

    let server = MockServer::new();
    let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    server.seed_task("Water the plants", "the thirsty ones", TaskStatus::InProgress, today);
    server.seed_task("Call the bank", "about the card", TaskStatus::Done, today);

    // A monthly board centers its visible slice on today
    let mut monthly = TaskBoard::anchored_at(server.clone(), ViewMode::Month, today);
    monthly.load().await;
    println!("February window: {} days, visible from {}", monthly.window().dates().len(), monthly.window().visible()[0]);
    println!("{} in progress, {} done today", monthly.in_progress().len(), monthly.done().len());

    // Register a special day and open its pinned board
    let mut registry = SpecialDayRegistry::new(MemoryStore::new());
    let day = registry.add("Mom's Birthday", NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()).unwrap();
    println!("Registered {:?}, routed as special/{}", day.name, day.slug());

    let mut pinned = TaskBoard::pinned(server.clone(), day.date);
    pinned.set_draft_title("Buy a gift");
    pinned.set_draft_description("something with flowers");
    pinned.submit_new_task().await;

    for notice in pinned.take_notices() {
        println!("! {}", notice);
    }
    for task in pinned.in_progress() {
        println!("    [ ] {} (due {})", task.title(), task.due_date());
    }
}
