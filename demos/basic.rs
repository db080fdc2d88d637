//! Signs in against the real service and prints today's board.
//!
//! Run with `TASKBOARD_EMAIL=... TASKBOARD_PASSWORD=... cargo run --example basic`

use std::path::Path;

use taskboard::auth::AuthClient;
use taskboard::storage::FileStore;
use taskboard::{Client, SessionStore, TaskBoard, ViewMode};

const STORE_FILE: &str = "taskboard-store.json";

#[tokio::main]
async fn main() {
    env_logger::init();

    let store_path = Path::new(STORE_FILE);
    let store = match FileStore::from_file(store_path) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("Invalid store file: {}. Using a default store", err);
            FileStore::new(store_path)
        },
    };

    let mut sessions = SessionStore::new(store);
    sessions.init().unwrap();

    if sessions.current().is_none() {
        let email = std::env::var("TASKBOARD_EMAIL").expect("TASKBOARD_EMAIL is not set");
        let password = std::env::var("TASKBOARD_PASSWORD").expect("TASKBOARD_PASSWORD is not set");

        let auth = AuthClient::with_default_url().unwrap();
        let session = auth.sign_in(&email, &password).await.unwrap();
        println!("Signed in as {} <{}>", session.name, session.email);
        sessions.log_in(session).unwrap();
    }

    let client = Client::with_default_url(sessions.token().map(String::from)).unwrap();
    let mut board = TaskBoard::new(client, ViewMode::Day);
    board.load().await;

    for notice in board.take_notices() {
        println!("! {}", notice);
    }

    println!("---- {} ----", board.selected_date());
    println!("In progress:");
    for task in board.in_progress() {
        println!("    [ ] {}\t{}", task.title(), task.description());
    }
    println!("Done:");
    for task in board.done() {
        println!("    [x] {}\t{}", task.title(), task.description());
    }
}
