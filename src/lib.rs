//! This crate provides the client-side machinery of a personal task manager.
//!
//! All data lives on a remote REST service; this crate provides an HTTP client for it
//! in the [`client`] module, that can be used as a stand-alone module.
//!
//! On top of the client, a [`TaskBoard`](board::TaskBoard) holds the view state of one
//! screen: the fetched task collection, a calendar window computed by the [`window`]
//! module (a day, a week, or a month with a scrollable visible slice), the selected
//! date, and the pending new-task form. The consistency model is deliberately simple:
//! after every successful mutation the whole collection is re-fetched, so the board
//! never has to merge anything.
//!
//! The current user's [`Session`](session::Session) and the user-defined
//! [`SpecialDay`](special::SpecialDay) shortcuts persist in a small key-value
//! [`storage`] backend behind a trait, so tests can swap in an in-memory store.

pub mod traits;

mod task;
pub use task::{NewTask, Task, TaskId, TaskStatus};
pub mod window;
pub use window::{DateWindow, ViewMode};
pub mod board;
pub use board::TaskBoard;

pub mod client;
pub use client::Client;
pub mod auth;
pub mod session;
pub use session::{Session, SessionStore};
pub mod special;
pub use special::{SpecialDay, SpecialDayRegistry};
pub mod storage;
pub mod feedback;
pub use feedback::{Notice, NoticeLevel};
pub mod mock;

pub mod config;
