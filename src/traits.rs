use std::error::Error;

use async_trait::async_trait;

use crate::task::{NewTask, Task, TaskId, TaskStatus};

/// A source of tasks, usually the remote HTTP service.
///
/// A [`TaskBoard`](crate::board::TaskBoard) only talks to its source through this trait,
/// so boards can be driven against a [`MockServer`](crate::mock::MockServer) in tests.
#[async_trait]
pub trait TaskSource {
    /// Whether this source currently holds a credential.
    ///
    /// When this is false, no request must be sent: callers short-circuit client-side
    fn is_authenticated(&self) -> bool;

    /// Returns the whole task collection of the authenticated user.
    /// This may be a long process, and it can fail (e.g. in case of a remote server)
    async fn fetch_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>>;

    /// Creates a task. The server assigns the id; the caller learns about the new
    /// task at the next [`fetch_tasks`](Self::fetch_tasks)
    async fn create_task(&self, new_task: &NewTask) -> Result<(), Box<dyn Error>>;

    /// Updates the status of a task, and nothing else
    async fn set_status(&self, id: TaskId, status: TaskStatus) -> Result<(), Box<dyn Error>>;

    /// Removes a task
    async fn delete_task(&self, id: TaskId) -> Result<(), Box<dyn Error>>;
}

/// A persistent key-value store.
///
/// The session (key `user`) and the special days (key `specialDays`) live in such a
/// store. Keeping this behind a trait makes the persistence backend swappable, and
/// testable without a real storage medium.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or None
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
    /// Removes `key` and its value. Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for &mut K {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        (**self).get(key)
    }
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        (**self).set(key, value)
    }
    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        (**self).remove(key)
    }
}
