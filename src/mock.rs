//! An in-memory stand-in for the remote task service
//!
//! [`MockServer`] implements [`TaskSource`] over a shared in-memory collection, records
//! every request it receives, and can be told to fail on demand through
//! [`MockBehaviour`]. Integration tests drive a [`TaskBoard`](crate::board::TaskBoard)
//! against it instead of a real server.

use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::task::{NewTask, Task, TaskId, TaskStatus};
use crate::traits::TaskSource;

/// A request the mock server received, as seen on the wire
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedRequest {
    FetchTasks,
    CreateTask(NewTask),
    SetStatus(TaskId, TaskStatus),
    DeleteTask(TaskId),
}

/// This stores some behaviour tweaks, that describe how a mocked server will behave
/// during a given test
///
/// So that an operation fails _n_ times after _m_ initial successes, set `(m, n)` for
/// the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub fetch_tasks_behaviour: (u32, u32),
    pub create_task_behaviour: (u32, u32),
    pub set_status_behaviour: (u32, u32),
    pub delete_task_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            fetch_tasks_behaviour: (0, n_fails),
            create_task_behaviour: (0, n_fails),
            set_status_behaviour: (0, n_fails),
            delete_task_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch_tasks(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_tasks_behaviour, "fetch_tasks")
    }
    pub fn can_create_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_task_behaviour, "create_task")
    }
    pub fn can_set_status(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.set_status_behaviour, "set_status")
    }
    pub fn can_delete_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_task_behaviour, "delete_task")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 = value.1 - 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MockState {
    tasks: Vec<Task>,
    next_id: TaskId,
    requests: Vec<RecordedRequest>,
    behaviour: MockBehaviour,
    authenticated: bool,
}

/// A task source backed by memory instead of a server.
///
/// Clones share the same underlying state, so a test can keep a handle for
/// assertions while a board owns another one
#[derive(Clone, Debug)]
pub struct MockServer {
    state: Arc<Mutex<MockState>>,
}

impl MockServer {
    /// An empty, authenticated mock server
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                next_id: 1,
                authenticated: true,
                ..MockState::default()
            })),
        }
    }

    /// A mock server holding no credential: every call short-circuits
    pub fn logged_out() -> Self {
        let mock = Self::new();
        mock.set_authenticated(false);
        mock
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.state.lock().unwrap().authenticated = authenticated;
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        self.state.lock().unwrap().behaviour = behaviour;
    }

    /// Put a task in the collection without going through the API, returning its id
    pub fn seed_task(&self, title: &str, description: &str, status: TaskStatus, due_date: NaiveDate) -> TaskId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.tasks.push(Task::new(id, title.to_string(), description.to_string(), status, due_date));
        id
    }

    /// The current server-side collection
    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    /// How many full fetches have been requested
    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().requests.iter()
            .filter(|req| **req == RecordedRequest::FetchTasks)
            .count()
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskSource for MockServer {
    fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().authenticated
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest::FetchTasks);
        state.behaviour.can_fetch_tasks()?;
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<(), Box<dyn Error>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest::CreateTask(new_task.clone()));
        state.behaviour.can_create_task()?;

        let id = state.next_id;
        state.next_id += 1;
        state.tasks.push(Task::new(
            id,
            new_task.title.clone(),
            new_task.description.clone(),
            new_task.status,
            new_task.due_date,
        ));
        Ok(())
    }

    async fn set_status(&self, id: TaskId, status: TaskStatus) -> Result<(), Box<dyn Error>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest::SetStatus(id, status));
        state.behaviour.can_set_status()?;

        match state.tasks.iter_mut().find(|task| task.id() == id) {
            Some(task) => {
                task.set_status(status);
                Ok(())
            },
            None => Err(format!("No task with id {}", id).into()),
        }
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), Box<dyn Error>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest::DeleteTask(id));
        state.behaviour.can_delete_task()?;

        let len_before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == len_before {
            return Err(format!("No task with id {}", id).into());
        }
        Ok(())
    }
}
