//! The identity of the current user
//!
//! Rather than an ambient singleton, the session lives in an explicit
//! [`SessionStore`] that is handed to whatever needs the identity. It is backed by a
//! [`KeyValueStore`] under the key `user`, so a session survives a restart.

use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::traits::KeyValueStore;

/// The storage key the session is persisted under
const USER_KEY: &str = "user";

/// An authenticated user and their bearer credential
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Holds the current session, if any, and keeps the backing store in sync with it
#[derive(Debug)]
pub struct SessionStore<K: KeyValueStore> {
    store: K,
    current: Option<Session>,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// Create a session store. No session is loaded yet, see [`Self::init`]
    pub fn new(store: K) -> Self {
        Self { store, current: None }
    }

    /// Populate the current session from the backing store (e.g. at startup).
    ///
    /// A corrupted persisted session is dropped with a warning rather than
    /// propagated: the user simply has to log in again
    pub fn init(&mut self) -> Result<(), Box<dyn Error>> {
        match self.store.get(USER_KEY)? {
            None => Ok(()),
            Some(text) => {
                match serde_json::from_str(&text) {
                    Ok(session) => {
                        self.current = Some(session);
                        Ok(())
                    },
                    Err(err) => {
                        log::warn!("Ignoring invalid persisted session: {}", err);
                        self.store.remove(USER_KEY)
                    },
                }
            },
        }
    }

    /// Make `session` the current session and persist it
    pub fn log_in(&mut self, session: Session) -> Result<(), Box<dyn Error>> {
        let text = serde_json::to_string(&session)?;
        self.store.set(USER_KEY, &text)?;
        self.current = Some(session);
        Ok(())
    }

    /// Clear the current session and remove it from the backing store
    pub fn log_out(&mut self) -> Result<(), Box<dyn Error>> {
        self.current = None;
        self.store.remove(USER_KEY)
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The bearer token of the current session, or None when unauthenticated
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }
}
