//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The base URL of the remote task service (the part before `/todos/` and `/auth/`).
/// Feel free to override it when initing this library.
pub static API_BASE_URL: Lazy<Arc<Mutex<String>>> =
    Lazy::new(|| Arc::new(Mutex::new("https://api.mirmakhmudoff.uz/api".to_string())));

/// Returns the currently configured base URL
pub fn api_base_url() -> String {
    API_BASE_URL.lock().unwrap().clone()
}
