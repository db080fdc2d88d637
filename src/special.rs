//! User-defined special days
//!
//! A special day is a named date outside the day/week/month cadence (a birthday, an
//! anniversary...) that gets its own pinned task board. The registry is an ordered,
//! append-only sequence persisted as a whole under the key `specialDays`.

use std::error::Error;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::traits::KeyValueStore;

/// The storage key the special days are persisted under
const SPECIAL_DAYS_KEY: &str = "specialDays";

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("the whitespace regex is valid"));

/// A user-named date with its own task board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialDay {
    pub name: String,
    pub date: NaiveDate,
}

impl SpecialDay {
    /// The routable identifier of this day (`special/{slug}`)
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Derive a routable slug from a display name: lowercase, with every whitespace run
/// replaced by a single hyphen. Other characters (apostrophes included) are kept as-is
pub fn slugify(name: &str) -> String {
    WHITESPACE_RE.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// The ordered list of special days, kept in sync with its backing store
#[derive(Debug)]
pub struct SpecialDayRegistry<K: KeyValueStore> {
    store: K,
    days: Vec<SpecialDay>,
}

impl<K: KeyValueStore> SpecialDayRegistry<K> {
    /// Create a registry. No day is loaded yet, see [`Self::init`]
    pub fn new(store: K) -> Self {
        Self { store, days: Vec::new() }
    }

    /// Populate the registry from the backing store (e.g. at startup).
    ///
    /// A corrupted persisted list is dropped with a warning: losing the shortcuts is
    /// harmless, the tasks themselves live on the server
    pub fn init(&mut self) -> Result<(), Box<dyn Error>> {
        match self.store.get(SPECIAL_DAYS_KEY)? {
            None => Ok(()),
            Some(text) => {
                match serde_json::from_str(&text) {
                    Ok(days) => {
                        self.days = days;
                        Ok(())
                    },
                    Err(err) => {
                        log::warn!("Ignoring invalid persisted special days: {}", err);
                        self.store.remove(SPECIAL_DAYS_KEY)
                    },
                }
            },
        }
    }

    /// Append a special day and persist the whole list.
    ///
    /// The name must be non-blank, and its derived slug must not collide with an
    /// existing one (slugs are routable identifiers, so a duplicate would make one
    /// of the two boards unreachable)
    pub fn add(&mut self, name: &str, date: NaiveDate) -> Result<SpecialDay, Box<dyn Error>> {
        if name.trim().is_empty() {
            return Err("Special day name is required.".into());
        }

        let slug = slugify(name);
        if self.days.iter().any(|day| day.slug() == slug) {
            return Err(format!("A special day with the slug {:?} already exists.", slug).into());
        }

        let day = SpecialDay { name: name.to_string(), date };
        self.days.push(day.clone());
        self.persist()?;
        log::info!("Registered special day {:?} ({})", day.name, day.date);
        Ok(day)
    }

    /// The full persisted sequence, in registration order
    pub fn days(&self) -> &[SpecialDay] {
        &self.days
    }

    /// Resolve a routable slug back to its special day
    pub fn find_by_slug(&self, slug: &str) -> Option<&SpecialDay> {
        self.days.iter().find(|day| day.slug() == slug)
    }

    fn persist(&mut self) -> Result<(), Box<dyn Error>> {
        let text = serde_json::to_string(&self.days)?;
        self.store.set(SPECIAL_DAYS_KEY, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn slugs_replace_whitespace_runs_and_keep_apostrophes() {
        assert_eq!(slugify("Mom's Birthday"), "mom's-birthday");
        assert_eq!(slugify("New   Year\tParty"), "new-year-party");
        assert_eq!(slugify("Graduation"), "graduation");
    }

    #[test]
    fn add_validates_and_appends_in_order() {
        let mut registry = SpecialDayRegistry::new(MemoryStore::new());

        assert!(registry.add("  ", date(2024, 7, 4)).is_err());
        assert!(registry.days().is_empty());

        registry.add("Mom's Birthday", date(2024, 7, 4)).unwrap();
        registry.add("Graduation", date(2024, 9, 1)).unwrap();
        assert_eq!(registry.days().len(), 2);
        assert_eq!(registry.days()[0].slug(), "mom's-birthday");

        let day = registry.find_by_slug("mom's-birthday").unwrap();
        assert_eq!(day.date, date(2024, 7, 4));
        assert_eq!(registry.find_by_slug("nobody"), None);
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let mut registry = SpecialDayRegistry::new(MemoryStore::new());
        registry.add("Mom's Birthday", date(2024, 7, 4)).unwrap();

        // Same slug, different spelling of the name
        assert!(registry.add("mom's   birthday", date(2025, 7, 4)).is_err());
        assert_eq!(registry.days().len(), 1);
    }

    #[test]
    fn the_whole_list_is_persisted_on_each_append() {
        let mut store = MemoryStore::new();
        {
            let mut registry = SpecialDayRegistry::new(&mut store);
            registry.add("Mom's Birthday", date(2024, 7, 4)).unwrap();
            registry.add("Graduation", date(2024, 9, 1)).unwrap();
        }

        let mut reloaded = SpecialDayRegistry::new(&mut store);
        reloaded.init().unwrap();
        assert_eq!(reloaded.days().len(), 2);
        assert_eq!(reloaded.days()[1].name, "Graduation");
    }
}
