//! Page-side integration: whether to play the intro at all, and which view
//! is showing.
//!
//! The "seen before" flag lives in session-scoped storage owned by the page.
//! It is read once, on load, before any sequencer exists.

use std::collections::HashMap;

/// Key under which the page records that the intro has been shown.
pub const SEEN_KEY: &str = "hasSeenIntro";

/// How the page reads the stored flag: any non-empty value counts as seen.
#[must_use]
pub fn is_seen(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Session-scoped string storage, e.g. the browser's `sessionStorage`.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for native hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum View {
    Intro,
    Main,
}

/// The page shell: shows the intro on the first visit of a session and the
/// main content afterwards.
#[derive(Debug)]
pub struct Page<S> {
    store: S,
    view: View,
}

impl<S: SessionStore> Page<S> {
    #[must_use]
    pub fn load(store: S) -> Self {
        let view = if is_seen(store.get(SEEN_KEY).as_deref()) {
            View::Main
        } else {
            View::Intro
        };
        Self { store, view }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn shows_intro(&self) -> bool {
        self.view == View::Intro
    }

    /// Completion handler for the sequencer, also reached through skip.
    pub fn intro_complete(&mut self) {
        self.view = View::Main;
        self.store.set(SEEN_KEY, "true");
    }

    /// Give the store back, e.g. to reload the page in the same session.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
