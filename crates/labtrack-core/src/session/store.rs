//! Pluggable key-value persistence for sessions.
//!
//! The web UI backs this with browser local storage; tests and desktop
//! shells use the in-memory implementation.

use std::collections::HashMap;

/// Persisted session keys.
pub mod keys {
    /// Staff bearer token
    pub const TOKEN: &str = "token";
    /// Staff user object, JSON
    pub const USER: &str = "user";
    /// Patient bearer token
    pub const PATIENT_TOKEN: &str = "patientToken";
    /// Patient id
    pub const PATIENT_ID: &str = "patientId";
    /// Patient object, JSON
    pub const PATIENT_DATA: &str = "patientData";

    /// Every key cleared on logout.
    pub const ALL: [&str; 5] = [TOKEN, USER, PATIENT_TOKEN, PATIENT_ID, PATIENT_DATA];
}

/// String key-value store holding persisted session state.
pub trait SessionStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&mut self, key: &str, value: &str);
    /// Delete a value.
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get(keys::TOKEN).is_none());

        store.set(keys::TOKEN, "abc");
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("abc"));

        store.remove(keys::TOKEN);
        assert!(store.get(keys::TOKEN).is_none());
    }
}
