//! In-memory `eframe::Storage` for tests.

use std::collections::HashMap;

/// Key-value storage kept in a map; `flush` counts calls.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// Stored strings by key
    pub values: HashMap<String, String>,
    /// Number of `flush` calls
    pub flushes: usize,
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
