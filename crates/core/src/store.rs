use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Called with `(key, old_value, new_value)` whenever a value is set.
pub type Subscriber = Box<dyn Fn(&str, Option<&Value>, &Value) + Send + Sync>;

/// String-keyed value store with change tracking, used in place of struct fields
/// by generated models.
pub trait BackingStore: Send + Sync {
    fn get(&self, key: &str) -> Option<&Value>;
    fn set(&mut self, key: &str, value: Value);
    fn enumerate(&self) -> Vec<(String, Value)>;
    fn enumerate_keys_for_values_changed_to_null(&self) -> Vec<String>;
    fn subscribe(&mut self, id: String, callback: Subscriber);
    fn unsubscribe(&mut self, id: &str) -> bool;
    fn clear(&mut self);
    fn initialization_completed(&self) -> bool;
    fn set_initialization_completed(&mut self, completed: bool);
    fn return_only_changed_values(&self) -> bool;
    fn set_return_only_changed_values(&mut self, only_changed: bool);
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    dirty: bool,
    value: Value,
}

pub struct InMemoryBackingStore {
    entries: BTreeMap<String, Entry>,
    subscribers: BTreeMap<String, Subscriber>,
    initialization_completed: bool,
    return_only_changed_values: bool,
}

impl InMemoryBackingStore {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            subscribers: BTreeMap::new(),
            initialization_completed: true,
            return_only_changed_values: false,
        }
    }

    /// Dirty entries regardless of `return_only_changed_values`.
    pub fn changed_entries(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .filter(|(_, e)| e.dirty)
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect()
    }

    /// Every stored entry regardless of `return_only_changed_values`.
    pub fn all_entries(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_dirty(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| e.dirty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryBackingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryBackingStore {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            subscribers: BTreeMap::new(),
            initialization_completed: self.initialization_completed,
            return_only_changed_values: self.return_only_changed_values,
        }
    }
}

impl fmt::Debug for InMemoryBackingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBackingStore")
            .field("entries", &self.entries)
            .field("subscribers", &self.subscribers.len())
            .field("initialization_completed", &self.initialization_completed)
            .field("return_only_changed_values", &self.return_only_changed_values)
            .finish()
    }
}

impl BackingStore for InMemoryBackingStore {
    fn get(&self, key: &str) -> Option<&Value> {
        let entry = self.entries.get(key)?;
        if self.return_only_changed_values && !entry.dirty {
            return None;
        }
        Some(&entry.value)
    }

    fn set(&mut self, key: &str, value: Value) {
        // Writing back the value already held leaves a clean entry clean.
        let unchanged = self
            .entries
            .get(key)
            .is_some_and(|e| !e.dirty && e.value == value);
        let entry = Entry {
            dirty: self.initialization_completed && !unchanged,
            value,
        };
        let old = self.entries.insert(key.to_string(), entry);
        if self.subscribers.is_empty() {
            return;
        }
        let new = &self.entries[key].value;
        for callback in self.subscribers.values() {
            callback(key, old.as_ref().map(|e| &e.value), new);
        }
    }

    fn enumerate(&self) -> Vec<(String, Value)> {
        if self.return_only_changed_values {
            self.changed_entries()
        } else {
            self.all_entries()
        }
    }

    fn enumerate_keys_for_values_changed_to_null(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.dirty && e.value.is_null())
            .map(|(k, _)| k.clone())
            .collect()
    }

    fn subscribe(&mut self, id: String, callback: Subscriber) {
        self.subscribers.insert(id, callback);
    }

    fn unsubscribe(&mut self, id: &str) -> bool {
        self.subscribers.remove(id).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn initialization_completed(&self) -> bool {
        self.initialization_completed
    }

    fn set_initialization_completed(&mut self, completed: bool) {
        self.initialization_completed = completed;
        for entry in self.entries.values_mut() {
            entry.dirty = !completed;
        }
    }

    fn return_only_changed_values(&self) -> bool {
        self.return_only_changed_values
    }

    fn set_return_only_changed_values(&mut self, only_changed: bool) {
        self.return_only_changed_values = only_changed;
    }
}
