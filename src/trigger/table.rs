use std::{any::Any, cell::RefCell, collections::HashMap, fmt, sync::Arc};

use dashmap::DashMap;

/// A type-erased callback. The payload arrives as `&dyn Any`.
pub type Callback = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Storage for callbacks keyed by event name.
pub trait CallbackTable {
    fn register_callback(&self, key: &str, callback: Callback);

    /// Snapshot of the callbacks registered under `key`, in registration
    /// order. Callbacks may register more callbacks while the snapshot runs.
    fn callbacks(&self, key: &str) -> Vec<Callback>;
}

/// Single-threaded callback table.
#[derive(Default)]
pub struct EventTable {
    callbacks: RefCell<HashMap<String, Vec<Callback>>>,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback_count(&self, key: &str) -> usize {
        self.callbacks.borrow().get(key).map_or(0, Vec::len)
    }
}

impl CallbackTable for EventTable {
    fn register_callback(&self, key: &str, callback: Callback) {
        self.callbacks
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push(callback);
    }

    fn callbacks(&self, key: &str) -> Vec<Callback> {
        self.callbacks
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}

impl fmt::Debug for EventTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTable")
            .field("events", &self.callbacks.borrow().len())
            .finish()
    }
}

/// Thread-safe callback table.
#[derive(Default, Clone)]
pub struct SharedEventTable {
    callbacks: Arc<DashMap<String, Vec<Callback>>>,
}

impl SharedEventTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback_count(&self, key: &str) -> usize {
        self.callbacks.get(key).map_or(0, |entry| entry.len())
    }
}

impl CallbackTable for SharedEventTable {
    fn register_callback(&self, key: &str, callback: Callback) {
        self.callbacks
            .entry(key.to_string())
            .or_default()
            .push(callback);
    }

    fn callbacks(&self, key: &str) -> Vec<Callback> {
        self.callbacks
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

impl fmt::Debug for SharedEventTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEventTable")
            .field("events", &self.callbacks.len())
            .finish()
    }
}
