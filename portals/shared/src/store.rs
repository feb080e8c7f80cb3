//! Key-value store capability.
//!
//! Both portals persist their state as JSON documents under named string
//! keys. The store is injected at construction so tests and demos can run
//! against [`MemoryStore`] while a browser host backs it with local storage.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PortalResult;

/// Store key constants. One JSON document per key, flat namespace.
pub mod keys {
    /// Authenticated session user, shared by both portals.
    pub const CURRENT_USER: &str = "currentUser";
    /// Doctor-owned schedule map, date -> ordered time slots.
    pub const DOCTOR_SCHEDULE: &str = "doctor_schedule";
    /// Doctor-owned patient roster.
    pub const DOCTOR_PATIENTS: &str = "doctor_patients";
    /// Doctor-owned appointment list.
    pub const DOCTOR_APPOINTMENTS: &str = "doctor_appointments";
    /// Patient-owned appointment list.
    pub const PATIENT_APPOINTMENTS: &str = "patient_appointments";
    /// Shared doctor directory. Written by the patient portal only.
    pub const DOCTORS: &str = "doctors";
}

/// Durable string-keyed blob store. Reads and writes are synchronous and
/// atomic at single-key granularity; there are no cross-key transactions.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&mut self, key: &str, value: String) -> PortalResult<()>;
    fn remove(&mut self, key: &str);

    fn contains(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }
}

/// Read and deserialize the document under `key`. Absent keys are `None`;
/// a present but undecodable document is a storage error.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> PortalResult<Option<T>> {
    match store.get_raw(key) {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and write it under `key`.
pub fn set_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> PortalResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set_raw(key, raw)
}

/// In-memory store used in tests and demos, standing in for the browser
/// profile's local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: String) -> PortalResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
