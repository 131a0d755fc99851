//! Persisted addresses.

use sofa_platform::store::KeyValueStore;

pub const HOME_ADDRESS_KEY: &str = "homeAddress";
pub const CURRENT_ADDRESS_KEY: &str = "currentAddress";

/// Typed access to the persisted home and current addresses. Reads that
/// fail are logged and read as unset; failed writes are logged.
pub struct Preferences<'s> {
    store: &'s mut dyn KeyValueStore,
}

impl<'s> Preferences<'s> {
    pub fn new(store: &'s mut dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Directory the user returns to with the back key.
    pub fn home_address(&self) -> Option<String> {
        self.read(HOME_ADDRESS_KEY)
    }

    pub fn set_home_address(&mut self, address: &str) {
        self.write(HOME_ADDRESS_KEY, address);
    }

    /// Last address the user opened.
    pub fn current_address(&self) -> Option<String> {
        self.read(CURRENT_ADDRESS_KEY)
    }

    pub fn set_current_address(&mut self, address: &str) {
        self.write(CURRENT_ADDRESS_KEY, address);
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                log::warn!("Cannot read {key}: {e}");
                None
            },
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        match self.store.set(key, value) {
            Ok(()) => log::debug!("Saved {key} = {value}"),
            Err(e) => log::warn!("Cannot save {key}: {e}"),
        }
    }
}
