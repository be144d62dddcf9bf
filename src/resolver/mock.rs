//! In-memory resolver for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{LookupError, Resolver};

/// Mock resolver backed by a static zone map.
///
/// Each instance plays the role of one independent upstream server, so a
/// consensus test builds one mock per simulated resolver and gives each its
/// own view of the zone. Lookups for names with no fixture return
/// [`LookupError::NotFound`]; timeouts and network failures can be injected
/// per name.
///
/// Ships as a normal module so integration tests can use it. Fixture maps are
/// read with `lock().unwrap()`: a poisoned lock means a fixture-building test
/// already panicked, and aborting the dependent test is the right outcome.
#[derive(Clone, Default)]
pub struct MockResolver {
    txt_records: Arc<Mutex<HashMap<String, Vec<String>>>>,
    cname_records: Arc<Mutex<HashMap<String, String>>>,
    timeouts: Arc<Mutex<Vec<String>>>,
    network_errors: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
    /// Creates an empty mock with no zones configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers TXT records for `name`.
    pub fn add_txt(&self, name: &str, records: Vec<String>) {
        self.txt_records
            .lock()
            .unwrap()
            .insert(name.to_string(), records);
    }

    /// Registers a CNAME record for `name`.
    pub fn add_cname(&self, name: &str, target: &str) {
        self.cname_records
            .lock()
            .unwrap()
            .insert(name.to_string(), target.to_string());
    }

    /// Makes every lookup for `name` fail with [`LookupError::Timeout`].
    pub fn set_timeout(&self, name: &str) {
        self.timeouts.lock().unwrap().push(name.to_string());
    }

    /// Makes every lookup for `name` fail with [`LookupError::Network`].
    pub fn set_network_error(&self, name: &str) {
        self.network_errors.lock().unwrap().push(name.to_string());
    }

    fn injected_failure(&self, name: &str) -> Option<LookupError> {
        if self.timeouts.lock().unwrap().iter().any(|n| n == name) {
            return Some(LookupError::Timeout);
        }
        if self.network_errors.lock().unwrap().iter().any(|n| n == name) {
            return Some(LookupError::Network("injected failure".to_string()));
        }
        None
    }
}

impl Resolver for MockResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        if let Some(e) = self.injected_failure(name) {
            return Err(e);
        }
        self.txt_records
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or(LookupError::NotFound)
    }

    async fn lookup_cname(&self, name: &str) -> Result<String, LookupError> {
        if let Some(e) = self.injected_failure(name) {
            return Err(e);
        }
        self.cname_records
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}
