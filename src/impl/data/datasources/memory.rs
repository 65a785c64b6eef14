use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::records_datasource::{RecordFilter, RecordsDatasource};
use crate::data::models::field::FieldResolver;
use crate::errors::LedgerError;

const DATE: FieldResolver =
    FieldResolver::new(&["date_issued", "date", "date_created", "filed_date"]);
const YEAR: FieldResolver = FieldResolver::new(&["year"]);
const SCOPE: FieldResolver = FieldResolver::new(&["owner_company"]);
const ID: FieldResolver = FieldResolver::new(&["id"]);

/// In-memory record backend. Used by the integration tests and as a demo
/// collaborator; supports per-collection failure injection to exercise the
/// engine's fault isolation.
#[derive(Default)]
pub struct MemoryRecordsDatasource {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryRecordsDatasource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        self.collections
            .lock()
            .expect("memory datasource poisoned")
            .entry(collection.to_string())
            .or_default()
            .extend(records);
    }

    /// Makes every call against `collection` fail until cleared.
    pub fn fail_collection(&self, collection: &str) {
        self.failing
            .lock()
            .expect("memory datasource poisoned")
            .insert(collection.to_string());
    }

    pub fn clear_failure(&self, collection: &str) {
        self.failing
            .lock()
            .expect("memory datasource poisoned")
            .remove(collection);
    }

    /// Current contents of a collection, for assertions.
    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .expect("memory datasource poisoned")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self, collection: &str) -> Result<(), LedgerError> {
        if self
            .failing
            .lock()
            .expect("memory datasource poisoned")
            .contains(collection)
        {
            return Err(LedgerError::fetch(collection, "simulated outage"));
        }
        Ok(())
    }

    fn matches(record: &Value, filter: &RecordFilter) -> bool {
        if let Some(scope) = &filter.scope {
            if SCOPE.string(record).as_deref() != Some(scope.as_str()) {
                return false;
            }
        }
        if let Some((start, end)) = filter.date_range {
            match DATE.datetime(record) {
                Some(dt) => {
                    let date = dt.date();
                    if date < start || date > end {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some(year) = filter.year {
            if YEAR.number(record).map(|y| y as i32) != Some(year) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl RecordsDatasource for MemoryRecordsDatasource {
    async fn list(
        &self,
        collection: &str,
        filter: &RecordFilter,
    ) -> Result<Vec<Value>, LedgerError> {
        self.check_available(collection)?;
        Ok(self
            .records(collection)
            .into_iter()
            .filter(|r| Self::matches(r, filter))
            .collect())
    }

    async fn create(&self, collection: &str, mut item: Value) -> Result<(), LedgerError> {
        self.check_available(collection)?;
        let Some(fields) = item.as_object_mut() else {
            return Err(LedgerError::invalid_record(collection, "record is not an object"));
        };
        let mut collections = self.collections.lock().expect("memory datasource poisoned");
        let records = collections.entry(collection.to_string()).or_default();
        if !fields.contains_key("id") {
            fields.insert(
                "id".to_string(),
                Value::String(format!("{}-{}", collection, records.len() + 1)),
            );
        }
        records.push(item);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, mut item: Value) -> Result<(), LedgerError> {
        self.check_available(collection)?;
        let Some(fields) = item.as_object_mut() else {
            return Err(LedgerError::invalid_record(collection, "record is not an object"));
        };
        fields.insert("id".to_string(), Value::String(id.to_string()));
        let mut collections = self.collections.lock().expect("memory datasource poisoned");
        let records = collections.entry(collection.to_string()).or_default();
        match records
            .iter_mut()
            .find(|r| ID.string(r).as_deref() == Some(id))
        {
            Some(existing) => {
                *existing = item;
                Ok(())
            }
            None => Err(LedgerError::invalid_record(
                collection,
                format!("no record with id '{}'", id),
            )),
        }
    }
}
