//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::Record;
use crate::sources::{Source, SourceError};

/// A mock source that returns predefined records.
#[derive(Debug, Default)]
pub struct MockSource {
    id: String,
    records: Mutex<Vec<Record>>,
    fail: bool,
}

impl MockSource {
    /// Create a mock source with the given id and canned records.
    pub fn new(id: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            id: id.into(),
            records: Mutex::new(records),
            fail: false,
        }
    }

    /// Create a mock source whose search always fails.
    pub fn failing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        if self.fail {
            return Err(SourceError::Other("mock failure".to_string()));
        }
        let guard = self.records.lock().unwrap();
        Ok(guard.iter().take(limit).cloned().collect())
    }
}
