use juju_cve_audit::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock ReferenceDataProvider serving tracker databases from memory
///
/// Series without a database fail like an unreachable download would.
#[derive(Default)]
pub struct MockReferenceDataProvider {
    databases: HashMap<String, String>,
    fetches: RefCell<Vec<String>>,
}

impl MockReferenceDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, series: &str, json: &str) -> Self {
        self.databases.insert(series.to_string(), json.to_string());
        self
    }

    /// Series fetched so far, in call order
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.borrow().clone()
    }
}

impl ReferenceDataProvider for MockReferenceDataProvider {
    type Data = UctDatabase;

    fn fetch(&self, series: &str) -> Result<Arc<UctDatabase>> {
        self.fetches.borrow_mut().push(series.to_string());
        let json = self
            .databases
            .get(series)
            .ok_or_else(|| anyhow::anyhow!("no reference data for series {}", series))?;
        Ok(Arc::new(serde_json::from_str(json)?))
    }
}

impl ReferenceDataProvider for &MockReferenceDataProvider {
    type Data = UctDatabase;

    fn fetch(&self, series: &str) -> Result<Arc<UctDatabase>> {
        (**self).fetch(series)
    }
}
