use crate::ports::outbound::ReferenceDataProvider;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingReferenceDataProvider wraps a ReferenceDataProvider and memoizes
/// the data per release series for the lifetime of the process.
///
/// Failed fetches are not cached.
pub struct CachingReferenceDataProvider<P: ReferenceDataProvider> {
    inner: P,
    cache: DashMap<String, Arc<P::Data>>,
}

impl<P: ReferenceDataProvider> CachingReferenceDataProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    /// Number of series held in memory
    pub fn cached_series(&self) -> usize {
        self.cache.len()
    }
}

impl<P: ReferenceDataProvider> ReferenceDataProvider for CachingReferenceDataProvider<P> {
    type Data = P::Data;

    fn fetch(&self, series: &str) -> Result<Arc<P::Data>> {
        if let Some(cached) = self.cache.get(series) {
            return Ok(Arc::clone(cached.value()));
        }

        let data = self.inner.fetch(series)?;
        self.cache.insert(series.to_string(), Arc::clone(&data));
        Ok(data)
    }
}
