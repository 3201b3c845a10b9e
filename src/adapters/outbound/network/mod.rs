/// Reference data adapters for vulnerability databases
mod caching_reference_data;
mod reference_data_client;

pub use caching_reference_data::CachingReferenceDataProvider;
pub use reference_data_client::{
    ReferenceDataClient, DEFAULT_REFERENCE_DATA_URL, SERIES_PLACEHOLDER,
};
