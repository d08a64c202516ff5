//! Shared state of the web front-end.

use std::sync::Arc;

use crate::application::{DecodeWorkflow, MappingListCache, ShortenWorkflow, StatisticsWorkflow};
use crate::domain::ShortenerGateway;

/// Controllers shared by every handler.
///
/// The front-end serves a single user, so one instance of each workflow is
/// shared by all requests. The mapping list cache is injected into the two
/// mutating workflows.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ShortenerGateway>,
    pub cache: Arc<MappingListCache>,
    pub shorten: Arc<ShortenWorkflow>,
    pub decode: Arc<DecodeWorkflow>,
    pub statistics: Arc<StatisticsWorkflow>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ShortenerGateway>) -> Self {
        let cache = Arc::new(MappingListCache::new(gateway.clone()));
        let shorten = Arc::new(ShortenWorkflow::new(gateway.clone(), cache.clone()));
        let decode = Arc::new(DecodeWorkflow::new(gateway.clone(), cache.clone()));
        let statistics = Arc::new(StatisticsWorkflow::new(gateway.clone()));

        Self {
            gateway,
            cache,
            shorten,
            decode,
            statistics,
        }
    }
}
