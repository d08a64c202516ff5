//! Shared cache of the service's mapping list.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::ShortenerGateway;
use crate::domain::entities::Mapping;
use crate::error::ClientError;

/// How the cached list should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    /// A refresh is in flight.
    Loading,
    /// The last refresh succeeded.
    Fresh,
    /// The last refresh failed; the previous list is still shown.
    Stale,
    /// Nothing has been loaded yet.
    Empty,
}

/// Point-in-time view of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingListSnapshot {
    pub mappings: Vec<Mapping>,
    pub is_loading: bool,
    /// Error of the most recent refresh, cleared by the next success.
    pub error: Option<ClientError>,
    /// Time of the last successful refresh.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl MappingListSnapshot {
    pub fn status(&self) -> CacheStatus {
        if self.is_loading {
            CacheStatus::Loading
        } else if self.error.is_some() {
            CacheStatus::Stale
        } else if self.refreshed_at.is_some() {
            CacheStatus::Fresh
        } else {
            CacheStatus::Empty
        }
    }
}

/// Most recently fetched list of mappings.
///
/// Written only by [`MappingListCache::refresh`], which replaces the list
/// wholesale. A failed refresh keeps the previous list visible and records
/// the error next to it. Overlapping refreshes are tagged like workflow
/// dispatches: the list from the latest started refresh wins.
pub struct MappingListCache {
    gateway: Arc<dyn ShortenerGateway>,
    state: watch::Sender<MappingListSnapshot>,
    latest: AtomicU64,
}

impl MappingListCache {
    pub fn new(gateway: Arc<dyn ShortenerGateway>) -> Self {
        Self {
            gateway,
            state: watch::Sender::new(MappingListSnapshot::default()),
            latest: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MappingListSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MappingListSnapshot> {
        self.state.subscribe()
    }

    /// Re-fetches the full list from the service.
    ///
    /// Returns the number of mappings now cached.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the error is also recorded on the cache.
    pub async fn refresh(&self) -> Result<usize, ClientError> {
        let generation = self.begin();
        self.finish(generation).await
    }

    /// Starts a refresh in the background and returns immediately.
    ///
    /// The cache enters the loading state before this returns. The outcome is
    /// only observable through the cache itself.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let generation = self.begin();
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let _ = cache.finish(generation).await;
        })
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            snapshot.is_loading = true;
        });
        generation
    }

    async fn finish(&self, generation: u64) -> Result<usize, ClientError> {
        let outcome = self.gateway.list_mappings().await;

        let count = outcome.as_ref().map(Vec::len).map_err(ClientError::clone);
        match &count {
            Ok(count) => debug!(count, "Mapping list refreshed"),
            Err(e) => warn!(error = %e, "Mapping list refresh failed, keeping previous list"),
        }

        self.state.send_if_modified(|snapshot| {
            if self.latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "Discarding superseded mapping list");
                return false;
            }

            snapshot.is_loading = false;
            match outcome {
                Ok(mappings) => {
                    snapshot.mappings = mappings;
                    snapshot.error = None;
                    snapshot.refreshed_at = Some(Utc::now());
                }
                Err(error) => snapshot.error = Some(error),
            }
            true
        });

        count
    }

    /// Loads the list once at startup, logging the outcome.
    pub async fn initial_load(&self) {
        match self.refresh().await {
            Ok(count) => info!(count, "Initial mapping list loaded"),
            Err(e) => warn!(error = %e, "Initial mapping list load failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateway::MockShortenerGateway;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// Answers list calls in call order, each one once the test releases it.
    #[derive(Default)]
    struct QueuedListGateway {
        replies: Mutex<VecDeque<oneshot::Receiver<Vec<Mapping>>>>,
    }

    impl QueuedListGateway {
        fn queue(&self) -> oneshot::Sender<Vec<Mapping>> {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().unwrap().push_back(rx);
            tx
        }
    }

    #[async_trait]
    impl ShortenerGateway for QueuedListGateway {
        async fn list_mappings(&self) -> Result<Vec<Mapping>, ClientError> {
            let rx = self.replies.lock().unwrap().pop_front();
            match rx {
                Some(rx) => rx
                    .await
                    .map_err(|_| ClientError::transport("reply dropped")),
                None => Err(ClientError::transport("no reply queued")),
            }
        }

        async fn shorten(&self, _url: &str) -> Result<String, ClientError> {
            Err(ClientError::transport("unused"))
        }

        async fn decode(&self, _short_code: &str) -> Result<String, ClientError> {
            Err(ClientError::transport("unused"))
        }

        async fn resolve(&self, _short_code: &str) -> Result<String, ClientError> {
            Err(ClientError::transport("unused"))
        }

        async fn statistics(&self, _short_code: &str) -> Result<Mapping, ClientError> {
            Err(ClientError::transport("unused"))
        }
    }

    fn mapping(code: &str) -> Mapping {
        Mapping::new(
            format!("https://example.com/{code}"),
            format!("http://localhost:7000/{code}"),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_refresh_replaces_list() {
        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_list_mappings()
            .times(1)
            .returning(|| Ok(vec![mapping("a"), mapping("b")]));

        let cache = MappingListCache::new(Arc::new(gateway));
        assert_eq!(cache.snapshot().status(), CacheStatus::Empty);

        let count = cache.refresh().await.unwrap();
        let snapshot = cache.snapshot();

        assert_eq!(count, 2);
        assert_eq!(snapshot.mappings.len(), 2);
        assert_eq!(snapshot.mappings[0].short_url, "http://localhost:7000/a");
        assert_eq!(snapshot.status(), CacheStatus::Fresh);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let mut gateway = MockShortenerGateway::new();
        let mut calls = 0;
        gateway.expect_list_mappings().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![mapping("a"), mapping("b"), mapping("c")])
            } else {
                Err(ClientError::transport("Failed to fetch URLs"))
            }
        });

        let cache = MappingListCache::new(Arc::new(gateway));
        cache.refresh().await.unwrap();

        let result = cache.refresh().await;
        let snapshot = cache.snapshot();

        assert_eq!(result, Err(ClientError::transport("Failed to fetch URLs")));
        assert_eq!(snapshot.mappings.len(), 3);
        assert_eq!(snapshot.status(), CacheStatus::Stale);
        assert_eq!(
            snapshot.error.map(|e| e.to_string()).as_deref(),
            Some("Failed to fetch URLs")
        );
        assert!(snapshot.refreshed_at.is_some());
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let mut gateway = MockShortenerGateway::new();
        let mut calls = 0;
        gateway.expect_list_mappings().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Err(ClientError::transport("Failed to fetch URLs"))
            } else {
                Ok(vec![mapping("a")])
            }
        });

        let cache = MappingListCache::new(Arc::new(gateway));
        assert!(cache.refresh().await.is_err());
        assert!(cache.snapshot().mappings.is_empty());

        cache.refresh().await.unwrap();
        let snapshot = cache.snapshot();

        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.status(), CacheStatus::Fresh);
    }

    #[tokio::test]
    async fn test_spawn_refresh_marks_loading_immediately() {
        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_list_mappings()
            .times(1)
            .returning(|| Ok(vec![mapping("a")]));

        let cache = Arc::new(MappingListCache::new(Arc::new(gateway)));
        let handle = cache.spawn_refresh();

        assert_eq!(cache.snapshot().status(), CacheStatus::Loading);

        handle.await.unwrap();
        assert_eq!(cache.snapshot().status(), CacheStatus::Fresh);
    }

    #[tokio::test]
    async fn test_latest_started_refresh_wins() {
        let gateway = Arc::new(QueuedListGateway::default());
        let first_reply = gateway.queue();
        let second_reply = gateway.queue();

        let cache = Arc::new(MappingListCache::new(gateway.clone()));
        let first = cache.spawn_refresh();
        let second = cache.spawn_refresh();

        second_reply.send(vec![mapping("new")]).unwrap();
        second.await.unwrap();

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.status(), CacheStatus::Fresh);
        assert_eq!(snapshot.mappings[0].short_url, "http://localhost:7000/new");

        first_reply
            .send(vec![mapping("old-a"), mapping("old-b")])
            .unwrap();
        first.await.unwrap();

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.mappings.len(), 1);
        assert_eq!(snapshot.mappings[0].short_url, "http://localhost:7000/new");
        assert_eq!(snapshot.status(), CacheStatus::Fresh);
    }
}
