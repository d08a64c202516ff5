//! User-initiated request workflows.
//!
//! Each workflow owns one [`WorkflowState`] and moves it through
//! `Idle → Pending → {Resolved, Failed}`. Workflows never touch each other's
//! state, so they can be dispatched concurrently. Dispatching the same
//! workflow again while a request is in flight is allowed; the earlier
//! response is discarded when it lands.
//!
//! - [`ShortenWorkflow`] - long URL → short URL, refreshes the mapping list
//! - [`DecodeWorkflow`] - short code → original URL, refreshes the mapping list
//! - [`StatisticsWorkflow`] - short code → mapping with visit counters

pub mod decode;
pub mod shorten;
pub mod state;
pub mod statistics;

pub use decode::DecodeWorkflow;
pub use shorten::ShortenWorkflow;
pub use state::{DispatchToken, Phase, WorkflowSlot, WorkflowState};
pub use statistics::StatisticsWorkflow;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mapping_cache::MappingListCache;
    use crate::domain::ShortenerGateway;
    use crate::domain::entities::Mapping;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    type Reply = Result<String, ClientError>;

    /// Gateway whose shorten/decode calls block until the test releases them.
    #[derive(Default)]
    struct GatedGateway {
        gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    }

    impl GatedGateway {
        fn gate(&self, input: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(input.to_string(), rx);
            tx
        }

        async fn wait(&self, input: &str) -> Reply {
            let rx = self.gates.lock().unwrap().remove(input);
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ClientError::transport("gate dropped"))),
                None => Err(ClientError::transport("no gate")),
            }
        }
    }

    #[async_trait]
    impl ShortenerGateway for GatedGateway {
        async fn list_mappings(&self) -> Result<Vec<Mapping>, ClientError> {
            Ok(Vec::new())
        }

        async fn shorten(&self, url: &str) -> Result<String, ClientError> {
            self.wait(url).await
        }

        async fn decode(&self, short_code: &str) -> Result<String, ClientError> {
            self.wait(short_code).await
        }

        async fn resolve(&self, short_code: &str) -> Result<String, ClientError> {
            self.wait(short_code).await
        }

        async fn statistics(&self, _short_code: &str) -> Result<Mapping, ClientError> {
            Err(ClientError::transport("unused"))
        }
    }

    fn setup() -> (Arc<GatedGateway>, Arc<ShortenWorkflow>, Arc<DecodeWorkflow>) {
        let gated = Arc::new(GatedGateway::default());
        let gateway: Arc<dyn ShortenerGateway> = gated.clone();
        let cache = Arc::new(MappingListCache::new(gateway.clone()));
        let shorten = Arc::new(ShortenWorkflow::new(gateway.clone(), cache.clone()));
        let decode = Arc::new(DecodeWorkflow::new(gateway, cache));
        (gated, shorten, decode)
    }

    #[tokio::test]
    async fn test_concurrent_workflows_do_not_cross_contaminate() {
        let (gated, shorten, decode) = setup();
        let shorten_gate = gated.gate("http://slow.example");
        let decode_gate = gated.gate("fast1");

        let shorten_task = shorten.spawn_dispatch("http://slow.example").unwrap();
        let decode_task = decode.spawn_dispatch("fast1").unwrap();

        assert_eq!(shorten.state().phase(), Phase::Pending);
        assert_eq!(decode.state().phase(), Phase::Pending);

        decode_gate
            .send(Err(ClientError::service("not found")))
            .unwrap();
        decode_task.await.unwrap();

        assert_eq!(decode.state().phase(), Phase::Failed);
        assert_eq!(shorten.state().phase(), Phase::Pending);

        shorten_gate.send(Ok("http://sl/slow".to_string())).unwrap();
        shorten_task.await.unwrap();

        let shorten_state = shorten.state();
        let decode_state = decode.state();

        assert_eq!(shorten_state.result.as_deref(), Some("http://sl/slow"));
        assert!(shorten_state.error.is_none());
        assert_eq!(decode_state.error_message().as_deref(), Some("not found"));
        assert!(decode_state.result.is_none());
    }

    #[tokio::test]
    async fn test_latest_dispatch_wins_over_slower_earlier_one() {
        let (gated, shorten, _decode) = setup();
        let first_gate = gated.gate("http://first.example");
        let second_gate = gated.gate("http://second.example");

        let first = shorten.spawn_dispatch("http://first.example").unwrap();
        let second = shorten.spawn_dispatch("http://second.example").unwrap();

        second_gate.send(Ok("http://sl/second".to_string())).unwrap();
        second.await.unwrap();
        first_gate.send(Ok("http://sl/first".to_string())).unwrap();
        first.await.unwrap();

        let state = shorten.state();
        assert_eq!(state.input_value, "http://second.example");
        assert_eq!(state.result.as_deref(), Some("http://sl/second"));
    }

    #[tokio::test]
    async fn test_hung_request_stays_pending() {
        let (gated, _shorten, decode) = setup();
        let _gate = gated.gate("hung");

        let _task = decode.spawn_dispatch("hung").unwrap();
        tokio::task::yield_now().await;

        let state = decode.state();
        assert_eq!(state.phase(), Phase::Pending);
        assert!(state.is_loading);
    }
}
