//! Tokio-backed route persistence queue.
//!
//! Computed routes are sent over a bounded channel to a single worker task
//! that writes them to the route cache. Enqueueing uses `try_send`, so a
//! request never waits on a slow or failing cache; a full queue drops the
//! command and the next miss for the same pair recomputes it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::domain::TraceId;
use crate::domain::ports::{
    PersistRoute, RouteCacheRepository, RoutePersistenceQueue, RoutePersistenceQueueError,
};

/// Sending half of the persistence channel.
#[derive(Debug, Clone)]
pub struct TokioRoutePersistenceQueue {
    sender: mpsc::Sender<PersistRoute>,
}

impl TokioRoutePersistenceQueue {
    /// Spawn the persistence worker and return the queue feeding it.
    ///
    /// The worker stops once every queue clone has been dropped and the
    /// channel has drained. Must be called inside a tokio runtime.
    pub fn spawn(
        capacity: usize,
        cache: Arc<dyn RouteCacheRepository>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(receiver, cache));
        (Self { sender }, worker)
    }
}

#[async_trait]
impl RoutePersistenceQueue for TokioRoutePersistenceQueue {
    async fn enqueue(&self, command: PersistRoute) -> Result<(), RoutePersistenceQueueError> {
        self.sender.try_send(command).map_err(|err| match err {
            TrySendError::Full(command) => RoutePersistenceQueueError::full(format!(
                "dropped route {} -> {}",
                command.route.origin, command.route.destination
            )),
            TrySendError::Closed(_) => {
                RoutePersistenceQueueError::closed("route persistence worker has stopped")
            }
        })
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<PersistRoute>,
    cache: Arc<dyn RouteCacheRepository>,
) {
    while let Some(command) = receiver.recv().await {
        persist(cache.as_ref(), command).await;
    }
    debug!("route persistence worker stopped");
}

async fn persist(cache: &dyn RouteCacheRepository, command: PersistRoute) {
    let PersistRoute { route, trace_id } = command;
    TraceId::scope_optional(trace_id, async move {
        match cache.save(&route).await {
            Ok(saved) => debug!(
                route = %saved.route.id,
                created = saved.created,
                "persisted computed route"
            ),
            Err(err) => error!(
                origin = %route.origin,
                destination = %route.destination,
                error = %err,
                "failed to persist computed route"
            ),
        }
    })
    .await;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::RouteCacheRepositoryError;
    use crate::domain::{CachedRoute, LocationId, NewRoute, SavedRoute};
    use crate::outbound::cache::InMemoryRouteCacheRepository;

    #[fixture]
    fn command() -> PersistRoute {
        PersistRoute {
            route: NewRoute {
                origin: LocationId::new(1),
                destination: LocationId::new(2),
                total_distance: 3.0,
                connection_ids: Vec::new(),
            },
            trace_id: None,
        }
    }

    /// Cache double recording the trace id in scope for each save.
    #[derive(Default)]
    struct TraceRecordingCache {
        seen: Mutex<Vec<Option<TraceId>>>,
    }

    #[async_trait]
    impl RouteCacheRepository for TraceRecordingCache {
        async fn find(
            &self,
            _origin: LocationId,
            _destination: LocationId,
        ) -> Result<Option<CachedRoute>, RouteCacheRepositoryError> {
            Ok(None)
        }

        async fn save(&self, _route: &NewRoute) -> Result<SavedRoute, RouteCacheRepositoryError> {
            self.seen
                .lock()
                .expect("seen lock")
                .push(TraceId::current());
            Err(RouteCacheRepositoryError::query("recording only"))
        }
    }

    async fn wait_for(mut condition: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition met before timeout");
    }

    #[rstest]
    #[tokio::test]
    async fn worker_saves_enqueued_routes(command: PersistRoute) {
        let cache = Arc::new(InMemoryRouteCacheRepository::new());
        let (queue, _worker) = TokioRoutePersistenceQueue::spawn(4, cache.clone());

        queue.enqueue(command).await.expect("enqueued");

        wait_for(|| cache.len() == 1).await;
    }

    #[rstest]
    #[tokio::test]
    async fn worker_reenters_command_trace_id(mut command: PersistRoute) {
        let trace_id = TraceId::generate();
        command.trace_id = Some(trace_id);
        let cache = Arc::new(TraceRecordingCache::default());
        let (queue, _worker) = TokioRoutePersistenceQueue::spawn(4, cache.clone());

        queue.enqueue(command).await.expect("enqueued");

        wait_for(|| !cache.seen.lock().expect("seen lock").is_empty()).await;
        assert_eq!(
            cache.seen.lock().expect("seen lock").as_slice(),
            &[Some(trace_id)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn full_queue_rejects_command(command: PersistRoute) {
        let (sender, _receiver) = mpsc::channel(1);
        let queue = TokioRoutePersistenceQueue { sender };

        queue.enqueue(command.clone()).await.expect("first fits");
        let err = queue.enqueue(command).await.expect_err("second rejected");

        assert!(matches!(err, RoutePersistenceQueueError::Full { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn stopped_worker_rejects_command(command: PersistRoute) {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let queue = TokioRoutePersistenceQueue { sender };

        let err = queue.enqueue(command).await.expect_err("closed");

        assert!(matches!(err, RoutePersistenceQueueError::Closed { .. }));
    }
}
