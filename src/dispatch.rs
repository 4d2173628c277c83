//! Off-thread request dispatch.
//!
//! Every send gets its own worker thread and a monotonic [`RequestId`]. The
//! worker reports back through a oneshot channel, which the UI awaits from its
//! own executor. Only the completion matching the most recently issued id is
//! applied; see [`RequestTracker`].

use crate::request::HttpTransport;
use crate::types::{RequestSpec, ResponseResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub id: RequestId,
    pub result: ResponseResult,
}

/// Handle to a request running on its worker thread.
#[derive(Debug)]
pub struct PendingRequest {
    id: RequestId,
    rx: oneshot::Receiver<ResponseResult>,
}

impl PendingRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Wait for the worker without blocking the calling executor.
    pub async fn completion(self) -> Completion {
        let Self { id, rx } = self;
        let result = rx.await.unwrap_or_else(|_| worker_lost(id));
        Completion { id, result }
    }

    /// Block the current thread until the worker reports. Must not be called
    /// from inside an async runtime.
    pub fn wait(self) -> Completion {
        let Self { id, rx } = self;
        let result = rx.blocking_recv().unwrap_or_else(|_| worker_lost(id));
        Completion { id, result }
    }
}

fn worker_lost(id: RequestId) -> ResponseResult {
    tracing::error!(%id, "request worker exited without reporting a result");
    ResponseResult::failure("request worker exited without a result")
}

pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    next_id: AtomicU64,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    /// Start `spec` on a fresh worker thread. The caller never blocks.
    pub fn send(&self, spec: RequestSpec) -> PendingRequest {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = oneshot::channel();
        let transport = Arc::clone(&self.transport);

        tracing::info!(%id, method = %spec.method, url = %spec.url, "dispatching request");

        let spawned = thread::Builder::new()
            .name(format!("request-{}", id.get()))
            .spawn(move || {
                let result = execute(transport.as_ref(), &spec);
                if tx.send(result).is_err() {
                    tracing::debug!(%id, "completion receiver dropped");
                }
            });

        // A worker that never started drops its sender, which the pending
        // side reports as a failure.
        if let Err(err) = spawned {
            tracing::error!(%id, error = %err, "failed to spawn request worker");
        }

        PendingRequest { id, rx }
    }
}

/// Run one call and fold any transport failure into the result.
pub fn execute(transport: &dyn HttpTransport, spec: &RequestSpec) -> ResponseResult {
    match transport.execute(spec) {
        Ok(response) => {
            tracing::info!(status = response.status_code, url = %spec.url, "response received");
            ResponseResult::Success(response)
        }
        Err(err) => {
            let message = format!("{:#}", anyhow::Error::new(err));
            tracing::warn!(url = %spec.url, error = %message, "request failed");
            ResponseResult::failure(message)
        }
    }
}

/// Remembers the latest issued request so overlapping sends resolve to the
/// newest one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Option<RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, id: RequestId) {
        self.latest = Some(id);
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.latest
    }

    /// True when `completion` belongs to the latest request; the tracker is
    /// idle afterwards. Anything else is stale and must be dropped.
    pub fn accept(&mut self, completion: &Completion) -> bool {
        if self.latest == Some(completion.id) {
            self.latest = None;
            true
        } else {
            tracing::debug!(id = %completion.id, latest = ?self.latest, "discarding stale completion");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::types::{HttpMethod, HttpResponse};
    use std::sync::mpsc;
    use std::sync::Mutex;

    struct Simulated {
        outcome: Result<u16, &'static str>,
    }

    impl HttpTransport for Simulated {
        fn execute(&self, spec: &RequestSpec) -> Result<HttpResponse, TransportError> {
            match self.outcome {
                Ok(status_code) => Ok(HttpResponse {
                    status_code,
                    headers: vec![("content-type".to_string(), "text/plain".to_string())],
                    text: format!("{} {}", spec.method, spec.url),
                }),
                Err(reason) => Err(TransportError::InvalidUrl {
                    url: spec.url.clone(),
                    reason: reason.to_string(),
                }),
            }
        }
    }

    struct Panicking;

    impl HttpTransport for Panicking {
        fn execute(&self, _spec: &RequestSpec) -> Result<HttpResponse, TransportError> {
            panic!("transport blew up");
        }
    }

    /// Holds each call until the test releases it.
    struct Gated {
        gates: Mutex<mpsc::Receiver<()>>,
    }

    impl HttpTransport for Gated {
        fn execute(&self, spec: &RequestSpec) -> Result<HttpResponse, TransportError> {
            self.gates.lock().unwrap().recv().unwrap();
            Ok(HttpResponse {
                status_code: 200,
                headers: Vec::new(),
                text: spec.url.clone(),
            })
        }
    }

    fn dispatcher(transport: impl HttpTransport + 'static) -> Dispatcher {
        Dispatcher::new(Arc::new(transport))
    }

    fn spec(url: &str) -> RequestSpec {
        RequestSpec::new(HttpMethod::Get, url)
    }

    #[tokio::test]
    async fn success_carries_simulated_status() {
        let dispatcher = dispatcher(Simulated { outcome: Ok(201) });
        let completion = dispatcher.send(spec("http://example.test/a")).completion().await;

        assert_eq!(completion.result.error(), None);
        assert_eq!(completion.result.status_code(), Some(201));
        assert_eq!(completion.result.text(), Some("GET http://example.test/a"));
    }

    #[tokio::test]
    async fn transport_error_becomes_failure_message() {
        let dispatcher = dispatcher(Simulated {
            outcome: Err("empty host"),
        });
        let completion = dispatcher.send(spec("http://")).completion().await;

        assert_eq!(
            completion.result.error(),
            Some("invalid URL `http://`: empty host")
        );
        assert_eq!(completion.result.status_code(), None);
    }

    #[test]
    fn server_errors_are_still_successes() {
        let dispatcher = dispatcher(Simulated { outcome: Ok(503) });
        let completion = dispatcher.send(spec("http://example.test/")).wait();
        assert_eq!(completion.result.status_code(), Some(503));
        assert!(completion.result.error().is_none());
    }

    #[test]
    fn panicking_worker_still_completes_once() {
        let dispatcher = dispatcher(Panicking);
        let completion = dispatcher.send(spec("http://example.test/")).wait();
        assert_eq!(
            completion.result.error(),
            Some("request worker exited without a result")
        );
    }

    #[test]
    fn ids_are_monotonic_per_dispatcher() {
        let first = dispatcher(Simulated { outcome: Ok(200) });
        let ids: Vec<u64> = (0..3)
            .map(|_| first.send(spec("http://example.test/")).id().get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let second = dispatcher(Simulated { outcome: Ok(200) });
        assert_eq!(second.send(spec("http://example.test/")).id().get(), 1);
    }

    #[test]
    fn tracker_applies_only_the_latest_send() {
        let (release, gates) = mpsc::channel();
        let dispatcher = dispatcher(Gated {
            gates: Mutex::new(gates),
        });
        let mut tracker = RequestTracker::new();

        let older = dispatcher.send(spec("http://example.test/old"));
        tracker.issue(older.id());
        let newer = dispatcher.send(spec("http://example.test/new"));
        tracker.issue(newer.id());
        assert_eq!(tracker.in_flight(), Some(newer.id()));

        release.send(()).unwrap();
        release.send(()).unwrap();

        let newer = newer.wait();
        let older = older.wait();

        assert!(!tracker.accept(&older));
        assert!(tracker.accept(&newer));
        assert_eq!(newer.result.text(), Some("http://example.test/new"));
        assert_eq!(tracker.in_flight(), None);
        assert!(!tracker.accept(&newer));
    }
}
