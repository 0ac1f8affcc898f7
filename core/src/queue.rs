//! Dispatcher threads that run requests and deliver their outcome.
//!
//! # Design
//! `RequestQueue` owns a `Network` and a fixed set of dispatcher threads that
//! pull jobs from a crossbeam channel. Each job is a request plus a callback;
//! the dispatcher performs the request and calls the callback with the
//! result on its own thread. `stop` closes the channel so queued jobs drain
//! and later submissions fail immediately. Dropping the queue stops it and
//! joins the dispatchers.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use crate::error::VolleyerError;
use crate::http::{HttpRequest, HttpResponse};
use crate::network::Network;

/// Dispatcher count used by `RequestQueue::new`.
pub const DEFAULT_DISPATCHER_COUNT: usize = 4;

/// Receives the outcome of one request on a dispatcher thread.
pub type ResponseCallback = Box<dyn FnOnce(Result<HttpResponse, VolleyerError>) + Send>;

struct Job {
    request: HttpRequest,
    callback: ResponseCallback,
}

pub struct RequestQueue {
    sender: Mutex<Option<Sender<Job>>>,
    dispatchers: Mutex<Vec<JoinHandle<()>>>,
}

impl RequestQueue {
    pub fn new(network: impl Network + 'static) -> Self {
        Self::with_dispatchers(Arc::new(network), DEFAULT_DISPATCHER_COUNT)
    }

    /// Start `count` dispatcher threads (at least one) over `network`.
    pub fn with_dispatchers(network: Arc<dyn Network>, count: usize) -> Self {
        let (sender, receiver) = unbounded::<Job>();
        let dispatchers = (0..count.max(1))
            .filter_map(|index| {
                let network = Arc::clone(&network);
                let receiver = receiver.clone();
                thread::Builder::new()
                    .name(format!("volleyer-dispatcher-{index}"))
                    .spawn(move || dispatch_loop(network, receiver))
                    .map_err(|e| tracing::error!(error = %e, "failed to spawn dispatcher"))
                    .ok()
            })
            .collect();
        Self {
            sender: Mutex::new(Some(sender)),
            dispatchers: Mutex::new(dispatchers),
        }
    }

    /// Queue `request`. `callback` runs on a dispatcher thread, or right
    /// away on the calling thread with a network error if the queue is
    /// stopped.
    pub fn add(&self, request: HttpRequest, callback: ResponseCallback) {
        let job = Job { request, callback };
        let rejected = match self.sender.lock().as_ref() {
            Some(sender) => {
                tracing::debug!(method = %job.request.method, url = %job.request.url, "request queued");
                sender.send(job).err().map(|e| e.into_inner())
            }
            None => Some(job),
        };
        if let Some(job) = rejected {
            tracing::debug!(url = %job.request.url, "request rejected, queue stopped");
            (job.callback)(Err(VolleyerError::Network(
                "request queue is stopped".to_string(),
            )));
        }
    }

    /// Stop accepting requests. Already queued requests still run.
    pub fn stop(&self) {
        self.sender.lock().take();
    }

    pub fn is_stopped(&self) -> bool {
        self.sender.lock().is_none()
    }
}

impl Drop for RequestQueue {
    fn drop(&mut self) {
        self.stop();
        let current = thread::current().id();
        for handle in self.dispatchers.lock().drain(..) {
            // The last owner can be a callback running on a dispatcher.
            if handle.thread().id() != current {
                let _ = handle.join();
            }
        }
    }
}

fn dispatch_loop(network: Arc<dyn Network>, receiver: Receiver<Job>) {
    for job in receiver.iter() {
        let Job { request, callback } = job;
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let result = network.perform_request(&request);
        match &result {
            Ok(response) => tracing::debug!(status = response.status, url = %request.url, "response received"),
            Err(e) => tracing::debug!(error = %e, url = %request.url, "request failed"),
        }
        if catch_unwind(AssertUnwindSafe(|| callback(result))).is_err() {
            tracing::error!(url = %request.url, "response callback panicked");
        }
    }
}
