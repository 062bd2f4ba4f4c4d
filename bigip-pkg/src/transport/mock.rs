//! Scripted transport for unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde_json::Value;

use super::error::TransportResult;
use super::request::ApiRequest;
use super::traits::Transport;

type Responder = Box<dyn Fn(&ApiRequest) -> TransportResult<Value> + Send + Sync>;

/// Transport that records requests and answers from a closure.
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responder: Responder,
}

impl MockTransport {
    /// Answer every request with the given closure.
    pub fn new(
        responder: impl Fn(&ApiRequest) -> TransportResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Answer requests with the given responses, in order.
    ///
    /// Once the script runs out every further request gets `null`.
    pub fn scripted(responses: Vec<TransportResult<Value>>) -> Self {
        let queue = Mutex::new(VecDeque::from(responses));
        Self::new(move |_| queue.lock().pop_front().unwrap_or(Ok(Value::Null)))
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Transport for MockTransport {
    fn request(&self, request: ApiRequest) -> TransportResult<Value> {
        let response = (self.responder)(&request);
        self.requests.lock().push(request);
        response
    }
}
