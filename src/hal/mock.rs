//! Mock transport for testing without a device or network.
//!
//! [`MockTransport`] records every request it is given and answers from a
//! queue of scripted outcomes. When the queue is empty it answers like a
//! healthy Tinker device: status 200 with `return_value: 1`.
//!
//! The mock is cheaply cloneable; clones share the same log and queue, so a
//! test can keep one clone while the board owns another.
//!
//! # Example
//!
//! ```rust
//! use tinker_io::hal::MockTransport;
//! use tinker_io::traits::{DeviceRequest, DeviceTransport, TinkerFunction};
//! use tinker_io::TransportError;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let transport = MockTransport::new();
//! transport.queue_return_value(512);
//! transport.queue_failure(TransportError::Network("unreachable".into()));
//!
//! let read = DeviceRequest::function_call(TinkerFunction::AnalogRead, "tok", "A5");
//! let ok = transport.send(read.clone()).await.unwrap();
//! assert_eq!(ok.entity.return_value, Some(512));
//! assert!(transport.send(read).await.is_err());
//!
//! assert_eq!(transport.request_count(), 2);
//! # });
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::TransportError;
use crate::messages::FunctionResponse;
use crate::traits::{DeviceRequest, DeviceResponse, DeviceTransport};

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<DeviceRequest>,
    outcomes: VecDeque<Result<DeviceResponse, TransportError>>,
    offline: bool,
}

/// Recording, scriptable [`DeviceTransport`].
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a mock that answers every request successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose every request fails with a network error.
    pub fn offline() -> Self {
        let mock = Self::new();
        mock.set_offline(true);
        mock
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Makes all later requests fail (queued outcomes are ignored while offline).
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Queue a successful response envelope.
    pub fn queue_response(&self, entity: FunctionResponse) {
        self.lock().outcomes.push_back(Ok(DeviceResponse::ok(entity)));
    }

    /// Queue a successful response carrying `value` as `return_value`.
    pub fn queue_return_value(&self, value: i32) {
        self.queue_response(FunctionResponse::with_return_value(value));
    }

    /// Queue a failure.
    pub fn queue_failure(&self, error: TransportError) {
        self.lock().outcomes.push_back(Err(error));
    }

    /// All requests seen so far, in order.
    pub fn requests(&self) -> Vec<DeviceRequest> {
        self.lock().requests.clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<DeviceRequest> {
        self.lock().requests.last().cloned()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// `params` strings of all requests, in order.
    pub fn sent_params(&self) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .map(|req| req.params().to_string())
            .collect()
    }
}

impl DeviceTransport for MockTransport {
    async fn send(&self, request: DeviceRequest) -> Result<DeviceResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request);
        if state.offline {
            return Err(TransportError::Network("mock transport offline".into()));
        }
        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Ok(DeviceResponse::ok(FunctionResponse::with_return_value(1))))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TinkerFunction;

    fn read_request() -> DeviceRequest {
        DeviceRequest::function_call(TinkerFunction::DigitalRead, "tok", "D2")
    }

    #[tokio::test]
    async fn default_answer_is_success() {
        let mock = MockTransport::new();
        let resp = mock.send(read_request()).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.entity.return_value, Some(1));
    }

    #[tokio::test]
    async fn outcomes_are_fifo() {
        let mock = MockTransport::new();
        mock.queue_return_value(10);
        mock.queue_return_value(20);

        assert_eq!(mock.send(read_request()).await.unwrap().entity.return_value, Some(10));
        assert_eq!(mock.send(read_request()).await.unwrap().entity.return_value, Some(20));
        assert_eq!(mock.send(read_request()).await.unwrap().entity.return_value, Some(1));
    }

    #[tokio::test]
    async fn clones_share_log() {
        let mock = MockTransport::new();
        let clone = mock.clone();
        clone.send(read_request()).await.unwrap();

        assert_eq!(mock.request_count(), 1);
        assert_eq!(mock.sent_params(), vec!["D2".to_string()]);
        assert_eq!(mock.last_request().unwrap().function, TinkerFunction::DigitalRead);
    }

    #[tokio::test]
    async fn offline_fails_and_still_records() {
        let mock = MockTransport::offline();
        mock.queue_return_value(5);

        assert!(matches!(
            mock.send(read_request()).await,
            Err(TransportError::Network(_))
        ));
        assert_eq!(mock.request_count(), 1);

        mock.set_offline(false);
        assert_eq!(mock.send(read_request()).await.unwrap().entity.return_value, Some(5));
    }
}
