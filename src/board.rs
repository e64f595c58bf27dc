//! The device handle: pin shadow state plus request dispatch.
//!
//! [`TinkerBoard`] owns the configuration, one [`PinState`] per slot and the
//! lifecycle [`EventBus`]. Every operation validates synchronously, updates
//! shadow state (writes only) and then spawns a task that sends exactly one
//! request through the transport.
//!
//! # Example
//!
//! ```rust
//! use tinker_io::hal::MockTransport;
//! use tinker_io::{BoardIo, DeviceConfig, PinMode, TinkerBoard};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let transport = MockTransport::new();
//! let mut board = TinkerBoard::new(DeviceConfig::new("dev", "tok"), transport.clone()).unwrap();
//!
//! board.pin_mode("D7", PinMode::Output).unwrap();
//! board.digital_write("D7", "HIGH").unwrap().await.unwrap();
//!
//! assert_eq!(board.pin("D7").unwrap().value, 1);
//! assert_eq!(transport.sent_params(), vec!["D7,HIGH".to_string()]);
//! # });
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::addressing::{locate, normalize_with_default_prefix, PinRef, ANALOG_PREFIX, DIGITAL_PREFIX};
use crate::config::DeviceConfig;
use crate::error::{TinkerError, TransportError};
use crate::events::{self, BoardEvent, EventBus, EventReceiver};
use crate::pins::{self, PinMode, PinState};
use crate::traits::{BoardIo, DeviceRequest, DeviceResponse, DeviceTransport, TinkerFunction};
use crate::values::{AnalogValue, Level};

// ============================================================================
// Request Handle
// ============================================================================

/// Outcome of one dispatched request.
///
/// Awaiting yields the transport result. Dropping the handle detaches the
/// request; it still runs to completion and failures are still logged.
#[derive(Debug)]
pub struct RequestHandle<T> {
    task: JoinHandle<Result<T, TinkerError>>,
}

impl<T> RequestHandle<T> {
    /// Returns `true` once the request has completed.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Future for RequestHandle<T> {
    type Output = Result<T, TinkerError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.task).poll(cx).map(|joined| {
            joined.unwrap_or_else(|e| Err(TinkerError::Dispatch(e.to_string())))
        })
    }
}

fn runtime() -> Result<Handle, TinkerError> {
    Handle::try_current().map_err(|e| TinkerError::Dispatch(e.to_string()))
}

// ============================================================================
// Board
// ============================================================================

/// Handle to one cloud-connected Tinker device.
///
/// Must be created inside a Tokio runtime: the lifecycle signals and every
/// request run as tasks on it.
#[derive(Debug)]
pub struct TinkerBoard<T: DeviceTransport> {
    config: DeviceConfig,
    transport: Arc<T>,
    pins: Vec<PinState>,
    analog_pins: Vec<usize>,
    events: EventBus,
}

impl<T: DeviceTransport> TinkerBoard<T> {
    /// Creates the handle and schedules the `connected` and `ready` signals.
    ///
    /// No request is made: the device's reachability is only discovered by
    /// the first operation. Fails with [`TinkerError::Dispatch`] outside a
    /// Tokio runtime.
    pub fn new(config: DeviceConfig, transport: T) -> Result<Self, TinkerError> {
        let events = EventBus::new();
        events::start_lifecycle(events.clone(), config.device_id.to_string())?;

        Ok(Self {
            config,
            transport: Arc::new(transport),
            pins: pins::initial_states(),
            analog_pins: pins::analog_pin_indices(),
            events,
        })
    }

    /// Device configuration.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Shadow state for every slot, indexed by flat index.
    pub fn pins(&self) -> &[PinState] {
        &self.pins
    }

    /// Shadow state for one pin.
    pub fn pin(&self, pin: impl Into<PinRef>) -> Result<&PinState, TinkerError> {
        let (index, _) = locate(&pin.into())?;
        Ok(&self.pins[index])
    }

    /// Flat indices of the analog pins.
    pub fn analog_pins(&self) -> &[usize] {
        &self.analog_pins
    }

    /// Returns `true` once the `ready` signal has fired.
    pub fn is_ready(&self) -> bool {
        self.events.has_fired(BoardEvent::Ready)
    }

    /// Waits for the `ready` signal.
    pub async fn ready(&self) {
        self.events.wait_for(BoardEvent::Ready).await
    }

    fn request(&self, function: TinkerFunction, params: String) -> DeviceRequest {
        DeviceRequest::function_call(function, self.config.access_token.as_str(), params)
    }

    /// Spawns `request` on `rt`, passing a successful response through `finish`.
    ///
    /// Results are held back until `ready` has fired.
    fn dispatch<R, F>(&self, rt: &Handle, request: DeviceRequest, finish: F) -> RequestHandle<R>
    where
        R: Send + 'static,
        F: FnOnce(DeviceResponse) -> Result<R, TransportError> + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        let task = rt.spawn(async move {
            let function = request.function;
            let params = request.params().to_string();

            let sent = transport.send(request).await;
            events.wait_for(BoardEvent::Ready).await;

            let outcome = sent.and_then(finish);
            match &outcome {
                Ok(_) => debug!(%function, %params, "request ok"),
                Err(e) => warn!(%function, %params, error = %e, "request failed"),
            }
            outcome.map_err(TinkerError::from)
        });
        RequestHandle { task }
    }

    fn read<F>(
        &self,
        function: TinkerFunction,
        prefix: char,
        pin: PinRef,
        on_value: F,
    ) -> Result<RequestHandle<i32>, TinkerError>
    where
        F: FnOnce(i32) + Send + 'static,
    {
        let pin = normalize_with_default_prefix(pin, prefix);
        let (_, spec) = locate(&pin)?;
        let rt = runtime()?;

        debug!(%function, pin = spec.name, "read");
        let request = self.request(function, spec.name.to_string());
        Ok(self.dispatch(&rt, request, move |response| {
            let value = response.entity.return_value()?;
            on_value(value);
            Ok(value)
        }))
    }
}

impl<T: DeviceTransport> BoardIo for TinkerBoard<T> {
    fn resolve(&self, pin: impl Into<PinRef>) -> Result<usize, TinkerError> {
        locate(&pin.into()).map(|(index, _)| index)
    }

    fn pin_mode(&mut self, pin: impl Into<PinRef>, mode: PinMode) -> Result<&mut Self, TinkerError> {
        let pin = pin.into().for_mode(mode);
        let (index, spec) = locate(&pin)?;
        self.pins[index].set_mode(mode)?;

        debug!(pin = spec.name, %mode, transport_mode = %mode.transport_mode(), "pin mode set");
        Ok(self)
    }

    fn digital_write(
        &mut self,
        pin: impl Into<PinRef>,
        value: impl Into<Level>,
    ) -> Result<RequestHandle<()>, TinkerError> {
        let pin = normalize_with_default_prefix(pin.into(), DIGITAL_PREFIX);
        let (index, spec) = locate(&pin)?;
        let level = value.into();
        let rt = runtime()?;

        self.pins[index].value = level.as_value();

        debug!(pin = spec.name, %level, "digital write");
        let request = self.request(
            TinkerFunction::DigitalWrite,
            format!("{},{}", spec.name, level),
        );
        Ok(self.dispatch(&rt, request, |_| Ok(())))
    }

    fn analog_write(
        &mut self,
        pin: impl Into<PinRef>,
        value: impl Into<AnalogValue>,
    ) -> Result<RequestHandle<()>, TinkerError> {
        let pin = normalize_with_default_prefix(pin.into(), ANALOG_PREFIX);
        let (index, spec) = locate(&pin)?;
        let value = value.into().to_int()?;
        let rt = runtime()?;

        self.pins[index].value = value;

        debug!(pin = spec.name, value, "analog write");
        let request = self.request(
            TinkerFunction::AnalogWrite,
            format!("{},{}", spec.name, value),
        );
        Ok(self.dispatch(&rt, request, |_| Ok(())))
    }

    fn analog_read<F>(&self, pin: impl Into<PinRef>, callback: F) -> Result<(), TinkerError>
    where
        F: FnOnce(i32) + Send + 'static,
    {
        self.read(TinkerFunction::AnalogRead, ANALOG_PREFIX, pin.into(), callback)
            .map(drop)
    }

    fn digital_read<F>(&self, pin: impl Into<PinRef>, callback: F) -> Result<(), TinkerError>
    where
        F: FnOnce(i32) + Send + 'static,
    {
        self.read(TinkerFunction::DigitalRead, DIGITAL_PREFIX, pin.into(), callback)
            .map(drop)
    }

    fn analog_read_async(&self, pin: impl Into<PinRef>) -> Result<RequestHandle<i32>, TinkerError> {
        self.read(TinkerFunction::AnalogRead, ANALOG_PREFIX, pin.into(), |_| {})
    }

    fn digital_read_async(
        &self,
        pin: impl Into<PinRef>,
    ) -> Result<RequestHandle<i32>, TinkerError> {
        self.read(TinkerFunction::DigitalRead, DIGITAL_PREFIX, pin.into(), |_| {})
    }

    fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockTransport;

    fn board() -> (TinkerBoard<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let board = TinkerBoard::new(DeviceConfig::new("dev", "tok"), transport.clone()).unwrap();
        (board, transport)
    }

    #[tokio::test]
    async fn request_handle_reports_transport_failure() {
        let (mut board, transport) = board();
        transport.queue_failure(TransportError::Status {
            status: 403,
            body: "forbidden".into(),
        });

        let result = board.digital_write("D1", 1u8).unwrap().await;
        assert!(matches!(
            result,
            Err(TinkerError::Transport(TransportError::Status { status: 403, .. }))
        ));
        // Optimistic shadow value is kept
        assert_eq!(board.pin("D1").unwrap().value, 1);
    }

    #[tokio::test]
    async fn dropped_handle_still_sends() {
        let (mut board, transport) = board();
        drop(board.analog_write("A0", 10u8).unwrap());

        // Let the detached task run
        while transport.request_count() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(transport.sent_params(), vec!["A0,10".to_string()]);
    }

    #[tokio::test]
    async fn request_path_uses_configured_token() {
        let (mut board, transport) = board();
        board.digital_write(7u8, 0u8).unwrap().await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "digitalwrite?access_token=tok");
        assert_eq!(request.params(), "D7,LOW");
    }

    #[test]
    fn construction_needs_a_runtime() {
        let result = TinkerBoard::new(DeviceConfig::new("dev", "tok"), MockTransport::new());
        assert!(matches!(result, Err(TinkerError::Dispatch(_))));
    }

    #[test]
    fn operations_need_a_runtime() {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let (mut board, transport) = rt.block_on(async { board() });
        drop(rt);

        let err = board.digital_write("D0", 1u8).unwrap_err();
        assert!(matches!(err, TinkerError::Dispatch(_)));
        // Rejected before the shadow value changed
        assert_eq!(board.pin("D0").unwrap().value, 0);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn results_wait_for_ready() {
        let (mut board, _transport) = board();
        let events = board.events.clone();

        board.digital_write("D3", "HIGH").unwrap().await.unwrap();
        assert!(events.has_fired(BoardEvent::Connected));
        assert!(events.has_fired(BoardEvent::Ready));
    }
}
