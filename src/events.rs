//! One-shot lifecycle signals.
//!
//! A board goes through `constructed -> connected -> ready` exactly once.
//! Signals are emitted from a task spawned by the constructor, so
//! construction never blocks. Every subscription first replays the signals
//! that already fired, which means a listener attached after construction
//! (or after the signals went out) still sees both, in order.
//!
//! # Example
//!
//! ```rust
//! use tinker_io::events::{BoardEvent, EventBus};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let bus = EventBus::new();
//! bus.emit(BoardEvent::Connected);
//!
//! // Late subscriber still gets the replay
//! let mut events = bus.subscribe();
//! bus.emit(BoardEvent::Ready);
//!
//! assert_eq!(events.recv().await, Some(BoardEvent::Connected));
//! assert_eq!(events.recv().await, Some(BoardEvent::Ready));
//! # });
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::TinkerError;

/// Lifecycle signals emitted by a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardEvent {
    /// The handle is set up and may issue requests.
    Connected,
    /// Pin state is initialized; operations may begin.
    Ready,
}

impl BoardEvent {
    /// Lower-case event name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BoardEvent::Connected => "connected",
            BoardEvent::Ready => "ready",
        }
    }
}

/// Receiving half of a subscription.
pub type EventReceiver = mpsc::UnboundedReceiver<BoardEvent>;

#[derive(Debug, Default)]
struct EventLog {
    fired: Vec<BoardEvent>,
    subscribers: Vec<mpsc::UnboundedSender<BoardEvent>>,
}

/// Replaying, fire-once event source.
#[derive(Clone, Debug, Default)]
pub struct EventBus {
    log: Arc<Mutex<EventLog>>,
}

impl EventBus {
    /// Creates a bus with nothing fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EventLog> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribes to events, replaying everything already fired.
    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut log = self.lock();
        for event in &log.fired {
            let _ = tx.send(*event);
        }
        log.subscribers.push(tx);
        rx
    }

    /// Fires `event` to all subscribers.
    ///
    /// Returns `false` without notifying anyone if the event already fired.
    pub fn emit(&self, event: BoardEvent) -> bool {
        let mut log = self.lock();
        if log.fired.contains(&event) {
            debug!(event = event.as_str(), "event already fired");
            return false;
        }
        log.fired.push(event);
        log.subscribers.retain(|tx| tx.send(event).is_ok());
        true
    }

    /// Returns `true` once `event` has fired.
    pub fn has_fired(&self, event: BoardEvent) -> bool {
        self.lock().fired.contains(&event)
    }

    /// Waits until `event` has fired.
    pub async fn wait_for(&self, event: BoardEvent) {
        let mut rx = self.subscribe();
        while let Some(seen) = rx.recv().await {
            if seen == event {
                return;
            }
        }
    }
}

/// Schedules the `connected` and `ready` signals on the next scheduler tick.
///
/// The lifecycle task is spawned before any operation can be issued, so it
/// is first in the queue. Fails with [`TinkerError::Dispatch`] outside a
/// Tokio runtime.
pub(crate) fn start_lifecycle(bus: EventBus, device_id: String) -> Result<(), TinkerError> {
    let handle = tokio::runtime::Handle::try_current()
        .map_err(|e| TinkerError::Dispatch(e.to_string()))?;

    handle.spawn(async move {
        if bus.emit(BoardEvent::Connected) {
            info!(device = %device_id, "connected");
        }
        if bus.emit(BoardEvent::Ready) {
            info!(device = %device_id, "ready");
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_is_once_only() {
        let bus = EventBus::new();
        assert!(bus.emit(BoardEvent::Connected));
        assert!(!bus.emit(BoardEvent::Connected));
        assert!(bus.has_fired(BoardEvent::Connected));
        assert!(!bus.has_fired(BoardEvent::Ready));
    }

    #[tokio::test]
    async fn subscribers_see_each_event_once() {
        let bus = EventBus::new();
        let mut early = bus.subscribe();

        bus.emit(BoardEvent::Connected);
        bus.emit(BoardEvent::Connected);
        bus.emit(BoardEvent::Ready);
        let mut late = bus.subscribe();
        drop(bus);

        for rx in [&mut early, &mut late] {
            assert_eq!(rx.recv().await, Some(BoardEvent::Connected));
            assert_eq!(rx.recv().await, Some(BoardEvent::Ready));
            assert_eq!(rx.recv().await, None);
        }
    }

    #[tokio::test]
    async fn lifecycle_fires_after_construction() {
        let bus = EventBus::new();
        start_lifecycle(bus.clone(), "dev".into()).unwrap();

        // Nothing yet: the task has not been polled
        assert!(!bus.has_fired(BoardEvent::Connected));

        bus.wait_for(BoardEvent::Ready).await;
        assert!(bus.has_fired(BoardEvent::Connected));
    }

    #[test]
    fn lifecycle_needs_a_runtime() {
        let bus = EventBus::new();
        let err = start_lifecycle(bus.clone(), "dev".into()).unwrap_err();
        assert!(matches!(err, TinkerError::Dispatch(_)));
        assert!(!bus.has_fired(BoardEvent::Connected));
    }
}
