use tokio::sync::broadcast;
use tracing::debug;

/// Typed application-wide notifications, replacing stringly-named DOM events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A cart mutation settled locally; carries the new total item count.
    CartUpdated { count: u32 },
    /// A 401 was observed or a guard denied entry; the login prompt should open.
    Unauthorized,
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(32);
        EventBus { tx }
    }

    /// Delivery to zero subscribers is not an error.
    pub fn publish(&self, event: AppEvent) {
        debug!("Publishing {:?}", event);
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
