use std::sync::Arc;

use tokio::sync::broadcast;

use crate::domain::{DispatchedSignal, ElementId, GestureSignal};

/// Sends a semantic signal to a specific element
pub trait SignalDispatcher: Send + Sync {
    fn dispatch(&self, target: &ElementId, signal: GestureSignal);
}

/// Broadcast bus delivering dispatched gesture signals to every listener
#[derive(Clone)]
pub struct SignalBus {
    sender: broadcast::Sender<DispatchedSignal>,
}

impl SignalBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to signals dispatched on any element
    pub fn subscribe(&self) -> broadcast::Receiver<DispatchedSignal> {
        self.sender.subscribe()
    }

    /// Subscribe to signals dispatched on a single element
    pub fn listen(&self, target: impl Into<ElementId>) -> ElementListener {
        ElementListener {
            target: target.into(),
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl SignalDispatcher for SignalBus {
    fn dispatch(&self, target: &ElementId, signal: GestureSignal) {
        let dispatched = DispatchedSignal {
            target: target.clone(),
            signal,
        };
        if let Err(e) = self.sender.send(dispatched) {
            tracing::trace!("No listeners for {} on {}: {}", signal.name(), target, e);
        }
    }
}

impl<D: SignalDispatcher + ?Sized> SignalDispatcher for Arc<D> {
    fn dispatch(&self, target: &ElementId, signal: GestureSignal) {
        (**self).dispatch(target, signal)
    }
}

/// Receiver filtered to the signals of one element
pub struct ElementListener {
    target: ElementId,
    receiver: broadcast::Receiver<DispatchedSignal>,
}

impl ElementListener {
    pub fn target(&self) -> &ElementId {
        &self.target
    }

    /// Wait for the next signal on this element, `None` once the bus is gone
    pub async fn recv(&mut self) -> Option<GestureSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(dispatched) if dispatched.target == self.target => {
                    return Some(dispatched.signal)
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Listener on {} lagged by {} signals", self.target, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Drain signals already delivered to this element
    pub fn drain(&mut self) -> Vec<GestureSignal> {
        let mut signals = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(dispatched) if dispatched.target == self.target => {
                    signals.push(dispatched.signal)
                }
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Listener on {} lagged by {} signals", self.target, skipped);
                }
                Err(_) => return signals,
            }
        }
    }
}

pub type SharedSignalBus = Arc<SignalBus>;

pub fn create_signal_bus(capacity: usize) -> SharedSignalBus {
    Arc::new(SignalBus::new(capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_filters_by_element() {
        let bus = SignalBus::default();
        let mut button = bus.listen("button");
        let mut all = bus.subscribe();

        bus.dispatch(&ElementId::new("canvas"), GestureSignal::LongTap);
        bus.dispatch(&ElementId::new("button"), GestureSignal::Tap);

        assert_eq!(button.drain(), vec![GestureSignal::Tap]);
        assert_eq!(all.try_recv().unwrap().target, ElementId::new("canvas"));
        assert_eq!(all.try_recv().unwrap().signal, GestureSignal::Tap);
    }

    #[test]
    fn test_dispatch_without_listeners_is_ignored() {
        let bus = SignalBus::new(4);
        bus.dispatch(&ElementId::new("nobody"), GestureSignal::Tap);
    }
}
