use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::application::input::gesture::GestureRecognizer;
use crate::application::signal_bus::SignalDispatcher;
use crate::domain::{GestureError, RawTouchEvent};

/// Source of raw touch notifications, e.g. a window or a view
pub struct TouchSurface {
    name: String,
    sender: broadcast::Sender<RawTouchEvent>,
    attached: Arc<AtomicBool>,
}

impl TouchSurface {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            name: name.into(),
            sender,
            attached: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deliver a raw touch notification to every attached recognizer
    pub fn emit(&self, event: RawTouchEvent) {
        if let Err(e) = self.sender.send(event) {
            tracing::trace!("No recognizer on surface {}: {}", self.name, e);
        }
    }

    pub fn has_recognizer(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

/// Releases the surface for a new attachment when the recognizer task goes away
struct AttachGuard(Arc<AtomicBool>);

impl Drop for AttachGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Handle to a recognizer attached to a surface
pub struct RecognizerHandle {
    surface: String,
    task: JoinHandle<()>,
}

impl RecognizerHandle {
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// True until the surface is dropped or the recognizer is detached
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop recognizing; any armed long press is cancelled
    pub async fn detach(self) {
        self.task.abort();
        match self.task.await {
            Err(e) if e.is_panic() => {
                tracing::error!("Gesture recognizer on {} panicked: {}", self.surface, e);
            }
            _ => tracing::info!("Gesture recognizer detached from {}", self.surface),
        }
    }
}

/// Attach a gesture recognizer to `surface`, dispatching signals through `dispatcher`.
///
/// A surface accepts a single recognizer; attaching again while one is active
/// fails with [`GestureError::AlreadyAttached`].
pub fn attach<D>(surface: &TouchSurface, dispatcher: D) -> Result<RecognizerHandle, GestureError>
where
    D: SignalDispatcher + 'static,
{
    if surface.attached.swap(true, Ordering::SeqCst) {
        tracing::warn!("Gesture recognizer already attached to {}", surface.name);
        return Err(GestureError::AlreadyAttached(surface.name.clone()));
    }
    let guard = AttachGuard(surface.attached.clone());

    let mut touch_rx = surface.sender.subscribe();
    let mut recognizer = GestureRecognizer::new(dispatcher);
    let name = surface.name.clone();

    let task = tokio::spawn(async move {
        let _guard = guard;

        loop {
            tokio::select! {
                received = touch_rx.recv() => match received {
                    Ok(event) => recognizer.process(event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Recognizer on {} lagged by {} touches, dropping gesture",
                            name, skipped
                        );
                        recognizer.reset();
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("Surface {} closed, recognizer stopped", name);
                        break;
                    }
                },
                _ = recognizer.long_press_due() => recognizer.on_long_press_timeout(),
            }
        }
    });

    tracing::info!("Gesture recognizer attached to {}", surface.name);

    Ok(RecognizerHandle {
        surface: surface.name.clone(),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::signal_bus::SignalBus;
    use crate::domain::GestureSignal;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_double_attach_rejected() {
        let surface = TouchSurface::new("window", 16);
        let bus = Arc::new(SignalBus::default());

        let handle = attach(&surface, bus.clone()).unwrap();
        assert!(surface.has_recognizer());
        assert!(matches!(
            attach(&surface, bus.clone()),
            Err(GestureError::AlreadyAttached(_))
        ));

        handle.detach().await;
        assert!(!surface.has_recognizer());
        assert!(attach(&surface, bus).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_cancels_armed_long_press() {
        let surface = TouchSurface::new("window", 16);
        let bus = Arc::new(SignalBus::default());
        let mut listener = bus.listen("button");

        let handle = attach(&surface, bus.clone()).unwrap();
        surface.emit(RawTouchEvent::start(1, "button"));
        sleep(Duration::from_millis(100)).await;

        handle.detach().await;
        sleep(Duration::from_secs(1)).await;
        assert!(listener.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lagging_recognizer_drops_gesture() {
        let surface = TouchSurface::new("window", 1);
        let bus = Arc::new(SignalBus::default());
        let mut listener = bus.listen("button");

        let _handle = attach(&surface, bus.clone()).unwrap();
        surface.emit(RawTouchEvent::start(1, "button"));
        sleep(Duration::from_millis(100)).await;

        // Only the last notification survives; the armed press is dropped with the skipped ones
        surface.emit(RawTouchEvent::start(1, "button"));
        surface.emit(RawTouchEvent::start(1, "button"));
        surface.emit(RawTouchEvent::start(2, "button"));
        sleep(Duration::from_secs(1)).await;
        assert!(listener.drain().is_empty());

        // The surviving two-finger start opened a fresh gesture without a timer
        surface.emit(RawTouchEvent::end(0, "button"));
        sleep(Duration::from_millis(10)).await;
        assert_eq!(listener.drain(), vec![GestureSignal::Tap]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_surface_stops_recognizer() {
        let surface = TouchSurface::new("window", 16);
        let bus = Arc::new(SignalBus::default());
        let mut listener = bus.listen("button");

        let handle = attach(&surface, bus.clone()).unwrap();
        surface.emit(RawTouchEvent::start(1, "button"));
        surface.emit(RawTouchEvent::end(0, "button"));
        drop(surface);

        sleep(Duration::from_millis(10)).await;
        assert!(!handle.is_active());
        assert_eq!(listener.drain(), vec![GestureSignal::Tap]);
    }
}
