use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep_until, Instant, Sleep};

use crate::application::signal_bus::SignalDispatcher;
use crate::domain::{ElementId, GestureSignal, RawTouchEvent, TouchPhase};

/// Time a single-touch press must be held before it becomes a long tap
pub const LONG_PRESS_DELAY: Duration = Duration::from_millis(500);

/// Armed long-press callback. Dropping it cancels the timer.
///
/// The `Sleep` is only registered with the runtime once the timer is awaited,
/// so arming works without a tokio context.
struct PendingTimer {
    deadline: Instant,
    sleep: Option<Pin<Box<Sleep>>>,
    target: ElementId,
}

/// State of the gesture currently being tracked
#[derive(Default)]
struct GestureSession {
    in_progress: bool,
    long_press_fired: bool,
    pending_timer: Option<PendingTimer>,
}

impl GestureSession {
    fn clear(&mut self) {
        // Drop cancels the sleep before it can ever complete
        self.pending_timer = None;
        self.in_progress = false;
        self.long_press_fired = false;
    }
}

/// Read-only view of the session, mostly for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub in_progress: bool,
    pub long_press_fired: bool,
    pub timer_armed: bool,
}

/// Gesture recognizer that turns raw touch notifications into tap / long tap signals
pub struct GestureRecognizer<D> {
    session: GestureSession,
    dispatcher: D,
}

impl<D: SignalDispatcher> GestureRecognizer<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            session: GestureSession::default(),
            dispatcher,
        }
    }

    /// Process a raw touch notification
    pub fn process(&mut self, event: RawTouchEvent) {
        tracing::trace!(
            "Touch {:?} on {} ({} active)",
            event.phase,
            event.target,
            event.touches
        );

        match event.phase {
            TouchPhase::Start => self.on_touch_start(event.touches, event.target),
            TouchPhase::End => self.on_touch_end(event.touches, &event.target),
            TouchPhase::Cancel => self.on_touch_cancel(),
        }
    }

    fn on_touch_start(&mut self, touches: usize, target: ElementId) {
        // Extra fingers joining an active gesture are ignored
        if self.session.in_progress {
            return;
        }
        self.session.in_progress = true;

        if touches == 1 {
            tracing::debug!("Gesture started on {}, long press armed", target);
            self.session.pending_timer = Some(PendingTimer {
                deadline: Instant::now() + LONG_PRESS_DELAY,
                sleep: None,
                target,
            });
        } else {
            tracing::debug!("Multi-touch gesture started on {} ({} touches)", target, touches);
        }
    }

    fn on_touch_end(&mut self, touches: usize, target: &ElementId) {
        if self.session.in_progress && touches == 0 && !self.session.long_press_fired {
            tracing::debug!("Tap on {}", target);
            self.dispatcher.dispatch(target, GestureSignal::Tap);
        }
        self.session.clear();
    }

    fn on_touch_cancel(&mut self) {
        if self.session.in_progress {
            tracing::debug!("Gesture cancelled");
        }
        self.session.clear();
    }

    /// Resolves once the armed long-press timer elapses.
    /// Never resolves while no timer is armed.
    pub async fn long_press_due(&mut self) {
        match self.session.pending_timer.as_mut() {
            Some(timer) => {
                let deadline = timer.deadline;
                timer
                    .sleep
                    .get_or_insert_with(|| Box::pin(sleep_until(deadline)))
                    .as_mut()
                    .await
            }
            None => std::future::pending().await,
        }
    }

    /// Long-press timer callback: marks the session and dispatches `longtap`.
    /// The session stays in progress until the touch ends or is cancelled.
    pub fn on_long_press_timeout(&mut self) {
        let Some(timer) = self.session.pending_timer.take() else {
            return;
        };
        self.session.long_press_fired = true;
        tracing::debug!("Long tap on {}", timer.target);
        self.dispatcher.dispatch(&timer.target, GestureSignal::LongTap);
    }

    /// Drop the current session, cancelling any armed timer
    pub fn reset(&mut self) {
        self.session.clear();
    }

    pub fn session(&self) -> SessionSnapshot {
        SessionSnapshot {
            in_progress: self.session.in_progress,
            long_press_fired: self.session.long_press_fired,
            timer_armed: self.session.pending_timer.is_some(),
        }
    }
}
