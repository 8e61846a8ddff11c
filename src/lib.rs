//! Tap and long-tap recognition from raw touch notifications.
//!
//! A [`TouchSurface`] delivers raw start / end / cancel notifications.
//! [`attach`] puts a [`GestureRecognizer`] on it which dispatches
//! [`GestureSignal::Tap`] and [`GestureSignal::LongTap`] back on the element
//! the touch started on.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::input::{
    attach, GestureRecognizer, RecognizerHandle, SessionSnapshot, TouchSurface, LONG_PRESS_DELAY,
};
pub use application::scenario::{Scenario, ScenarioStep};
pub use application::signal_bus::{
    create_signal_bus, ElementListener, SharedSignalBus, SignalBus, SignalDispatcher,
};
pub use domain::{DispatchedSignal, ElementId, GestureError, GestureSignal, RawTouchEvent, TouchPhase};
