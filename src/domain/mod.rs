pub mod error;
pub mod signal;
pub mod touch;

pub use error::GestureError;
pub use signal::{DispatchedSignal, GestureSignal};
pub use touch::{ElementId, RawTouchEvent, TouchPhase};
