mod gesture;
mod surface;

pub use gesture::{GestureRecognizer, SessionSnapshot, LONG_PRESS_DELAY};
pub use surface::{attach, RecognizerHandle, TouchSurface};
