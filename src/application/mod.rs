pub mod input;
pub mod scenario;
pub mod signal_bus;
