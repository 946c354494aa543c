//! Session module: the hike lifecycle state machine and its tick.

pub mod controller;
pub mod ticker;
pub mod types;

pub use controller::HikeSessionController;
pub use ticker::Ticker;
pub use types::{MetricsSnapshot, SessionError, SessionState, SessionView};
