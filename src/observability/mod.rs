//! # Observability
//!
//! Structured JSON logging with typed events.
//!
//! ```ignore
//! use junkboard::observability::{log_event, Event};
//!
//! log_event(Event::PageMoved, &[("board_id", &id), ("from", "0"), ("to", "2")]);
//! ```
//!
//! Secret values are never logged.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
