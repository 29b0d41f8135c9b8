//! # Events
//!
//! Every observable event is a variant here. Event names are stable strings
//! so log consumers can match on them.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    ConfigLoaded,
    ServerStart,
    ServerStop,
    BootFailed,

    // Boards
    BoardCreated,
    BoardUpdated,
    BoardDeleted,

    // Pages
    PageCreated,
    PageUpdated,
    PageMoved,
    PageDeleted,

    // Elements
    ElementCreated,
    ElementUpdated,
    ElementDeleted,
    ElementsRestacked,

    // Requests
    AccessDenied,
    ConsistencyViolation,
    StorageFailure,
    HttpRequest,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::ServerStop => "SERVER_STOP",
            Event::BootFailed => "BOOT_FAILED",

            Event::BoardCreated => "BOARD_CREATED",
            Event::BoardUpdated => "BOARD_UPDATED",
            Event::BoardDeleted => "BOARD_DELETED",

            Event::PageCreated => "PAGE_CREATED",
            Event::PageUpdated => "PAGE_UPDATED",
            Event::PageMoved => "PAGE_MOVED",
            Event::PageDeleted => "PAGE_DELETED",

            Event::ElementCreated => "ELEMENT_CREATED",
            Event::ElementUpdated => "ELEMENT_UPDATED",
            Event::ElementDeleted => "ELEMENT_DELETED",
            Event::ElementsRestacked => "ELEMENTS_RESTACKED",

            Event::AccessDenied => "ACCESS_DENIED",
            Event::ConsistencyViolation => "CONSISTENCY_VIOLATION",
            Event::StorageFailure => "STORAGE_FAILURE",
            Event::HttpRequest => "HTTP_REQUEST",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::StorageFailure => Severity::Error,
            Event::AccessDenied | Event::ConsistencyViolation => Severity::Warn,
            _ => Severity::Info,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::PageMoved.as_str(), "PAGE_MOVED");
        assert_eq!(Event::HttpRequest.to_string(), "HTTP_REQUEST");
    }

    #[test]
    fn test_event_severity() {
        assert!(Event::BootFailed.is_fatal());
        assert_eq!(Event::AccessDenied.severity(), Severity::Warn);
        assert_eq!(Event::StorageFailure.severity(), Severity::Error);
        assert_eq!(Event::BoardCreated.severity(), Severity::Info);
    }
}
