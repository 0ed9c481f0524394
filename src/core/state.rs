//! # Application State
//!
//! Core state of the request demo screen. Domain logic only, no TUI types.
//! Presentation state (focus, scroll, cursors) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: RequestService        // request service (shared HTTP client)
//! ├── url: String                    // URL field
//! ├── params_text: String            // parameter field (JSON text)
//! ├── in_flight: bool                // latest request not answered yet
//! ├── pending_kind: Option<Kind>     // operation of the latest request
//! ├── result: String                 // display text of the last outcome
//! ├── status_message: String         // status bar text
//! ├── generation: u64                // token of the latest dispatched request
//! └── last_completed: Option<Time>   // when the displayed outcome arrived
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Local};

use crate::core::config::{DEFAULT_PARAMS, DEFAULT_URL, ResolvedConfig};
use crate::network::RequestKind;
use crate::service::RequestService;

pub struct App {
    pub service: RequestService,
    pub url: String,
    pub params_text: String,
    pub in_flight: bool,
    pub pending_kind: Option<RequestKind>,
    pub result: String,
    pub status_message: String,
    /// Incremented on every dispatch. Only a response carrying the current
    /// value may update the screen.
    pub generation: u64,
    pub last_completed: Option<DateTime<Local>>,
}

impl App {
    pub fn new(service: RequestService) -> Self {
        Self {
            service,
            url: DEFAULT_URL.to_string(),
            params_text: DEFAULT_PARAMS.to_string(),
            in_flight: false,
            pending_kind: None,
            result: String::new(),
            status_message: String::from("Ready"),
            generation: 0,
            last_completed: None,
        }
    }

    pub fn from_config(service: RequestService, config: &ResolvedConfig) -> Self {
        Self {
            url: config.url.clone(),
            params_text: config.params.clone(),
            ..Self::new(service)
        }
    }
}
