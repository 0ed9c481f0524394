//! # Actions
//!
//! Everything that can happen on the screen becomes an `Action`.
//! User presses F1? That's `Action::Trigger(RequestKind::Get)`.
//! The HTTP call finishes? That's `Action::ResponseReceived { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing any I/O the caller must perform. No side
//! effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Stale responses
//!
//! Requests may overlap. Each dispatch bumps `App::generation` and the
//! spawned request carries that number back. A response whose generation is
//! not the current one is dropped, so an older request finishing late never
//! overwrites the result of a newer one.

use chrono::Local;
use log::{debug, info};

use crate::core::params::parse_params;
use crate::core::state::App;
use crate::network::{RequestDescriptor, RequestError, RequestKind, Response};

/// Shown when an action is triggered with an empty URL field.
pub const EMPTY_URL_MESSAGE: &str = "Please enter a valid URL";

#[derive(Debug)]
pub enum Action {
    /// One of the four request buttons was pressed.
    Trigger(RequestKind),
    /// A request finished. `generation` is the token it was dispatched with.
    ResponseReceived {
        generation: u64,
        outcome: Result<Response, RequestError>,
    },
    ClearResult,
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SpawnRequest {
        generation: u64,
        descriptor: RequestDescriptor,
    },
}

/// Validate the screen inputs and build a descriptor.
///
/// Returns the text to display when validation fails. Shared by the
/// reducer and the one-shot command line path.
pub fn prepare_request(
    url: &str,
    params_text: &str,
    kind: RequestKind,
) -> Result<RequestDescriptor, String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(EMPTY_URL_MESSAGE.to_string());
    }

    let params = if kind.takes_params() {
        Some(parse_params(params_text).map_err(|e| format_error(&e))?)
    } else {
        None
    };

    Ok(RequestDescriptor {
        url: url.to_string(),
        kind,
        params,
    })
}

/// Display text for the outcome of a request.
pub fn format_outcome(outcome: &Result<Response, RequestError>) -> String {
    match outcome {
        Ok(response) => response.to_pretty_json(),
        Err(e) => format_error(e),
    }
}

fn format_error(error: &dyn std::fmt::Display) -> String {
    format!("Error: {error}")
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Trigger(kind) => match prepare_request(&app.url, &app.params_text, kind) {
            Ok(descriptor) => {
                app.generation += 1;
                app.in_flight = true;
                app.pending_kind = Some(kind);
                app.status_message = format!("{} {} ...", kind.label(), descriptor.url);
                info!(
                    "Dispatching {} {} (generation {})",
                    kind.label(),
                    descriptor.url,
                    app.generation
                );
                Effect::SpawnRequest {
                    generation: app.generation,
                    descriptor,
                }
            }
            Err(message) => {
                debug!("Rejected {}: {}", kind.label(), message);
                app.result = message;
                Effect::None
            }
        },
        Action::ResponseReceived {
            generation,
            outcome,
        } => {
            if generation != app.generation {
                debug!(
                    "Discarding stale response (generation {}, current {})",
                    generation, app.generation
                );
                return Effect::None;
            }

            let label = app.pending_kind.take().map(|k| k.label()).unwrap_or("Request");
            app.status_message = match &outcome {
                Ok(response) => format!("{} done ({})", label, response.status_code),
                Err(e) => format!("{} failed [{}]", label, e.code()),
            };
            app.in_flight = false;
            app.result = format_outcome(&outcome);
            app.last_completed = Some(Local::now());
            Effect::None
        }
        Action::ClearResult => {
            app.result.clear();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
