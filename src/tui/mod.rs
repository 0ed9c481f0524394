//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the demo
//! screen, and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request flow
//!
//! `update()` answers a trigger with `Effect::SpawnRequest`. The request runs
//! as a tokio task and its single outcome comes back to this thread over a
//! `std::sync::mpsc` channel as `Action::ResponseReceived`, tagged with the
//! generation it was dispatched under.
//!
//! ## Redraw Strategy
//!
//! - **In flight**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms and only redraws on events or results.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::network::RequestDescriptor;
use crate::service::RequestService;
use crate::tui::component::EventHandler;
use crate::tui::components::{FieldEvent, ResultViewState, TextField};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Maximum rows the parameter field shows before it scrolls internally.
const PARAMS_VISIBLE_LINES: u16 = 5;

/// Which text field receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Url,
    Params,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Url => Focus::Params,
            Focus::Params => Focus::Url,
        }
    }
}

/// TUI-specific presentation state (not part of core state)
pub struct TuiState {
    pub url_field: TextField,
    pub params_field: TextField,
    pub focus: Focus,
    pub result_view: ResultViewState,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            url_field: TextField::single_line("URL", &app.url),
            params_field: TextField::multi_line(
                "Params (JSON)",
                &app.params_text,
                PARAMS_VISIBLE_LINES,
            ),
            focus: Focus::Url,
            result_view: ResultViewState::new(),
            spinner_frame: 0,
        }
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Focus::Url => &mut self.url_field,
            Focus::Params => &mut self.params_field,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Apply one terminal event to the TUI and core state.
///
/// Returns the effect produced by the reducer, if the event reached it.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::Quit | TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::Trigger(kind) => update(app, Action::Trigger(kind)),
        TuiEvent::ClearResult => {
            tui.result_view.reset();
            update(app, Action::ClearResult)
        }
        TuiEvent::FocusNext | TuiEvent::FocusPrev => {
            tui.focus = tui.focus.toggle();
            Effect::None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.result_view.handle_event(&event);
            Effect::None
        }
        other => {
            let focus = tui.focus;
            match tui.focused_field().handle_event(&other) {
                Some(FieldEvent::Submit) => {
                    update(app, Action::Trigger(crate::network::RequestKind::Get))
                }
                Some(FieldEvent::ContentChanged) => {
                    match focus {
                        Focus::Url => app.url = tui.url_field.text().to_string(),
                        Focus::Params => app.params_text = tui.params_field.text().to_string(),
                    }
                    Effect::None
                }
                None => Effect::None,
            }
        }
    }
}

pub fn run(app: App) -> std::io::Result<()> {
    let mut app = app;
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for outcomes from request tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if app.in_flight {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.in_flight {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_event(&mut app, &mut tui, event) {
                Effect::Quit => should_quit = true,
                Effect::SpawnRequest {
                    generation,
                    descriptor,
                } => spawn_request(app.service.clone(), generation, descriptor, tx.clone()),
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Outcomes from request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let previous_result = app.result.clone();
            update(&mut app, action);
            if app.result != previous_result {
                tui.result_view.reset();
            }
        }
    }

    if app.in_flight {
        info!(
            "Quitting with request generation {} still in flight; its outcome will be dropped",
            app.generation
        );
    }

    ratatui::restore();
    Ok(())
}

/// Run one request on the tokio runtime and deliver its outcome once.
fn spawn_request(
    service: RequestService,
    generation: u64,
    descriptor: RequestDescriptor,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning {} request (generation {})",
        descriptor.kind.label(),
        generation
    );
    tokio::spawn(async move {
        let outcome = service.send(&descriptor).await;
        if tx
            .send(Action::ResponseReceived {
                generation,
                outcome,
            })
            .is_err()
        {
            warn!(
                "Dropping outcome of generation {}: receiver dropped",
                generation
            );
        }
    });
}
