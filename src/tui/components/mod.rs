//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, adapter name, status, spinner
//! - `ActionBar`: key hints for the four request operations
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `TextField`: editable URL / parameter inputs
//! - `ResultView`: scrollable view of the last result
//!
//! Components receive external data as props (struct fields), never by
//! reaching into `App`. Each file holds its state, event handling,
//! rendering and tests.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── action_bar.rs
//! ├── result_view.rs
//! └── text_field/      (text input with wrapping cursor)
//! ```

pub mod action_bar;
pub mod result_view;
pub mod text_field;
mod title_bar;

pub use action_bar::ActionBar;
pub use result_view::{ResultView, ResultViewState};
pub use text_field::{FieldEvent, TextField};
pub use title_bar::TitleBar;
