//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, play mode
//! - **[`panes`]** — stateless render functions for each visible pane (pseudocode,
//!   array, heap tree, state, log, status bar)
//! - **[`theme`]** — color palettes and the semantic-role-to-color mapping
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`AlgorithmRunner`] and call [`App::run`] to start the event loop.
//!
//! [`AlgorithmRunner`]: crate::algorithms::AlgorithmRunner
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
