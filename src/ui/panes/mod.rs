//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`code`]: Pseudocode listing with keyword emphasis and per-step line highlights
//! - [`array`]: Bar-chart view of the working array plus any auxiliary arrays
//! - [`tree`]: Binary-tree view of the heap region during heapsort
//! - [`stack`]: Tracked variables and the frozen call stack of the current step
//! - [`log`]: Scrolling list of step descriptions up to the current position
//! - [`status`]: Status bar with keybindings, position counters, and state badges
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function. Panes that scroll
//! take a `&mut usize` offset which they clamp against their own content, so
//! the [`App`](crate::ui::app::App) only ever adjusts raw offsets.

pub mod array;
pub mod code;
pub mod log;
pub mod stack;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use array::render_array_pane;
pub use code::render_code_pane;
pub use log::render_log_pane;
pub use stack::render_stack_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tree::render_tree_pane;
