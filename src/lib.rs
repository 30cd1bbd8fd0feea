//! # Introduction
//!
//! sortty runs classic sorting algorithms as explicit state machines that
//! yield a step record for every meaningful action: a comparison, a swap, a
//! completed pass. The records accumulate in a navigable history, so the
//! whole run can be replayed forward and backward at three granularities
//! through a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Step pipeline
//!
//! ```text
//! Input → Algorithm → StepResult stream → StepResultCollection → TUI
//! ```
//!
//! 1. [`step`] — the step data model: granularities, array snapshots,
//!    tracked variables, frozen call stacks, and the [`step::StepResult`]
//!    record itself.
//! 2. [`algorithms`] — six sorting algorithms implemented as resumable
//!    state machines behind the [`algorithms::SortingAlgorithm`] trait,
//!    driven by an [`algorithms::AlgorithmRunner`] that generates steps
//!    lazily and deduplicates unchanged payloads.
//! 3. [`history`] — the [`history::StepResultCollection`]: grouped step
//!    storage with bidirectional navigation at code, sub-step, and full-step
//!    granularity.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Bubble sort, insertion sort, selection sort, quicksort (Lomuto, last
//! element pivot), merge sort, and heapsort with a live binary-tree view.

pub mod algorithms;
pub mod history;
pub mod step;
pub mod ui;
