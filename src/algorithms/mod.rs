//! Sorting algorithms as resumable step generators
//!
//! Each algorithm is a small state machine: a phase marker plus the loop
//! indices that would otherwise live in stack variables. Every call to
//! [`SortingAlgorithm::next_step`] advances the machine by exactly one
//! `Code`-granularity unit and yields the step record describing it.
//! Coarser stepping is layered on top by [`runner::AlgorithmRunner`],
//! which drains fine steps until one of the requested kind appears.

use clap::ValueEnum;
use rustc_hash::FxHashMap;

use crate::step::{ArraySnapshot, IndexedNumber, SemanticColor, StepError, StepResult};

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod runner;
pub mod selection;

pub use bubble::BubbleSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use runner::AlgorithmRunner;
pub use selection::SelectionSort;

/// A sorting algorithm that yields its execution one step at a time.
///
/// `reset` rebuilds all state from a fresh copy of the input and returns
/// the initial `Algorithmic` step. Afterwards `next_step` may be called
/// until it returns a step whose `is_final` flag is set; calling past that
/// point is an error.
pub trait SortingAlgorithm {
    /// Display name, such as "Bubble Sort".
    fn name(&self) -> &'static str;

    /// Pseudocode listing for the code pane. Step line highlights index
    /// into this slice.
    fn pseudocode(&self) -> &'static [&'static str];

    /// Rebuilds all state from the input and returns the initial step.
    fn reset(&mut self, input: &[i32]) -> StepResult;

    /// Advances the algorithm by one fine-grained unit.
    fn next_step(&mut self) -> Result<StepResult, StepError>;
}

/// The selectable algorithms, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmKind {
    Bubble,
    Insertion,
    Selection,
    Quick,
    Merge,
    Heap,
}

impl AlgorithmKind {
    pub fn create(self) -> Box<dyn SortingAlgorithm> {
        match self {
            AlgorithmKind::Bubble => Box::new(BubbleSort::new()),
            AlgorithmKind::Insertion => Box::new(InsertionSort::new()),
            AlgorithmKind::Selection => Box::new(SelectionSort::new()),
            AlgorithmKind::Quick => Box::new(QuickSort::new()),
            AlgorithmKind::Merge => Box::new(MergeSort::new()),
            AlgorithmKind::Heap => Box::new(HeapSort::new()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlgorithmKind::Bubble => "Bubble Sort",
            AlgorithmKind::Insertion => "Insertion Sort",
            AlgorithmKind::Selection => "Selection Sort",
            AlgorithmKind::Quick => "Quick Sort",
            AlgorithmKind::Merge => "Merge Sort",
            AlgorithmKind::Heap => "Heap Sort",
        }
    }
}

// ========== Shared step-building helpers ==========

/// Highlight map marking every settled position.
pub(crate) fn sorted_highlights(sorted: &[bool]) -> FxHashMap<usize, SemanticColor> {
    sorted
        .iter()
        .enumerate()
        .filter(|(_, settled)| **settled)
        .map(|(position, _)| (position, SemanticColor::Sorted))
        .collect()
}

/// Overlays a color onto a contiguous range of positions, replacing any
/// existing marks there.
pub(crate) fn mark_range(
    highlights: &mut FxHashMap<usize, SemanticColor>,
    range: std::ops::Range<usize>,
    color: SemanticColor,
) {
    for position in range {
        highlights.insert(position, color);
    }
}

/// Final step for inputs of one element or fewer, which are sorted as
/// given.
pub(crate) fn trivially_sorted_step(items: &[IndexedNumber]) -> StepResult {
    let description = if items.is_empty() {
        "Nothing to sort"
    } else {
        "A single element is already sorted"
    };
    let highlights = items
        .iter()
        .enumerate()
        .map(|(position, _)| (position, SemanticColor::Sorted))
        .collect();
    StepResult::algorithmic(description)
        .final_step()
        .single(ArraySnapshot::with_highlights(items.to_vec(), highlights))
}

/// Error for a `next_step` call after the final step was produced.
pub(crate) fn exhausted(algorithm: &'static str) -> StepError {
    StepError::AlgorithmExhausted { algorithm }
}
