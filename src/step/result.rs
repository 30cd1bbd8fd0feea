//! Step records
//!
//! A [`StepResult`] is the immutable record of one point in an algorithm's
//! execution: what happened, at which granularity, which pseudocode lines
//! and array positions to highlight, the live variables, an optional call
//! stack snapshot, and an algorithm-shaped payload holding the data being
//! sorted.
//!
//! Payload arrays are reference-counted. When consecutive steps leave an
//! array untouched, [`StepResult::accept_equal_step_data`] lets the newer
//! step share the older step's allocation, so a long run of read-only steps
//! costs one array, not hundreds.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::call_stack::FrozenCallStack;
use super::color::SemanticColor;
use super::item::IndexedNumber;
use super::kind::StepKind;
use super::variable::Variable;

// ========== Array snapshots ==========

/// Snapshot of one array at a single step, with positional highlights.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySnapshot {
    items: Rc<Vec<IndexedNumber>>,
    highlights: FxHashMap<usize, SemanticColor>,
}

impl ArraySnapshot {
    pub fn new(items: Vec<IndexedNumber>) -> Self {
        ArraySnapshot {
            items: Rc::new(items),
            highlights: FxHashMap::default(),
        }
    }

    pub fn with_highlights(
        items: Vec<IndexedNumber>,
        highlights: FxHashMap<usize, SemanticColor>,
    ) -> Self {
        ArraySnapshot {
            items: Rc::new(items),
            highlights,
        }
    }

    pub fn items(&self) -> &[IndexedNumber] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highlight role of one position, if any.
    pub fn highlight(&self, position: usize) -> Option<SemanticColor> {
        self.highlights.get(&position).copied()
    }

    pub fn highlights(&self) -> &FxHashMap<usize, SemanticColor> {
        &self.highlights
    }

    /// The raw values in slot order.
    pub fn values(&self) -> Vec<i32> {
        self.items.iter().map(|item| item.value).collect()
    }

    /// Whether this snapshot shares its item allocation with another.
    pub fn shares_items_with(&self, other: &ArraySnapshot) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    /// Shares the other snapshot's allocation when the items are equal.
    /// Re-applying with the same argument is a no-op.
    fn adopt(&mut self, other: &ArraySnapshot) {
        if Rc::ptr_eq(&self.items, &other.items) {
            return;
        }
        if self.items == other.items {
            self.items = Rc::clone(&other.items);
        }
    }
}

/// A named auxiliary array rendered alongside the primary one, with its own
/// highlights and watched variables.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArray {
    pub name: &'static str,
    pub snapshot: ArraySnapshot,
    pub variables: Vec<Variable>,
}

impl NamedArray {
    pub fn new(name: &'static str, snapshot: ArraySnapshot) -> Self {
        NamedArray {
            name,
            snapshot,
            variables: Vec::new(),
        }
    }

    pub fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.variables = variables;
        self
    }
}

// ========== Payloads ==========

/// Algorithm-shaped payload of a step record.
#[derive(Debug, Clone, PartialEq)]
pub enum StepPayload {
    /// One array with positional highlights.
    SingleArray { array: ArraySnapshot },
    /// A primary array plus named auxiliary arrays (merge sort's queues).
    MultiArray {
        primary: ArraySnapshot,
        auxiliary: Vec<NamedArray>,
    },
    /// An array doubling as a binary heap, with the heap region's end and
    /// draw toggles for the two renderings.
    Heap {
        array: ArraySnapshot,
        heap_end: usize,
        draw_heap: bool,
        draw_array: bool,
    },
}

impl StepPayload {
    /// The main array, whatever the payload shape.
    pub fn primary(&self) -> &ArraySnapshot {
        match self {
            StepPayload::SingleArray { array } => array,
            StepPayload::MultiArray { primary, .. } => primary,
            StepPayload::Heap { array, .. } => array,
        }
    }

    fn primary_mut(&mut self) -> &mut ArraySnapshot {
        match self {
            StepPayload::SingleArray { array } => array,
            StepPayload::MultiArray { primary, .. } => primary,
            StepPayload::Heap { array, .. } => array,
        }
    }

    /// Auxiliary arrays, empty unless the payload carries them.
    pub fn auxiliary(&self) -> &[NamedArray] {
        match self {
            StepPayload::MultiArray { auxiliary, .. } => auxiliary,
            _ => &[],
        }
    }
}

// ========== Step records ==========

/// Immutable record of one point in an algorithm's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    kind: StepKind,
    is_final: bool,
    description: String,
    highlighted_lines: FxHashMap<usize, SemanticColor>,
    variables: Vec<Variable>,
    call_stack: Option<FrozenCallStack>,
    payload: StepPayload,
}

impl StepResult {
    /// Starts building a `Code` step.
    pub fn code(description: impl Into<String>) -> StepBuilder {
        StepBuilder::new(StepKind::Code, description.into())
    }

    /// Starts building a `Significant` step.
    pub fn significant(description: impl Into<String>) -> StepBuilder {
        StepBuilder::new(StepKind::Significant, description.into())
    }

    /// Starts building an `Algorithmic` step.
    pub fn algorithmic(description: impl Into<String>) -> StepBuilder {
        StepBuilder::new(StepKind::Algorithmic, description.into())
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Whether this is the last step the algorithm will ever produce.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Pseudocode lines to highlight, by line number.
    pub fn highlighted_lines(&self) -> &FxHashMap<usize, SemanticColor> {
        &self.highlighted_lines
    }

    pub fn line_highlight(&self, line: usize) -> Option<SemanticColor> {
        self.highlighted_lines.get(&line).copied()
    }

    /// Variables watched at this step, header list only.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Header variables followed by auxiliary-array variables, dropping
    /// later duplicates of an already-seen name.
    pub fn merged_variables(&self) -> Vec<&Variable> {
        let mut merged: Vec<&Variable> = Vec::new();
        let sources = std::iter::once(self.variables.as_slice())
            .chain(self.payload.auxiliary().iter().map(|aux| aux.variables.as_slice()));
        for source in sources {
            for var in source {
                if !merged.iter().any(|seen| seen.name == var.name) {
                    merged.push(var);
                }
            }
        }
        merged
    }

    pub fn call_stack(&self) -> Option<&FrozenCallStack> {
        self.call_stack.as_ref()
    }

    pub fn payload(&self) -> &StepPayload {
        &self.payload
    }

    /// The main array, whatever the payload shape.
    pub fn primary(&self) -> &ArraySnapshot {
        self.payload.primary()
    }

    /// Adopts the other step's allocations for every payload component that
    /// compares equal. Safe to re-apply; shared components stay shared.
    pub fn accept_equal_step_data(&mut self, other: &StepResult) {
        self.payload.primary_mut().adopt(other.payload.primary());

        if let (
            StepPayload::MultiArray { auxiliary, .. },
            StepPayload::MultiArray {
                auxiliary: theirs, ..
            },
        ) = (&mut self.payload, &other.payload)
        {
            for aux in auxiliary.iter_mut() {
                if let Some(twin) = theirs.iter().find(|t| t.name == aux.name) {
                    aux.snapshot.adopt(&twin.snapshot);
                }
            }
        }

        if let (Some(mine), Some(theirs)) = (&mut self.call_stack, &other.call_stack) {
            mine.adopt(theirs);
        }
    }
}

// ========== Builder ==========

/// Builder for [`StepResult`]. Finished by one of the payload-shaped
/// terminal methods.
pub struct StepBuilder {
    kind: StepKind,
    is_final: bool,
    description: String,
    highlighted_lines: FxHashMap<usize, SemanticColor>,
    variables: Vec<Variable>,
    call_stack: Option<FrozenCallStack>,
}

impl StepBuilder {
    fn new(kind: StepKind, description: String) -> Self {
        StepBuilder {
            kind,
            is_final: false,
            description,
            highlighted_lines: FxHashMap::default(),
            variables: Vec::new(),
            call_stack: None,
        }
    }

    /// Marks this as the last step the algorithm will produce.
    pub fn final_step(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Highlights one pseudocode line.
    pub fn line(mut self, line: usize, color: SemanticColor) -> Self {
        self.highlighted_lines.insert(line, color);
        self
    }

    pub fn var(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn vars(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.variables.extend(variables);
        self
    }

    pub fn call_stack(mut self, stack: FrozenCallStack) -> Self {
        self.call_stack = Some(stack);
        self
    }

    /// Finishes with a single-array payload.
    pub fn single(self, array: ArraySnapshot) -> StepResult {
        self.finish(StepPayload::SingleArray { array })
    }

    /// Finishes with a primary array plus named auxiliary arrays.
    pub fn multi(self, primary: ArraySnapshot, auxiliary: Vec<NamedArray>) -> StepResult {
        self.finish(StepPayload::MultiArray { primary, auxiliary })
    }

    /// Finishes with a heap-shaped payload.
    pub fn heap(
        self,
        array: ArraySnapshot,
        heap_end: usize,
        draw_heap: bool,
        draw_array: bool,
    ) -> StepResult {
        self.finish(StepPayload::Heap {
            array,
            heap_end,
            draw_heap,
            draw_array,
        })
    }

    fn finish(self, payload: StepPayload) -> StepResult {
        StepResult {
            kind: self.kind,
            is_final: self.is_final,
            description: self.description,
            highlighted_lines: self.highlighted_lines,
            variables: self.variables,
            call_stack: self.call_stack,
            payload,
        }
    }
}
