//! Quicksort
//!
//! Lomuto partitioning with the last element as pivot. Recursion is
//! modeled explicitly: entering a sub-call pushes the caller's locals onto
//! the call stack, and returning pops and restores them by name, so every
//! step can carry a faithful snapshot of the whole stack. Each completed
//! partition settles the pivot and closes an `Algorithmic` step.

use rustc_hash::FxHashMap;

use crate::step::{
    index_input, ArraySnapshot, CallStack, IndexedNumber, SemanticColor, StepError, StepResult,
    Variable,
};

use super::{exhausted, mark_range, sorted_highlights, trivially_sorted_step, SortingAlgorithm};

const PSEUDOCODE: &[&str] = &[
    "procedure quickSort(A, l, r):",
    "  if l >= r: return",
    "  pivot = A[r]",
    "  i = l - 1",
    "  for j = l .. r - 1:",
    "    if A[j] <= pivot:",
    "      i = i + 1; swap A[i], A[j]",
    "  p = i + 1; swap A[p], A[r]",
    "  quickSort(A, l, p - 1)",
    "  quickSort(A, p + 1, r)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    CallEnter,
    BaseCase,
    ChoosePivot,
    ScanCheck,
    LowSwap,
    PlacePivot,
    RecurseLeft,
    Return,
    Finish,
    Done,
}

/// What to do in the caller once the current call has returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    AfterLeft,
    AfterRight,
}

pub struct QuickSort {
    items: Vec<IndexedNumber>,
    sorted: Vec<bool>,
    l: i64,
    r: i64,
    i: i64,
    j: i64,
    p: i64,
    calls: CallStack,
    resumes: Vec<Resume>,
    phase: Phase,
}

impl QuickSort {
    pub fn new() -> Self {
        QuickSort {
            items: Vec::new(),
            sorted: Vec::new(),
            l: 0,
            r: 0,
            i: 0,
            j: 0,
            p: 0,
            calls: CallStack::new(),
            resumes: Vec::new(),
            phase: Phase::Done,
        }
    }

    fn snapshot(&self, highlights: FxHashMap<usize, SemanticColor>) -> ArraySnapshot {
        ArraySnapshot::with_highlights(self.items.clone(), highlights)
    }

    /// Settled positions plus the active range tint.
    fn active_range(&self) -> FxHashMap<usize, SemanticColor> {
        let mut highlights = sorted_highlights(&self.sorted);
        if self.l >= 0 && self.l <= self.r {
            mark_range(
                &mut highlights,
                self.l as usize..(self.r + 1) as usize,
                SemanticColor::Range,
            );
        }
        highlights
    }

    fn loop_vars(&self) -> Vec<Variable> {
        vec![
            Variable::index("l", self.l),
            Variable::index("r", self.r),
            Variable::index("i", self.i),
            Variable::index("j", self.j),
        ]
    }

    fn saved_locals(&self) -> Vec<Variable> {
        vec![
            Variable::plain("l", self.l),
            Variable::plain("r", self.r),
            Variable::plain("i", self.i),
            Variable::plain("j", self.j),
            Variable::plain("p", self.p),
        ]
    }

    fn restore_locals(&mut self) -> Result<(), StepError> {
        let frame = self.calls.pop("quickSort")?;
        self.l = frame.restore_int("l")?;
        self.r = frame.restore_int("r")?;
        self.i = frame.restore_int("i")?;
        self.j = frame.restore_int("j")?;
        self.p = frame.restore_int("p")?;
        Ok(())
    }

    fn pivot_var(&self) -> Variable {
        let position = self.r as usize;
        Variable::at("pivot", self.items[position].value as i64, position)
            .colored(SemanticColor::Pivot)
    }
}

impl Default for QuickSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingAlgorithm for QuickSort {
    fn name(&self) -> &'static str {
        "Quick Sort"
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn reset(&mut self, input: &[i32]) -> StepResult {
        self.items = index_input(input);
        self.sorted = vec![false; input.len()];
        self.l = 0;
        self.r = input.len() as i64 - 1;
        self.i = 0;
        self.j = 0;
        self.p = 0;
        self.calls = CallStack::new();
        self.resumes = Vec::new();

        if input.len() <= 1 {
            self.sorted.iter_mut().for_each(|s| *s = true);
            self.phase = Phase::Done;
            return trivially_sorted_step(&self.items);
        }

        self.calls.push("quickSort", Vec::new());
        self.phase = Phase::CallEnter;
        StepResult::algorithmic(format!("Initial array of {} elements", input.len()))
            .line(0, SemanticColor::Accent)
            .vars(self.loop_vars())
            .call_stack(self.calls.freeze())
            .single(self.snapshot(FxHashMap::default()))
    }

    fn next_step(&mut self) -> Result<StepResult, StepError> {
        match self.phase {
            Phase::CallEnter => {
                let step = StepResult::code(format!(
                    "quickSort(l = {}, r = {})",
                    self.l, self.r
                ))
                .line(0, SemanticColor::Accent)
                .line(1, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(self.active_range()));
                self.phase = if self.l >= self.r { Phase::BaseCase } else { Phase::ChoosePivot };
                Ok(step)
            }
            Phase::BaseCase => {
                let step = if self.l == self.r {
                    let position = self.l as usize;
                    self.sorted[position] = true;
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(position, SemanticColor::Sorted);
                    StepResult::code(format!(
                        "Range [{}, {}] has one element: already in place",
                        self.l, self.r
                    ))
                    .line(1, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(highlights))
                } else {
                    StepResult::code(format!("Range [{}, {}] is empty", self.l, self.r))
                        .line(1, SemanticColor::Accent)
                        .vars(self.loop_vars())
                        .call_stack(self.calls.freeze())
                        .single(self.snapshot(sorted_highlights(&self.sorted)))
                };
                self.phase = Phase::Return;
                Ok(step)
            }
            Phase::ChoosePivot => {
                self.i = self.l - 1;
                self.j = self.l;
                let mut highlights = self.active_range();
                highlights.insert(self.r as usize, SemanticColor::Pivot);
                let step = StepResult::significant(format!(
                    "Chose pivot A[{}] = {}",
                    self.r,
                    self.items[self.r as usize].value
                ))
                .line(2, SemanticColor::Pivot)
                .line(3, SemanticColor::Accent)
                .vars(self.loop_vars())
                .var(self.pivot_var())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(highlights));
                self.phase = Phase::ScanCheck;
                Ok(step)
            }
            Phase::ScanCheck => {
                let j = self.j as usize;
                let pivot = self.items[self.r as usize].value;
                let mut highlights = self.active_range();
                highlights.insert(j, SemanticColor::Compare);
                highlights.insert(self.r as usize, SemanticColor::Pivot);
                let step = StepResult::code(format!(
                    "Comparing A[{}] = {} with pivot {}",
                    j, self.items[j].value, pivot
                ))
                .line(4, SemanticColor::Accent)
                .line(5, SemanticColor::Compare)
                .vars(self.loop_vars())
                .var(self.pivot_var())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(highlights));
                if self.items[j].value <= pivot {
                    self.phase = Phase::LowSwap;
                } else {
                    self.j += 1;
                    self.phase = if self.j > self.r - 1 { Phase::PlacePivot } else { Phase::ScanCheck };
                }
                Ok(step)
            }
            Phase::LowSwap => {
                self.i += 1;
                let (i, j) = (self.i as usize, self.j as usize);
                let step = if i != j {
                    self.items.swap(i, j);
                    let mut highlights = self.active_range();
                    highlights.insert(i, SemanticColor::Swap);
                    highlights.insert(j, SemanticColor::Swap);
                    highlights.insert(self.r as usize, SemanticColor::Pivot);
                    StepResult::significant(format!(
                        "Moved {} into the low side at position {}",
                        self.items[i].value, i
                    ))
                    .line(6, SemanticColor::Swap)
                    .vars(self.loop_vars())
                    .var(self.pivot_var())
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(highlights))
                } else {
                    let mut highlights = self.active_range();
                    highlights.insert(j, SemanticColor::Accent);
                    highlights.insert(self.r as usize, SemanticColor::Pivot);
                    StepResult::code(format!(
                        "A[{}] = {} is already in the low side",
                        j, self.items[j].value
                    ))
                    .line(6, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .var(self.pivot_var())
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(highlights))
                };
                self.j += 1;
                self.phase = if self.j > self.r - 1 { Phase::PlacePivot } else { Phase::ScanCheck };
                Ok(step)
            }
            Phase::PlacePivot => {
                self.p = self.i + 1;
                let (p, r) = (self.p as usize, self.r as usize);
                if p != r {
                    self.items.swap(p, r);
                }
                self.sorted[p] = true;
                let mut highlights = self.active_range();
                highlights.insert(p, SemanticColor::Sorted);
                let step = StepResult::algorithmic(format!(
                    "Partitioned: pivot {} settled at position {}",
                    self.items[p].value, p
                ))
                .line(7, SemanticColor::Swap)
                .vars(self.loop_vars())
                .var(Variable::at("p", self.p, p).colored(SemanticColor::Pivot))
                .call_stack(self.calls.freeze())
                .single(self.snapshot(highlights));
                self.phase = Phase::RecurseLeft;
                Ok(step)
            }
            Phase::RecurseLeft => {
                self.calls.push("quickSort", self.saved_locals());
                self.resumes.push(Resume::AfterLeft);
                self.r = self.p - 1;
                let step = StepResult::code(format!(
                    "Recursing into the left side A[{}..={}]",
                    self.l, self.r
                ))
                .line(8, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(self.active_range()));
                self.phase = Phase::CallEnter;
                Ok(step)
            }
            Phase::Return => match self.resumes.pop() {
                Some(Resume::AfterLeft) => {
                    self.restore_locals()?;
                    self.calls.push("quickSort", self.saved_locals());
                    self.resumes.push(Resume::AfterRight);
                    self.l = self.p + 1;
                    let step = StepResult::code(format!(
                        "Left side done: recursing into A[{}..={}]",
                        self.l, self.r
                    ))
                    .line(9, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(self.active_range()));
                    self.phase = Phase::CallEnter;
                    Ok(step)
                }
                Some(Resume::AfterRight) => {
                    self.restore_locals()?;
                    let step = StepResult::code(format!(
                        "Both sides of pivot position {} are sorted",
                        self.p
                    ))
                    .line(9, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(sorted_highlights(&self.sorted)));
                    self.phase = Phase::Return;
                    Ok(step)
                }
                None => {
                    self.calls.pop("quickSort")?;
                    let step = StepResult::code("All recursive calls have returned")
                        .line(0, SemanticColor::Accent)
                        .call_stack(self.calls.freeze())
                        .single(self.snapshot(sorted_highlights(&self.sorted)));
                    self.phase = Phase::Finish;
                    Ok(step)
                }
            },
            Phase::Finish => {
                self.sorted.iter_mut().for_each(|s| *s = true);
                let step = StepResult::algorithmic("Array is sorted")
                    .final_step()
                    .line(0, SemanticColor::Sorted)
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(sorted_highlights(&self.sorted)));
                self.phase = Phase::Done;
                Ok(step)
            }
            Phase::Done => Err(exhausted("quicksort")),
        }
    }
}
