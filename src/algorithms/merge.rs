//! Merge sort
//!
//! Top-down merge sort over half-open ranges. Recursion uses the same
//! explicit call stack discipline as quicksort. A merge copies both halves
//! into named working queues, leaving de-emphasized stale copies in the
//! primary array, then drains the queues back smallest-head-first; those
//! steps carry a multi-array payload so the queues render alongside the
//! primary array. Ties take the left head, keeping the sort stable.

use rustc_hash::FxHashMap;

use crate::step::{
    index_input, ArraySnapshot, CallStack, IndexedNumber, NamedArray, SemanticColor, StepError,
    StepResult, Variable,
};

use super::{exhausted, mark_range, sorted_highlights, trivially_sorted_step, SortingAlgorithm};

const PSEUDOCODE: &[&str] = &[
    "procedure mergeSort(A, l, r):",
    "  if r - l <= 1: return",
    "  m = (l + r) / 2",
    "  mergeSort(A, l, m)",
    "  mergeSort(A, m, r)",
    "  left = A[l..m); right = A[m..r)",
    "  k = l",
    "  while left or right is non-empty:",
    "    take the smaller head into A[k]; k = k + 1",
    "  done",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    CallEnter,
    BaseCase,
    Split,
    RecurseLeft,
    Return,
    CopyOut,
    TakeCheck,
    Take,
    MergeDone,
    Finish,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    AfterLeft,
    AfterRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

pub struct MergeSort {
    items: Vec<IndexedNumber>,
    sorted: Vec<bool>,
    l: usize,
    r: usize,
    m: usize,
    k: usize,
    /// Working queues for the merge in progress. Only one merge is ever
    /// active at a time, so these need not live in the call frames.
    left: Vec<IndexedNumber>,
    right: Vec<IndexedNumber>,
    li: usize,
    ri: usize,
    take_side: Side,
    calls: CallStack,
    resumes: Vec<Resume>,
    phase: Phase,
}

impl MergeSort {
    pub fn new() -> Self {
        MergeSort {
            items: Vec::new(),
            sorted: Vec::new(),
            l: 0,
            r: 0,
            m: 0,
            k: 0,
            left: Vec::new(),
            right: Vec::new(),
            li: 0,
            ri: 0,
            take_side: Side::Left,
            calls: CallStack::new(),
            resumes: Vec::new(),
            phase: Phase::Done,
        }
    }

    fn snapshot(&self, highlights: FxHashMap<usize, SemanticColor>) -> ArraySnapshot {
        ArraySnapshot::with_highlights(self.items.clone(), highlights)
    }

    fn range_highlights(&self) -> FxHashMap<usize, SemanticColor> {
        let mut highlights = sorted_highlights(&self.sorted);
        mark_range(&mut highlights, self.l..self.r, SemanticColor::Range);
        highlights
    }

    fn loop_vars(&self) -> Vec<Variable> {
        vec![
            Variable::index("l", self.l as i64),
            Variable::plain("r", self.r as i64),
            Variable::index("m", self.m as i64),
            Variable::index("k", self.k as i64),
        ]
    }

    fn saved_locals(&self) -> Vec<Variable> {
        vec![
            Variable::plain("l", self.l as i64),
            Variable::plain("r", self.r as i64),
            Variable::plain("m", self.m as i64),
            Variable::plain("k", self.k as i64),
        ]
    }

    fn restore_locals(&mut self) -> Result<(), StepError> {
        let frame = self.calls.pop("mergeSort")?;
        self.l = frame.restore_int("l")? as usize;
        self.r = frame.restore_int("r")? as usize;
        self.m = frame.restore_int("m")? as usize;
        self.k = frame.restore_int("k")? as usize;
        Ok(())
    }

    fn left_remaining(&self) -> usize {
        self.left.len() - self.li
    }

    fn right_remaining(&self) -> usize {
        self.right.len() - self.ri
    }

    /// The working queues as drained so far, each with its own highlights
    /// and remaining-count variable.
    fn queue_arrays(
        &self,
        left_hl: FxHashMap<usize, SemanticColor>,
        right_hl: FxHashMap<usize, SemanticColor>,
    ) -> Vec<NamedArray> {
        vec![
            NamedArray::new(
                "left",
                ArraySnapshot::with_highlights(self.left[self.li..].to_vec(), left_hl),
            )
            .with_variables(vec![Variable::plain(
                "remaining",
                self.left_remaining() as i64,
            )]),
            NamedArray::new(
                "right",
                ArraySnapshot::with_highlights(self.right[self.ri..].to_vec(), right_hl),
            )
            .with_variables(vec![Variable::plain(
                "remaining",
                self.right_remaining() as i64,
            )]),
        ]
    }
}

impl Default for MergeSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingAlgorithm for MergeSort {
    fn name(&self) -> &'static str {
        "Merge Sort"
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn reset(&mut self, input: &[i32]) -> StepResult {
        self.items = index_input(input);
        self.sorted = vec![false; input.len()];
        self.l = 0;
        self.r = input.len();
        self.m = 0;
        self.k = 0;
        self.left = Vec::new();
        self.right = Vec::new();
        self.li = 0;
        self.ri = 0;
        self.take_side = Side::Left;
        self.calls = CallStack::new();
        self.resumes = Vec::new();

        if input.len() <= 1 {
            self.sorted.iter_mut().for_each(|s| *s = true);
            self.phase = Phase::Done;
            return trivially_sorted_step(&self.items);
        }

        self.calls.push("mergeSort", Vec::new());
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
                    "mergeSort(l = {}, r = {})",
                    self.l, self.r
                ))
                .line(0, SemanticColor::Accent)
                .line(1, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(self.range_highlights()));
                self.phase = if self.r - self.l <= 1 { Phase::BaseCase } else { Phase::Split };
                Ok(step)
            }
            Phase::BaseCase => {
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(self.l, SemanticColor::Accent);
                let step = StepResult::code(format!(
                    "A[{}..{}) is a single element: already sorted",
                    self.l, self.r
                ))
                .line(1, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(highlights));
                self.phase = Phase::Return;
                Ok(step)
            }
            Phase::Split => {
                self.m = (self.l + self.r) / 2;
                let mut highlights = self.range_highlights();
                highlights.insert(self.m, SemanticColor::Accent);
                let step = StepResult::significant(format!(
                    "Split A[{}..{}) at position {}",
                    self.l, self.r, self.m
                ))
                .line(2, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(highlights));
                self.phase = Phase::RecurseLeft;
                Ok(step)
            }
            Phase::RecurseLeft => {
                self.calls.push("mergeSort", self.saved_locals());
                self.resumes.push(Resume::AfterLeft);
                self.r = self.m;
                let step = StepResult::code(format!(
                    "Sorting the left half A[{}..{})",
                    self.l, self.r
                ))
                .line(3, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(self.range_highlights()));
                self.phase = Phase::CallEnter;
                Ok(step)
            }
            Phase::Return => match self.resumes.pop() {
                Some(Resume::AfterLeft) => {
                    self.restore_locals()?;
                    self.calls.push("mergeSort", self.saved_locals());
                    self.resumes.push(Resume::AfterRight);
                    self.l = self.m;
                    let step = StepResult::code(format!(
                        "Left half sorted: sorting A[{}..{})",
                        self.l, self.r
                    ))
                    .line(4, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(self.range_highlights()));
                    self.phase = Phase::CallEnter;
                    Ok(step)
                }
                Some(Resume::AfterRight) => {
                    self.restore_locals()?;
                    let step = StepResult::code(format!(
                        "Both halves of A[{}..{}) are sorted: merging",
                        self.l, self.r
                    ))
                    .line(5, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(self.range_highlights()));
                    self.phase = Phase::CopyOut;
                    Ok(step)
                }
                None => {
                    self.calls.pop("mergeSort")?;
                    let step = StepResult::code("All merges are complete")
                        .line(9, SemanticColor::Accent)
                        .call_stack(self.calls.freeze())
                        .single(self.snapshot(sorted_highlights(&self.sorted)));
                    self.phase = Phase::Finish;
                    Ok(step)
                }
            },
            Phase::CopyOut => {
                self.left = self.items[self.l..self.m].to_vec();
                self.right = self.items[self.m..self.r].to_vec();
                self.li = 0;
                self.ri = 0;
                self.k = self.l;
                for position in self.l..self.r {
                    self.items[position] = self.items[position].duplicate();
                }
                let step = StepResult::significant(format!(
                    "Copied A[{}..{}) and A[{}..{}) into working queues",
                    self.l, self.m, self.m, self.r
                ))
                .line(5, SemanticColor::Accent)
                .line(6, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .multi(
                    self.snapshot(sorted_highlights(&self.sorted)),
                    self.queue_arrays(FxHashMap::default(), FxHashMap::default()),
                );
                self.phase = Phase::TakeCheck;
                Ok(step)
            }
            Phase::TakeCheck => {
                let mut left_hl = FxHashMap::default();
                let mut right_hl = FxHashMap::default();
                let description = match (self.left_remaining(), self.right_remaining()) {
                    (1.., 1..) => {
                        let (lh, rh) = (self.left[self.li], self.right[self.ri]);
                        left_hl.insert(0, SemanticColor::Compare);
                        right_hl.insert(0, SemanticColor::Compare);
                        self.take_side = if lh.value <= rh.value { Side::Left } else { Side::Right };
                        format!(
                            "Comparing left head {} with right head {}",
                            lh.value, rh.value
                        )
                    }
                    (1.., 0) => {
                        left_hl.insert(0, SemanticColor::Compare);
                        self.take_side = Side::Left;
                        format!(
                            "Right queue is empty: taking {} from the left queue",
                            self.left[self.li].value
                        )
                    }
                    _ => {
                        right_hl.insert(0, SemanticColor::Compare);
                        self.take_side = Side::Right;
                        format!(
                            "Left queue is empty: taking {} from the right queue",
                            self.right[self.ri].value
                        )
                    }
                };
                let step = StepResult::code(description)
                    .line(7, SemanticColor::Accent)
                    .line(8, SemanticColor::Compare)
                    .vars(self.loop_vars())
                    .call_stack(self.calls.freeze())
                    .multi(
                        self.snapshot(sorted_highlights(&self.sorted)),
                        self.queue_arrays(left_hl, right_hl),
                    );
                self.phase = Phase::Take;
                Ok(step)
            }
            Phase::Take => {
                let (item, side_name) = match self.take_side {
                    Side::Left => {
                        let item = self.left[self.li];
                        self.li += 1;
                        (item, "left")
                    }
                    Side::Right => {
                        let item = self.right[self.ri];
                        self.ri += 1;
                        (item, "right")
                    }
                };
                self.items[self.k] = item;
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(self.k, SemanticColor::Swap);
                let step = StepResult::significant(format!(
                    "Moved {} from the {} queue into A[{}]",
                    item.value, side_name, self.k
                ))
                .line(8, SemanticColor::Swap)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .multi(
                    self.snapshot(highlights),
                    self.queue_arrays(FxHashMap::default(), FxHashMap::default()),
                );
                self.k += 1;
                self.phase = if self.left_remaining() == 0 && self.right_remaining() == 0 {
                    Phase::MergeDone
                } else {
                    Phase::TakeCheck
                };
                Ok(step)
            }
            Phase::MergeDone => {
                self.left.clear();
                self.right.clear();
                self.li = 0;
                self.ri = 0;
                let mut highlights = sorted_highlights(&self.sorted);
                mark_range(&mut highlights, self.l..self.r, SemanticColor::Accent);
                let step = StepResult::algorithmic(format!(
                    "Merged into the sorted run A[{}..{})",
                    self.l, self.r
                ))
                .line(7, SemanticColor::Accent)
                .vars(self.loop_vars())
                .call_stack(self.calls.freeze())
                .single(self.snapshot(highlights));
                self.phase = Phase::Return;
                Ok(step)
            }
            Phase::Finish => {
                self.sorted.iter_mut().for_each(|s| *s = true);
                let step = StepResult::algorithmic("Array is sorted")
                    .final_step()
                    .line(9, SemanticColor::Sorted)
                    .call_stack(self.calls.freeze())
                    .single(self.snapshot(sorted_highlights(&self.sorted)));
                self.phase = Phase::Done;
                Ok(step)
            }
            Phase::Done => Err(exhausted("merge sort")),
        }
    }
}
