//! Heapsort
//!
//! Builds a max-heap in place, then repeatedly swaps the root to the end
//! of the shrinking heap region and sifts the new root down. Sift-down is
//! a recursive call tracked on the call stack like quicksort's recursion.
//! Steps carry a heap-shaped payload with the heap region's end and two
//! draw toggles, so the tree rendering phases in when the build starts and
//! out once every element has been extracted.

use rustc_hash::FxHashMap;

use crate::step::{
    index_input, ArraySnapshot, CallStack, IndexedNumber, SemanticColor, StepError, StepResult,
    Variable,
};

use super::{exhausted, sorted_highlights, trivially_sorted_step, SortingAlgorithm};

const PSEUDOCODE: &[&str] = &[
    "procedure heapSort(A, n):",
    "  for s = n/2 - 1 .. 0:",
    "    siftDown(A, s, n)",
    "  for e = n - 1 .. 1:",
    "    swap A[0], A[e]",
    "    siftDown(A, 0, e)",
    "  done",
    "procedure siftDown(A, root, end):",
    "  c = larger child of root below end",
    "  if A[c] > A[root]: swap A[root], A[c]; siftDown(A, c, end)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    BuildNext,
    SiftCompare,
    SiftSwap,
    SiftReturn,
    ExtractSwap,
    ExtractSift,
    FinalHeapDone,
    Finish,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    AfterBuildSift,
    AfterExtractSift,
    AfterChildSift,
}

pub struct HeapSort {
    items: Vec<IndexedNumber>,
    sorted: Vec<bool>,
    /// Build-loop counter, counting down to the first subtree root.
    s: usize,
    /// One past the end of the live heap region.
    heap_end: usize,
    root: usize,
    child: usize,
    sift_end: usize,
    draw_heap: bool,
    calls: CallStack,
    resumes: Vec<Resume>,
    phase: Phase,
}

impl HeapSort {
    pub fn new() -> Self {
        HeapSort {
            items: Vec::new(),
            sorted: Vec::new(),
            s: 0,
            heap_end: 0,
            root: 0,
            child: 0,
            sift_end: 0,
            draw_heap: false,
            calls: CallStack::new(),
            resumes: Vec::new(),
            phase: Phase::Done,
        }
    }

    fn snapshot(&self, highlights: FxHashMap<usize, SemanticColor>) -> ArraySnapshot {
        ArraySnapshot::with_highlights(self.items.clone(), highlights)
    }

    fn outer_vars(&self) -> Vec<Variable> {
        vec![
            Variable::plain("n", self.items.len() as i64),
            Variable::plain("s", self.s as i64),
            Variable::plain("e", self.heap_end as i64),
        ]
    }

    fn sift_vars(&self) -> Vec<Variable> {
        vec![
            Variable::index("root", self.root as i64),
            Variable::index("c", self.child as i64).colored(SemanticColor::Candidate),
            Variable::plain("end", self.sift_end as i64),
        ]
    }

    fn enter_sift(&mut self, resume: Resume, root: usize, end: usize) {
        let saved = match resume {
            Resume::AfterChildSift => vec![
                Variable::plain("root", self.root as i64),
                Variable::plain("c", self.child as i64),
                Variable::plain("end", self.sift_end as i64),
            ],
            _ => vec![
                Variable::plain("s", self.s as i64),
                Variable::plain("e", self.heap_end as i64),
            ],
        };
        self.calls.push("siftDown", saved);
        self.resumes.push(resume);
        self.root = root;
        self.sift_end = end;
    }
}

impl Default for HeapSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingAlgorithm for HeapSort {
    fn name(&self) -> &'static str {
        "Heap Sort"
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn reset(&mut self, input: &[i32]) -> StepResult {
        self.items = index_input(input);
        self.sorted = vec![false; input.len()];
        self.s = input.len() / 2;
        self.heap_end = input.len();
        self.root = 0;
        self.child = 0;
        self.sift_end = input.len();
        self.draw_heap = false;
        self.calls = CallStack::new();
        self.resumes = Vec::new();

        if input.len() <= 1 {
            self.sorted.iter_mut().for_each(|s| *s = true);
            self.phase = Phase::Done;
            return trivially_sorted_step(&self.items);
        }

        self.calls.push("heapSort", Vec::new());
        self.phase = Phase::BuildNext;
        StepResult::algorithmic(format!("Initial array of {} elements", input.len()))
            .line(0, SemanticColor::Accent)
            .vars(self.outer_vars())
            .call_stack(self.calls.freeze())
            .heap(self.snapshot(FxHashMap::default()), self.heap_end, false, true)
    }

    fn next_step(&mut self) -> Result<StepResult, StepError> {
        match self.phase {
            Phase::BuildNext => {
                if self.s > 0 {
                    self.s -= 1;
                    self.draw_heap = true;
                    let root = self.s;
                    self.enter_sift(Resume::AfterBuildSift, root, self.heap_end);
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(root, SemanticColor::Accent);
                    let step = StepResult::code(format!(
                        "Heapifying the subtree rooted at A[{}]",
                        root
                    ))
                    .line(1, SemanticColor::Accent)
                    .line(2, SemanticColor::Accent)
                    .vars(self.outer_vars())
                    .call_stack(self.calls.freeze())
                    .heap(self.snapshot(highlights), self.heap_end, true, true);
                    self.phase = Phase::SiftCompare;
                    Ok(step)
                } else {
                    let step = StepResult::algorithmic(format!(
                        "A[0..{}) is now a max-heap",
                        self.heap_end
                    ))
                    .line(1, SemanticColor::Accent)
                    .vars(self.outer_vars())
                    .call_stack(self.calls.freeze())
                    .heap(
                        self.snapshot(sorted_highlights(&self.sorted)),
                        self.heap_end,
                        true,
                        true,
                    );
                    self.phase = Phase::ExtractSwap;
                    Ok(step)
                }
            }
            Phase::SiftCompare => {
                let root = self.root;
                let left = 2 * root + 1;
                if left >= self.sift_end {
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(root, SemanticColor::Accent);
                    let step = StepResult::code(format!(
                        "A[{}] has no children within the heap",
                        root
                    ))
                    .line(8, SemanticColor::Accent)
                    .vars(self.sift_vars())
                    .call_stack(self.calls.freeze())
                    .heap(self.snapshot(highlights), self.heap_end, true, true);
                    self.phase = Phase::SiftReturn;
                    return Ok(step);
                }

                let right = left + 1;
                self.child = if right < self.sift_end
                    && self.items[right].value > self.items[left].value
                {
                    right
                } else {
                    left
                };
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(root, SemanticColor::Compare);
                highlights.insert(self.child, SemanticColor::Candidate);
                let step = StepResult::code(format!(
                    "Comparing A[{}] = {} with its larger child A[{}] = {}",
                    root, self.items[root].value, self.child, self.items[self.child].value
                ))
                .line(8, SemanticColor::Accent)
                .line(9, SemanticColor::Compare)
                .vars(self.sift_vars())
                .call_stack(self.calls.freeze())
                .heap(self.snapshot(highlights), self.heap_end, true, true);
                self.phase = if self.items[self.child].value > self.items[root].value {
                    Phase::SiftSwap
                } else {
                    Phase::SiftReturn
                };
                Ok(step)
            }
            Phase::SiftSwap => {
                let (root, child) = (self.root, self.child);
                self.items.swap(root, child);
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(root, SemanticColor::Swap);
                highlights.insert(child, SemanticColor::Swap);
                let step = StepResult::significant(format!(
                    "Sifted {} down: swapped A[{}] and A[{}]",
                    self.items[child].value, root, child
                ))
                .line(9, SemanticColor::Swap)
                .vars(self.sift_vars())
                .call_stack(self.calls.freeze())
                .heap(self.snapshot(highlights), self.heap_end, true, true);
                // continue sifting from the position the value moved to
                let end = self.sift_end;
                self.enter_sift(Resume::AfterChildSift, child, end);
                self.phase = Phase::SiftCompare;
                Ok(step)
            }
            Phase::SiftReturn => match self.resumes.pop() {
                Some(Resume::AfterChildSift) => {
                    let frame = self.calls.pop("siftDown")?;
                    self.root = frame.restore_int("root")? as usize;
                    self.child = frame.restore_int("c")? as usize;
                    self.sift_end = frame.restore_int("end")? as usize;
                    let step = StepResult::code(format!(
                        "Subtree at A[{}] satisfies the heap property",
                        self.root
                    ))
                    .line(9, SemanticColor::Accent)
                    .vars(self.sift_vars())
                    .call_stack(self.calls.freeze())
                    .heap(
                        self.snapshot(sorted_highlights(&self.sorted)),
                        self.heap_end,
                        true,
                        true,
                    );
                    self.phase = Phase::SiftReturn;
                    Ok(step)
                }
                Some(Resume::AfterBuildSift) => {
                    let frame = self.calls.pop("siftDown")?;
                    self.s = frame.restore_int("s")? as usize;
                    self.heap_end = frame.restore_int("e")? as usize;
                    let step = StepResult::algorithmic(format!(
                        "Subtree rooted at A[{}] is a max-heap",
                        self.s
                    ))
                    .line(2, SemanticColor::Accent)
                    .vars(self.outer_vars())
                    .call_stack(self.calls.freeze())
                    .heap(
                        self.snapshot(sorted_highlights(&self.sorted)),
                        self.heap_end,
                        true,
                        true,
                    );
                    self.phase = Phase::BuildNext;
                    Ok(step)
                }
                Some(Resume::AfterExtractSift) => {
                    let frame = self.calls.pop("siftDown")?;
                    self.s = frame.restore_int("s")? as usize;
                    self.heap_end = frame.restore_int("e")? as usize;
                    let step = StepResult::algorithmic(format!(
                        "Heap restored over A[0..{})",
                        self.heap_end
                    ))
                    .line(5, SemanticColor::Accent)
                    .vars(self.outer_vars())
                    .call_stack(self.calls.freeze())
                    .heap(
                        self.snapshot(sorted_highlights(&self.sorted)),
                        self.heap_end,
                        true,
                        true,
                    );
                    self.phase = Phase::ExtractSwap;
                    Ok(step)
                }
                None => Err(StepError::CallStackUnderflow {
                    function: "siftDown",
                }),
            },
            Phase::ExtractSwap => {
                self.heap_end -= 1;
                let end = self.heap_end;
                self.items.swap(0, end);
                self.sorted[end] = true;
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(0, SemanticColor::Swap);
                highlights.insert(end, SemanticColor::Swap);
                let step = StepResult::significant(format!(
                    "Extracted max {} to position {}",
                    self.items[end].value, end
                ))
                .line(3, SemanticColor::Accent)
                .line(4, SemanticColor::Swap)
                .vars(self.outer_vars())
                .call_stack(self.calls.freeze())
                .heap(self.snapshot(highlights), self.heap_end, true, true);
                self.phase = if end > 1 { Phase::ExtractSift } else { Phase::FinalHeapDone };
                Ok(step)
            }
            Phase::ExtractSift => {
                self.enter_sift(Resume::AfterExtractSift, 0, self.heap_end);
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(0, SemanticColor::Accent);
                let step = StepResult::code(format!(
                    "Sifting the new root down through A[0..{})",
                    self.sift_end
                ))
                .line(5, SemanticColor::Accent)
                .vars(self.sift_vars())
                .call_stack(self.calls.freeze())
                .heap(self.snapshot(highlights), self.heap_end, true, true);
                self.phase = Phase::SiftCompare;
                Ok(step)
            }
            Phase::FinalHeapDone => {
                self.calls.pop("heapSort")?;
                self.sorted[0] = true;
                self.draw_heap = false;
                let step = StepResult::algorithmic("Heap exhausted: every element extracted")
                    .line(6, SemanticColor::Accent)
                    .vars(self.outer_vars())
                    .call_stack(self.calls.freeze())
                    .heap(
                        self.snapshot(sorted_highlights(&self.sorted)),
                        self.heap_end,
                        false,
                        true,
                    );
                self.phase = Phase::Finish;
                Ok(step)
            }
            Phase::Finish => {
                self.sorted.iter_mut().for_each(|s| *s = true);
                let step = StepResult::algorithmic("Array is sorted")
                    .final_step()
                    .line(6, SemanticColor::Sorted)
                    .vars(self.outer_vars())
                    .call_stack(self.calls.freeze())
                    .heap(
                        self.snapshot(sorted_highlights(&self.sorted)),
                        self.heap_end,
                        false,
                        true,
                    );
                self.phase = Phase::Done;
                Ok(step)
            }
            Phase::Done => Err(exhausted("heapsort")),
        }
    }
}
