//! Selection sort
//!
//! Each pass scans the unsorted suffix for its minimum, then swaps that
//! minimum into place. Comparisons during the scan are `Code` steps; a new
//! running minimum and the closing swap are `Significant`; the settled
//! position closes the pass as an `Algorithmic` step.

use rustc_hash::FxHashMap;

use crate::step::{
    index_input, ArraySnapshot, IndexedNumber, SemanticColor, StepError, StepResult, Variable,
};

use super::{exhausted, sorted_highlights, trivially_sorted_step, SortingAlgorithm};

const PSEUDOCODE: &[&str] = &[
    "procedure selectionSort(A, n):",
    "  for i = 0 .. n - 2:",
    "    min = i",
    "    for j = i + 1 .. n - 1:",
    "      if A[j] < A[min]:",
    "        min = j",
    "    swap A[i], A[min]",
    "  done",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    PassBegin,
    ScanCheck,
    NewMin,
    SwapIn,
    PassEnd,
    Finish,
    Done,
}

pub struct SelectionSort {
    items: Vec<IndexedNumber>,
    sorted: Vec<bool>,
    i: usize,
    j: usize,
    min: usize,
    phase: Phase,
}

impl SelectionSort {
    pub fn new() -> Self {
        SelectionSort {
            items: Vec::new(),
            sorted: Vec::new(),
            i: 0,
            j: 0,
            min: 0,
            phase: Phase::Done,
        }
    }

    fn snapshot(&self, highlights: FxHashMap<usize, SemanticColor>) -> ArraySnapshot {
        ArraySnapshot::with_highlights(self.items.clone(), highlights)
    }

    fn loop_vars(&self) -> Vec<Variable> {
        vec![
            Variable::plain("n", self.items.len() as i64),
            Variable::index("i", self.i as i64),
            Variable::index("j", self.j as i64),
            Variable::index("min", self.min as i64).colored(SemanticColor::Candidate),
        ]
    }

    fn advance_scan(&mut self) {
        self.j += 1;
        self.phase = if self.j >= self.items.len() {
            Phase::SwapIn
        } else {
            Phase::ScanCheck
        };
    }
}

impl Default for SelectionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingAlgorithm for SelectionSort {
    fn name(&self) -> &'static str {
        "Selection Sort"
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn reset(&mut self, input: &[i32]) -> StepResult {
        self.items = index_input(input);
        self.sorted = vec![false; input.len()];
        self.i = 0;
        self.j = 0;
        self.min = 0;

        if input.len() <= 1 {
            self.sorted.iter_mut().for_each(|s| *s = true);
            self.phase = Phase::Done;
            return trivially_sorted_step(&self.items);
        }

        self.phase = Phase::PassBegin;
        StepResult::algorithmic(format!("Initial array of {} elements", input.len()))
            .line(0, SemanticColor::Accent)
            .var(Variable::plain("n", input.len() as i64))
            .single(self.snapshot(FxHashMap::default()))
    }

    fn next_step(&mut self) -> Result<StepResult, StepError> {
        let n = self.items.len();
        match self.phase {
            Phase::PassBegin => {
                self.min = self.i;
                self.j = self.i + 1;
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(self.i, SemanticColor::Candidate);
                let step = StepResult::code(format!(
                    "Selecting the minimum of A[{}..{}]",
                    self.i,
                    n - 1
                ))
                .line(1, SemanticColor::Accent)
                .line(2, SemanticColor::Accent)
                .vars(self.loop_vars())
                .single(self.snapshot(highlights));
                self.phase = Phase::ScanCheck;
                Ok(step)
            }
            Phase::ScanCheck => {
                let (j, min) = (self.j, self.min);
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(min, SemanticColor::Candidate);
                highlights.insert(j, SemanticColor::Compare);
                let step = StepResult::code(format!(
                    "Comparing A[{}] = {} with the current minimum {}",
                    j, self.items[j].value, self.items[min].value
                ))
                .line(3, SemanticColor::Accent)
                .line(4, SemanticColor::Compare)
                .vars(self.loop_vars())
                .single(self.snapshot(highlights));
                if self.items[j].value < self.items[min].value {
                    self.phase = Phase::NewMin;
                } else {
                    self.advance_scan();
                }
                Ok(step)
            }
            Phase::NewMin => {
                self.min = self.j;
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(self.min, SemanticColor::Candidate);
                let step = StepResult::significant(format!(
                    "New minimum {} at position {}",
                    self.items[self.min].value, self.min
                ))
                .line(5, SemanticColor::Candidate)
                .vars(self.loop_vars())
                .single(self.snapshot(highlights));
                self.advance_scan();
                Ok(step)
            }
            Phase::SwapIn => {
                let (i, min) = (self.i, self.min);
                let step = if min != i {
                    self.items.swap(i, min);
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(i, SemanticColor::Swap);
                    highlights.insert(min, SemanticColor::Swap);
                    StepResult::significant(format!(
                        "Swapped minimum {} into position {}",
                        self.items[i].value, i
                    ))
                    .line(6, SemanticColor::Swap)
                    .vars(self.loop_vars())
                    .single(self.snapshot(highlights))
                } else {
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(i, SemanticColor::Candidate);
                    StepResult::code(format!(
                        "A[{}] is already the smallest remaining value",
                        i
                    ))
                    .line(6, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .single(self.snapshot(highlights))
                };
                self.phase = Phase::PassEnd;
                Ok(step)
            }
            Phase::PassEnd => {
                self.sorted[self.i] = true;
                let step = StepResult::algorithmic(format!(
                    "Position {} holds its final value",
                    self.i
                ))
                .line(1, SemanticColor::Accent)
                .vars(self.loop_vars())
                .single(self.snapshot(sorted_highlights(&self.sorted)));
                self.i += 1;
                self.phase = if self.i >= n - 1 { Phase::Finish } else { Phase::PassBegin };
                Ok(step)
            }
            Phase::Finish => {
                self.sorted.iter_mut().for_each(|s| *s = true);
                let step = StepResult::algorithmic("Array is sorted")
                    .final_step()
                    .line(7, SemanticColor::Sorted)
                    .var(Variable::plain("n", n as i64))
                    .single(self.snapshot(sorted_highlights(&self.sorted)));
                self.phase = Phase::Done;
                Ok(step)
            }
            Phase::Done => Err(exhausted("selection sort")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    fn run_to_completion(input: &[i32]) -> Vec<StepResult> {
        let mut algorithm = SelectionSort::new();
        let mut steps = vec![algorithm.reset(input)];
        for _ in 0..10_000 {
            if steps.last().map(|s| s.is_final()).unwrap_or(false) {
                break;
            }
            steps.push(algorithm.next_step().expect("step generation"));
        }
        assert!(steps.last().expect("steps exist").is_final());
        steps
    }

    #[test]
    fn test_sorts_and_terminates() {
        let steps = run_to_completion(&[3, 1, 2]);
        let last = steps.last().expect("steps exist");
        assert_eq!(last.primary().values(), vec![1, 2, 3]);
        assert_eq!(last.kind(), StepKind::Algorithmic);
    }

    #[test]
    fn test_one_pass_per_settled_position() {
        let steps = run_to_completion(&[9, 4, 7, 1, 5]);
        let passes = steps
            .iter()
            .filter(|s| s.description().starts_with("Position"))
            .count();
        assert_eq!(passes, 4);
    }

    #[test]
    fn test_comparison_count_is_quadratic() {
        // 4 + 3 + 2 + 1 comparisons for five elements
        let steps = run_to_completion(&[9, 4, 7, 1, 5]);
        let comparisons = steps
            .iter()
            .filter(|s| s.description().starts_with("Comparing"))
            .count();
        assert_eq!(comparisons, 10);
    }

    #[test]
    fn test_sorted_input_needs_no_swaps() {
        let steps = run_to_completion(&[1, 2, 3]);
        assert!(steps
            .iter()
            .all(|s| !s.description().starts_with("Swapped")));
    }
}
