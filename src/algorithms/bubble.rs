//! Bubble sort
//!
//! One pass per outer iteration, comparing adjacent pairs and swapping
//! out-of-order ones. Each comparison and each swap is a `Significant`
//! step; a completed pass is an `Algorithmic` step that settles the
//! largest remaining value at the end of the unsorted region. A pass
//! without swaps proves the array sorted and ends the run early.

use rustc_hash::FxHashMap;

use crate::step::{
    index_input, ArraySnapshot, IndexedNumber, SemanticColor, StepError, StepResult, Variable,
};

use super::{exhausted, sorted_highlights, trivially_sorted_step, SortingAlgorithm};

const PSEUDOCODE: &[&str] = &[
    "procedure bubbleSort(A, n):",
    "  for i = 0 .. n - 2:",
    "    swapped = false",
    "    for j = 0 .. n - i - 2:",
    "      if A[j] > A[j + 1]:",
    "        swap A[j], A[j + 1]",
    "        swapped = true",
    "    if not swapped: break",
    "  done",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    PassBegin,
    Compare,
    SwapCheck,
    PassEnd,
    Finish,
    Done,
}

pub struct BubbleSort {
    items: Vec<IndexedNumber>,
    sorted: Vec<bool>,
    i: usize,
    j: usize,
    swapped: bool,
    phase: Phase,
}

impl BubbleSort {
    pub fn new() -> Self {
        BubbleSort {
            items: Vec::new(),
            sorted: Vec::new(),
            i: 0,
            j: 0,
            swapped: false,
            phase: Phase::Done,
        }
    }

    fn snapshot(&self, highlights: FxHashMap<usize, SemanticColor>) -> ArraySnapshot {
        ArraySnapshot::with_highlights(self.items.clone(), highlights)
    }

    fn loop_vars(&self) -> Vec<Variable> {
        vec![
            Variable::plain("n", self.items.len() as i64),
            Variable::plain("i", self.i as i64),
            Variable::index("j", self.j as i64),
            Variable::flag("swapped", self.swapped),
        ]
    }
}

impl Default for BubbleSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingAlgorithm for BubbleSort {
    fn name(&self) -> &'static str {
        "Bubble Sort"
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn reset(&mut self, input: &[i32]) -> StepResult {
        self.items = index_input(input);
        self.sorted = vec![false; input.len()];
        self.i = 0;
        self.j = 0;
        self.swapped = false;

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
                self.swapped = false;
                self.j = 0;
                let step = StepResult::code(format!(
                    "Pass {}: bubbling the largest unsorted value right",
                    self.i + 1
                ))
                .line(1, SemanticColor::Accent)
                .line(2, SemanticColor::Accent)
                .vars(self.loop_vars())
                .single(self.snapshot(sorted_highlights(&self.sorted)));
                self.phase = Phase::Compare;
                Ok(step)
            }
            Phase::Compare => {
                let j = self.j;
                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(j, SemanticColor::Compare);
                highlights.insert(j + 1, SemanticColor::Compare);
                let step = StepResult::significant(format!(
                    "Comparing A[{}] = {} with A[{}] = {}",
                    j,
                    self.items[j].value,
                    j + 1,
                    self.items[j + 1].value
                ))
                .line(3, SemanticColor::Accent)
                .line(4, SemanticColor::Compare)
                .vars(self.loop_vars())
                .single(self.snapshot(highlights));
                self.phase = Phase::SwapCheck;
                Ok(step)
            }
            Phase::SwapCheck => {
                let j = self.j;
                let step = if self.items[j].value > self.items[j + 1].value {
                    self.items.swap(j, j + 1);
                    self.swapped = true;
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(j, SemanticColor::Swap);
                    highlights.insert(j + 1, SemanticColor::Swap);
                    StepResult::significant(format!(
                        "Swapped: {} moves right past {}",
                        self.items[j + 1].value,
                        self.items[j].value
                    ))
                    .line(5, SemanticColor::Swap)
                    .line(6, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .single(self.snapshot(highlights))
                } else {
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(j, SemanticColor::Compare);
                    highlights.insert(j + 1, SemanticColor::Compare);
                    StepResult::code(format!(
                        "A[{}] and A[{}] are already in order",
                        j,
                        j + 1
                    ))
                    .line(4, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .single(self.snapshot(highlights))
                };
                self.j += 1;
                self.phase = if self.j + self.i + 2 > n {
                    Phase::PassEnd
                } else {
                    Phase::Compare
                };
                Ok(step)
            }
            Phase::PassEnd => {
                let fixed = n - 1 - self.i;
                self.sorted[fixed] = true;
                if !self.swapped {
                    self.sorted.iter_mut().for_each(|s| *s = true);
                }
                let description = if self.swapped {
                    format!(
                        "Pass {} complete: A[{}] holds its final value",
                        self.i + 1,
                        fixed
                    )
                } else {
                    format!("Pass {} made no swaps: the array is sorted", self.i + 1)
                };
                let line = if self.swapped { 1 } else { 7 };
                let step = StepResult::algorithmic(description)
                    .line(line, SemanticColor::Accent)
                    .vars(self.loop_vars())
                    .single(self.snapshot(sorted_highlights(&self.sorted)));
                let finished = !self.swapped || self.i + 1 >= n - 1;
                self.i += 1;
                self.phase = if finished { Phase::Finish } else { Phase::PassBegin };
                Ok(step)
            }
            Phase::Finish => {
                self.sorted.iter_mut().for_each(|s| *s = true);
                let step = StepResult::algorithmic("Array is sorted")
                    .final_step()
                    .line(8, SemanticColor::Sorted)
                    .var(Variable::plain("n", n as i64))
                    .single(self.snapshot(sorted_highlights(&self.sorted)));
                self.phase = Phase::Done;
                Ok(step)
            }
            Phase::Done => Err(exhausted("bubble sort")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    fn run_to_completion(input: &[i32]) -> Vec<StepResult> {
        let mut algorithm = BubbleSort::new();
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
        let steps = run_to_completion(&[5, 1, 4, 2, 8]);
        let last = steps.last().expect("steps exist");
        assert_eq!(last.primary().values(), vec![1, 2, 4, 5, 8]);
        assert_eq!(last.kind(), StepKind::Algorithmic);
    }

    #[test]
    fn test_three_element_run_swaps_twice() {
        let steps = run_to_completion(&[5, 1, 4]);
        let swaps = steps
            .iter()
            .filter(|s| s.description().starts_with("Swapped"))
            .count();
        assert_eq!(swaps, 2);
        assert_eq!(
            steps.last().expect("steps exist").primary().values(),
            vec![1, 4, 5]
        );
    }

    #[test]
    fn test_early_exit_on_sorted_input() {
        let steps = run_to_completion(&[1, 2, 3, 4]);
        // one scanning pass, no swaps, then the final step
        assert!(steps.iter().all(|s| !s.description().starts_with("Swapped")));
        let passes = steps
            .iter()
            .filter(|s| s.description().starts_with("Pass") && s.kind() == StepKind::Algorithmic)
            .count();
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_stable_for_equal_values() {
        let steps = run_to_completion(&[2, 2, 1]);
        let last = steps.last().expect("steps exist");
        let ids: Vec<usize> = last.primary().items().iter().map(|item| item.id).collect();
        assert_eq!(last.primary().values(), vec![1, 2, 2]);
        // the two equal values keep their input order
        assert_eq!(ids, vec![2, 0, 1]);
    }
}
