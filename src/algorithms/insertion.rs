//! Insertion sort
//!
//! Grows a sorted prefix one element at a time. Extracting the key leaves
//! a de-emphasized stale copy in its slot; shifts move larger prefix
//! elements right past the hole until the key's position is found. Each
//! completed insertion is an `Algorithmic` step.

use rustc_hash::FxHashMap;

use crate::step::{
    index_input, ArraySnapshot, IndexedNumber, SemanticColor, StepError, StepResult, Variable,
};

use super::{exhausted, sorted_highlights, trivially_sorted_step, SortingAlgorithm};

const PSEUDOCODE: &[&str] = &[
    "procedure insertionSort(A, n):",
    "  for i = 1 .. n - 1:",
    "    key = A[i]",
    "    j = i - 1",
    "    while j >= 0 and A[j] > key:",
    "      A[j + 1] = A[j]",
    "      j = j - 1",
    "    A[j + 1] = key",
    "  done",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    SelectKey,
    ShiftCheck,
    Shift,
    Place,
    ElementDone,
    Finish,
    Done,
}

pub struct InsertionSort {
    items: Vec<IndexedNumber>,
    sorted: Vec<bool>,
    i: usize,
    j: i64,
    key: Option<IndexedNumber>,
    phase: Phase,
}

impl InsertionSort {
    pub fn new() -> Self {
        InsertionSort {
            items: Vec::new(),
            sorted: Vec::new(),
            i: 0,
            j: 0,
            key: None,
            phase: Phase::Done,
        }
    }

    /// Slot the key would occupy if placed right now.
    fn hole(&self) -> usize {
        (self.j + 1).max(0) as usize
    }

    fn snapshot(&self, highlights: FxHashMap<usize, SemanticColor>) -> ArraySnapshot {
        ArraySnapshot::with_highlights(self.items.clone(), highlights)
    }

    fn loop_vars(&self) -> Vec<Variable> {
        let mut vars = vec![
            Variable::plain("n", self.items.len() as i64),
            Variable::plain("i", self.i as i64),
            Variable::index("j", self.j),
        ];
        if let Some(key) = self.key {
            vars.push(
                Variable::at("key", key.value as i64, self.hole()).colored(SemanticColor::Pivot),
            );
        }
        vars
    }
}

impl Default for InsertionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingAlgorithm for InsertionSort {
    fn name(&self) -> &'static str {
        "Insertion Sort"
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn reset(&mut self, input: &[i32]) -> StepResult {
        self.items = index_input(input);
        self.sorted = vec![false; input.len()];
        self.i = 1;
        self.j = 0;
        self.key = None;

        if input.len() <= 1 {
            self.sorted.iter_mut().for_each(|s| *s = true);
            self.phase = Phase::Done;
            return trivially_sorted_step(&self.items);
        }

        // a one-element prefix is in order by itself
        self.sorted[0] = true;
        self.phase = Phase::SelectKey;
        StepResult::algorithmic(format!("Initial array of {} elements", input.len()))
            .line(0, SemanticColor::Accent)
            .var(Variable::plain("n", input.len() as i64))
            .single(self.snapshot(sorted_highlights(&self.sorted)))
    }

    fn next_step(&mut self) -> Result<StepResult, StepError> {
        let n = self.items.len();
        match self.phase {
            Phase::SelectKey => {
                let i = self.i;
                let key = self.items[i];
                self.key = Some(key);
                self.items[i] = self.items[i].duplicate();
                self.j = i as i64 - 1;

                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(i, SemanticColor::Pivot);
                let step = StepResult::significant(format!(
                    "Extracted key A[{}] = {}",
                    i, key.value
                ))
                .line(2, SemanticColor::Pivot)
                .line(3, SemanticColor::Accent)
                .vars(self.loop_vars())
                .single(self.snapshot(highlights));
                self.phase = Phase::ShiftCheck;
                Ok(step)
            }
            Phase::ShiftCheck => {
                let key = self.key.ok_or(StepError::MissingSavedVariable {
                    function: "insertionSort",
                    name: "key",
                })?;
                let step = if self.j >= 0 {
                    let j = self.j as usize;
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(j, SemanticColor::Compare);
                    highlights.insert(self.hole(), SemanticColor::Pivot);
                    let shifting = self.items[j].value > key.value;
                    self.phase = if shifting { Phase::Shift } else { Phase::Place };
                    StepResult::code(format!(
                        "Checking A[{}] = {} against key = {}",
                        j, self.items[j].value, key.value
                    ))
                    .line(4, SemanticColor::Compare)
                    .vars(self.loop_vars())
                    .single(self.snapshot(highlights))
                } else {
                    self.phase = Phase::Place;
                    let mut highlights = sorted_highlights(&self.sorted);
                    highlights.insert(0, SemanticColor::Pivot);
                    StepResult::code("Reached the front of the array")
                        .line(4, SemanticColor::Accent)
                        .vars(self.loop_vars())
                        .single(self.snapshot(highlights))
                };
                Ok(step)
            }
            Phase::Shift => {
                let j = self.j as usize;
                let moved = self.items[j];
                self.items[j + 1] = moved;
                self.items[j] = moved.duplicate();

                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(j + 1, SemanticColor::Swap);
                highlights.insert(j, SemanticColor::Muted);
                let step = StepResult::significant(format!(
                    "Shifted {} one slot right",
                    moved.value
                ))
                .line(5, SemanticColor::Swap)
                .line(6, SemanticColor::Accent)
                .vars(self.loop_vars())
                .single(self.snapshot(highlights));
                self.j -= 1;
                self.phase = Phase::ShiftCheck;
                Ok(step)
            }
            Phase::Place => {
                let key = self.key.take().ok_or(StepError::MissingSavedVariable {
                    function: "insertionSort",
                    name: "key",
                })?;
                let hole = self.hole();
                self.items[hole] = key.settle();

                let mut highlights = sorted_highlights(&self.sorted);
                highlights.insert(hole, SemanticColor::Pivot);
                let step = StepResult::significant(format!(
                    "Inserted key {} at position {}",
                    key.value, hole
                ))
                .line(7, SemanticColor::Pivot)
                .vars(self.loop_vars())
                .single(self.snapshot(highlights));
                self.phase = Phase::ElementDone;
                Ok(step)
            }
            Phase::ElementDone => {
                for position in 0..=self.i {
                    self.sorted[position] = true;
                }
                let step = StepResult::algorithmic(format!(
                    "First {} elements are in order",
                    self.i + 1
                ))
                .line(1, SemanticColor::Accent)
                .vars(self.loop_vars())
                .single(self.snapshot(sorted_highlights(&self.sorted)));
                self.i += 1;
                self.phase = if self.i >= n { Phase::Finish } else { Phase::SelectKey };
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
            Phase::Done => Err(exhausted("insertion sort")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    fn run_to_completion(input: &[i32]) -> Vec<StepResult> {
        let mut algorithm = InsertionSort::new();
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
        let steps = run_to_completion(&[7, 3, 5, 1]);
        let last = steps.last().expect("steps exist");
        assert_eq!(last.primary().values(), vec![1, 3, 5, 7]);
        assert_eq!(last.kind(), StepKind::Algorithmic);
    }

    #[test]
    fn test_one_insertion_per_element() {
        let steps = run_to_completion(&[4, 2, 9, 1]);
        let insertions = steps
            .iter()
            .filter(|s| s.kind() == StepKind::Algorithmic && !s.is_final())
            .filter(|s| s.description().starts_with("First"))
            .count();
        assert_eq!(insertions, 3);
    }

    #[test]
    fn test_stale_copies_marked_while_key_is_out() {
        let steps = run_to_completion(&[3, 1]);
        let extracted = steps
            .iter()
            .find(|s| s.description().starts_with("Extracted"))
            .expect("extraction step exists");
        assert!(extracted.primary().items()[1].duplicated);
        // no stale copies survive in the final array
        let last = steps.last().expect("steps exist");
        assert!(last.primary().items().iter().all(|item| !item.duplicated));
    }

    #[test]
    fn test_stable_for_equal_values() {
        let steps = run_to_completion(&[2, 2, 1]);
        let last = steps.last().expect("steps exist");
        let ids: Vec<usize> = last.primary().items().iter().map(|item| item.id).collect();
        assert_eq!(last.primary().values(), vec![1, 2, 2]);
        assert_eq!(ids, vec![2, 0, 1]);
    }

    #[test]
    fn test_missing_key_reported_as_missing_variable() {
        let mut algorithm = InsertionSort::new();
        algorithm.reset(&[3, 1, 2]);
        algorithm.phase = Phase::ShiftCheck;
        algorithm.key = None;
        assert_eq!(
            algorithm.next_step(),
            Err(StepError::MissingSavedVariable {
                function: "insertionSort",
                name: "key",
            })
        );
    }
}
