//! Recorded step history and navigation
//!
//! [`StepResultCollection`] is the append-only history of every step an
//! algorithm has produced, together with a movable pointer into it. Steps
//! are grouped by algorithmic unit: each `Algorithmic` step closes the
//! group holding the `Significant` steps that led up to it, and
//! `full_step_indexes` records the absolute positions of every group
//! member. Navigation at any granularity resolves against that index, so
//! stepping a 10,000-step history costs a binary search, not a scan.
//!
//! The collection never generates steps. When navigation returns `false`
//! the caller decides whether to ask the runner for more steps and retry;
//! backward navigation never does.

use std::rc::Rc;

use crate::step::{StepError, StepKind, StepResult};

/// Append-only step history with a movable pointer and per-granularity
/// navigation.
///
/// Constructed from an algorithm's initial step, which must be
/// `Algorithmic`; every later step arrives through [`add`] in generation
/// order.
///
/// [`add`]: StepResultCollection::add
#[derive(Debug)]
pub struct StepResultCollection {
    steps: Vec<Rc<StepResult>>,
    /// Absolute positions of each group's `Significant` and `Algorithmic`
    /// members, in generation order. A group is closed once its last
    /// member is `Algorithmic`.
    full_step_indexes: Vec<Vec<usize>>,
    pointer: usize,
    end_step: Option<usize>,
    end_full_step: Option<usize>,
}

impl StepResultCollection {
    pub fn new(initial: Rc<StepResult>) -> Self {
        let mut collection = StepResultCollection {
            steps: Vec::new(),
            full_step_indexes: Vec::new(),
            pointer: 0,
            end_step: None,
            end_full_step: None,
        };
        collection.add(initial);
        collection
    }

    // ========== Recording ==========

    /// Appends a step, maintaining the group index. Steps arriving after
    /// the final step are ignored.
    pub fn add(&mut self, step: Rc<StepResult>) {
        if self.end_step.is_some() {
            return;
        }
        let position = self.steps.len();
        if step.kind() >= StepKind::Significant {
            if self.last_group_closed() {
                self.full_step_indexes.push(vec![position]);
            } else if let Some(group) = self.full_step_indexes.last_mut() {
                group.push(position);
            }
        }
        if step.is_final() {
            self.end_step = Some(position);
            self.end_full_step = Some(self.full_step_indexes.len().saturating_sub(1));
        }
        self.steps.push(step);
    }

    /// Appends a step and moves the pointer onto the newest known step.
    pub fn add_and_advance(&mut self, step: Rc<StepResult>) {
        self.add(step);
        self.pointer = self.steps.len() - 1;
    }

    fn last_group_closed(&self) -> bool {
        match self.full_step_indexes.last() {
            Some(group) => group
                .last()
                .map_or(true, |&p| self.steps[p].kind() == StepKind::Algorithmic),
            None => true,
        }
    }

    // ========== Position lookups ==========

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Absolute position of the pointer.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn step_at(&self, position: usize) -> Option<&Rc<StepResult>> {
        self.steps.get(position)
    }

    /// All recorded steps in execution order.
    pub fn steps(&self) -> &[Rc<StepResult>] {
        &self.steps
    }

    /// Number of groups recorded so far, closed or not.
    pub fn full_step_count(&self) -> usize {
        self.full_step_indexes.len()
    }

    /// Number of members recorded so far in one group.
    pub fn sub_step_count(&self, full: usize) -> Option<usize> {
        self.full_step_indexes.get(full).map(|group| group.len())
    }

    /// The group an absolute position belongs to. Positions between a
    /// terminator and the next group's first member resolve to the earlier
    /// group.
    pub fn full_step_of(&self, position: usize) -> usize {
        // generation appends to the last group, where the pointer usually is
        let last = self.full_step_indexes.len() - 1;
        if position >= self.full_step_indexes[last][0] {
            return last;
        }
        self.full_step_indexes
            .partition_point(|group| group[0] <= position)
            - 1
    }

    /// The `(group, member)` pair of the nearest member at or before an
    /// absolute position. A position exactly on a member resolves to that
    /// member.
    pub fn sub_step_of(&self, position: usize) -> (usize, usize) {
        let full = self.full_step_of(position);
        let group = &self.full_step_indexes[full];
        let sub = group.partition_point(|&p| p <= position) - 1;
        (full, sub)
    }

    // ========== Current and end numbers ==========

    /// Absolute position of the pointer (code granularity).
    pub fn current_code_step(&self) -> usize {
        self.pointer
    }

    /// Group index the pointer is in.
    pub fn current_full_step(&self) -> usize {
        self.full_step_of(self.pointer)
    }

    /// `(group, member)` pair the pointer resolves to.
    pub fn current_sub_step(&self) -> (usize, usize) {
        self.sub_step_of(self.pointer)
    }

    /// Absolute position of the final step, once generated.
    pub fn end_code_step(&self) -> Option<usize> {
        self.end_step
    }

    /// Group index of the final step, once generated.
    pub fn end_full_step(&self) -> Option<usize> {
        self.end_full_step
    }

    /// Last member index of a group, once the group is closed.
    pub fn end_sub_step(&self, full: usize) -> Option<usize> {
        let group = self.full_step_indexes.get(full)?;
        let &last = group.last()?;
        if self.steps[last].kind() == StepKind::Algorithmic {
            Some(group.len() - 1)
        } else {
            None
        }
    }

    /// Newest recorded position, regardless of the pointer.
    pub fn last_known_code_step(&self) -> usize {
        self.steps.len() - 1
    }

    /// Newest recorded group index.
    pub fn last_known_full_step(&self) -> usize {
        self.full_step_indexes.len() - 1
    }

    /// Newest recorded `(group, member)` pair.
    pub fn last_known_sub_step(&self) -> (usize, usize) {
        let full = self.full_step_indexes.len() - 1;
        (full, self.full_step_indexes[full].len() - 1)
    }

    // ========== Record access ==========

    /// The newest record at or before the pointer whose granularity is at
    /// least `kind`. At `Code` this is the pointed record itself.
    pub fn current_step(&self, kind: StepKind) -> &Rc<StepResult> {
        let position = match kind {
            StepKind::Code => self.pointer,
            StepKind::Significant => {
                let (full, sub) = self.sub_step_of(self.pointer);
                self.full_step_indexes[full][sub]
            }
            StepKind::Algorithmic => self.prev_terminator_before(self.pointer + 1).unwrap_or(0),
        };
        &self.steps[position]
    }

    // ========== Navigation ==========

    /// Moves the pointer one unit forward at the given granularity.
    /// Returns `false`, without moving, when no recorded step satisfies
    /// the request; the caller may generate more steps and retry.
    pub fn forward(&mut self, kind: StepKind) -> bool {
        let target = match kind {
            StepKind::Code => {
                if self.pointer + 1 < self.steps.len() {
                    Some(self.pointer + 1)
                } else {
                    None
                }
            }
            StepKind::Significant => self.next_member_after(self.pointer),
            StepKind::Algorithmic => self.next_terminator_after(self.pointer),
        };
        match target {
            Some(position) => {
                self.pointer = position;
                true
            }
            None => false,
        }
    }

    /// Moves the pointer one unit backward at the given granularity.
    /// Returns `false`, without moving, at the start of history.
    pub fn backward(&mut self, kind: StepKind) -> bool {
        let target = match kind {
            StepKind::Code => self.pointer.checked_sub(1),
            StepKind::Significant => self.prev_member_before(self.pointer),
            StepKind::Algorithmic => self.prev_terminator_before(self.pointer),
        };
        match target {
            Some(position) => {
                self.pointer = position;
                true
            }
            None => false,
        }
    }

    /// Jumps to an absolute position in the recorded history.
    pub fn go_to_code_step(&mut self, position: usize) -> Result<(), StepError> {
        if position >= self.steps.len() {
            return Err(StepError::StepOutOfRange {
                position,
                known: self.steps.len(),
            });
        }
        self.pointer = position;
        Ok(())
    }

    /// Jumps to a recorded member of a group.
    pub fn go_to_sub_step(&mut self, full: usize, sub: usize) -> Result<(), StepError> {
        let group = self
            .full_step_indexes
            .get(full)
            .ok_or(StepError::UnknownFullStep {
                full,
                known: self.full_step_indexes.len(),
            })?;
        let &position = group.get(sub).ok_or(StepError::SubStepOutOfRange {
            full,
            sub,
            known: group.len(),
        })?;
        self.pointer = position;
        Ok(())
    }

    /// Jumps to the terminating `Algorithmic` member of a closed group.
    pub fn go_to_full_step(&mut self, full: usize) -> Result<(), StepError> {
        let group = self
            .full_step_indexes
            .get(full)
            .ok_or(StepError::UnknownFullStep {
                full,
                known: self.full_step_indexes.len(),
            })?;
        match group.last() {
            Some(&position) if self.steps[position].kind() == StepKind::Algorithmic => {
                self.pointer = position;
                Ok(())
            }
            _ => Err(StepError::OpenFullStep { full }),
        }
    }

    /// Jumps to the newest recorded step.
    pub fn go_to_last_known_step(&mut self) {
        self.pointer = self.steps.len() - 1;
    }

    // ========== Neighbor scans ==========

    fn next_member_after(&self, position: usize) -> Option<usize> {
        let (full, sub) = self.sub_step_of(position);
        let group = &self.full_step_indexes[full];
        if sub + 1 < group.len() {
            return Some(group[sub + 1]);
        }
        self.full_step_indexes
            .get(full + 1)
            .and_then(|next| next.first().copied())
    }

    fn prev_member_before(&self, position: usize) -> Option<usize> {
        if position == 0 {
            return None;
        }
        let (full, sub) = self.sub_step_of(position);
        let member = self.full_step_indexes[full][sub];
        if member < position {
            return Some(member);
        }
        if sub > 0 {
            Some(self.full_step_indexes[full][sub - 1])
        } else if full > 0 {
            self.full_step_indexes[full - 1].last().copied()
        } else {
            None
        }
    }

    /// Nearest closed-group terminator strictly after a position. Only the
    /// newest group can be open, so this inspects at most two groups.
    fn next_terminator_after(&self, position: usize) -> Option<usize> {
        let start = self.full_step_of(position);
        for group in &self.full_step_indexes[start..] {
            if let Some(&last) = group.last() {
                if last > position && self.steps[last].kind() == StepKind::Algorithmic {
                    return Some(last);
                }
            }
        }
        None
    }

    /// Nearest terminator strictly before a position.
    fn prev_terminator_before(&self, position: usize) -> Option<usize> {
        let start = self.full_step_of(position.min(self.steps.len() - 1));
        for group in self.full_step_indexes[..=start].iter().rev() {
            if let Some(&last) = group.last() {
                if last < position && self.steps[last].kind() == StepKind::Algorithmic {
                    return Some(last);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{index_input, ArraySnapshot, StepBuilder};

    fn builder(kind: StepKind) -> StepBuilder {
        match kind {
            StepKind::Code => StepResult::code("code step"),
            StepKind::Significant => StepResult::significant("sub step"),
            StepKind::Algorithmic => StepResult::algorithmic("full step"),
        }
    }

    fn step(kind: StepKind) -> Rc<StepResult> {
        Rc::new(builder(kind).single(ArraySnapshot::new(index_input(&[2, 1]))))
    }

    fn final_step() -> Rc<StepResult> {
        Rc::new(
            StepResult::algorithmic("sorted")
                .final_step()
                .single(ArraySnapshot::new(index_input(&[1, 2]))),
        )
    }

    /// Initial step plus `C S C S A`: two groups, the second closed at
    /// position 5.
    fn two_group_collection() -> StepResultCollection {
        let mut collection = StepResultCollection::new(step(StepKind::Algorithmic));
        collection.add(step(StepKind::Code));
        collection.add(step(StepKind::Significant));
        collection.add(step(StepKind::Code));
        collection.add(step(StepKind::Significant));
        collection.add(step(StepKind::Algorithmic));
        collection
    }

    #[test]
    fn test_new_collection_state() {
        let collection = StepResultCollection::new(step(StepKind::Algorithmic));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.pointer(), 0);
        assert_eq!(collection.full_step_count(), 1);
        assert_eq!(collection.current_code_step(), 0);
        assert_eq!(collection.current_sub_step(), (0, 0));
        assert_eq!(collection.current_full_step(), 0);
        assert_eq!(collection.end_code_step(), None);
    }

    #[test]
    fn test_add_maintains_group_index() {
        let collection = two_group_collection();
        assert_eq!(collection.full_step_count(), 2);
        assert_eq!(collection.sub_step_count(0), Some(1));
        assert_eq!(collection.sub_step_count(1), Some(3));
        assert_eq!(collection.end_sub_step(0), Some(0));
        assert_eq!(collection.end_sub_step(1), Some(2));
    }

    #[test]
    fn test_code_navigation_bounds() {
        let mut collection = two_group_collection();
        assert!(!collection.backward(StepKind::Code));
        for expected in 1..collection.len() {
            assert!(collection.forward(StepKind::Code));
            assert_eq!(collection.pointer(), expected);
        }
        assert!(!collection.forward(StepKind::Code));
        assert_eq!(collection.pointer(), 5);
        assert!(collection.backward(StepKind::Code));
        assert_eq!(collection.pointer(), 4);
    }

    #[test]
    fn test_sub_navigation_visits_members() {
        let mut collection = two_group_collection();
        assert!(collection.forward(StepKind::Significant));
        assert_eq!(collection.pointer(), 2);
        assert!(collection.forward(StepKind::Significant));
        assert_eq!(collection.pointer(), 4);
        assert!(collection.forward(StepKind::Significant));
        assert_eq!(collection.pointer(), 5);
        assert!(!collection.forward(StepKind::Significant));

        assert!(collection.backward(StepKind::Significant));
        assert_eq!(collection.pointer(), 4);
        assert!(collection.backward(StepKind::Significant));
        assert_eq!(collection.pointer(), 2);
        assert!(collection.backward(StepKind::Significant));
        assert_eq!(collection.pointer(), 0);
        assert!(!collection.backward(StepKind::Significant));
    }

    #[test]
    fn test_full_navigation_lands_on_terminators() {
        let mut collection = two_group_collection();
        assert!(collection.forward(StepKind::Algorithmic));
        assert_eq!(collection.pointer(), 5);
        assert!(!collection.forward(StepKind::Algorithmic));
        assert!(collection.backward(StepKind::Algorithmic));
        assert_eq!(collection.pointer(), 0);
        assert!(!collection.backward(StepKind::Algorithmic));
    }

    #[test]
    fn test_full_forward_skips_open_group() {
        let mut collection = StepResultCollection::new(step(StepKind::Algorithmic));
        collection.add(step(StepKind::Code));
        collection.add(step(StepKind::Significant));
        // the only later group is still open, so there is nothing to land on
        assert!(!collection.forward(StepKind::Algorithmic));
        assert_eq!(collection.pointer(), 0);
    }

    #[test]
    fn test_positions_after_terminator_belong_to_earlier_group() {
        // A C C S A: code steps at 1 and 2 precede the second group's first
        // member at 3
        let mut collection = StepResultCollection::new(step(StepKind::Algorithmic));
        collection.add(step(StepKind::Code));
        collection.add(step(StepKind::Code));
        collection.add(step(StepKind::Significant));
        collection.add(step(StepKind::Algorithmic));

        assert_eq!(collection.full_step_of(1), 0);
        assert_eq!(collection.full_step_of(2), 0);
        assert_eq!(collection.full_step_of(3), 1);
        assert_eq!(collection.sub_step_of(2), (0, 0));
        assert_eq!(collection.sub_step_of(3), (1, 0));

        // backward(full) from an in-between code step lands on the terminator
        collection.pointer = 2;
        assert!(collection.backward(StepKind::Algorithmic));
        assert_eq!(collection.pointer(), 0);
    }

    #[test]
    fn test_go_to_jumps() {
        let mut collection = two_group_collection();
        collection.go_to_sub_step(1, 1).expect("member exists");
        assert_eq!(collection.pointer(), 4);
        collection.go_to_full_step(1).expect("group is closed");
        assert_eq!(collection.pointer(), 5);
        collection.go_to_code_step(3).expect("position exists");
        assert_eq!(collection.pointer(), 3);
        collection.go_to_last_known_step();
        assert_eq!(collection.pointer(), 5);
    }

    #[test]
    fn test_go_to_rejects_unknown_targets() {
        let mut collection = two_group_collection();
        assert_eq!(
            collection.go_to_code_step(6),
            Err(StepError::StepOutOfRange {
                position: 6,
                known: 6
            })
        );
        assert_eq!(
            collection.go_to_full_step(2),
            Err(StepError::UnknownFullStep { full: 2, known: 2 })
        );
        assert_eq!(
            collection.go_to_sub_step(1, 3),
            Err(StepError::SubStepOutOfRange {
                full: 1,
                sub: 3,
                known: 3
            })
        );

        collection.add(step(StepKind::Significant));
        assert_eq!(
            collection.go_to_full_step(2),
            Err(StepError::OpenFullStep { full: 2 })
        );
    }

    #[test]
    fn test_final_step_freezes_history() {
        let mut collection = two_group_collection();
        collection.add_and_advance(final_step());
        assert_eq!(collection.len(), 7);
        assert_eq!(collection.pointer(), 6);
        assert_eq!(collection.end_code_step(), Some(6));
        assert_eq!(collection.end_full_step(), Some(2));
        assert_eq!(collection.end_sub_step(2), Some(0));

        // anything arriving after the final step is dropped
        collection.add(step(StepKind::Code));
        assert_eq!(collection.len(), 7);
        collection.add_and_advance(step(StepKind::Algorithmic));
        assert_eq!(collection.len(), 7);
        assert_eq!(collection.pointer(), 6);
    }

    #[test]
    fn test_current_step_resolution() {
        let mut collection = two_group_collection();
        collection.go_to_code_step(3).expect("position exists");
        assert_eq!(
            collection.current_step(StepKind::Code).kind(),
            StepKind::Code
        );
        assert_eq!(
            collection.current_step(StepKind::Significant).kind(),
            StepKind::Significant
        );
        // nearest record at full granularity is the initial step
        assert_eq!(
            collection.current_step(StepKind::Algorithmic).kind(),
            StepKind::Algorithmic
        );
        collection.go_to_full_step(1).expect("group is closed");
        assert!(Rc::ptr_eq(
            collection.current_step(StepKind::Algorithmic),
            collection.step_at(5).expect("position exists")
        ));
    }

    #[test]
    fn test_last_known_numbers() {
        let mut collection = two_group_collection();
        assert_eq!(collection.last_known_code_step(), 5);
        assert_eq!(collection.last_known_full_step(), 1);
        assert_eq!(collection.last_known_sub_step(), (1, 2));
        collection.add(step(StepKind::Significant));
        assert_eq!(collection.last_known_full_step(), 2);
        assert_eq!(collection.last_known_sub_step(), (2, 0));
    }
}
