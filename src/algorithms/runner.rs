//! Driving algorithms at a chosen granularity
//!
//! [`AlgorithmRunner`] owns a boxed algorithm and layers coarse stepping
//! over its fine-grained `next_step`: one `step_forward` call keeps
//! draining steps until a step of at least the requested kind (or the
//! final step) appears, and hands every produced step back so the caller
//! can record them all.
//!
//! The runner also threads payload sharing through the stream: each new
//! step is offered the previous step's arrays and call stack, so runs of
//! read-only steps collapse onto one allocation.

use std::rc::Rc;

use crate::step::{StepError, StepKind, StepResult};

use super::SortingAlgorithm;

pub struct AlgorithmRunner {
    algorithm: Box<dyn SortingAlgorithm>,
    last: Option<Rc<StepResult>>,
    final_step: Option<Rc<StepResult>>,
}

impl AlgorithmRunner {
    pub fn new(algorithm: Box<dyn SortingAlgorithm>) -> Self {
        AlgorithmRunner {
            algorithm,
            last: None,
            final_step: None,
        }
    }

    /// Rebuilds the algorithm from the input and returns its initial step.
    pub fn reset(&mut self, input: &[i32]) -> Rc<StepResult> {
        let initial = Rc::new(self.algorithm.reset(input));
        self.final_step = initial.is_final().then(|| Rc::clone(&initial));
        self.last = Some(Rc::clone(&initial));
        initial
    }

    /// Generates steps until one of at least `kind` appears, returning
    /// every step produced along the way in generation order.
    ///
    /// Once the final step has been produced, every further call returns
    /// just that cached step again.
    pub fn step_forward(&mut self, kind: StepKind) -> Result<Vec<Rc<StepResult>>, StepError> {
        if let Some(final_step) = &self.final_step {
            return Ok(vec![Rc::clone(final_step)]);
        }
        let mut produced = Vec::new();
        loop {
            let mut step = self.algorithm.next_step()?;
            if let Some(last) = &self.last {
                step.accept_equal_step_data(last);
            }
            let step = Rc::new(step);
            self.last = Some(Rc::clone(&step));
            if step.is_final() {
                self.final_step = Some(Rc::clone(&step));
            }
            let reached = step.kind() >= kind || step.is_final();
            produced.push(step);
            if reached {
                return Ok(produced);
            }
        }
    }

    /// Whether the final step has been produced.
    pub fn is_completed(&self) -> bool {
        self.final_step.is_some()
    }

    pub fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn pseudocode(&self) -> &'static [&'static str] {
        self.algorithm.pseudocode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::BubbleSort;

    fn runner_with(input: &[i32]) -> (AlgorithmRunner, Rc<StepResult>) {
        let mut runner = AlgorithmRunner::new(Box::new(BubbleSort::new()));
        let initial = runner.reset(input);
        (runner, initial)
    }

    #[test]
    fn test_drains_until_requested_kind() {
        let (mut runner, _) = runner_with(&[3, 1, 2]);
        let produced = runner
            .step_forward(StepKind::Significant)
            .expect("generation succeeds");
        let last = produced.last().expect("at least one step");
        assert!(last.kind() >= StepKind::Significant);
        for step in &produced[..produced.len() - 1] {
            assert!(step.kind() < StepKind::Significant);
        }
    }

    #[test]
    fn test_full_drain_reaches_terminator() {
        let (mut runner, _) = runner_with(&[3, 1, 2]);
        let produced = runner
            .step_forward(StepKind::Algorithmic)
            .expect("generation succeeds");
        assert_eq!(
            produced.last().expect("at least one step").kind(),
            StepKind::Algorithmic
        );
    }

    #[test]
    fn test_final_step_is_cached() {
        let (mut runner, _) = runner_with(&[2, 1]);
        let mut last = None;
        while !runner.is_completed() {
            let produced = runner
                .step_forward(StepKind::Algorithmic)
                .expect("generation succeeds");
            last = produced.last().cloned();
        }
        let final_step = last.expect("final step produced");
        assert!(final_step.is_final());

        let again = runner
            .step_forward(StepKind::Code)
            .expect("completed runner still answers");
        assert_eq!(again.len(), 1);
        assert!(Rc::ptr_eq(&again[0], &final_step));
    }

    #[test]
    fn test_trivial_input_completes_at_reset() {
        let (runner, initial) = runner_with(&[7]);
        assert!(runner.is_completed());
        assert!(initial.is_final());
        assert_eq!(initial.kind(), StepKind::Algorithmic);
    }

    #[test]
    fn test_consecutive_readonly_steps_share_arrays() {
        let (mut runner, initial) = runner_with(&[2, 1]);
        let produced = runner
            .step_forward(StepKind::Significant)
            .expect("generation succeeds");
        // nothing has mutated the array yet, so every snapshot so far is
        // the same allocation
        for step in &produced {
            assert!(step.primary().shares_items_with(initial.primary()));
        }
    }
}
