// Integration tests for step recording and bidirectional navigation

use std::rc::Rc;

use sortty::algorithms::{AlgorithmKind, AlgorithmRunner};
use sortty::history::StepResultCollection;
use sortty::step::{StepError, StepKind};

/// Record a complete run of `kind` over `input`, leaving the pointer at the
/// initial step.
fn record_full_run(kind: AlgorithmKind, input: &[i32]) -> (AlgorithmRunner, StepResultCollection) {
    let mut runner = AlgorithmRunner::new(kind.create());
    let initial = runner.reset(input);
    let mut collection = StepResultCollection::new(initial);
    while !runner.is_completed() {
        let steps = runner
            .step_forward(StepKind::Algorithmic)
            .expect("step generation failed");
        for step in steps {
            collection.add(step);
        }
    }
    (runner, collection)
}

#[test]
fn test_forward_generates_on_demand() {
    let mut runner = AlgorithmRunner::new(AlgorithmKind::Bubble.create());
    let initial = runner.reset(&[3, 1, 2]);
    let mut collection = StepResultCollection::new(initial);

    // Nothing recorded ahead of the initial step yet
    assert!(!collection.forward(StepKind::Significant));
    assert_eq!(collection.pointer(), 0);

    // Generate, record, and the same request now succeeds
    let steps = runner
        .step_forward(StepKind::Significant)
        .expect("step generation failed");
    assert!(!steps.is_empty());
    for step in steps {
        collection.add(step);
    }
    assert!(collection.forward(StepKind::Significant));
    assert!(collection.pointer() > 0);
    assert!(collection.current_step(StepKind::Code).kind() >= StepKind::Significant);
}

#[test]
fn test_full_step_forward_lands_on_terminators() {
    let (_, mut collection) = record_full_run(AlgorithmKind::Bubble, &[5, 1, 4]);

    let mut landings = 0;
    while collection.forward(StepKind::Algorithmic) {
        landings += 1;
        let step = collection
            .step_at(collection.pointer())
            .expect("pointer in range");
        assert_eq!(step.kind(), StepKind::Algorithmic);
    }

    // One landing per group terminator ahead of the initial step, which
    // terminates a group of its own
    assert_eq!(landings, collection.full_step_count() - 1);
    assert_eq!(
        collection.end_full_step(),
        Some(collection.full_step_count() - 1)
    );
}

#[test]
fn test_backward_visits_forward_positions_in_reverse() {
    let (_, mut collection) = record_full_run(AlgorithmKind::Insertion, &[4, 2, 5, 1]);

    let mut forward_positions = Vec::new();
    while collection.forward(StepKind::Significant) {
        forward_positions.push(collection.pointer());
    }

    let mut backward_positions = Vec::new();
    while collection.backward(StepKind::Significant) {
        backward_positions.push(collection.pointer());
    }

    let mut expected = vec![0];
    expected.extend(&forward_positions);
    expected.pop();
    expected.reverse();
    assert_eq!(backward_positions, expected);
    assert_eq!(collection.pointer(), 0);
}

#[test]
fn test_boundaries_do_not_move_the_pointer() {
    let (runner, mut collection) = record_full_run(AlgorithmKind::Selection, &[3, 1, 2]);

    // At the start nothing is behind at any granularity
    assert!(!collection.backward(StepKind::Code));
    assert!(!collection.backward(StepKind::Significant));
    assert!(!collection.backward(StepKind::Algorithmic));
    assert_eq!(collection.pointer(), 0);

    // At the recorded end nothing is ahead, and the run is complete
    collection.go_to_last_known_step();
    let end = collection.pointer();
    assert!(runner.is_completed());
    assert!(!collection.forward(StepKind::Code));
    assert_eq!(collection.pointer(), end);
}

#[test]
fn test_current_step_snaps_to_coarser_kinds() {
    let (_, mut collection) = record_full_run(AlgorithmKind::Bubble, &[3, 1, 2]);

    // Step 1 is fine-grained bookkeeping inside the first group
    collection
        .go_to_code_step(1)
        .expect("position 1 is recorded");
    assert_eq!(collection.current_step(StepKind::Code).kind(), StepKind::Code);

    // The nearest Significant-or-coarser step at or before it is the initial step
    let significant = collection.current_step(StepKind::Significant);
    assert!(Rc::ptr_eq(
        significant,
        collection.step_at(0).expect("initial step")
    ));
}

#[test]
fn test_end_numbers_unknown_until_final_step() {
    let mut runner = AlgorithmRunner::new(AlgorithmKind::Bubble.create());
    let initial = runner.reset(&[4, 3, 2, 1]);
    let mut collection = StepResultCollection::new(initial);

    let steps = runner
        .step_forward(StepKind::Significant)
        .expect("step generation failed");
    for step in steps {
        collection.add(step);
    }
    assert_eq!(collection.end_code_step(), None);
    assert_eq!(collection.end_full_step(), None);

    while !runner.is_completed() {
        let steps = runner
            .step_forward(StepKind::Algorithmic)
            .expect("step generation failed");
        for step in steps {
            collection.add(step);
        }
    }
    let end = collection.end_code_step().expect("end recorded");
    assert_eq!(end, collection.len() - 1);
    assert!(collection
        .step_at(end)
        .expect("end step recorded")
        .is_final());
}

#[test]
fn test_go_to_full_step_rejects_open_group() {
    let mut runner = AlgorithmRunner::new(AlgorithmKind::Bubble.create());
    let initial = runner.reset(&[3, 1, 2]);
    let mut collection = StepResultCollection::new(initial);

    // Only drain to the first notable step: group 0 is the initial step,
    // group 1 has started but has no terminator yet
    let steps = runner
        .step_forward(StepKind::Significant)
        .expect("step generation failed");
    for step in steps {
        collection.add(step);
    }

    collection
        .go_to_full_step(0)
        .expect("the initial step closes its own group");
    assert_eq!(
        collection.go_to_full_step(1),
        Err(StepError::OpenFullStep { full: 1 })
    );
}

#[test]
fn test_go_to_positions_and_errors() {
    let (_, mut collection) = record_full_run(AlgorithmKind::Insertion, &[3, 9, 5]);
    let len = collection.len();

    collection.go_to_code_step(2).expect("position 2 exists");
    assert_eq!(collection.pointer(), 2);

    collection
        .go_to_full_step(0)
        .expect("group 0 is closed in a full run");
    assert_eq!(collection.current_full_step(), 0);
    assert_eq!(
        collection.current_step(StepKind::Code).kind(),
        StepKind::Algorithmic
    );

    collection
        .go_to_sub_step(1, 0)
        .expect("group 1 has a first member");
    assert_eq!(collection.current_sub_step(), (1, 0));

    assert_eq!(
        collection.go_to_code_step(len),
        Err(StepError::StepOutOfRange {
            position: len,
            known: len,
        })
    );
    let groups = collection.full_step_count();
    assert_eq!(
        collection.go_to_sub_step(groups + 7, 0),
        Err(StepError::UnknownFullStep {
            full: groups + 7,
            known: groups,
        })
    );
    let in_group0 = collection.sub_step_count(0).expect("group 0 exists");
    assert_eq!(
        collection.go_to_sub_step(0, in_group0),
        Err(StepError::SubStepOutOfRange {
            full: 0,
            sub: in_group0,
            known: in_group0,
        })
    );
}

#[test]
fn test_post_final_steps_are_ignored() {
    let (mut runner, mut collection) = record_full_run(AlgorithmKind::Bubble, &[2, 1]);
    let len = collection.len();

    // A completed runner keeps answering with the cached final step
    let again = runner
        .step_forward(StepKind::Code)
        .expect("completed runner still answers");
    assert_eq!(again.len(), 1);
    assert!(again[0].is_final());

    for step in again {
        collection.add(step);
    }
    assert_eq!(collection.len(), len);
}

#[test]
fn test_adjacent_readonly_steps_share_array_storage() {
    let (_, collection) = record_full_run(AlgorithmKind::Bubble, &[2, 1, 3]);

    let mut shared_pairs = 0;
    for window in collection.steps().windows(2) {
        if window[1].primary().shares_items_with(window[0].primary()) {
            shared_pairs += 1;
        }
    }
    // Comparison steps never touch the array, so plenty of neighbors share
    assert!(shared_pairs > 0, "no adjacent steps shared array storage");
}

#[test]
fn test_rerun_forgets_previous_history() {
    let (mut runner, collection) = record_full_run(AlgorithmKind::Bubble, &[3, 1, 2]);
    assert!(collection.len() > 1);

    let initial = runner.reset(&[3, 1, 2]);
    let fresh = StepResultCollection::new(initial);
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh.pointer(), 0);
    assert_eq!(fresh.end_code_step(), None);
    assert!(!runner.is_completed());
}

#[test]
fn test_add_and_advance_follows_generation() {
    let mut runner = AlgorithmRunner::new(AlgorithmKind::Bubble.create());
    let initial = runner.reset(&[3, 1, 2]);
    let mut collection = StepResultCollection::new(initial);

    // Recording while advancing keeps the pointer on the frontier
    let steps = runner
        .step_forward(StepKind::Significant)
        .expect("step generation failed");
    for step in steps {
        collection.add_and_advance(step);
    }
    assert_eq!(collection.pointer(), collection.len() - 1);
    assert_eq!(
        collection.current_step(StepKind::Code).kind(),
        StepKind::Significant
    );

    // From mid-group, a full-step drain lands on the group's terminator
    assert!(!collection.forward(StepKind::Algorithmic));
    let steps = runner
        .step_forward(StepKind::Algorithmic)
        .expect("step generation failed");
    for step in steps {
        collection.add_and_advance(step);
    }
    assert_eq!(collection.pointer(), collection.len() - 1);
    assert_eq!(
        collection.current_step(StepKind::Code).kind(),
        StepKind::Algorithmic
    );
    assert!(collection.backward(StepKind::Algorithmic));
    assert_eq!(collection.pointer(), 0);
}
