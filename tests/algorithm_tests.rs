// Integration tests driving every sorting algorithm end to end

use sortty::algorithms::{AlgorithmKind, AlgorithmRunner};
use sortty::step::{StepKind, StepPayload, StepResult};
use std::rc::Rc;

const ALL_KINDS: [AlgorithmKind; 6] = [
    AlgorithmKind::Bubble,
    AlgorithmKind::Insertion,
    AlgorithmKind::Selection,
    AlgorithmKind::Quick,
    AlgorithmKind::Merge,
    AlgorithmKind::Heap,
];

/// Run `kind` over `input` to completion and return every produced step,
/// including the initial one.
fn record_run(kind: AlgorithmKind, input: &[i32]) -> Vec<Rc<StepResult>> {
    let mut runner = AlgorithmRunner::new(kind.create());
    let mut steps = vec![runner.reset(input)];
    while !runner.is_completed() {
        let produced = runner
            .step_forward(StepKind::Algorithmic)
            .expect("step generation failed");
        steps.extend(produced);
    }
    steps
}

#[test]
fn test_every_algorithm_sorts() {
    let input = [7, 3, 9, 1, 5, 8, 2];
    let mut expected: Vec<i32> = input.to_vec();
    expected.sort_unstable();

    for kind in ALL_KINDS {
        let steps = record_run(kind, &input);
        let final_step = steps.last().expect("at least the initial step");

        assert!(final_step.is_final(), "{}: missing final step", kind.label());
        assert_eq!(
            final_step.kind(),
            StepKind::Algorithmic,
            "{}: final step has the wrong kind",
            kind.label()
        );
        assert_eq!(
            final_step.primary().values(),
            expected,
            "{}: final array is not sorted",
            kind.label()
        );

        // No element appears or disappears mid-run
        for step in &steps {
            assert_eq!(
                step.primary().len(),
                input.len(),
                "{}: array changed size",
                kind.label()
            );
        }
        let mut ids: Vec<usize> = final_step
            .primary()
            .items()
            .iter()
            .map(|item| item.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(
            ids,
            (0..input.len()).collect::<Vec<_>>(),
            "{}: element identities were lost",
            kind.label()
        );
    }
}

#[test]
fn test_trivial_inputs_complete_at_reset() {
    for kind in ALL_KINDS {
        let mut runner = AlgorithmRunner::new(kind.create());

        let initial = runner.reset(&[]);
        assert!(runner.is_completed(), "{}: empty input", kind.label());
        assert!(initial.is_final());
        assert_eq!(initial.description(), "Nothing to sort");

        let initial = runner.reset(&[9]);
        assert!(runner.is_completed(), "{}: single element", kind.label());
        assert!(initial.is_final());
        assert_eq!(initial.primary().values(), vec![9]);
    }
}

#[test]
fn test_runs_are_deterministic() {
    for kind in [AlgorithmKind::Bubble, AlgorithmKind::Quick] {
        let first: Vec<String> = record_run(kind, &[5, 2, 8, 1, 9, 3])
            .iter()
            .map(|step| step.description().to_string())
            .collect();
        let second: Vec<String> = record_run(kind, &[5, 2, 8, 1, 9, 3])
            .iter()
            .map(|step| step.description().to_string())
            .collect();
        assert_eq!(first, second, "{}: runs diverged", kind.label());
    }
}

#[test]
fn test_bubble_swap_count_and_early_exit() {
    let steps = record_run(AlgorithmKind::Bubble, &[5, 1, 4]);
    let swaps = steps
        .iter()
        .filter(|step| step.description().starts_with("Swapped:"))
        .count();
    assert_eq!(swaps, 2);

    // A sorted input needs one pass to notice and bail out
    let steps = record_run(AlgorithmKind::Bubble, &[1, 2, 3, 4, 5]);
    let no_swap_passes = steps
        .iter()
        .filter(|step| step.description().contains("made no swaps"))
        .count();
    let completed_passes = steps
        .iter()
        .filter(|step| step.description().contains("complete:"))
        .count();
    assert_eq!(no_swap_passes, 1);
    assert_eq!(completed_passes, 0);
}

#[test]
fn test_merge_sort_is_stable_for_equal_values() {
    let steps = record_run(AlgorithmKind::Merge, &[2, 2, 1]);
    let final_step = steps.last().expect("final step");
    assert_eq!(final_step.primary().values(), vec![1, 2, 2]);

    // The two equal values keep their original left-to-right order
    let ids: Vec<usize> = final_step
        .primary()
        .items()
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![2, 0, 1]);
}

#[test]
fn test_merge_sort_merge_count() {
    let steps = record_run(AlgorithmKind::Merge, &[4, 3, 2, 1]);
    let merges = steps
        .iter()
        .filter(|step| step.description().starts_with("Merged into"))
        .count();
    assert_eq!(merges, 3);
}

#[test]
fn test_recursive_algorithms_snapshot_their_call_stacks() {
    for kind in [AlgorithmKind::Quick, AlgorithmKind::Merge, AlgorithmKind::Heap] {
        let steps = record_run(kind, &[4, 3, 2, 1]);

        let max_depth = steps
            .iter()
            .filter_map(|step| step.call_stack())
            .map(|stack| stack.depth())
            .max()
            .expect("recursive algorithms carry call stacks");
        assert!(
            max_depth >= 2,
            "{}: expected nested calls, peak depth {}",
            kind.label(),
            max_depth
        );

        let final_stack = steps
            .last()
            .expect("final step")
            .call_stack()
            .expect("final step carries a call stack");
        assert!(
            final_stack.is_empty(),
            "{}: final step still has live frames",
            kind.label()
        );
    }
}

#[test]
fn test_heap_sort_payloads_track_the_heap_region() {
    let steps = record_run(AlgorithmKind::Heap, &[6, 2, 8, 1, 4]);

    let mut extract_ends = Vec::new();
    let mut saw_tree = false;
    for step in &steps {
        let StepPayload::Heap {
            heap_end,
            draw_heap,
            draw_array,
            ..
        } = step.payload()
        else {
            panic!("heapsort emitted a non-heap payload");
        };
        assert!(draw_array);
        saw_tree |= draw_heap;
        if step.description().starts_with("Extracted max") {
            extract_ends.push(*heap_end);
        }
    }

    assert!(saw_tree, "the tree view was never enabled");
    assert_eq!(extract_ends, vec![4, 3, 2, 1]);

    // Both bookend steps render as a plain array
    let first = steps.first().expect("initial step");
    let last = steps.last().expect("final step");
    for step in [first, last] {
        assert!(matches!(
            step.payload(),
            StepPayload::Heap {
                draw_heap: false,
                ..
            }
        ));
    }
}

#[test]
fn test_merge_sort_take_steps_expose_queues() {
    let steps = record_run(AlgorithmKind::Merge, &[3, 1, 2]);

    let take_step = steps
        .iter()
        .find(|step| step.description().starts_with("Moved "))
        .expect("merge sort emits take steps");
    let auxiliary = take_step.payload().auxiliary();
    assert_eq!(auxiliary.len(), 2);
    assert_eq!(auxiliary[0].name, "left");
    assert_eq!(auxiliary[1].name, "right");

    // Once merging finishes the payload folds back to a single array
    let done_step = steps
        .iter()
        .find(|step| step.description().starts_with("Merged into"))
        .expect("merge sort emits merge-complete steps");
    assert!(matches!(
        done_step.payload(),
        StepPayload::SingleArray { .. }
    ));
}
