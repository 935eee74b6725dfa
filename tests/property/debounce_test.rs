//! Property-based tests for the trailing-edge debounce.

use proptest::prelude::*;

use chapter_reader::services::scheduler::{Debouncer, TimerQueue};

const WINDOW: u64 = 500;

/// Expected fire times: the last call of every burst whose successor is at
/// least `WINDOW` ms later, plus the final call.
fn expected_fires(calls: &[u64]) -> Vec<(u64, usize)> {
    let mut fires = Vec::new();
    for (i, &t) in calls.iter().enumerate() {
        match calls.get(i + 1) {
            Some(&next) if next < t + WINDOW => {}
            _ => fires.push((t + WINDOW, i)),
        }
    }
    fires
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn only_the_last_call_of_each_burst_fires(gaps in proptest::collection::vec(0u64..1200, 1..30)) {
        let mut calls = Vec::new();
        let mut t = 0;
        for gap in gaps {
            t += gap;
            calls.push(t);
        }

        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(WINDOW);
        let mut fired = Vec::new();

        for (i, &now) in calls.iter().enumerate() {
            // Deliver everything due before this call arrives.
            while let Some((id, task)) = queue.pop_due(now) {
                debouncer.fired(id);
                fired.push(task);
            }
            debouncer.call(now, &mut queue, i);
            prop_assert_eq!(queue.len(), 1);
        }
        let last_deadline = queue.next_deadline().unwrap();
        while let Some((id, task)) = queue.pop_due(last_deadline) {
            debouncer.fired(id);
            fired.push(task);
        }

        let expected: Vec<usize> = expected_fires(&calls).into_iter().map(|(_, i)| i).collect();
        prop_assert_eq!(fired, expected);
        prop_assert!(!debouncer.is_pending());
    }
}
