//! Next-index computation for each traversal order.
//!
//! `last` is `None` until the group has produced its first item. The
//! snapshot may grow or shrink between calls; indices are always reduced
//! modulo the current `len`, so a stale `last` wraps back into range.

use rand::Rng;
use tvs_core::TraversalOrder;

/// Compute the index to select from a snapshot of `len` items.
///
/// `len` must be non-zero; empty snapshots are filtered out by the resolver.
/// `Random` never returns `last` again when another index exists.
pub fn advance<R: Rng + ?Sized>(
    order: TraversalOrder,
    len: usize,
    last: Option<usize>,
    rng: &mut R,
) -> usize {
    debug_assert!(len > 0, "advance called on an empty snapshot");
    match order {
        TraversalOrder::Ascending => match last {
            None => 0,
            Some(last) => (last % len + 1) % len,
        },
        TraversalOrder::Descending => match last {
            None => len - 1,
            Some(last) => (last % len + len - 1) % len,
        },
        TraversalOrder::Random => random_index(len, last, rng),
    }
}

fn random_index<R: Rng + ?Sized>(len: usize, last: Option<usize>, rng: &mut R) -> usize {
    if len == 1 {
        return 0;
    }
    loop {
        let candidate = rng.random_range(0..len);
        if Some(candidate) != last {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn walk(order: TraversalOrder, len: usize, steps: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(7);
        let mut last = None;
        (0..steps)
            .map(|_| {
                let next = advance(order, len, last, &mut rng);
                last = Some(next);
                next
            })
            .collect()
    }

    #[test]
    fn test_ascending_starts_at_zero_and_wraps() {
        assert_eq!(
            walk(TraversalOrder::Ascending, 4, 9),
            vec![0, 1, 2, 3, 0, 1, 2, 3, 0]
        );
    }

    #[test]
    fn test_descending_starts_at_end_and_wraps() {
        assert_eq!(
            walk(TraversalOrder::Descending, 4, 9),
            vec![3, 2, 1, 0, 3, 2, 1, 0, 3]
        );
    }

    #[test]
    fn test_single_item_always_zero() {
        for order in [
            TraversalOrder::Ascending,
            TraversalOrder::Descending,
            TraversalOrder::Random,
        ] {
            assert_eq!(walk(order, 1, 5), vec![0; 5]);
        }
    }

    #[test]
    fn test_shrunk_snapshot_wraps_ascending() {
        let mut rng = StdRng::seed_from_u64(1);
        // Last pick was index 7 of a larger listing; now only 3 remain.
        assert_eq!(advance(TraversalOrder::Ascending, 3, Some(7), &mut rng), 2);
        assert_eq!(advance(TraversalOrder::Ascending, 3, Some(2), &mut rng), 0);
    }

    #[test]
    fn test_shrunk_snapshot_wraps_descending() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(advance(TraversalOrder::Descending, 3, Some(7), &mut rng), 0);
        assert_eq!(advance(TraversalOrder::Descending, 3, Some(0), &mut rng), 2);
    }

    #[test]
    fn test_random_two_items_alternates() {
        assert_eq!(
            walk(TraversalOrder::Random, 2, 6)
                .windows(2)
                .filter(|w| w[0] == w[1])
                .count(),
            0
        );
    }

    #[test]
    fn test_random_same_seed_same_sequence() {
        assert_eq!(
            walk(TraversalOrder::Random, 10, 20),
            walk(TraversalOrder::Random, 10, 20)
        );
    }

    #[test]
    fn test_random_reaches_every_index() {
        let seen: std::collections::HashSet<usize> =
            walk(TraversalOrder::Random, 5, 500).into_iter().collect();
        assert_eq!(seen.len(), 5);
    }

    proptest! {
        #[test]
        fn prop_ascending_visits_each_index_once_per_cycle(len in 1usize..40, cycles in 1usize..4) {
            let visited = walk(TraversalOrder::Ascending, len, len * cycles);
            let expected: Vec<usize> = (0..cycles).flat_map(|_| 0..len).collect();
            prop_assert_eq!(visited, expected);
        }

        #[test]
        fn prop_descending_visits_each_index_once_per_cycle(len in 1usize..40, cycles in 1usize..4) {
            let visited = walk(TraversalOrder::Descending, len, len * cycles);
            let expected: Vec<usize> = (0..cycles).flat_map(|_| (0..len).rev()).collect();
            prop_assert_eq!(visited, expected);
        }

        #[test]
        fn prop_random_in_range_and_never_repeats(len in 2usize..50, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut last = None;
            for _ in 0..64 {
                let next = advance(TraversalOrder::Random, len, last, &mut rng);
                prop_assert!(next < len);
                prop_assert_ne!(Some(next), last);
                last = Some(next);
            }
        }

        #[test]
        fn prop_any_stale_last_lands_in_range(len in 1usize..20, last in 0usize..1000) {
            let mut rng = StdRng::seed_from_u64(0);
            for order in [TraversalOrder::Ascending, TraversalOrder::Descending, TraversalOrder::Random] {
                prop_assert!(advance(order, len, Some(last), &mut rng) < len);
            }
        }
    }
}
