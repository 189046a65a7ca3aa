//! Display order of the active (non-retired) champions

use std::collections::BTreeSet;

use rand::Rng;

use crate::shuffle::shuffle_in_place;

/// Shuffled indices `0..entry_count`, minus retired ones
pub fn build_order<R: Rng + ?Sized>(
    entry_count: usize,
    retired: &BTreeSet<usize>,
    rng: &mut R,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entry_count).filter(|i| !retired.contains(i)).collect();
    shuffle_in_place(&mut order, rng);
    order
}

/// Drop retired and out-of-range indices, keeping relative order.
///
/// Returns `None` when nothing had to be removed.
pub fn filter_order(
    order: &[usize],
    entry_count: usize,
    retired: &BTreeSet<usize>,
) -> Option<Vec<usize>> {
    let filtered: Vec<usize> = order
        .iter()
        .copied()
        .filter(|i| *i < entry_count && !retired.contains(i))
        .collect();
    (filtered.len() != order.len()).then_some(filtered)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::shuffle::RandomSource;
    use proptest::prelude::*;

    #[test]
    fn test_three_entries_one_retired() {
        let retired = BTreeSet::from([1]);
        for seed in 0..20 {
            let mut order = build_order(3, &retired, &mut RandomSource::seeded(seed));
            order.sort_unstable();
            assert_eq!(order, vec![0, 2]);
        }
    }

    #[test]
    fn test_all_retired_is_empty() {
        let retired = BTreeSet::from([0, 1]);
        assert!(build_order(2, &retired, &mut RandomSource::seeded(1)).is_empty());
    }

    #[test]
    fn test_filter_order() {
        let retired = BTreeSet::from([3]);
        assert_eq!(filter_order(&[2, 0, 1], 4, &retired), None);
        assert_eq!(filter_order(&[2, 3, 0, 1], 4, &retired), Some(vec![2, 0, 1]));
        // Stale index from a longer catalog
        assert_eq!(filter_order(&[7, 0], 4, &retired), Some(vec![0]));
    }

    proptest! {
        #[test]
        fn build_order_is_permutation_of_active(
            n in 0usize..200,
            retired in proptest::collection::btree_set(0usize..250, 0..40),
            seed: u64,
        ) {
            let order = build_order(n, &retired, &mut RandomSource::seeded(seed));
            let active: BTreeSet<usize> = (0..n).filter(|i| !retired.contains(i)).collect();

            prop_assert_eq!(order.len(), active.len());
            let as_set: BTreeSet<usize> = order.iter().copied().collect();
            prop_assert_eq!(as_set, active);
        }
    }
}
