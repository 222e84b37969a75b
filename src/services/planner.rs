//! Turns a visual order into a target order through adjacent swaps.
//!
//! Only neighbouring rows can be animated as an overtake, so the plan is the
//! exact swap sequence of a bottom-up bubble sort: every pass walks from the
//! last visual position to the top, swapping whenever the lower entry ranks
//! strictly ahead of the upper one. Passes repeat until one makes no swap.

use std::collections::HashMap;

use crate::state::standings::{EntryId, Swap};

/// Plan the swaps that carry `current` to `target`, in execution order.
///
/// Entries missing from `target` sink below every ranked entry and never
/// overtake each other.
pub fn plan_swaps(current: &[EntryId], target: &[EntryId]) -> Vec<Swap> {
    let rank: HashMap<EntryId, usize> = target
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index))
        .collect();
    let mut keys: Vec<usize> = current
        .iter()
        .map(|id| rank.get(id).copied().unwrap_or(usize::MAX))
        .collect();

    let mut swaps = Vec::new();
    if keys.len() < 2 {
        return swaps;
    }

    loop {
        let mut swapped = false;
        for upper in (0..keys.len() - 1).rev() {
            if keys[upper + 1] < keys[upper] {
                keys.swap(upper, upper + 1);
                swaps.push(Swap::at(upper));
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    swaps
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::*;
    use crate::state::standings::{ScoreUpdate, Standings};

    fn ids(raw: &[u32]) -> Vec<EntryId> {
        raw.iter().copied().map(EntryId).collect()
    }

    fn apply(order: &[EntryId], swaps: &[Swap]) -> Vec<EntryId> {
        let mut order = order.to_vec();
        for swap in swaps {
            order.swap(swap.upper(), swap.lower());
        }
        order
    }

    fn inversions(current: &[EntryId], target: &[EntryId]) -> usize {
        let rank = |id: &EntryId| target.iter().position(|other| other == id).unwrap();
        let mut count = 0;
        for i in 0..current.len() {
            for j in i + 1..current.len() {
                if rank(&current[i]) > rank(&current[j]) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn lower_ranked_entries_overtake_bottom_up() {
        // Scores: #1 = 10, #2 = 25, #3 = 15.
        let current = ids(&[1, 2, 3]);
        let target = ids(&[2, 3, 1]);

        let swaps = plan_swaps(&current, &target);

        let positions: Vec<(usize, usize)> = swaps.iter().map(Swap::positions).collect();
        assert_eq!(positions, vec![(0, 1), (1, 2)]);
        assert_eq!(apply(&current, &swaps), target);
    }

    #[test]
    fn trivial_inputs_need_no_swaps() {
        assert!(plan_swaps(&[], &[]).is_empty());
        assert!(plan_swaps(&ids(&[1]), &ids(&[1])).is_empty());
        assert!(plan_swaps(&ids(&[3, 1, 2]), &ids(&[3, 1, 2])).is_empty());
    }

    #[test]
    fn full_reversal_resolves_every_inversion() {
        let current = ids(&[1, 2, 3, 4, 5, 6]);
        let target = ids(&[6, 5, 4, 3, 2, 1]);

        let swaps = plan_swaps(&current, &target);

        assert_eq!(swaps.len(), 15);
        assert_eq!(apply(&current, &swaps), target);
    }

    #[test]
    fn bubble_passes_are_emitted_in_scan_order() {
        let swaps = plan_swaps(&ids(&[3, 2, 1]), &ids(&[1, 2, 3]));
        let positions: Vec<(usize, usize)> = swaps.iter().map(Swap::positions).collect();
        assert_eq!(positions, vec![(1, 2), (0, 1), (1, 2)]);
    }

    #[test]
    fn random_permutations_reach_target_with_one_swap_per_inversion() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let target = ids(&[4, 9, 1, 7, 3, 11, 2, 8, 6, 10, 5]);

        for _ in 0..50 {
            let mut current = target.clone();
            current.shuffle(&mut rng);

            let swaps = plan_swaps(&current, &target);

            assert_eq!(apply(&current, &swaps), target);
            assert_eq!(swaps.len(), inversions(&current, &target));
            assert_eq!(swaps.is_empty(), current == target);
        }
    }

    #[test]
    fn tied_neighbours_are_never_swapped() {
        let mut standings = Standings::new(4);
        standings.arrange(&ids(&[4, 2, 3, 1]));
        standings.apply_scores(&[
            ScoreUpdate { id: EntryId(1), score: 9 },
            ScoreUpdate { id: EntryId(2), score: 5 },
            ScoreUpdate { id: EntryId(3), score: 5 },
            ScoreUpdate { id: EntryId(4), score: 5 },
        ]);
        let current = standings.visual_order().to_vec();
        let target = standings.ranking();

        let mut order = current.clone();
        for swap in plan_swaps(&current, &target) {
            let upper = standings.entry(order[swap.upper()]).unwrap().score;
            let lower = standings.entry(order[swap.lower()]).unwrap().score;
            assert!(lower > upper, "swap {swap:?} moved tied entries");
            order.swap(swap.upper(), swap.lower());
        }
        assert_eq!(order, ids(&[1, 4, 2, 3]));
    }
}
