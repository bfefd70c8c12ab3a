use rand::Rng;
use crate::items::{Item, ItemBank};
use crate::ledger::MistakeLedger;

/// Draw up to `k` distinct entries from `pool`, each round picking with
/// probability proportional to the remaining weights.
///
/// The pool is consumed as a shrinking working copy; a draw `r` in
/// `[0, total)` selects the first entry whose cumulative weight reaches `r`.
/// Asking for more than the pool holds returns the whole pool.
pub fn sample_without_replacement<T, R>(mut pool: Vec<(T, f64)>, k: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let rounds = k.min(pool.len());
    let mut picked = Vec::with_capacity(rounds);

    for _ in 0..rounds {
        let total: f64 = pool.iter().map(|(_, w)| w.max(0.0)).sum();
        let idx = if total > 0.0 {
            let r = rng.gen::<f64>() * total;
            let mut acc = 0.0;
            pool.iter()
                .position(|(_, w)| {
                    let w = w.max(0.0);
                    acc += w;
                    w > 0.0 && acc >= r
                })
                // Float drift can leave `acc` a hair under `r`
                .or_else(|| pool.iter().rposition(|(_, w)| *w > 0.0))
                .unwrap_or(pool.len() - 1)
        } else {
            rng.gen_range(0..pool.len())
        };
        let (chosen, _) = pool.remove(idx);
        picked.push(chosen);
    }

    picked
}

/// Pick `k` distinct items, favouring items with more recorded mistakes.
pub fn select_items<R>(bank: &ItemBank, ledger: &MistakeLedger, k: usize, rng: &mut R) -> Vec<Item>
where
    R: Rng + ?Sized,
{
    let pool: Vec<(&Item, f64)> = bank
        .items()
        .iter()
        .map(|item| (item, ledger.weight(&item.identity)))
        .collect();

    let picked: Vec<Item> = sample_without_replacement(pool, k, rng)
        .into_iter()
        .cloned()
        .collect();

    if picked.len() < k {
        tracing::debug!(
            requested = k,
            available = picked.len(),
            "Item bank smaller than requested question count"
        );
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn bank(ids: &[&str]) -> ItemBank {
        ItemBank::from_items(
            ids.iter()
                .map(|id| Item::new(*id, vec![format!("{}-reading", id)]))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_returns_distinct_items() {
        let bank = bank(&["一", "二", "三", "四", "五", "六"]);
        let mut ledger = MistakeLedger::new();
        ledger.increment("三");
        let mut rng = StdRng::seed_from_u64(7);

        for k in 1..=6 {
            let picked = select_items(&bank, &ledger, k, &mut rng);
            assert_eq!(picked.len(), k);
            let ids: HashSet<_> = picked.iter().map(|i| i.identity.clone()).collect();
            assert_eq!(ids.len(), k, "duplicates in selection");
        }
    }

    #[test]
    fn test_oversized_request_returns_whole_bank() {
        let bank = bank(&["一", "二", "三"]);
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_items(&bank, &MistakeLedger::new(), 10, &mut rng);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_missed_items_are_drawn_more_often() {
        let bank = bank(&["一", "二"]);
        let mut ledger = MistakeLedger::new();
        ledger.increment("一");
        ledger.increment("一");
        let mut rng = StdRng::seed_from_u64(42);

        let trials = 6000;
        let mut hits = 0;
        for _ in 0..trials {
            let picked = select_items(&bank, &ledger, 1, &mut rng);
            if picked[0].identity == "一" {
                hits += 1;
            }
        }
        // Weight 5 vs 1: expected share is 5/6
        let share = hits as f64 / trials as f64;
        assert!(share > 0.78 && share < 0.88, "share was {}", share);
    }

    #[test]
    fn test_empty_ledger_is_roughly_uniform() {
        let bank = bank(&["一", "二", "三", "四"]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..4000 {
            let picked = select_items(&bank, &MistakeLedger::new(), 1, &mut rng);
            *counts.entry(picked[0].identity.clone()).or_default() += 1;
        }
        for id in ["一", "二", "三", "四"] {
            let c = counts.get(id).copied().unwrap_or(0);
            assert!(c > 850 && c < 1150, "{} drawn {} times", id, c);
        }
    }

    #[test]
    fn test_zero_weight_entries_are_skipped_while_others_remain() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let picked = sample_without_replacement(vec![("zero", 0.0), ("one", 1.0)], 1, &mut rng);
            assert_eq!(picked, vec!["one"]);
        }
        let all = sample_without_replacement(vec![("zero", 0.0), ("one", 1.0)], 2, &mut rng);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_draw_on_a_boundary_picks_the_entry_it_reaches() {
        // gen::<f64>() maps 1 << 63 to exactly 0.5, so r lands on the first entry's upper edge
        let mut rng = StepRng::new(1 << 63, 0);
        let picked = sample_without_replacement(vec![("a", 1.0), ("b", 1.0)], 1, &mut rng);
        assert_eq!(picked, vec!["a"]);

        // One step past the edge belongs to the next entry
        let mut rng = StepRng::new((1 << 63) + (1 << 11), 0);
        let picked = sample_without_replacement(vec![("a", 1.0), ("b", 1.0)], 1, &mut rng);
        assert_eq!(picked, vec!["b"]);
    }

    #[test]
    fn test_zero_draw_skips_leading_zero_weights() {
        let mut rng = StepRng::new(0, 0);
        let picked =
            sample_without_replacement(vec![("zero", 0.0), ("a", 1.0), ("b", 1.0)], 1, &mut rng);
        assert_eq!(picked, vec!["a"]);
    }
}
