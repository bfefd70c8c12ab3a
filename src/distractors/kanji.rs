use std::collections::HashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use crate::items::{Item, ItemBank};

/// Up to `n` wrong kanji for `item`, near-homophones first.
///
/// Other items whose primary reading starts with the same kana as `item`'s
/// fill the result before any unrelated kanji is used.
pub fn kanji_distractors<R>(bank: &ItemBank, item: &Item, n: usize, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let lead = item.primary_reading().chars().next();

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(item.identity.as_str());

    let mut similar: Vec<&str> = Vec::new();
    let mut other: Vec<&str> = Vec::new();
    for candidate in bank.items() {
        if !seen.insert(candidate.identity.as_str()) {
            continue;
        }
        let candidate_lead = candidate.primary_reading().chars().next();
        if lead.is_some() && candidate_lead == lead {
            similar.push(&candidate.identity);
        } else {
            other.push(&candidate.identity);
        }
    }

    let mut picked: Vec<String> = similar
        .choose_multiple(rng, n)
        .map(|id| id.to_string())
        .collect();
    let remaining = n - picked.len();
    if remaining > 0 {
        picked.extend(other.choose_multiple(rng, remaining).map(|id| id.to_string()));
    }

    tracing::debug!(
        kanji = %item.identity,
        similar = similar.len(),
        picked = picked.len(),
        "Built kanji distractors"
    );

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str, reading: &str) -> Item {
        Item::new(id, vec![reading.to_string()])
    }

    fn sample_bank() -> ItemBank {
        ItemBank::from_items(vec![
            item("感", "かん"),
            item("漢", "かん"),
            item("館", "かん"),
            item("間", "かん"),
            item("川", "かわ"),
            item("山", "やま"),
            item("海", "うみ"),
            item("空", "そら"),
        ])
        .unwrap()
    }

    #[test]
    fn test_prefers_same_leading_kana() {
        let bank = sample_bank();
        let target = bank.get("漢").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(10);
        let similar = ["感", "館", "間", "川"];
        for _ in 0..50 {
            let picked = kanji_distractors(&bank, &target, 3, &mut rng);
            assert_eq!(picked.len(), 3);
            assert!(picked.iter().all(|id| similar.contains(&id.as_str())), "{:?}", picked);
            assert!(!picked.contains(&"漢".to_string()));
        }
    }

    #[test]
    fn test_falls_back_to_other_bucket() {
        let bank = sample_bank();
        let target = bank.get("山").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(11);
        let picked = kanji_distractors(&bank, &target, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(!picked.contains(&"山".to_string()));
    }

    #[test]
    fn test_similar_bucket_fills_first_then_others() {
        let bank = sample_bank();
        let target = bank.get("海").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(12);
        // No other う- item, so all come from the other bucket
        let picked = kanji_distractors(&bank, &target, 7, &mut rng);
        assert_eq!(picked.len(), 7);

        let target = bank.get("感").unwrap().clone();
        let picked = kanji_distractors(&bank, &target, 5, &mut rng);
        assert_eq!(picked.len(), 5);
        // Four か- kanji lead, the fifth slot is someone else
        for id in ["漢", "館", "間", "川"] {
            assert!(picked[..4].contains(&id.to_string()));
        }
    }

    #[test]
    fn test_hint_drives_similarity() {
        let bank = ItemBank::from_items(vec![
            Item::new("生", vec!["せい".into()]).with_hint("いきる"),
            item("行", "いく"),
            item("星", "せい"),
        ])
        .unwrap();
        let target = bank.get("生").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(13);
        let picked = kanji_distractors(&bank, &target, 1, &mut rng);
        assert_eq!(picked, vec!["行".to_string()]);
    }

    #[test]
    fn test_small_bank_degrades() {
        let bank = ItemBank::from_items(vec![item("山", "やま"), item("川", "かわ")]).unwrap();
        let target = bank.get("山").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(14);
        assert_eq!(kanji_distractors(&bank, &target, 3, &mut rng), vec!["川".to_string()]);
    }
}
