use rand::seq::SliceRandom;
use rand::Rng;
use crate::distractors::{kanji_distractors, reading_distractors};
use crate::items::{Item, ItemBank};
use crate::selection::QuestionMode;

/// The answer a question in `mode` expects for `item`.
pub fn correct_answer(item: &Item, mode: QuestionMode) -> String {
    match mode {
        QuestionMode::Read => item.canonical_reading(),
        QuestionMode::Write => item.identity.clone(),
    }
}

/// Shuffled answer choices: the correct answer plus up to `distractors` wrong ones.
pub fn build_options<R>(
    bank: &ItemBank,
    item: &Item,
    mode: QuestionMode,
    distractors: usize,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut options = match mode {
        QuestionMode::Read => reading_distractors(bank, item, distractors, rng),
        QuestionMode::Write => kanji_distractors(bank, item, distractors, rng),
    };
    options.push(correct_answer(item, mode));
    options.shuffle(rng);
    options
}
