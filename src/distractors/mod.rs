pub mod kanji;
pub mod options;
pub mod readings;

pub use kanji::kanji_distractors;
pub use options::{build_options, correct_answer};
pub use readings::reading_distractors;
