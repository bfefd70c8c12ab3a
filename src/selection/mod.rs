pub mod modes;
pub mod weighted;

pub use modes::{assign_modes, write_count_for, QuestionMode};
pub use weighted::{sample_without_replacement, select_items};
