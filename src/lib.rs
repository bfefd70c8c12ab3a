pub mod config;
pub mod distractors;
pub mod error;
pub mod items;
pub mod ledger;
pub mod logging;
pub mod paths;
pub mod selection;
pub mod sessions;
pub mod terminal;

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;

pub use error::QuizError;
pub use items::{Item, ItemBank};
pub use ledger::{JsonFileStore, MemoryStore, MistakeLedger, MistakeStore};
pub use selection::QuestionMode;
pub use sessions::{Phase, QuizEngine, SessionSummary};

/// Load config, bank and ledger, then hand stdin/stdout to the terminal front end.
/// `config_path` overrides the app-data config location.
pub fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => config::load_quiz_config(&path),
        None => config::get_quiz_config().clone(),
    };

    logging::init_logging(config.log_json);
    tracing::info!("kanji-drill starting");

    // The bank is a startup prerequisite; nothing runs without it
    let bank = ItemBank::load(&config.bank_path)
        .with_context(|| format!("failed to load item bank from {:?}", config.bank_path))?;

    let store = JsonFileStore::new(config.resolved_ledger_path());
    tracing::info!(path = ?store.path(), "Using mistake ledger");

    let mut engine = QuizEngine::new(Arc::new(bank), store)
        .with_distractor_count(config.distractor_count);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    terminal::run_terminal(&mut engine, &config, stdin.lock(), &mut stdout)?;

    tracing::info!("kanji-drill exiting");
    Ok(())
}
