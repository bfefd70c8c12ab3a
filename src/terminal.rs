use std::io::{BufRead, Write};
use anyhow::{Context, Result};
use rand::Rng;
use crate::config::QuizConfig;
use crate::ledger::MistakeStore;
use crate::selection::QuestionMode;
use crate::sessions::{AnswerFeedback, Phase, QuizEngine, SessionSummary};

const MOST_MISSED_SHOWN: usize = 5;

/// Line-oriented front end. Reads commands from `input` until EOF or `quit`.
///
/// Idle commands: `start [count] [write_ratio]`, `again`, `reset`, `quit`.
/// While a question is open: an option number or a typed answer, or `q` to give up.
pub fn run_terminal<S, R, I, O>(
    engine: &mut QuizEngine<S, R>,
    config: &QuizConfig,
    input: I,
    out: &mut O,
) -> Result<()>
where
    S: MistakeStore,
    R: Rng,
    I: BufRead,
    O: Write,
{
    show_banner(engine, out)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let line = line.trim();

        match engine.phase() {
            Phase::Idle | Phase::Finished => {
                let mut words = line.split_whitespace();
                match words.next() {
                    Some("start") => {
                        let count = match words.next() {
                            Some(w) => w.parse().unwrap_or(0),
                            None => config.question_count,
                        };
                        let ratio = match words.next() {
                            Some(w) => w.parse().unwrap_or(f64::NAN),
                            None => config.write_ratio,
                        };
                        match engine.start(count, ratio) {
                            Ok(()) => show_question(engine, out)?,
                            Err(e) if e.is_user_error() => writeln!(out, "{}", e)?,
                            Err(e) => return Err(e.into()),
                        }
                    }
                    Some("again") => match engine.restart() {
                        Ok(()) => show_question(engine, out)?,
                        Err(e) => writeln!(out, "{}", e)?,
                    },
                    Some("reset") => match engine.reset_history() {
                        Ok(()) => writeln!(out, "Review history cleared.")?,
                        Err(e) => {
                            tracing::warn!("Failed to clear mistake history: {}", e);
                            writeln!(out, "Could not clear review history: {}", e)?;
                        }
                    },
                    Some("quit") => break,
                    _ => prompt_idle(out)?,
                }
            }
            Phase::Unanswered => {
                if line == "q" {
                    let summary = engine.abandon()?;
                    show_summary(&summary, out)?;
                    continue;
                }
                let answer = resolve_choice(engine, line);
                match engine.submit_answer(&answer) {
                    Ok(feedback) => {
                        show_feedback(&feedback, out)?;
                        writeln!(out, "(enter to continue)")?;
                    }
                    Err(e) if e.is_user_error() => writeln!(out, "{}", e)?,
                    Err(e) => return Err(e.into()),
                }
            }
            Phase::Locked => {
                if line == "q" {
                    let summary = engine.abandon()?;
                    show_summary(&summary, out)?;
                    continue;
                }
                match engine.advance()? {
                    Phase::Finished => {
                        if let Some(summary) = engine.summary() {
                            show_summary(&summary, out)?;
                        }
                    }
                    _ => show_question(engine, out)?,
                }
            }
        }
    }

    Ok(())
}

/// A bare number picks that option; anything else is taken as typed.
fn resolve_choice<S, R>(engine: &QuizEngine<S, R>, line: &str) -> String
where
    S: MistakeStore,
    R: Rng,
{
    let options = engine.session().map(|s| s.options()).unwrap_or(&[]);
    match line.parse::<usize>() {
        Ok(n) if n >= 1 && n <= options.len() => options[n - 1].clone(),
        _ => line.to_string(),
    }
}

fn show_banner<S, R, O>(engine: &QuizEngine<S, R>, out: &mut O) -> Result<()>
where
    S: MistakeStore,
    R: Rng,
    O: Write,
{
    let ledger = engine.ledger();
    writeln!(out, "Ready. {} kanji to review.", ledger.len())?;
    let top = ledger.most_missed(MOST_MISSED_SHOWN);
    if !top.is_empty() {
        let listed: Vec<String> = top
            .iter()
            .map(|(kanji, count)| format!("{} x{}", kanji, count))
            .collect();
        writeln!(out, "Most missed: {}", listed.join(", "))?;
    }
    prompt_idle(out)
}

fn prompt_idle<O: Write>(out: &mut O) -> Result<()> {
    writeln!(out, "Commands: start [count] [write_ratio] | again | reset | quit")?;
    Ok(())
}

fn show_question<S, R, O>(engine: &QuizEngine<S, R>, out: &mut O) -> Result<()>
where
    S: MistakeStore,
    R: Rng,
    O: Write,
{
    let Some(session) = engine.session() else {
        return Ok(());
    };
    let Some(question) = session.current_question() else {
        return Ok(());
    };

    writeln!(out)?;
    match question.mode {
        QuestionMode::Read => {
            writeln!(out, "[{}/{}] Reading", session.index() + 1, session.total())?;
            writeln!(out, "{}", question.context())?;
        }
        QuestionMode::Write => {
            writeln!(out, "[{}/{}] Writing", session.index() + 1, session.total())?;
            if let Some(reading) = question.display_reading() {
                writeln!(out, "Reading: {}", reading)?;
            }
            writeln!(out, "{}", question.context())?;
        }
    }
    for (i, option) in session.options().iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, option)?;
    }
    Ok(())
}

fn show_feedback<O: Write>(feedback: &AnswerFeedback, out: &mut O) -> Result<()> {
    if feedback.correct {
        writeln!(out, "Correct: {} = {}", feedback.kanji, feedback.expected)?;
    } else {
        writeln!(out, "Wrong. The answer is {}", feedback.expected)?;
    }
    Ok(())
}

fn show_summary<O: Write>(summary: &SessionSummary, out: &mut O) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{} of {} correct.", summary.score, summary.total)?;
    if summary.is_perfect() {
        writeln!(out, "Perfect run.")?;
    }
    if summary.missed.is_empty() {
        writeln!(out, "Missed: none")?;
    } else {
        writeln!(out, "Missed: {}", summary.missed.join(" "))?;
    }
    prompt_idle(out)
}
