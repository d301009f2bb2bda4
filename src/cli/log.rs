use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::{
    mood::{
        entities::{Mood, MoodEntry, MoodError},
        log::MoodLog,
    },
    storage::key_value::KeyValueStore,
};

use super::Args;

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(help = "How you feel. Either 1 to 5 or a label: stressed, not-great, okay, good, excellent")]
    mood: Option<Mood>,
    #[arg(short, long, default_value = "", help = "Optional note to go with the mood")]
    note: String,
}

/// Saves a new entry. A missing mood is reported the same way clap reports bad arguments.
pub async fn process_log_command<S: KeyValueStore>(
    LogCommand { mood, note }: LogCommand,
    log: &mut MoodLog<S>,
) -> Result<()> {
    let entry = save_entry(log, mood, note).await?;
    println!(
        "✓ Saved! {} {} ({} entries in total)",
        entry.mood.emoji(),
        entry.mood.label(),
        log.len()
    );
    Ok(())
}

async fn save_entry<S: KeyValueStore>(
    log: &mut MoodLog<S>,
    mood: Option<Mood>,
    note: String,
) -> Result<MoodEntry> {
    match log.append(mood.map(i64::from), note).await {
        Ok(entry) => Ok(entry),
        Err(e) => match e.downcast_ref::<MoodError>() {
            Some(mood_error) => Err(Args::command()
                .error(clap::error::ErrorKind::ValueValidation, mood_error)
                .into()),
            None => Err(e),
        },
    }
}
