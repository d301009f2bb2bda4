use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{
    storage::key_value::{KeyValueStore, StoreError},
    utils::clock::Clock,
};

use super::{
    entities::{Mood, MoodEntry, MoodError, MoodRecordEntity},
    MOOD_HISTORY_KEY,
};

/// Append-only journal of mood entries. Every append is written through to the store before it
/// returns, so whatever is rendered right after always sees the new entry.
pub struct MoodLog<S: KeyValueStore> {
    store: S,
    clock: Box<dyn Clock>,
    entries: Vec<MoodEntry>,
}

impl<S: KeyValueStore> MoodLog<S> {
    /// Reads the journal from `store`. A missing value gives an empty log, and so does a value
    /// that can't be decoded. Corrupt data is dropped as a whole.
    pub async fn load(store: S, clock: Box<dyn Clock>) -> Result<Self> {
        let entries = match store.get(MOOD_HISTORY_KEY).await {
            Ok(Some(raw)) => decode_entries(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable mood history ({} bytes): {e:#}", raw.len());
                vec![]
            }),
            Ok(None) => vec![],
            Err(e) if e.downcast_ref::<StoreError>().is_some() => {
                warn!("Discarding unreadable mood history: {e:#}");
                vec![]
            }
            Err(e) => return Err(e),
        };
        debug!("Loaded {} mood entries", entries.len());

        Ok(Self {
            store,
            clock,
            entries,
        })
    }

    /// Validates `mood`, stamps a new entry with the current time and persists the whole journal.
    /// Nothing changes when validation or persistence fails.
    pub async fn append(
        &mut self,
        mood: Option<i64>,
        note: impl Into<String>,
    ) -> Result<MoodEntry> {
        let mood = Mood::try_from(mood.ok_or(MoodError::NotSelected)?)?;
        let entry = MoodEntry::new(mood, note, self.clock.time());

        self.entries.push(entry.clone());
        if let Err(e) = self.save().await {
            self.entries.pop();
            return Err(e);
        }

        info!("Saved mood {} at {}", entry.mood.value(), entry.timestamp);
        Ok(entry)
    }

    /// Returns up to `n` of the newest entries, oldest first.
    pub fn recent(&self, n: usize) -> &[MoodEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    /// Writes the full journal, replacing whatever was stored before.
    pub async fn save(&self) -> Result<()> {
        let records = self
            .entries
            .iter()
            .map(MoodRecordEntity::from)
            .collect::<Vec<_>>();
        let raw = serde_json::to_string(&records)?;
        self.store
            .set(MOOD_HISTORY_KEY, &raw)
            .await
            .context("Failed to persist mood history")
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn decode_entries(raw: &str) -> Result<Vec<MoodEntry>> {
    let records: Vec<MoodRecordEntity> = serde_json::from_str(raw)?;
    let entries = records
        .into_iter()
        .map(MoodEntry::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
