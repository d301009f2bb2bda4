//! Mood journal. [log::MoodLog] owns the entries, everything else only borrows read-only slices
//! of it.

pub mod entities;
pub mod history;
pub mod log;

/// Storage key of the journal. The value is a json array of
/// [entities::MoodRecordEntity] in chronological order.
pub const MOOD_HISTORY_KEY: &str = "moodHistory";

/// Number of entries shown in the textual history.
pub const HISTORY_WINDOW: usize = 7;

/// Number of entries plotted on the chart.
pub const CHART_WINDOW: usize = 14;
