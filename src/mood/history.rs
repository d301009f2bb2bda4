use chrono::{Local, NaiveDate, TimeZone};

use super::entities::{Mood, MoodEntry};

pub const EMPTY_HISTORY_MESSAGE: &str = "No mood entries yet. Start tracking your mood today!";

/// Summary of a single entry, ready to be printed.
#[derive(Debug, PartialEq, Eq)]
pub struct HistoryLine<'a> {
    pub mood: Mood,
    pub date: NaiveDate,
    pub note: Option<&'a str>,
}

impl HistoryLine<'_> {
    pub fn emoji(&self) -> &'static str {
        self.mood.emoji()
    }

    pub fn label(&self) -> &'static str {
        self.mood.label()
    }
}

/// Turns a window of entries (oldest first) into history lines, newest first. Dates are
/// calendar days in `tz`.
pub fn history_lines<'a, Tz: TimeZone>(entries: &'a [MoodEntry], tz: &Tz) -> Vec<HistoryLine<'a>> {
    entries
        .iter()
        .rev()
        .map(|entry| HistoryLine {
            mood: entry.mood,
            date: entry.timestamp.with_timezone(tz).date_naive(),
            note: Some(entry.note.as_str()).filter(|note| !note.trim().is_empty()),
        })
        .collect()
}

/// [history_lines] in the local time zone.
pub fn local_history_lines(entries: &[MoodEntry]) -> Vec<HistoryLine<'_>> {
    history_lines(entries, &Local)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};

    use crate::mood::entities::{Mood, MoodEntry};

    use super::history_lines;

    fn entries() -> Vec<MoodEntry> {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 22, 0, 0).unwrap();
        vec![
            MoodEntry::new(Mood::ALL[0], "exam week", start),
            MoodEntry::new(Mood::ALL[2], "  ", start + Duration::days(1)),
            MoodEntry::new(Mood::ALL[4], "", start + Duration::days(2)),
        ]
    }

    #[test]
    fn test_history_newest_first() {
        let entries = entries();
        let lines = history_lines(&entries, &Utc);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].label(), "Excellent");
        assert_eq!(lines[0].emoji(), "😄");
        assert_eq!(lines[2].label(), "Stressed");
        assert_eq!(lines[2].note, Some("exam week"));
        assert_eq!(lines[2].date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    }

    #[test]
    fn test_history_skips_blank_notes() {
        let entries = entries();
        let lines = history_lines(&entries, &Utc);

        assert_eq!(lines[0].note, None);
        assert_eq!(lines[1].note, None);
    }

    #[test]
    fn test_history_uses_time_zone() {
        let entries = entries();
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let lines = history_lines(&entries, &tz);

        assert_eq!(lines[2].date, NaiveDate::from_ymd_opt(2025, 1, 11).unwrap());
    }

    #[test]
    fn test_history_empty() {
        assert!(history_lines(&[], &Utc).is_empty());
    }
}
