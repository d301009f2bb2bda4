use ansi_term::{Colour, Style};
use clap::Parser;

use crate::{
    mood::{
        entities::Mood,
        history::{local_history_lines, HistoryLine, EMPTY_HISTORY_MESSAGE},
        log::MoodLog,
        HISTORY_WINDOW,
    },
    storage::key_value::KeyValueStore,
};

#[derive(Debug, Parser)]
pub struct HistoryCommand {
    #[arg(short = 'n', long, default_value_t = HISTORY_WINDOW, help = "Number of entries to show")]
    count: usize,
    #[arg(long, help = "Don't color the output")]
    plain: bool,
}

pub fn process_history_command<S: KeyValueStore>(
    HistoryCommand { count, plain }: HistoryCommand,
    log: &MoodLog<S>,
) {
    let lines = local_history_lines(log.recent(count));
    print!("{}", format_history(&lines, !plain));
}

fn mood_colour(mood: Mood) -> Colour {
    match mood.value() {
        1 => Colour::Red,
        2 => Colour::Yellow,
        3 => Colour::Blue,
        4 => Colour::Cyan,
        _ => Colour::Green,
    }
}

/// Formats history lines, one entry per line with the note indented below it.
pub fn format_history(lines: &[HistoryLine], colored: bool) -> String {
    if lines.is_empty() {
        return format!("{EMPTY_HISTORY_MESSAGE}\n");
    }

    let mut output = String::new();
    for line in lines {
        let (label_style, note_style) = if colored {
            (mood_colour(line.mood).bold(), Style::new().dimmed())
        } else {
            (Style::new(), Style::new())
        };
        output += &format!(
            "{} {} - {}\n",
            line.emoji(),
            line.date.format("%x"),
            label_style.paint(line.label())
        );
        if let Some(note) = line.note {
            output += &format!("   {}\n", note_style.paint(note));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::mood::{entities::Mood, history::HistoryLine};

    use super::format_history;

    #[test]
    fn test_format_plain() {
        let lines = [
            HistoryLine {
                mood: Mood::ALL[3],
                date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                note: Some("long walk"),
            },
            HistoryLine {
                mood: Mood::ALL[0],
                date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                note: None,
            },
        ];

        assert_eq!(
            format_history(&lines, false),
            "🙂 02/03/25 - Good\n   long walk\n😰 02/01/25 - Stressed\n"
        );
    }

    #[test]
    fn test_format_colored_keeps_text() {
        let lines = [HistoryLine {
            mood: Mood::ALL[4],
            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            note: None,
        }];

        let output = format_history(&lines, true);
        assert!(output.contains("Excellent"));
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(
            format_history(&[], true),
            "No mood entries yet. Start tracking your mood today!\n"
        );
    }
}
