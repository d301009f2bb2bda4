use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Parser};
use tracing::info;

use crate::{
    chart::{
        renderer::{ChartPalette, MoodChartRenderer},
        svg::render_svg,
    },
    mood::{log::MoodLog, CHART_WINDOW},
    storage::key_value::KeyValueStore,
};

#[derive(Debug, Parser)]
pub struct ChartCommand {
    #[arg(
        short,
        long,
        default_value = "mood-chart.svg",
        help = "File the SVG chart is written to"
    )]
    out: PathBuf,
    #[arg(
        long,
        default_value_t = 600,
        value_parser = value_parser!(u32).range(121..),
        help = "Chart width in pixels"
    )]
    width: u32,
    #[arg(
        long,
        default_value_t = 300,
        value_parser = value_parser!(u32).range(81..),
        help = "Chart height in pixels"
    )]
    height: u32,
    #[arg(long, help = "Use colors that fit a dark background")]
    dark: bool,
}

/// Renders the last [CHART_WINDOW] entries of the journal into an SVG file.
pub async fn process_chart_command<S: KeyValueStore>(
    ChartCommand {
        out,
        width,
        height,
        dark,
    }: ChartCommand,
    log: &MoodLog<S>,
) -> Result<()> {
    let palette = if dark {
        ChartPalette::DARK
    } else {
        ChartPalette::LIGHT
    };
    let renderer = MoodChartRenderer::new(palette);
    let entries = log.recent(CHART_WINDOW);
    let svg = render_svg(&renderer, entries, (width, height))?;

    tokio::fs::write(&out, svg)
        .await
        .with_context(|| format!("Failed to write chart into {out:?}"))?;
    info!("Chart with {} entries written into {out:?}", entries.len());
    println!("Chart saved to {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{
        mood::log::MoodLog, storage::key_value::MemoryStore, utils::clock::MockClock,
    };

    use super::{process_chart_command, ChartCommand};

    #[tokio::test]
    async fn test_chart_written_to_file() -> Result<()> {
        let mut clock = MockClock::new();
        let mut current = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        clock.expect_time().returning(move || {
            current += Duration::days(1);
            current
        });

        let mut log = MoodLog::load(Arc::new(MemoryStore::new()), Box::new(clock)).await?;
        // Only the newest 14 end up on the chart.
        for i in 0..20 {
            log.append(Some(i % 5 + 1), "").await?;
        }

        let dir = tempdir()?;
        let out = dir.path().join("chart.svg");
        process_chart_command(
            ChartCommand {
                out: out.clone(),
                width: 400,
                height: 300,
                dark: false,
            },
            &log,
        )
        .await?;

        let svg = std::fs::read_to_string(out)?;
        assert_eq!(svg.matches("<circle").count(), 14);
        Ok(())
    }
}
