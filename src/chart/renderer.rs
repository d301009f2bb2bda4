use anyhow::Result;
use tracing::{instrument, trace};

use crate::{
    mood::{
        entities::{Mood, MoodEntry},
        log::MoodLog,
        CHART_WINDOW,
    },
    storage::key_value::KeyValueStore,
};

use super::{
    layout::{ChartLayout, GRIDLINE_COUNT},
    Canvas, Dash, Font, Rgb, Stroke, TextAlign,
};

pub const PLACEHOLDER_TEXT: &str = "Start tracking to see your mood trends";

const MARKER_RADIUS: f64 = 5.;
const GRID_DASH: Dash = Dash { on: 5., off: 5. };

/// Colors used by the chart. The mood line keeps its accent color regardless of the palette
/// used for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub background: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub line: Rgb,
}

impl ChartPalette {
    pub const LIGHT: ChartPalette = ChartPalette {
        background: Rgb(0xff, 0xff, 0xff),
        border: Rgb(0xe2, 0xe8, 0xf0),
        text: Rgb(0x64, 0x74, 0x8b),
        line: Rgb(0x63, 0x66, 0xf1),
    };

    pub const DARK: ChartPalette = ChartPalette {
        background: Rgb(0x1e, 0x29, 0x3b),
        border: Rgb(0x33, 0x41, 0x55),
        text: Rgb(0x94, 0xa3, 0xb8),
        line: Rgb(0x63, 0x66, 0xf1),
    };
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self::LIGHT
    }
}

/// Draws the mood line chart. Rendering doesn't keep any state between calls: the canvas is
/// cleared first, so drawing the same entries twice gives the same picture.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoodChartRenderer {
    palette: ChartPalette,
}

impl MoodChartRenderer {
    pub fn new(palette: ChartPalette) -> Self {
        Self { palette }
    }

    /// Renders the newest [CHART_WINDOW] entries of `log`.
    pub fn render_log<S: KeyValueStore>(
        &self,
        log: &MoodLog<S>,
        canvas: &mut impl Canvas,
    ) -> Result<()> {
        self.render(log.recent(CHART_WINDOW), canvas)
    }

    /// `entries` are expected to be already windowed, oldest first.
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub fn render(&self, entries: &[MoodEntry], canvas: &mut impl Canvas) -> Result<()> {
        let (width, height) = canvas.size();
        let layout = ChartLayout::new(width, height);

        canvas.clear(self.palette.background)?;

        if entries.is_empty() {
            let font = Font {
                size: 16.,
                color: self.palette.text,
                align: TextAlign::Center,
            };
            return canvas.fill_text(PLACEHOLDER_TEXT, layout.center(), &font);
        }

        canvas.stroke_path(
            &layout.axes(),
            &Stroke {
                color: self.palette.border,
                width: 2.,
                dash: None,
            },
        )?;

        let grid = Stroke {
            color: self.palette.border,
            width: 1.,
            dash: Some(GRID_DASH),
        };
        for i in 1..=GRIDLINE_COUNT {
            canvas.stroke_path(&layout.gridline(i), &grid)?;
        }

        // A lone entry has no x position, so nothing is plotted until there are two.
        let points = entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| layout.point(i, entries.len(), entry.mood))
            .collect::<Vec<_>>();
        trace!("Plotting {} points", points.len());
        if !points.is_empty() {
            canvas.stroke_path(
                &points,
                &Stroke {
                    color: self.palette.line,
                    width: 3.,
                    dash: None,
                },
            )?;
            for point in &points {
                canvas.fill_circle(*point, MARKER_RADIUS, self.palette.line)?;
            }
        }

        let font = Font {
            size: 12.,
            color: self.palette.text,
            align: TextAlign::Right,
        };
        for mood in Mood::ALL {
            canvas.fill_text(mood.label(), layout.label_anchor(mood), &font)?;
        }

        Ok(())
    }
}
