use anyhow::{anyhow, Result};
use plotters::{
    backend::SVGBackend,
    coord::Shift,
    drawing::{DrawingArea, IntoDrawingArea},
    element::{Circle, DashedPathElement, PathElement},
    style::{
        text_anchor::{HPos, Pos, VPos},
        Color, RGBColor, TextStyle,
    },
};

use crate::mood::entities::MoodEntry;

use super::{renderer::MoodChartRenderer, Canvas, Font, Point, Rgb, Stroke, TextAlign};

const FONT_FAMILY: &str = "Inter, sans-serif";

/// [Canvas] that produces an SVG document. The document is written into the buffer passed to
/// [SvgCanvas::new] once [SvgCanvas::present] is called.
pub struct SvgCanvas<'a> {
    area: DrawingArea<SVGBackend<'a>, Shift>,
    size: (u32, u32),
}

impl<'a> SvgCanvas<'a> {
    pub fn new(buffer: &'a mut String, size: (u32, u32)) -> Self {
        let area = SVGBackend::with_string(buffer, size).into_drawing_area();
        Self { area, size }
    }

    pub fn present(self) -> Result<()> {
        self.area
            .present()
            .map_err(|e| anyhow!("Failed to finish chart: {e}"))
    }
}

/// Renders `entries` into a standalone SVG document of the given size.
pub fn render_svg(
    renderer: &MoodChartRenderer,
    entries: &[MoodEntry],
    size: (u32, u32),
) -> Result<String> {
    let mut buffer = String::new();
    {
        let mut canvas = SvgCanvas::new(&mut buffer, size);
        renderer.render(entries, &mut canvas)?;
        canvas.present()?;
    }
    Ok(buffer)
}

fn to_coord(point: Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn to_color(Rgb(r, g, b): Rgb) -> RGBColor {
    RGBColor(r, g, b)
}

impl Canvas for SvgCanvas<'_> {
    fn size(&self) -> (f64, f64) {
        (self.size.0 as f64, self.size.1 as f64)
    }

    fn clear(&mut self, background: Rgb) -> Result<()> {
        self.area
            .fill(&to_color(background))
            .map_err(|e| anyhow!("Failed to clear chart: {e}"))
    }

    fn stroke_path(&mut self, path: &[Point], stroke: &Stroke) -> Result<()> {
        let style = to_color(stroke.color).stroke_width(stroke.width.round().max(1.) as u32);
        let points = path.iter().copied().map(to_coord).collect::<Vec<_>>();
        let drawn = match stroke.dash {
            Some(dash) => self
                .area
                .draw(&DashedPathElement::new(points, dash.on, dash.off, style)),
            None => self.area.draw(&PathElement::new(points, style)),
        };
        drawn.map_err(|e| anyhow!("Failed to draw path: {e}"))
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) -> Result<()> {
        let color = to_color(color);
        self.area
            .draw(&Circle::new(
                to_coord(center),
                radius.round() as i32,
                color.filled(),
            ))
            .map_err(|e| anyhow!("Failed to draw circle: {e}"))
    }

    fn fill_text(&mut self, text: &str, position: Point, font: &Font) -> Result<()> {
        let color = to_color(font.color);
        let horizontal = match font.align {
            TextAlign::Left => HPos::Left,
            TextAlign::Center => HPos::Center,
            TextAlign::Right => HPos::Right,
        };
        let style = TextStyle::from((FONT_FAMILY, font.size))
            .color(&color)
            .pos(Pos::new(horizontal, VPos::Bottom));
        self.area
            .draw_text(text, &style, to_coord(position))
            .map_err(|e| anyhow!("Failed to draw text: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, TimeZone, Utc};

    use crate::{
        chart::{
            renderer::{ChartPalette, MoodChartRenderer},
            Canvas,
        },
        mood::entities::{Mood, MoodEntry},
    };

    use super::{render_svg, SvgCanvas};

    #[test]
    fn test_svg_chart_document() -> Result<()> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let entries = [1, 3, 5]
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                MoodEntry::new(Mood::new_opt(v).unwrap(), "", start + Duration::days(i as i64))
            })
            .collect::<Vec<_>>();

        let mut buffer = String::new();
        {
            let mut canvas = SvgCanvas::new(&mut buffer, (400, 300));
            assert_eq!(canvas.size(), (400., 300.));
            MoodChartRenderer::default().render(&entries, &mut canvas)?;
            canvas.present()?;
        }

        assert!(buffer.contains("<svg"));
        assert!(buffer.contains("width=\"400\""));
        assert_eq!(buffer.matches("<circle").count(), 3);
        for label in ["Stressed", "Not Great", "Okay", "Good", "Excellent"] {
            assert!(buffer.contains(label), "missing {label}");
        }
        Ok(())
    }

    #[test]
    fn test_svg_dark_palette_and_dashed_grid() -> Result<()> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let entries = [2, 4]
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                MoodEntry::new(Mood::new_opt(v).unwrap(), "", start + Duration::days(i as i64))
            })
            .collect::<Vec<_>>();

        let renderer = MoodChartRenderer::new(ChartPalette::DARK);
        let buffer = render_svg(&renderer, &entries, (400, 300))?;

        assert!(buffer.contains("fill=\"#1E293B\""));
        assert!(!buffer.contains("#FFFFFF"));
        // 280px gridlines with a 5/5 dash give many short pieces, on top of the axes and
        // the mood line.
        assert!(buffer.matches("<polyline").count() > 2 + 5 * 20);
        Ok(())
    }

    #[test]
    fn test_svg_placeholder() -> Result<()> {
        let buffer = render_svg(&MoodChartRenderer::default(), &[], (600, 300))?;

        assert!(buffer.contains("Start tracking to see your mood trends"));
        assert!(!buffer.contains("<circle"));
        assert!(!buffer.contains("<polyline"));
        Ok(())
    }
}
