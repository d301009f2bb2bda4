//! Drawing of the mood chart. [renderer::MoodChartRenderer] turns entries into primitive drawing
//! calls on a [Canvas], and [layout::ChartLayout] holds the coordinate mapping used for it.

pub mod layout;
pub mod renderer;
pub mod svg;

use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Dash pattern of a stroke, lengths are in pixels. The pattern runs on across corners of a
/// path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub on: f64,
    pub off: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
    pub dash: Option<Dash>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub color: Rgb,
    pub align: TextAlign,
}

/// A fixed size 2D surface. Coordinates are pixels with the origin in the top left corner.
#[cfg_attr(test, mockall::automock)]
pub trait Canvas {
    /// Width and height of the surface.
    fn size(&self) -> (f64, f64);

    /// Paints the whole surface with `background`, dropping everything drawn before.
    fn clear(&mut self, background: Rgb) -> Result<()>;

    /// Moves to the first point, draws lines through the rest and strokes the result.
    fn stroke_path(&mut self, path: &[Point], stroke: &Stroke) -> Result<()>;

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) -> Result<()>;

    /// `position` is the anchor of the text baseline, horizontal placement follows `font.align`.
    fn fill_text(&mut self, text: &str, position: Point, font: &Font) -> Result<()>;
}
