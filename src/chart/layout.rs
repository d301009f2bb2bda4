use crate::mood::entities::Mood;

use super::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Left margin is wider to leave room for the mood labels.
pub const CHART_MARGINS: Margins = Margins {
    left: 80.,
    right: 40.,
    top: 40.,
    bottom: 40.,
};

pub const GRIDLINE_COUNT: usize = 5;

/// Maps chart space onto pixels for a surface of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    width: f64,
    height: f64,
    margins: Margins,
}

impl ChartLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_margins(width, height, CHART_MARGINS)
    }

    pub fn with_margins(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            width,
            height,
            margins,
        }
    }

    pub fn chart_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn chart_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2., self.height / 2.)
    }

    /// Left and bottom axis as a single L shaped path.
    pub fn axes(&self) -> [Point; 3] {
        let bottom = self.height - self.margins.bottom;
        [
            Point::new(self.margins.left, self.margins.top),
            Point::new(self.margins.left, bottom),
            Point::new(self.width - self.margins.right, bottom),
        ]
    }

    /// Horizontal gridline `i`, counted from 1 at the top to [GRIDLINE_COUNT] at the bottom axis.
    pub fn gridline(&self, i: usize) -> [Point; 2] {
        let y = self.margins.top + (self.chart_height() / GRIDLINE_COUNT as f64) * i as f64;
        [
            Point::new(self.margins.left, y),
            Point::new(self.width - self.margins.right, y),
        ]
    }

    pub fn mood_y(&self, mood: Mood) -> f64 {
        self.height - self.margins.bottom - mood.ratio() * self.chart_height()
    }

    /// Position of point `index` out of `count`. Points are spread over the whole chart width, so
    /// there is no position when there are fewer than 2 of them.
    pub fn point(&self, index: usize, count: usize, mood: Mood) -> Option<Point> {
        if count < 2 {
            return None;
        }
        let x = self.margins.left + (self.chart_width() / (count - 1) as f64) * index as f64;
        Some(Point::new(x, self.mood_y(mood)))
    }

    /// Anchor for the label of `mood`, right next to the y axis.
    pub fn label_anchor(&self, mood: Mood) -> Point {
        let index = (mood.value() - Mood::MIN) as f64;
        Point::new(
            self.margins.left - 10.,
            self.height - self.margins.bottom - (self.chart_height() / 4.) * index,
        )
    }
}
