//! Figure - the drawing surface a track is rendered onto.
//!
//! A figure is plain data: series, markers and decorations. Writers in
//! [`crate::writer`] turn it into pixels or JSON. Keeping the scene
//! backend-free lets the renderer be checked without a font stack and makes
//! the geometry (equal aspect, legend placement) deterministic.

use crate::trajectory::{Bounds, Trajectory};
use serde::Serialize;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const PURPLE: Rgb = Rgb(128, 0, 128);
pub const BROWN: Rgb = Rgb(165, 42, 42);

/// Robot trajectory color.
pub const ROBOT_COLOR: Rgb = BLUE;

/// Participant colors, assigned by sorted position and wrapping after five.
pub const PARTICIPANT_PALETTE: [Rgb; 5] = [RED, GREEN, ORANGE, PURPLE, BROWN];

/// Palette color for the participant at sorted position `index`.
pub fn palette_color(index: usize) -> Rgb {
    PARTICIPANT_PALETTE[index % PARTICIPANT_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Cross,
    Square,
    Triangle,
}

/// A connected path, possibly broken into several segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: Option<String>,
    pub color: Rgb,
    pub style: LineStyle,
    pub width: u32,
    pub alpha: f64,
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl Series {
    /// A series following `trajectory`.
    pub fn from_trajectory(trajectory: &Trajectory, color: Rgb, style: LineStyle) -> Self {
        Self {
            label: None,
            color,
            style,
            width: 2,
            alpha: 0.8,
            segments: trajectory.segments(),
        }
    }
    
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A single point glyph (start / end of a path).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub label: Option<String>,
    pub color: Rgb,
    pub shape: MarkerShape,
    /// Glyph radius in pixels
    pub size: u32,
    pub at: (f64, f64),
}

impl Marker {
    pub fn new(at: (f64, f64), color: Rgb, shape: MarkerShape) -> Self {
        Self {
            label: None,
            color,
            shape,
            size: 6,
            at,
        }
    }
    
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Corner of the plot area holding the legend box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendCorner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl LegendCorner {
    /// Candidate order used by [`LegendPlacement::Best`] to break ties.
    pub const ALL: [LegendCorner; 4] = [
        LegendCorner::UpperRight,
        LegendCorner::UpperLeft,
        LegendCorner::LowerLeft,
        LegendCorner::LowerRight,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPlacement {
    /// Corner covering the fewest data points
    Best,
    Corner(LegendCorner),
}

/// Physical figure size; pixel size is inches times dpi.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 8.0,
            dpi: 150,
        }
    }
}

impl FigureSize {
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }
}

/// Fraction of the data span added on each side of the view.
const VIEW_MARGIN: f64 = 0.05;

/// One plot: data layers plus axis decorations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub size: FigureSize,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Grid line alpha; `None` disables the grid
    pub grid: Option<f64>,
    pub equal_aspect: bool,
    /// `None` hides the legend
    pub legend: Option<LegendPlacement>,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
}

impl Figure {
    pub fn new(size: FigureSize) -> Self {
        Self {
            size,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            grid: None,
            equal_aspect: false,
            legend: None,
            series: Vec::new(),
            markers: Vec::new(),
        }
    }
    
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }
    
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
    
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
    
    pub fn set_axis_labels(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.x_label = x.into();
        self.y_label = y.into();
    }
    
    pub fn set_grid(&mut self, alpha: f64) {
        self.grid = Some(alpha);
    }
    
    pub fn set_equal_aspect(&mut self, enabled: bool) {
        self.equal_aspect = enabled;
    }
    
    pub fn set_legend(&mut self, placement: LegendPlacement) {
        self.legend = Some(placement);
    }
    
    /// Legend labels in drawing order: lines first, then markers.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter_map(|s| s.label.as_deref())
            .chain(self.markers.iter().filter_map(|m| m.label.as_deref()))
            .collect()
    }
    
    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.series
            .iter()
            .flat_map(|s| s.segments.iter().flatten().copied())
            .chain(self.markers.iter().map(|m| m.at))
    }
    
    /// Extent of everything drawn, or `None` for an empty figure.
    pub fn data_bounds(&self) -> Option<Bounds> {
        let mut points = self.points();
        let (x, y) = points.next()?;
        let mut bounds = Bounds::point(x, y);
        for (x, y) in points {
            bounds.include(x, y);
        }
        Some(bounds)
    }
    
    /// Axis ranges for a plot area of `plot_w` x `plot_h` pixels.
    ///
    /// Data bounds are padded by a small margin. With equal aspect, the axis
    /// with fewer metres per pixel is widened about its centre so both axes
    /// share one scale.
    pub fn view_bounds(&self, plot_w: u32, plot_h: u32) -> Bounds {
        let Some(data) = self.data_bounds() else {
            return Bounds {
                min_x: 0.0,
                max_x: 1.0,
                min_y: 0.0,
                max_y: 1.0,
            };
        };
        
        let (cx, w) = padded_span(data.min_x, data.max_x);
        let (cy, h) = padded_span(data.min_y, data.max_y);
        let (w, h) = if self.equal_aspect && plot_w > 0 && plot_h > 0 {
            let per_px = (w / plot_w as f64).max(h / plot_h as f64);
            (per_px * plot_w as f64, per_px * plot_h as f64)
        } else {
            (w, h)
        };
        
        Bounds {
            min_x: cx - w / 2.0,
            max_x: cx + w / 2.0,
            min_y: cy - h / 2.0,
            max_y: cy + h / 2.0,
        }
    }
    
    /// Corner for the legend within `view`.
    ///
    /// `Best` picks the quadrant holding the fewest data points.
    pub fn resolve_legend_corner(&self, view: &Bounds) -> LegendCorner {
        match self.legend {
            Some(LegendPlacement::Corner(corner)) => corner,
            Some(LegendPlacement::Best) | None => {
                let mid_x = (view.min_x + view.max_x) / 2.0;
                let mid_y = (view.min_y + view.max_y) / 2.0;
                let mut counts = [0usize; 4];
                for (x, y) in self.points() {
                    let slot = match (x >= mid_x, y >= mid_y) {
                        (true, true) => 0,
                        (false, true) => 1,
                        (false, false) => 2,
                        (true, false) => 3,
                    };
                    counts[slot] += 1;
                }
                
                let mut best = 0;
                for slot in 1..4 {
                    if counts[slot] < counts[best] {
                        best = slot;
                    }
                }
                LegendCorner::ALL[best]
            }
        }
    }
}

/// Centre and padded width of `[min, max]`; a zero span is widened to one unit.
fn padded_span(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let span = if span > 0.0 { span } else { 1.0 };
    ((min + max) / 2.0, span * (1.0 + 2.0 * VIEW_MARGIN))
}
