//! Figure writers - persist a [`Figure`] to disk.
//!
//! - [`PngWriter`]: rasterizes with plotters' bitmap backend.
//! - [`JsonWriter`]: dumps the scene as JSON for inspection or external tooling.

use crate::error::{TrackError, TrackResult};
use crate::figure::{Figure, LegendCorner, LineStyle, Marker, MarkerShape, Rgb, Series};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Persists figures in one output format.
pub trait FigureWriter {
    /// File extension (without dot) of the produced files.
    fn extension(&self) -> &'static str;
    
    /// Writes `figure` to `path`, replacing any existing file.
    fn write(&self, figure: &Figure, path: &Path) -> TrackResult<()>;
}

/// Outer margin around the chart, in pixels.
const MARGIN: u32 = 10;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 70;
const TITLE_LINE_HEIGHT: u32 = 28;
const TITLE_FONT: u32 = 22;
const LABEL_FONT: u32 = 18;
const DASH: u32 = 12;
const DASH_GAP: u32 = 6;

/// PNG output via plotters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl FigureWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }
    
    fn write(&self, figure: &Figure, path: &Path) -> TrackResult<()> {
        // The backend lives only for this call; it is dropped on every return path.
        let root = BitMapBackend::new(path, figure.size.pixels()).into_drawing_area();
        
        root.fill(&WHITE).map_err(TrackError::render)?;
        draw_figure(&root, figure)?;
        root.present().map_err(TrackError::render)?;
        
        Ok(())
    }
}

/// Pretty-printed JSON scene output.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl FigureWriter for JsonWriter {
    fn extension(&self) -> &'static str {
        "json"
    }
    
    fn write(&self, figure: &Figure, path: &Path) -> TrackResult<()> {
        let json = serde_json::to_string_pretty(figure)?;
        std::fs::write(path, json).map_err(|e| TrackError::io(path, e))
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> TrackResult<()>
where
    DB::ErrorType: 'static,
{
    let lines: Vec<&str> = figure.title.lines().collect();
    let title_height = lines.len() as u32 * TITLE_LINE_HEIGHT + MARGIN;
    let (title_area, plot_area) = root.split_vertically(title_height);
    
    let (width, _) = title_area.dim_in_pixel();
    let title_style = ("sans-serif", TITLE_FONT)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in lines.iter().enumerate() {
        let y = (MARGIN + i as u32 * TITLE_LINE_HEIGHT) as i32;
        title_area
            .draw(&Text::new(line.to_string(), (width as i32 / 2, y), title_style.clone()))
            .map_err(TrackError::render)?;
    }
    
    let (area_w, area_h) = plot_area.dim_in_pixel();
    let plot_w = area_w.saturating_sub(Y_LABEL_AREA + 2 * MARGIN);
    let plot_h = area_h.saturating_sub(X_LABEL_AREA + 2 * MARGIN);
    let view = figure.view_bounds(plot_w, plot_h);
    
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(view.min_x..view.max_x, view.min_y..view.max_y)
        .map_err(TrackError::render)?;
    
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .label_style(("sans-serif", LABEL_FONT))
        .max_light_lines(0);
    match figure.grid {
        Some(alpha) => {
            mesh.bold_line_style(BLACK.mix(alpha).stroke_width(1));
        }
        None => {
            mesh.disable_mesh();
        }
    }
    mesh.draw().map_err(TrackError::render)?;
    
    for series in &figure.series {
        draw_series(&mut chart, series)?;
    }
    for marker in &figure.markers {
        draw_marker(&mut chart, marker)?;
    }
    
    if figure.legend.is_some() && !figure.legend_labels().is_empty() {
        let position = match figure.resolve_legend_corner(&view) {
            LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
            LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendCorner::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
        };
        chart
            .configure_series_labels()
            .position(position)
            .label_font(("sans-serif", LABEL_FONT))
            .background_style(WHITE.mix(0.8).filled())
            .border_style(BLACK.mix(0.3).stroke_width(1))
            .draw()
            .map_err(TrackError::render)?;
    }
    
    Ok(())
}

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_series<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, series: &Series) -> TrackResult<()>
where
    DB::ErrorType: 'static,
{
    let style = rgb(series.color).mix(series.alpha).stroke_width(series.width);
    
    // An empty series still gets a legend entry.
    let empty = [Vec::new()];
    let segments = if series.segments.is_empty() { &empty[..] } else { &series.segments[..] };
    
    for (i, segment) in segments.iter().enumerate() {
        let points = segment.iter().copied();
        let annotation = match series.style {
            LineStyle::Solid => chart
                .draw_series(LineSeries::new(points, style))
                .map_err(TrackError::render)?,
            LineStyle::Dashed => chart
                .draw_series(DashedLineSeries::new(points, DASH, DASH_GAP, style))
                .map_err(TrackError::render)?,
        };
        if let (0, Some(label)) = (i, series.label.as_deref()) {
            annotation
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }
    Ok(())
}

fn draw_marker<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, marker: &Marker) -> TrackResult<()>
where
    DB::ErrorType: 'static,
{
    let color = rgb(marker.color);
    let size = marker.size as i32;
    let filled = color.filled();
    let stroke = color.stroke_width(3);
    let at = marker.at;
    
    let annotation = match marker.shape {
        MarkerShape::Circle => chart
            .draw_series(std::iter::once(Circle::new(at, size, filled)))
            .map_err(TrackError::render)?,
        MarkerShape::Cross => chart
            .draw_series(std::iter::once(Cross::new(at, size, stroke)))
            .map_err(TrackError::render)?,
        MarkerShape::Square => chart
            .draw_series(std::iter::once(
                EmptyElement::at(at) + Rectangle::new([(-size, -size), (size, size)], filled),
            ))
            .map_err(TrackError::render)?,
        MarkerShape::Triangle => chart
            .draw_series(std::iter::once(TriangleMarker::new(at, size, filled)))
            .map_err(TrackError::render)?,
    };
    
    if let Some(label) = marker.label.as_deref() {
        let annotation = annotation.label(label);
        match marker.shape {
            MarkerShape::Circle => {
                annotation.legend(move |(x, y)| Circle::new((x + 10, y), size, filled));
            }
            MarkerShape::Cross => {
                annotation.legend(move |(x, y)| Cross::new((x + 10, y), size, stroke));
            }
            MarkerShape::Square => {
                annotation.legend(move |(x, y)| {
                    Rectangle::new([(x + 10 - size, y - size), (x + 10 + size, y + size)], filled)
                });
            }
            MarkerShape::Triangle => {
                annotation.legend(move |(x, y)| TriangleMarker::new((x + 10, y), size, filled));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{FigureSize, LegendPlacement, BLUE};
    use crate::trajectory::Trajectory;
    
    fn sample_figure() -> Figure {
        let mut figure = Figure::new(FigureSize {
            width_in: 4.0,
            height_in: 3.0,
            dpi: 50,
        });
        let path = Trajectory::from_columns(
            &[Some(0.0), Some(1.0), Some(2.0)],
            &[Some(0.0), Some(0.5), Some(0.0)],
        );
        figure.add_series(Series::from_trajectory(&path, BLUE, LineStyle::Solid).with_label("Robot"));
        figure.add_marker(Marker::new((0.0, 0.0), BLUE, MarkerShape::Circle).with_label("Robot start"));
        figure.add_marker(Marker::new((2.0, 0.0), BLUE, MarkerShape::Cross).with_label("Robot end"));
        figure.set_title("track.csv\n(1/1)");
        figure.set_axis_labels("X (m)", "Y (m)");
        figure.set_grid(0.3);
        figure.set_equal_aspect(true);
        figure.set_legend(LegendPlacement::Best);
        figure
    }
    
    #[test]
    fn test_json_writer_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        
        JsonWriter.write(&sample_figure(), &path).unwrap();
        
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["title"], "track.csv\n(1/1)");
        assert_eq!(value["series"][0]["label"], "Robot");
        assert_eq!(value["series"][0]["style"], "solid");
        assert_eq!(value["markers"][1]["shape"], "cross");
        assert_eq!(value["legend"], "best");
    }
    
    #[test]
    fn test_json_writer_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        
        JsonWriter.write(&sample_figure(), &a).unwrap();
        JsonWriter.write(&sample_figure(), &b).unwrap();
        
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }
    
    #[test]
    fn test_json_writer_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scene.json");
        
        assert!(matches!(JsonWriter.write(&sample_figure(), &path), Err(TrackError::Io { .. })));
    }
    
    #[test]
    fn test_extensions() {
        assert_eq!(PngWriter.extension(), "png");
        assert_eq!(JsonWriter.extension(), "json");
    }
    
    #[test]
    #[ignore = "text rendering needs system fonts"]
    fn test_png_writer_creates_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.png");
        
        PngWriter.write(&sample_figure(), &path).unwrap();
        
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
