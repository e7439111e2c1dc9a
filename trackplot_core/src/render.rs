//! Track renderer - draws robot and participant trajectories onto a figure.

use crate::error::{TrackError, TrackResult};
use crate::figure::{
    palette_color, Figure, LineStyle, Marker, MarkerShape, Rgb, Series, ROBOT_COLOR,
};
use crate::schema::{TrackSchema, PARTICIPANT_ID, ROBOT_X, ROBOT_Y};
use crate::table::TrackTable;
use crate::trajectory::Trajectory;
use tracing::debug;

/// Draws one track table onto `figure`.
///
/// The robot path is always drawn. Participants are drawn according to the
/// detected [`TrackSchema`], which is returned so callers can report it.
/// `label` names the track in diagnostics only.
pub fn render(figure: &mut Figure, table: &TrackTable, label: &str) -> TrackResult<TrackSchema> {
    let robot_x = table.numeric_column(ROBOT_X)?;
    let robot_y = table.numeric_column(ROBOT_Y)?;
    if table.row_count() == 0 {
        return Err(TrackError::EmptyTrack);
    }
    
    let robot = Trajectory::from_columns(&robot_x, &robot_y);
    figure.add_series(Series::from_trajectory(&robot, ROBOT_COLOR, LineStyle::Solid).with_label("Robot"));
    if let Some(start) = robot.start() {
        figure.add_marker(Marker::new(start, ROBOT_COLOR, MarkerShape::Circle).with_label("Robot start"));
    }
    if let Some(end) = robot.end() {
        figure.add_marker(Marker::new(end, ROBOT_COLOR, MarkerShape::Cross).with_label("Robot end"));
    }
    
    let schema = TrackSchema::detect(table);
    debug!("{}: {} rows, schema {}", label, table.row_count(), schema);
    
    match &schema {
        TrackSchema::LongFormat => render_long_format(figure, table)?,
        TrackSchema::WideFormat { participants } => {
            for (index, participant) in participants.iter().enumerate() {
                let Some((x_column, y_column)) = participant.columns() else {
                    debug!("{}: participant {} lacks a coordinate column", label, participant.suffix);
                    continue;
                };
                let xs = table.numeric_column(x_column)?;
                let ys = table.numeric_column(y_column)?;
                if xs.iter().all(Option::is_none) || ys.iter().all(Option::is_none) {
                    debug!("{}: participant {} has no samples", label, participant.suffix);
                    continue;
                }
                let trajectory = Trajectory::from_columns(&xs, &ys);
                draw_participant(figure, &trajectory, &participant.suffix, palette_color(index));
            }
        }
        TrackSchema::RobotOnly => {}
    }
    
    Ok(schema)
}

fn render_long_format(figure: &mut Figure, table: &TrackTable) -> TrackResult<()> {
    let xs = table.numeric_column("x")?;
    let ys = table.numeric_column("y")?;
    let ids = table.text_column(PARTICIPANT_ID)?;
    
    for (index, group) in group_participants(&ids).into_iter().enumerate() {
        let trajectory = Trajectory::from_rows(&xs, &ys, &group.rows);
        draw_participant(figure, &trajectory, &group.label, palette_color(index));
    }
    Ok(())
}

fn draw_participant(figure: &mut Figure, trajectory: &Trajectory, id: &str, color: Rgb) {
    figure.add_series(
        Series::from_trajectory(trajectory, color, LineStyle::Dashed)
            .with_label(format!("Participant {}", id)),
    );
    if let Some(start) = trajectory.start() {
        figure.add_marker(Marker::new(start, color, MarkerShape::Square));
    }
    if let Some(end) = trajectory.end() {
        figure.add_marker(Marker::new(end, color, MarkerShape::Triangle));
    }
}

/// Rows belonging to one long-format participant.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRows {
    /// Display form of the id (`"2"` for a cell holding `2.0`)
    pub label: String,
    
    /// Row indices in table order
    pub rows: Vec<usize>,
}

/// Groups rows by participant id, sorted ascending.
///
/// Ids compare numerically when every id is a number, otherwise as text.
/// Missing ids are ignored. Every group is drawn, even one without samples.
pub fn group_participants(ids: &[Option<&str>]) -> Vec<ParticipantRows> {
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (row, id) in ids.iter().enumerate() {
        let Some(id) = *id else { continue };
        match groups.iter_mut().find(|(key, _)| *key == id) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((id, vec![row])),
        }
    }
    
    let numeric: Option<Vec<f64>> = groups.iter().map(|(id, _)| id.parse::<f64>().ok()).collect();
    match numeric {
        Some(values) => {
            // Equal values spelled differently ("2", "2.0") are one participant.
            let mut merged: Vec<(f64, Vec<usize>)> = Vec::new();
            for (value, (_, rows)) in values.into_iter().zip(groups) {
                match merged.iter_mut().find(|(v, _)| v.total_cmp(&value).is_eq()) {
                    Some((_, existing)) => {
                        existing.extend(rows);
                        existing.sort_unstable();
                    }
                    None => merged.push((value, rows)),
                }
            }
            merged.sort_by(|a, b| a.0.total_cmp(&b.0));
            merged
                .into_iter()
                .map(|(value, rows)| ParticipantRows {
                    label: format_id(value),
                    rows,
                })
                .collect()
        }
        None => {
            groups.sort_by(|a, b| a.0.cmp(b.0));
            groups
                .into_iter()
                .map(|(id, rows)| ParticipantRows {
                    label: id.to_string(),
                    rows,
                })
                .collect()
        }
    }
}

/// Integral ids print without a fractional part.
fn format_id(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{FigureSize, BROWN, GREEN, ORANGE, RED};
    
    fn render_csv(csv: &str) -> (Figure, TrackResult<TrackSchema>) {
        let table = TrackTable::from_reader(csv.as_bytes()).unwrap();
        let mut figure = Figure::new(FigureSize::default());
        let result = render(&mut figure, &table, "test.csv");
        (figure, result)
    }
    
    fn participant_series(figure: &Figure) -> Vec<(&str, Rgb)> {
        figure
            .series
            .iter()
            .filter(|s| s.style == LineStyle::Dashed)
            .map(|s| (s.label.as_deref().unwrap_or(""), s.color))
            .collect()
    }
    
    #[test]
    fn test_robot_only_track() {
        let (figure, result) = render_csv("timestamp,robot_x,robot_y\n0,0,0\n1,1,0\n2,2,1\n");
        
        assert_eq!(result.unwrap(), TrackSchema::RobotOnly);
        assert_eq!(figure.legend_labels(), vec!["Robot", "Robot start", "Robot end"]);
        assert!(participant_series(&figure).is_empty());
        
        let shapes: Vec<MarkerShape> = figure.markers.iter().map(|m| m.shape).collect();
        assert_eq!(shapes, vec![MarkerShape::Circle, MarkerShape::Cross]);
        assert_eq!(figure.markers[0].at, (0.0, 0.0));
        assert_eq!(figure.markers[1].at, (2.0, 1.0));
    }
    
    #[test]
    fn test_missing_robot_column_is_error() {
        let (_, result) = render_csv("timestamp,robot_y\n0,0\n");
        assert!(matches!(result, Err(TrackError::MissingColumn(c)) if c == "robot_x"));
    }
    
    #[test]
    fn test_empty_track_is_error() {
        let (_, result) = render_csv("robot_x,robot_y\n");
        assert!(matches!(result, Err(TrackError::EmptyTrack)));
    }
    
    #[test]
    fn test_long_format_sorted_participants() {
        let csv = "\
timestamp,x,y,column,robot_x,robot_y
0,5,5,3,0,0
0,1,1,1,0,0
1,6,6,3,1,0
1,2,2,1,1,0
2,9,9,2,2,0
";
        let (figure, result) = render_csv(csv);
        
        assert_eq!(result.unwrap(), TrackSchema::LongFormat);
        assert_eq!(
            participant_series(&figure),
            vec![
                ("Participant 1", RED),
                ("Participant 2", GREEN),
                ("Participant 3", ORANGE),
            ]
        );
        
        let first = &figure.series[1];
        assert_eq!(first.segments, vec![vec![(1.0, 1.0), (2.0, 2.0)]]);
    }
    
    #[test]
    fn test_long_format_float_ids_print_as_integers() {
        let csv = "x,y,column,robot_x,robot_y\n0,0,10.0,0,0\n1,1,2.0,1,1\n";
        let (figure, _) = render_csv(csv);
        
        let labels: Vec<&str> = participant_series(&figure).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Participant 2", "Participant 10"]);
    }
    
    #[test]
    fn test_participant_markers() {
        let csv = "x,y,column,robot_x,robot_y\n0,0,1,0,0\n3,4,1,1,1\n";
        let (figure, _) = render_csv(csv);
        
        let participant_markers: Vec<&Marker> =
            figure.markers.iter().filter(|m| m.color == RED).collect();
        assert_eq!(participant_markers.len(), 2);
        assert_eq!(participant_markers[0].shape, MarkerShape::Square);
        assert_eq!(participant_markers[0].at, (0.0, 0.0));
        assert_eq!(participant_markers[1].shape, MarkerShape::Triangle);
        assert_eq!(participant_markers[1].at, (3.0, 4.0));
        assert!(participant_markers.iter().all(|m| m.label.is_none()));
    }
    
    #[test]
    fn test_wide_format_numeric_order_and_skip() {
        let csv = "\
timestamp,robot_x,robot_y,x10,y10,x2,y2,x1,y1
0,0,0,5,5,,,1,1
1,1,1,6,6,,,2,2
";
        let (figure, result) = render_csv(csv);
        
        assert_eq!(result.unwrap().name(), "wide_format");
        // x2 is entirely missing: skipped, but it still holds palette slot 1.
        assert_eq!(
            participant_series(&figure),
            vec![("Participant 1", RED), ("Participant 10", ORANGE)]
        );
    }
    
    #[test]
    fn test_wide_and_long_share_palette_positions() {
        let long = "x,y,column,robot_x,robot_y\n0,0,1,0,0\n1,1,2,0,0\n";
        let wide = "robot_x,robot_y,x1,y1,x2,y2\n0,0,0,0,1,1\n";
        
        let (long_fig, _) = render_csv(long);
        let (wide_fig, _) = render_csv(wide);
        
        let colors = |f: &Figure| participant_series(f).into_iter().map(|(_, c)| c).collect::<Vec<_>>();
        assert_eq!(colors(&long_fig), colors(&wide_fig));
    }
    
    #[test]
    fn test_long_format_participant_without_samples_is_drawn() {
        let csv = "x,y,column,robot_x,robot_y\n0,0,1,0,0\n,,2,1,1\n5,5,3,2,2\n";
        let (figure, _) = render_csv(csv);
        
        assert_eq!(
            participant_series(&figure),
            vec![
                ("Participant 1", RED),
                ("Participant 2", GREEN),
                ("Participant 3", ORANGE),
            ]
        );
        assert!(figure.series[2].segments.is_empty());
        // Only participants 1 and 3 have start/end markers.
        assert!(figure.markers.iter().all(|m| m.color != GREEN));
        assert_eq!(figure.markers.iter().filter(|m| m.color == RED).count(), 2);
        assert_eq!(figure.markers.iter().filter(|m| m.color == ORANGE).count(), 2);
    }
    
    #[test]
    fn test_long_format_missing_ids_are_ignored() {
        let csv = "x,y,column,robot_x,robot_y\n0,0,1,0,0\n1,1,NaN,0,0\n2,2,nan,0,0\n3,3,NA,0,0\n";
        let (figure, _) = render_csv(csv);
        
        let labels: Vec<&str> = participant_series(&figure).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Participant 1"]);
    }
    
    #[test]
    fn test_long_format_palette_wraps_after_five() {
        let mut csv = String::from("x,y,column,robot_x,robot_y\n");
        for id in (1..=7).rev() {
            csv.push_str(&format!("{id},{id},{id},0,0\n"));
        }
        let (figure, _) = render_csv(&csv);
        
        let series = participant_series(&figure);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0], ("Participant 1", RED));
        assert_eq!(series[4], ("Participant 5", BROWN));
        assert_eq!(series[5], ("Participant 6", RED));
        assert_eq!(series[6], ("Participant 7", GREEN));
    }
    
    #[test]
    fn test_group_participants_sorts_infinite_ids() {
        let ids = [Some("inf"), Some("3"), Some("-inf")];
        let labels: Vec<String> = group_participants(&ids).into_iter().map(|g| g.label).collect();
        
        assert_eq!(labels, vec!["-inf", "3", "inf"]);
    }
    
    #[test]
    fn test_group_participants_text_ids() {
        let ids = [Some("bob"), Some("alice"), None, Some("bob")];
        let groups = group_participants(&ids);
        
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "alice");
        assert_eq!(groups[0].rows, vec![1]);
        assert_eq!(groups[1].rows, vec![0, 3]);
    }
    
    #[test]
    fn test_group_participants_merges_equal_numbers() {
        let ids = [Some("2"), Some("2.0"), Some("1")];
        let groups = group_participants(&ids);
        
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "1");
        assert_eq!(groups[1].rows, vec![0, 1]);
    }
}
