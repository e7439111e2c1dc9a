//! Track Table - one CSV file loaded as named string columns.
//!
//! Cells stay as text until a caller asks for a typed view, so the same table
//! can serve numeric coordinate columns and the free-form participant id column.

use crate::error::{TrackError, TrackResult};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Spellings treated as a missing value in numeric columns (compared case-insensitively).
const MISSING_TOKENS: [&str; 4] = ["nan", "na", "null", "none"];

/// A loaded track file: header plus column-major cells.
#[derive(Debug, Clone)]
pub struct TrackTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
    columns: Vec<Vec<String>>,
    rows: usize,
}

impl TrackTable {
    /// Loads a table from a CSV file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TrackResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| TrackError::io(path, e))?;
        Self::from_reader(file)
    }
    
    /// Loads a table from any CSV byte stream with a header row.
    pub fn from_reader<R: Read>(reader: R) -> TrackResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        
        let names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(TrackError::DuplicateColumn(name.clone()));
            }
        }
        
        let mut columns = vec![Vec::new(); names.len()];
        let mut rows = 0;
        for record in reader.records() {
            let record = record?;
            for (column, cell) in columns.iter_mut().zip(record.iter()) {
                column.push(cell.to_string());
            }
            rows += 1;
        }
        
        Ok(Self {
            names,
            index,
            columns,
            rows,
        })
    }
    
    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }
    
    /// Returns true if the header contains `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
    
    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows
    }
    
    fn raw_column(&self, name: &str) -> TrackResult<&[String]> {
        self.index
            .get(name)
            .map(|&i| self.columns[i].as_slice())
            .ok_or_else(|| TrackError::missing_column(name))
    }
    
    /// Parses a column as coordinates; missing cells become `None`.
    pub fn numeric_column(&self, name: &str) -> TrackResult<Vec<Option<f64>>> {
        self.raw_column(name)?
            .iter()
            .enumerate()
            .map(|(row, cell)| parse_cell(cell).map_err(|_| TrackError::InvalidNumber {
                column: name.to_string(),
                row: row + 1,
                value: cell.clone(),
            }))
            .collect()
    }
    
    /// Text view of a column; missing cells become `None`, as in [`Self::numeric_column`].
    pub fn text_column(&self, name: &str) -> TrackResult<Vec<Option<&str>>> {
        Ok(self.raw_column(name)?
            .iter()
            .map(|cell| if is_missing(cell) { None } else { Some(cell.as_str()) })
            .collect())
    }
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t))
}

fn parse_cell(cell: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if is_missing(cell) {
        return Ok(None);
    }
    let value: f64 = cell.parse()?;
    Ok(value.is_finite().then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    
    fn table(csv: &str) -> TrackTable {
        TrackTable::from_reader(csv.as_bytes()).unwrap()
    }
    
    #[test]
    fn test_load_columns_and_rows() {
        let t = table("timestamp,robot_x,robot_y\n0,1.0,2.0\n1,1.5,2.5\n");
        
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_names(), &["timestamp", "robot_x", "robot_y"]);
        assert!(t.has_column("robot_x"));
        assert!(!t.has_column("x"));
    }
    
    #[test]
    fn test_missing_values_parse_as_none() {
        let t = table("t,x1\n0,1.0\n1,\n2,NaN\n3,nan\n4,2\n");
        
        let xs = t.numeric_column("x1").unwrap();
        assert_eq!(xs, vec![Some(1.0), None, None, None, Some(2.0)]);
    }
    
    #[test]
    fn test_invalid_number_reports_row() {
        let t = table("robot_x\n1.0\nabc\n");
        
        match t.numeric_column("robot_x") {
            Err(TrackError::InvalidNumber { column, row, value }) => {
                assert_eq!(column, "robot_x");
                assert_eq!(row, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }
    
    #[test]
    fn test_missing_column() {
        let t = table("robot_y\n1.0\n");
        
        assert!(matches!(
            t.numeric_column("robot_x"),
            Err(TrackError::MissingColumn(name)) if name == "robot_x"
        ));
    }
    
    #[test]
    fn test_duplicate_column_rejected() {
        let result = TrackTable::from_reader("x,x\n1,2\n".as_bytes());
        assert!(matches!(result, Err(TrackError::DuplicateColumn(_))));
    }
    
    #[test]
    fn test_ragged_row_is_csv_error() {
        let result = TrackTable::from_reader("a,b\n1,2\n3\n".as_bytes());
        assert!(matches!(result, Err(TrackError::Csv(_))));
    }
    
    #[test]
    fn test_text_column_blank_is_none() {
        let t = table("column,x\n1,0\n,0\n2,0\n");
        
        assert_eq!(t.text_column("column").unwrap(), vec![Some("1"), None, Some("2")]);
    }
    
    #[test]
    fn test_text_column_missing_tokens_are_none() {
        let t = table("column,x\n1,0\nNaN,0\nnan,0\nNA,0\nnull,0\n");
        
        assert_eq!(t.text_column("column").unwrap(), vec![Some("1"), None, None, None, None]);
    }
    
    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TrackTable::from_path(dir.path().join("absent.csv"));
        
        assert!(matches!(result, Err(TrackError::Io { .. })));
    }
}
