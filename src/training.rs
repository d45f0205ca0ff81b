//! Labeled training samples read from a tabular source.

use std::fs::File;
use std::io;
use std::path::Path;

use fixed_map::{Key, Map};
use tracing::debug;

use crate::config::TrainingDataConfig;
use crate::error::TrainingDataError;

/// Header names every training table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["KUWA_score", "BCI_weighted", "JenPin_score", "Student_level"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Key)]
pub enum Column {
    KuwaScore,
    BciWeighted,
    JenPinScore,
    StudentLevel,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::KuwaScore,
        Column::BciWeighted,
        Column::JenPinScore,
        Column::StudentLevel,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::KuwaScore => REQUIRED_COLUMNS[0],
            Self::BciWeighted => REQUIRED_COLUMNS[1],
            Self::JenPinScore => REQUIRED_COLUMNS[2],
            Self::StudentLevel => REQUIRED_COLUMNS[3],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingSample {
    #[cfg_attr(feature = "serde", serde(rename = "KUWA_score"))]
    pub kuwa_score: f64,
    #[cfg_attr(feature = "serde", serde(rename = "BCI_weighted"))]
    pub bci_weighted: f64,
    #[cfg_attr(feature = "serde", serde(rename = "JenPin_score"))]
    pub jenpin_score: f64,
    #[cfg_attr(feature = "serde", serde(rename = "Student_level"))]
    pub student_level: String,
}

/// A header row plus data rows of raw string cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn from_csv_reader<R: io::Read>(reader: R, config: &TrainingDataConfig) -> Result<Self, TrainingDataError> {
        let trim = if config.trim { csv::Trim::All } else { csv::Trim::None };
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .trim(trim)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(String::from).collect();
        let mut rows = Vec::new();

        for record in reader.records() {
            rows.push(record?.iter().map(String::from).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_csv_path(path: impl AsRef<Path>, config: &TrainingDataConfig) -> Result<Self, TrainingDataError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "reading training data");

        Self::from_csv_reader(File::open(path)?, config)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn column_positions(&self) -> Result<Map<Column, usize>, TrainingDataError> {
        let mut positions = Map::new();

        for column in Column::ALL {
            let Some(i) = self.headers.iter().position(|h| h == column.header()) else {
                return Err(TrainingDataError::Schema {
                    required: REQUIRED_COLUMNS.to_vec(),
                });
            };

            positions.insert(column, i);
        }

        Ok(positions)
    }
}

/// Maps every row of `table` to a [`TrainingSample`], keeping row order.
///
/// Score cells must read as floats; the level label is taken verbatim. A
/// row shorter than the header reads its missing cells as empty.
pub fn parse_training_data(table: &Table) -> Result<Vec<TrainingSample>, TrainingDataError> {
    let positions = table.column_positions()?;

    let samples = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cell = |column: Column| {
                positions
                    .get(column)
                    .and_then(|&pos| row.get(pos))
                    .map_or("", String::as_str)
            };
            let score = |column: Column| {
                let value = cell(column);

                value.trim().parse::<f64>().map_err(|_| TrainingDataError::Value {
                    row: i + 1,
                    column: column.header(),
                    value: value.to_owned(),
                })
            };

            Ok(TrainingSample {
                kuwa_score: score(Column::KuwaScore)?,
                bci_weighted: score(Column::BciWeighted)?,
                jenpin_score: score(Column::JenPinScore)?,
                student_level: cell(Column::StudentLevel).to_owned(),
            })
        })
        .collect::<Result<Vec<_>, TrainingDataError>>()?;

    debug!(samples = samples.len(), "parsed training data");

    Ok(samples)
}

/// Reads a CSV file with default settings and parses its samples.
pub fn load_training_data(path: impl AsRef<Path>) -> Result<Vec<TrainingSample>, TrainingDataError> {
    let table = Table::from_csv_path(path, &TrainingDataConfig::default())?;

    parse_training_data(&table)
}

#[cfg(test)]
fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

#[test]
fn test_columns_may_be_reordered() {
    let table = table(
        &["Student_level", "JenPin_score", "extra", "BCI_weighted", "KUWA_score"],
        &[&["Advanced", "3", "ignored", "2", "1"]],
    );

    assert_eq!(
        parse_training_data(&table).unwrap(),
        vec![TrainingSample {
            kuwa_score: 1.,
            bci_weighted: 2.,
            jenpin_score: 3.,
            student_level: "Advanced".into(),
        }]
    );
}

#[test]
fn test_missing_column_lists_all_required() {
    let table = table(&["KUWA_score", "BCI_weighted", "JenPin_score"], &[]);

    match parse_training_data(&table) {
        Err(TrainingDataError::Schema { required }) => assert_eq!(required, REQUIRED_COLUMNS),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_bad_score_cell() {
    let table = table(
        &REQUIRED_COLUMNS,
        &[&["1", "2", "3", "Basic"], &["1", "n/a", "3", "Basic"]],
    );

    match parse_training_data(&table) {
        Err(TrainingDataError::Value { row, column, value }) => {
            assert_eq!(row, 2);
            assert_eq!(column, "BCI_weighted");
            assert_eq!(value, "n/a");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_short_row_reads_missing_cells_as_empty() {
    let table = table(&REQUIRED_COLUMNS, &[&["1", "2"]]);

    assert!(matches!(
        parse_training_data(&table),
        Err(TrainingDataError::Value { column: "JenPin_score", .. })
    ));
}
