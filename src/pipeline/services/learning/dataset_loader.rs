use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::DatasetError;
use crate::pipeline::types::{Action, BallState, RecordedRow, SAMPLE_COLUMNS};

/// File names containing this marker are outputs of the cleaning stage.
pub const CLEANED_MARKER: &str = "cleaned";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedDataset {
    pub rows: Vec<RecordedRow>,
    pub files_read: usize,
    pub malformed_rows: usize,
}

/// Finds and merges the raw sample files written during live capture.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    prefix: String,
}

impl DatasetLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Raw sample files in `dir`, sorted by name. Cleaned outputs are skipped.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
        if !dir.is_dir() {
            return Err(DatasetError::MissingInputFile(dir.to_path_buf()));
        }

        let entries =
            fs::read_dir(dir).map_err(|e| DatasetError::ReadError(e, dir.to_path_buf()))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DatasetError::ReadError(e, dir.to_path_buf()))?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with(&self.prefix)
                && name.ends_with(".csv")
                && !name.contains(CLEANED_MARKER)
                && path.is_file()
            {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(DatasetError::NoSourceFiles(
                dir.to_path_buf(),
                self.prefix.clone(),
            ));
        }
        Ok(files)
    }

    pub fn load(&self, paths: &[PathBuf]) -> Result<LoadedDataset, DatasetError> {
        let mut dataset = LoadedDataset::default();
        for path in paths {
            let file = File::open(path).map_err(|e| DatasetError::ReadError(e, path.clone()))?;
            let (rows, malformed) = parse_samples(path, file)?;
            debug!(
                "Read {} rows from {} ({} malformed)",
                rows.len(),
                path.display(),
                malformed
            );
            dataset.rows.extend(rows);
            dataset.malformed_rows += malformed;
            dataset.files_read += 1;
        }
        info!(
            "Merged {} files: {} rows, {} malformed rows dropped",
            dataset.files_read,
            dataset.rows.len(),
            dataset.malformed_rows
        );
        Ok(dataset)
    }
}

/// Header-addressed shape of one sample file row. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct SampleRecord {
    ball_x: f64,
    ball_y: f64,
    ball_vx: f64,
    ball_vy: f64,
    platform_x: f64,
    command: String,
}

impl SampleRecord {
    fn into_row(self) -> Option<RecordedRow> {
        let numbers = [
            self.ball_x,
            self.ball_y,
            self.ball_vx,
            self.ball_vy,
            self.platform_x,
        ];
        if !numbers.iter().all(|v| v.is_finite()) {
            return None;
        }
        let recorded = self
            .command
            .parse::<Action>()
            .ok()
            .filter(|action| *action != Action::Reset);
        Some(RecordedRow {
            ball: BallState::new(self.ball_x, self.ball_y, self.ball_vx, self.ball_vy),
            paddle_x: self.platform_x,
            recorded,
        })
    }
}

/// Parses one sample file. Returns the valid rows and how many rows were dropped.
///
/// Columns are located by header name. A row is dropped when its field count
/// does not match the header or a numeric field is not a finite number. The
/// command cell never drops a row.
pub fn parse_samples<R: Read>(
    path: &Path,
    input: R,
) -> Result<(Vec<RecordedRow>, usize), DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::CsvError(e, path.to_path_buf()))?
        .clone();
    if headers.is_empty() {
        warn!("{} is empty", path.display());
        return Ok((Vec::new(), 0));
    }
    if let Some(missing) = SAMPLE_COLUMNS
        .into_iter()
        .find(|wanted| !headers.iter().any(|name| name == *wanted))
    {
        return Err(DatasetError::MissingColumn(path.to_path_buf(), missing));
    }

    let mut rows = Vec::new();
    let mut malformed = 0;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(DatasetError::CsvError(e, path.to_path_buf()));
            }
            Err(e) => {
                debug!("Dropping unreadable row in {}: {}", path.display(), e);
                malformed += 1;
                continue;
            }
        };

        let row = if record.len() == headers.len() {
            record
                .deserialize::<SampleRecord>(Some(&headers))
                .ok()
                .and_then(SampleRecord::into_row)
        } else {
            None
        };
        match row {
            Some(row) => rows.push(row),
            None => {
                debug!(
                    "Dropping malformed row in {} (line {}): {:?}",
                    path.display(),
                    record.position().map_or(0, |p| p.line()),
                    record
                );
                malformed += 1;
            }
        }
    }
    Ok((rows, malformed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ball_x,ball_y,ball_vx,ball_vy,platform_x,command";

    fn parse(contents: &str) -> (Vec<RecordedRow>, usize) {
        parse_samples(Path::new("a.csv"), contents.as_bytes()).unwrap()
    }

    #[test]
    fn parses_rows_by_header_name() {
        let (rows, malformed) =
            parse("command,platform_x,ball_vy,ball_vx,ball_y,ball_x\nMOVE_RIGHT,80,7,-7,120,95\n");
        assert_eq!(malformed, 0);
        assert_eq!(
            rows,
            vec![RecordedRow {
                ball: BallState::new(95.0, 120.0, -7.0, 7.0),
                paddle_x: 80.0,
                recorded: Some(Action::MoveRight),
            }]
        );
    }

    #[test]
    fn quoted_fields_are_unquoted() {
        let (rows, malformed) = parse(&format!("{HEADER}\n1,\"2\",3,4,5,\"NONE\"\n"));
        assert_eq!(malformed, 0);
        assert_eq!(rows[0].ball.y, 2.0);
        assert_eq!(rows[0].recorded, Some(Action::None));
    }

    #[test]
    fn drops_malformed_rows_without_failing() {
        let contents = format!(
            "{HEADER}\n\
             10,20,3,3,50,NONE\n\
             {HEADER}\n\
             abc,20,3,3,50,NONE\n\
             10,20,3,3,50\n\
             10,20,3,3,50,NONE,extra\n\
             10,20,nan,3,50,NONE\n\
             10,20,3,inf,50,NONE\n\
             \n\
             11,21,3,3,50,MOVE_LEFT\n"
        );
        let (rows, malformed) = parse(&contents);
        assert_eq!(rows.len(), 2);
        assert_eq!(malformed, 6);
        assert_eq!(rows[1].recorded, Some(Action::MoveLeft));
    }

    #[test]
    fn unusable_commands_keep_the_row_without_a_recorded_action() {
        let contents = format!(
            "{HEADER}\n\
             100,200,5,5,100,RESET\n\
             100,200,5,5,100,JUMP\n\
             100,200,5,5,100,\n"
        );
        let (rows, malformed) = parse(&contents);
        assert_eq!(malformed, 0);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.recorded.is_none()));
        assert_eq!(rows[0].ball, BallState::new(100.0, 200.0, 5.0, 5.0));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = parse_samples(
            Path::new("a.csv"),
            "ball_x,ball_y,ball_vx,ball_vy,command\n1,2,3,4,NONE\n".as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(_, "platform_x")));
    }

    #[test]
    fn empty_file_has_no_rows() {
        let (rows, malformed) = parse("");
        assert!(rows.is_empty());
        assert_eq!(malformed, 0);
    }

    #[test]
    fn discovery_skips_cleaned_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "game_data_rule_based_1P_20240101_000000.csv",
            "game_data_rule_based_1P_20240102_000000.csv",
            "game_data_cleaned.csv",
            "game_data_notes.txt",
            "other.csv",
        ] {
            fs::write(dir.path().join(name), format!("{HEADER}\n")).unwrap();
        }

        let files = DatasetLoader::new("game_data").discover(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "game_data_rule_based_1P_20240101_000000.csv",
                "game_data_rule_based_1P_20240102_000000.csv",
            ]
        );
    }

    #[test]
    fn missing_directory_and_empty_directory_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DatasetLoader::new("game_data");

        let missing = loader.discover(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(missing, DatasetError::MissingInputFile(_)));

        let empty = loader.discover(dir.path()).unwrap_err();
        assert!(matches!(empty, DatasetError::NoSourceFiles(_, _)));
    }

    #[test]
    fn load_merges_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("game_data_a.csv");
        let b = dir.path().join("game_data_b.csv");
        fs::write(&a, format!("{HEADER}\n1,2,3,4,5,NONE\nx,2,3,4,5,NONE\n")).unwrap();
        fs::write(&b, format!("{HEADER}\n6,7,8,9,10,MOVE_LEFT\n")).unwrap();

        let dataset = DatasetLoader::new("game_data").load(&[a, b]).unwrap();
        assert_eq!(dataset.files_read, 2);
        assert_eq!(dataset.malformed_rows, 1);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[1].ball.x, 6.0);
    }
}
