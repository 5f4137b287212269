//! Result rows and their CSV / JSON serialisation.

use crate::errors::SweepError;
use crate::params::SplitParameters;
use crate::simulator::StatisticBundle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Header row of the CSV output.
pub const CSV_HEADER: &str = "N1,N2,T_split,MigRate,Diversity,Tajima,AlleleFreq,Fst";

/// Value written to the `MigRate` column. No migration is modelled.
pub const MIGRATION_RATE_PLACEHOLDER: f64 = 0.0;

/// Separator between spectrum entries inside the `AlleleFreq` field.
pub const SPECTRUM_SEPARATOR: char = ';';

/// Statistics of one (combination, replicate) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub combination: usize,
    pub replicate: usize,
    /// Seed used for ancestry and mutations of this replicate
    pub seed: u64,
    pub parameters: SplitParameters,
    pub statistics: StatisticBundle,
}

impl ResultRow {
    /// One CSV line without the trailing newline.
    pub fn to_csv_record(&self) -> String {
        let spectrum = self
            .statistics
            .allele_frequency_spectrum
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(&SPECTRUM_SEPARATOR.to_string());
        format!(
            "{},{},{},{},{},{},{},{}",
            self.parameters.n1_size,
            self.parameters.n2_size,
            self.parameters.split_time,
            MIGRATION_RATE_PLACEHOLDER,
            self.statistics.diversity,
            self.statistics.tajimas_d,
            spectrum,
            self.statistics.fst
        )
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown format '{other}'. Use: csv or json")),
        }
    }
}

/// Header plus one line per row.
pub fn to_csv(rows: &[ResultRow]) -> String {
    let mut csv = String::with_capacity(64 * (rows.len() + 1));
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(&format!("{}\n", row.to_csv_record()));
    }
    csv
}

pub fn to_json(rows: &[ResultRow]) -> Result<String, SweepError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Write `rows` to `path` in the given format.
pub fn write_results(path: impl AsRef<Path>, rows: &[ResultRow], format: OutputFormat) -> Result<(), SweepError> {
    let content = match format {
        OutputFormat::Csv => to_csv(rows),
        OutputFormat::Json => to_json(rows)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Read rows previously written as JSON.
pub fn read_json(path: impl AsRef<Path>) -> Result<Vec<ResultRow>, SweepError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ResultRow {
        ResultRow {
            combination: 0,
            replicate: 1,
            seed: 42,
            parameters: SplitParameters::default(),
            statistics: StatisticBundle {
                diversity: 0.0015,
                tajimas_d: -0.25,
                allele_frequency_spectrum: vec![0.0, 3.0, 1.5, 0.0],
                fst: 0.125,
            },
        }
    }

    #[test]
    fn test_csv_record_format() {
        assert_eq!(
            row().to_csv_record(),
            "90000,3000,6000,0,0.0015,-0.25,0;3;1.5;0,0.125"
        );
    }

    #[test]
    fn test_csv_has_header_and_one_line_per_row() {
        let csv = to_csv(&[row(), row()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(csv.ends_with('\n'));
        // Eight comma-separated fields per data line
        assert!(lines[1..].iter().all(|l| l.split(',').count() == 8));
    }

    #[test]
    fn test_empty_results_still_have_header() {
        assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let rows = vec![row()];
        write_results(&path, &rows, OutputFormat::Json).unwrap();
        assert_eq!(read_json(&path).unwrap(), rows);
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        write_results(&path, &[row()], OutputFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("N1,N2,T_split,MigRate,Diversity,Tajima,AlleleFreq,Fst\n"));
    }
}
