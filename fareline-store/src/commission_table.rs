use serde::Deserialize;
use std::path::Path;

use fareline_core::carrier::{CarrierCommission, CommissionLookup};

use crate::StoreError;

#[derive(Debug, Deserialize)]
struct CommissionRecord {
    #[serde(rename = "Airline")]
    airline: String,
    #[serde(rename = "FlightCode")]
    flight_code: String,
    #[serde(rename = "BasicCommission")]
    basic_commission: f64,
    #[serde(rename = "OverallCommission")]
    overall_commission: f64,
}

/// Airline commission rates loaded from `flight_commissions.csv`.
///
/// Columns: `Airline,FlightCode,BasicCommission,OverallCommission`.
#[derive(Debug, Clone, Default)]
pub struct CommissionTable {
    rows: Vec<(String, CarrierCommission)>,
}

impl CommissionTable {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let table_error = |e: csv::Error| StoreError::CommissionTable {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(table_error)?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let record: CommissionRecord = result.map_err(table_error)?;
            rows.push((
                record.airline,
                CarrierCommission {
                    flight_code: record.flight_code,
                    basic_rate: record.basic_commission,
                    overall_rate: record.overall_commission,
                },
            ));
        }

        tracing::debug!("Loaded {} commission rows from {}", rows.len(), path.display());
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<(String, CarrierCommission)>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl CommissionLookup for CommissionTable {
    fn airlines(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (airline, _) in &self.rows {
            if !names.contains(airline) {
                names.push(airline.clone());
            }
        }
        names
    }

    /// First row for the airline wins when it is listed more than once
    fn commission_for(&self, airline: &str) -> Option<CarrierCommission> {
        self.rows
            .iter()
            .find(|(name, _)| name == airline)
            .map(|(_, commission)| commission.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TABLE: &str = "\
Airline,FlightCode,BasicCommission,OverallCommission
Emirates,EK,5,3
Air India,AI,0,1.5
Emirates,EK,9,9
";

    fn write_table(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_commissions.csv");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_table() {
        let (_dir, path) = write_table(TABLE);
        let table = CommissionTable::load(&path).unwrap();

        assert_eq!(table.airlines(), vec!["Emirates", "Air India"]);
        let ai = table.commission_for("Air India").unwrap();
        assert_eq!(ai.flight_code, "AI");
        assert_eq!(ai.basic_rate, 0.0);
        assert_eq!(ai.overall_rate, 1.5);
    }

    #[test]
    fn test_first_row_wins() {
        let (_dir, path) = write_table(TABLE);
        let table = CommissionTable::load(&path).unwrap();
        assert_eq!(table.commission_for("Emirates").unwrap().basic_rate, 5.0);
        assert!(table.commission_for("Qantas").is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CommissionTable::load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, StoreError::CommissionTable { .. }));
    }

    #[test]
    fn test_bad_rate_is_an_error() {
        let (_dir, path) = write_table("Airline,FlightCode,BasicCommission,OverallCommission\nEmirates,EK,five,3\n");
        assert!(CommissionTable::load(&path).is_err());
    }
}
