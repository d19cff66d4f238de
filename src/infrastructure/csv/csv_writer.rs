// ============================================================
// CSV WRITER
// ============================================================
// Serialize a table to downloadable UTF-8 CSV bytes

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;
use csv::WriterBuilder;

/// CSV writer for cleaned datasets
pub struct CsvWriter {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    /// Create a new CSV writer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write the full table as UTF-8 CSV bytes: header row first,
    /// no index column, every row (not just a preview)
    pub fn write(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer
            .write_record(table.headers())
            .map_err(|e| AppError::IoError(format!("Failed to write CSV header: {}", e)))?;

        for row in 0..table.row_count() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|col| col.cells[row].render())
                .collect();

            writer
                .write_record(&record)
                .map_err(|e| AppError::IoError(format!("Failed to write CSV row {}: {}", row, e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{CellValue, Column, ColumnKind};
    use chrono::NaiveDate;

    #[test]
    fn test_write_includes_header_and_all_rows() {
        let table = Table::new(vec![
            Column::new(
                "campaign",
                ColumnKind::Text,
                vec![
                    CellValue::Text("spring".into()),
                    CellValue::Text("summer".into()),
                ],
            ),
            Column::new(
                "fb_spend",
                ColumnKind::Numeric,
                vec![CellValue::Number(10.0), CellValue::Number(12.5)],
            ),
        ])
        .unwrap();

        let bytes = CsvWriter::new().write(&table).unwrap();
        let output = String::from_utf8(bytes).unwrap();

        assert_eq!(output, "campaign,fb_spend\nspring,10\nsummer,12.5\n");
    }

    #[test]
    fn test_write_renders_dates_and_sentinels() {
        let table = Table::new(vec![Column::new(
            "date",
            ColumnKind::Date,
            vec![
                CellValue::Date(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap()),
                CellValue::InvalidDate,
            ],
        )])
        .unwrap();

        let bytes = CsvWriter::new().write(&table).unwrap();
        let output = String::from_utf8(bytes).unwrap();

        assert_eq!(output, "date\n2024-04-03\n\"\"\n");
    }
}
