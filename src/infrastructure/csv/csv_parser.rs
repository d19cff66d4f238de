// ============================================================
// CSV PARSER
// ============================================================
// Parse uploaded CSV bytes into a typed table with encoding
// and delimiter detection

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Column, ColumnKind, Table};
use csv::{ReaderBuilder, Trim};

/// CSV parser with encoding detection
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse uploaded bytes with automatic encoding and delimiter detection
    pub fn parse_bytes_auto_detect(bytes: &[u8]) -> Result<Table> {
        let content = decode_with_encoding_detection(bytes);
        let delimiter = Self::detect_delimiter(&content);

        Self::new().with_delimiter(delimiter).parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(content.as_bytes());

        // Get headers
        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(AppError::ParseError(
                "CSV input has no header row".to_string(),
            ));
        }

        // Collect raw cells column-wise; the reader rejects ragged records
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            for (idx, raw) in raw_columns.iter_mut().enumerate() {
                raw.push(record.get(idx).unwrap_or("").to_string());
            }
        }

        let columns = headers
            .iter()
            .zip(raw_columns)
            .map(|(name, raw)| build_column(name, raw))
            .collect();

        Table::new(columns)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();

            for line in &sample_lines {
                let count = line.chars().filter(|&c| c as u8 == delimiter).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            if !field_counts.is_empty() {
                let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
                let variance = field_counts
                    .iter()
                    .map(|&x| (x as f32 - avg).powi(2))
                    .sum::<f32>()
                    / field_counts.len() as f32;

                let score = avg / (1.0 + variance.sqrt());

                if score > best_score {
                    best_score = score;
                    best_delimiter = delimiter;
                }
            }
        }

        best_delimiter
    }
}

/// Build a typed column from raw string cells.
/// A column is Numeric when every non-empty cell parses as a number;
/// an entirely empty column is also typed Numeric (matching float
/// inference for all-null columns). Anything else is Text.
fn build_column(name: &str, raw: Vec<String>) -> Column {
    let numeric = raw
        .iter()
        .filter(|v| !v.is_empty())
        .all(|v| CellValue::parse_numeric(v).is_some());

    let kind = if numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    };

    let cells = raw
        .into_iter()
        .map(|value| {
            if value.is_empty() {
                CellValue::Missing
            } else {
                match kind {
                    ColumnKind::Numeric => match CellValue::parse_numeric(&value) {
                        Some(n) => CellValue::Number(n),
                        None => CellValue::Missing,
                    },
                    _ => CellValue::Text(value),
                }
            }
        })
        .collect();

    Column::new(name, kind, cells)
}

/// Decode uploaded bytes: UTF-8 first, Windows-1252 as fallback
fn decode_with_encoding_detection(bytes: &[u8]) -> String {
    if let Ok(content) = std::str::from_utf8(bytes) {
        return content.to_string();
    }

    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
    if !had_errors {
        return decoded.into_owned();
    }

    String::from_utf8_lossy(bytes).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let parser = CsvParser::new();
        let table = parser.parse_content(content).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.headers(), vec!["name", "age", "city"]);
        assert_eq!(table.column("name").unwrap().kind, ColumnKind::Text);
        assert_eq!(table.column("age").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(
            table.column("age").unwrap().cells[0],
            CellValue::Number(30.0)
        );
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a|b|c\nd|e|f"), b'|');
    }

    #[test]
    fn test_mixed_column_is_text() {
        let content = "value\n12\nabc";
        let table = CsvParser::new().parse_content(content).unwrap();

        let col = table.column("value").unwrap();
        assert_eq!(col.kind, ColumnKind::Text);
        assert_eq!(col.cells[0], CellValue::Text("12".into()));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let content = "spend,channel\n10,\n,fb";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.column("spend").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(table.column("spend").unwrap().cells[1], CellValue::Missing);
        assert_eq!(
            table.column("channel").unwrap().cells[0],
            CellValue::Missing
        );
    }

    #[test]
    fn test_all_empty_column_is_numeric() {
        let content = "a,b\n1,\n2,";
        let table = CsvParser::new().parse_content(content).unwrap();

        let col = table.column("b").unwrap();
        assert_eq!(col.kind, ColumnKind::Numeric);
        assert_eq!(col.missing_count(), 2);
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let content = "a,b\n1,2\n3";
        let result = CsvParser::new().parse_content(content);

        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        let result = CsvParser::new().parse_content("");
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "café" encoded in Windows-1252 (0xE9 = é)
        let bytes = b"name,score\ncaf\xe9,1";
        let table = CsvParser::parse_bytes_auto_detect(bytes).unwrap();

        assert_eq!(
            table.column("name").unwrap().cells[0],
            CellValue::Text("café".into())
        );
    }

    #[test]
    fn test_quoted_thousands_separator_parses_numeric() {
        let content = "revenue\n\"1,250\"\n300";
        let table = CsvParser::new().parse_content(content).unwrap();

        let col = table.column("revenue").unwrap();
        assert_eq!(col.kind, ColumnKind::Numeric);
        assert_eq!(col.cells[0], CellValue::Number(1250.0));
    }
}
