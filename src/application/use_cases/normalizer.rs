// ============================================================
// DATASET NORMALIZER USE CASE
// ============================================================
// Canonical cleaning transform for uploaded advertising datasets

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{
    CellKey, CellValue, CleaningConfig, Column, ColumnKind, HeaderCollisionPolicy, Table,
};

/// Name of the optional date column converted during cleaning
const DATE_COLUMN: &str = "date";

/// Name of the revenue column dropped when entirely zero
const REVENUE_COLUMN: &str = "total_revenue";

/// Dataset cleaning use case
pub struct Normalizer {
    config: CleaningConfig,
}

impl Normalizer {
    /// Create a new normalizer
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(CleaningConfig::default())
    }

    /// Produce the canonical cleaned form of a raw table.
    ///
    /// Steps run in fixed order: header renaming, duplicate-row removal,
    /// kind-driven null fill, date conversion, all-zero revenue drop.
    /// Malformed cell content never fails; re-running on an already-clean
    /// table yields an equal table.
    pub fn normalize(&self, raw: &Table) -> Result<Table> {
        self.config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid cleaning config: {}", e)))?;

        let columns = self.rename_headers(raw)?;
        let columns = dedup_rows(columns);
        let columns = self.fill_missing(columns);
        let columns = self.convert_date_column(columns);
        let columns = drop_all_zero_revenue(columns);

        Table::new(columns)
    }

    /// Step 1: canonicalize header names.
    /// Lower-case and replace space characters with underscores; no other
    /// substitution. Collisions resolve per the configured policy.
    fn rename_headers(&self, raw: &Table) -> Result<Vec<Column>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut columns = Vec::with_capacity(raw.column_count());

        for col in raw.columns() {
            let canonical = canonical_header(&col.name);

            if !seen.insert(canonical.clone()) {
                match self.config.header_collision {
                    HeaderCollisionPolicy::Reject => {
                        return Err(AppError::ValidationError(format!(
                            "Header collision after renaming: '{}'",
                            canonical
                        )));
                    }
                    HeaderCollisionPolicy::KeepFirst => {
                        tracing::warn!(
                            header = %canonical,
                            "Dropping later column with colliding canonical header"
                        );
                        continue;
                    }
                }
            }

            let mut renamed = col.clone();
            renamed.name = canonical;
            columns.push(renamed);
        }

        Ok(columns)
    }

    /// Step 3: fill missing cells by declared column kind.
    /// Date columns are left untouched; they carry their own markers.
    fn fill_missing(&self, columns: Vec<Column>) -> Vec<Column> {
        columns
            .into_iter()
            .map(|mut col| {
                match col.kind {
                    ColumnKind::Numeric => {
                        for cell in &mut col.cells {
                            if cell.is_missing() {
                                *cell = CellValue::Number(self.config.numeric_fill);
                            }
                        }
                    }
                    ColumnKind::Text => {
                        for cell in &mut col.cells {
                            if cell.is_missing() {
                                *cell = CellValue::Text(self.config.text_fill.clone());
                            }
                        }
                    }
                    ColumnKind::Date => {}
                }
                col
            })
            .collect()
    }

    /// Step 4: convert a column literally named "date" to date type.
    /// Every cell's textual form is parsed with day-first preference;
    /// unparseable cells degrade to the invalid-date marker.
    fn convert_date_column(&self, mut columns: Vec<Column>) -> Vec<Column> {
        if let Some(col) = columns.iter_mut().find(|c| c.name == DATE_COLUMN) {
            col.kind = ColumnKind::Date;

            for cell in &mut col.cells {
                let parsed = match &*cell {
                    CellValue::Date(d) => CellValue::Date(*d),
                    CellValue::InvalidDate | CellValue::Missing => CellValue::InvalidDate,
                    other => match parse_date(&other.render(), self.config.day_first) {
                        Some(d) => CellValue::Date(d),
                        None => CellValue::InvalidDate,
                    },
                };
                *cell = parsed;
            }
        }

        columns
    }
}

/// Step 2: remove duplicate rows, first occurrence kept.
/// Runs post-rename and pre-fill; missing cells compare equal to each
/// other, and cell type participates in equality.
fn dedup_rows(columns: Vec<Column>) -> Vec<Column> {
    let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
    let mut seen: HashSet<Vec<CellKey>> = HashSet::new();
    let mut keep = Vec::with_capacity(row_count);

    for row in 0..row_count {
        let key: Vec<CellKey> = columns.iter().map(|c| c.cells[row].dedup_key()).collect();
        keep.push(seen.insert(key));
    }

    columns
        .into_iter()
        .map(|mut col| {
            col.cells = col
                .cells
                .into_iter()
                .zip(keep.iter())
                .filter(|(_, keep_row)| **keep_row)
                .map(|(cell, _)| cell)
                .collect();
            col
        })
        .collect()
}

/// Step 5: drop the revenue column when it is numeric and every value
/// equals zero (an empty column qualifies vacuously)
fn drop_all_zero_revenue(mut columns: Vec<Column>) -> Vec<Column> {
    if let Some(idx) = columns.iter().position(|c| c.name == REVENUE_COLUMN) {
        if columns[idx].is_all_zero() {
            columns.remove(idx);
        }
    }

    columns
}

/// Canonical header form: lower-case, spaces replaced with underscores
fn canonical_header(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Parse a textual date, preferring day-before-month for ambiguous
/// numeric forms ("03/04/2024" -> 2024-04-03)
fn parse_date(raw: &str, day_first: bool) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    const ISO_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y"];
    const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y"];
    const NAMED_MONTH_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y"];

    let mut formats: Vec<&str> = ISO_FORMATS.to_vec();
    if day_first {
        formats.extend_from_slice(DAY_FIRST_FORMATS);
        formats.extend_from_slice(MONTH_FIRST_FORMATS);
    } else {
        formats.extend_from_slice(MONTH_FIRST_FORMATS);
        formats.extend_from_slice(DAY_FIRST_FORMATS);
    }
    formats.extend_from_slice(NAMED_MONTH_FORMATS);

    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(name: &str, cells: Vec<CellValue>) -> Column {
        Column::new(name, ColumnKind::Numeric, cells)
    }

    fn text(name: &str, cells: Vec<CellValue>) -> Column {
        Column::new(name, ColumnKind::Text, cells)
    }

    fn n(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn t(v: &str) -> CellValue {
        CellValue::Text(v.to_string())
    }

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_headers_lowercased_and_underscored() {
        let table = Table::new(vec![
            numeric("Total Revenue", vec![n(1.0)]),
            text("Campaign Name", vec![t("spring")]),
        ])
        .unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert_eq!(cleaned.headers(), vec!["total_revenue", "campaign_name"]);
    }

    #[test]
    fn test_rename_touches_only_spaces() {
        let table = Table::new(vec![numeric("Ad-Spend (USD)", vec![n(1.0)])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert_eq!(cleaned.headers(), vec!["ad-spend_(usd)"]);
    }

    #[test]
    fn test_duplicate_rows_removed_first_kept() {
        let table = Table::new(vec![
            text("channel", vec![t("fb"), t("fb"), t("ig")]),
            numeric("spend", vec![n(10.0), n(10.0), n(5.0)]),
        ])
        .unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.column("channel").unwrap().cells[0], t("fb"));
        assert_eq!(cleaned.column("channel").unwrap().cells[1], t("ig"));
    }

    #[test]
    fn test_duplicate_detection_treats_missing_as_equal() {
        let table = Table::new(vec![numeric(
            "spend",
            vec![CellValue::Missing, CellValue::Missing],
        )])
        .unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert_eq!(cleaned.row_count(), 1);
    }

    #[test]
    fn test_dedup_runs_before_fill() {
        // A missing cell and an explicit zero differ pre-fill, so both
        // rows survive even though they are identical after filling
        let table = Table::new(vec![numeric("spend", vec![CellValue::Missing, n(0.0)])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.column("spend").unwrap().cells[0], n(0.0));
        assert_eq!(cleaned.column("spend").unwrap().cells[1], n(0.0));
    }

    #[test]
    fn test_numeric_missing_filled_with_zero() {
        let table =
            Table::new(vec![numeric("fb_spend", vec![n(10.0), CellValue::Missing])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        let col = cleaned.column("fb_spend").unwrap();
        assert_eq!(col.missing_count(), 0);
        assert_eq!(col.cells[1], n(0.0));
    }

    #[test]
    fn test_text_missing_filled_with_unknown() {
        let table =
            Table::new(vec![text("campaign", vec![t("spring"), CellValue::Missing])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        let col = cleaned.column("campaign").unwrap();
        assert_eq!(col.missing_count(), 0);
        assert_eq!(col.cells[1], t("unknown"));
    }

    #[test]
    fn test_all_missing_text_column_becomes_unknown() {
        let table = Table::new(vec![text(
            "notes",
            vec![CellValue::Missing, CellValue::Missing],
        )])
        .unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        // Both rows fill to "unknown"; dedup ran before the fill, so the
        // two all-missing rows already collapsed to one
        assert_eq!(cleaned.row_count(), 1);
        assert_eq!(cleaned.column("notes").unwrap().cells[0], t("unknown"));
    }

    #[test]
    fn test_date_column_parses_day_first() {
        let table = Table::new(vec![text("date", vec![t("03/04/2024")])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        let col = cleaned.column("date").unwrap();
        assert_eq!(col.kind, ColumnKind::Date);
        assert_eq!(col.cells[0], date(2024, 4, 3));
    }

    #[test]
    fn test_unparseable_date_becomes_invalid_marker() {
        let table = Table::new(vec![text(
            "date",
            vec![t("not-a-date"), t("2024-01-15"), CellValue::Missing],
        )])
        .unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        let col = cleaned.column("date").unwrap();
        assert_eq!(col.cells[0], CellValue::InvalidDate);
        assert_eq!(col.cells[1], date(2024, 1, 15));
        // The missing cell filled to "unknown" first, which is not a date
        assert_eq!(col.cells[2], CellValue::InvalidDate);
    }

    #[test]
    fn test_month_first_fallback_for_unambiguous_dates() {
        // Day-first cannot hold (month 13), so month-first interpretation wins
        let table = Table::new(vec![text("date", vec![t("04/13/2024")])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert_eq!(cleaned.column("date").unwrap().cells[0], date(2024, 4, 13));
    }

    #[test]
    fn test_non_date_columns_are_not_date_parsed() {
        let table = Table::new(vec![text("order_date", vec![t("03/04/2024")])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert_eq!(cleaned.column("order_date").unwrap().kind, ColumnKind::Text);
    }

    #[test]
    fn test_all_zero_revenue_column_dropped() {
        let table = Table::new(vec![
            numeric("Total Revenue", vec![n(0.0), CellValue::Missing]),
            numeric("fb_spend", vec![n(1.0), n(2.0)]),
        ])
        .unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert!(!cleaned.has_column("total_revenue"));
        assert!(cleaned.has_column("fb_spend"));
    }

    #[test]
    fn test_nonzero_revenue_column_retained() {
        let table =
            Table::new(vec![numeric("total_revenue", vec![n(0.0), n(5.0), n(0.0)])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        let col = cleaned.column("total_revenue").unwrap();
        assert_eq!(col.sum(), 5.0);
    }

    #[test]
    fn test_text_revenue_column_is_not_dropped() {
        let table = Table::new(vec![text("total_revenue", vec![t("0"), t("0")])]).unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        assert!(cleaned.has_column("total_revenue"));
    }

    #[test]
    fn test_header_collision_rejected_by_default() {
        let table = Table::new(vec![
            numeric("Total Revenue", vec![n(1.0)]),
            numeric("total revenue", vec![n(2.0)]),
        ])
        .unwrap();

        let result = Normalizer::default_config().normalize(&table);
        match result {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("total_revenue")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_collision_keep_first_policy() {
        let table = Table::new(vec![
            numeric("Total Revenue", vec![n(1.0)]),
            numeric("total revenue", vec![n(2.0)]),
        ])
        .unwrap();

        let config = CleaningConfig {
            header_collision: HeaderCollisionPolicy::KeepFirst,
            ..Default::default()
        };
        let cleaned = Normalizer::new(config).normalize(&table).unwrap();

        assert_eq!(cleaned.column_count(), 1);
        assert_eq!(cleaned.column("total_revenue").unwrap().cells[0], n(1.0));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let table = Table::new(vec![
            text(
                "Campaign Name",
                vec![t("spring"), t("spring"), CellValue::Missing],
            ),
            numeric("Total Revenue", vec![n(10.0), n(10.0), CellValue::Missing]),
            text("date", vec![t("03/04/2024"), t("03/04/2024"), t("bad")]),
        ])
        .unwrap();

        let normalizer = Normalizer::default_config();
        let once = normalizer.normalize(&table).unwrap();
        let twice = normalizer.normalize(&once).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_cleaned_table_has_no_missing_cells() {
        let table = Table::new(vec![
            numeric("spend", vec![CellValue::Missing, n(2.0)]),
            text("channel", vec![t("fb"), CellValue::Missing]),
        ])
        .unwrap();

        let cleaned = Normalizer::default_config().normalize(&table).unwrap();
        for col in cleaned.columns() {
            assert_eq!(
                col.missing_count(),
                0,
                "column {} has missing cells",
                col.name
            );
        }
    }
}
