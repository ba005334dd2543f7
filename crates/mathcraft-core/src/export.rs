//! CSV export and import of the submission log.
//!
//! The header is the fixed worksheet schema followed by any other field ids
//! present in the log, sorted. Missing fields are written as empty cells and
//! read back as absent.

use std::collections::BTreeSet;

use anyhow::{Context, Result};

use crate::model::{natural_cmp, schema_fields, ResponseRecord};
use crate::store::{try_submit, SubmissionLog};

/// Column order for a log: schema fields, then extras in natural order.
pub fn csv_columns(log: &SubmissionLog) -> Vec<String> {
    let mut columns = schema_fields();
    let extras: BTreeSet<&str> = log
        .records()
        .flat_map(|r| r.field_ids())
        .filter(|id| !columns.iter().any(|c| c == id))
        .collect();
    let mut extras: Vec<&str> = extras.into_iter().collect();
    extras.sort_by(|a, b| natural_cmp(a, b));
    columns.extend(extras.into_iter().map(str::to_string));
    columns
}

/// Serialize the log as UTF-8 CSV with a header row.
pub fn export_csv(log: &SubmissionLog) -> Result<Vec<u8>> {
    let columns = csv_columns(log);
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(&columns)
        .context("failed to write CSV header")?;
    for record in log.records() {
        let row = columns.iter().map(|c| record.get(c).unwrap_or_default());
        writer
            .write_record(row)
            .context("failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {}", e.error()))?;
    tracing::debug!(rows = log.len(), columns = columns.len(), "exported CSV");
    Ok(bytes)
}

/// Append the rows of CSV produced by [`export_csv`] to `log`.
///
/// Every row goes through [`try_submit`], so a row without a name or date
/// fails the whole import and `log` is left as it was. Empty cells become
/// absent fields. Ids and timestamps are not part of the CSV, so imported
/// entries get fresh ones. Returns the number of rows appended.
pub fn import_csv(data: &[u8], log: &mut SubmissionLog) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .context("failed to read CSV header")?
        .clone();

    let mut staged = log.clone();
    let mut imported = 0;
    for (index, row) in reader.records().enumerate() {
        let row_number = index + 1;
        let row = row.with_context(|| format!("failed to parse CSV row {row_number}"))?;
        let record: ResponseRecord = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, value)| !value.is_empty())
            .collect();
        try_submit(&record, &mut staged)
            .with_context(|| format!("cannot import CSV row {row_number}"))?;
        imported += 1;
    }

    *log = staged;
    tracing::debug!(rows = imported, "imported CSV");
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> SubmissionLog {
        let mut log = SubmissionLog::new();
        let ana: ResponseRecord = [
            ("Name", "Ana"),
            ("Date", "2024-01-01"),
            ("Analytical_1", "Because 3x, 3 · x and x + x + x are the same"),
            ("Analytical_2", "It says \"n ÷ 8\",\nlike sharing a pizza"),
            ("Q1", "5 · x"),
            ("Q12", "7"),
        ]
        .into_iter()
        .collect();
        let ben: ResponseRecord = [("Name", "Ben"), ("Date", "2024-01-02"), ("Q3", "24")]
            .into_iter()
            .collect();
        try_submit(&ana, &mut log).unwrap();
        try_submit(&ben, &mut log).unwrap();
        log
    }

    #[test]
    fn header_follows_schema() {
        let csv = String::from_utf8(export_csv(&sample_log()).unwrap()).unwrap();
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("Name,Date,Analytical_1,Analytical_2,Analytical_3,Analytical_4,Q1,Q2"));
        assert!(header.ends_with("Q11,Q12"));
    }

    #[test]
    fn fields_with_commas_and_newlines_are_quoted() {
        let csv = String::from_utf8(export_csv(&sample_log()).unwrap()).unwrap();
        assert!(csv.contains("\"Because 3x, 3 · x and x + x + x are the same\""));
        assert!(csv.contains("\"It says \"\"n ÷ 8\"\",\nlike sharing a pizza\""));
    }

    #[test]
    fn empty_log_exports_header_only() {
        let csv = String::from_utf8(export_csv(&SubmissionLog::new()).unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn extra_fields_get_their_own_columns() {
        let mut log = SubmissionLog::new();
        let record: ResponseRecord = [("Name", "Ana"), ("Date", "d"), ("Extra", "1")]
            .into_iter()
            .collect();
        try_submit(&record, &mut log).unwrap();
        let columns = csv_columns(&log);
        assert_eq!(columns.last().unwrap(), "Extra");
        assert_eq!(columns.len(), schema_fields().len() + 1);
    }

    #[test]
    fn export_then_import_reproduces_records() {
        let log = sample_log();
        let bytes = export_csv(&log).unwrap();
        let mut imported = SubmissionLog::new();
        assert_eq!(import_csv(&bytes, &mut imported).unwrap(), 2);

        let original: Vec<&ResponseRecord> = log.records().collect();
        let restored: Vec<&ResponseRecord> = imported.records().collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn import_rejects_ragged_rows() {
        let data = b"Name,Date\nAna,2024-01-01,extra\n";
        assert!(import_csv(data, &mut SubmissionLog::new()).is_err());
    }

    #[test]
    fn import_rejects_rows_without_identity() {
        let mut log = SubmissionLog::new();
        let err = import_csv("Name,Date,Q1\n,,5 · x\n".as_bytes(), &mut log).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
        assert!(format!("{err:#}").contains("requires both a name and a date"));
        assert!(log.is_empty());
    }

    #[test]
    fn failed_import_leaves_log_untouched() {
        let mut log = sample_log();
        let data = "Name,Date,Q1\nCleo,2024-01-03,24\n  ,2024-01-03,24\n";
        let err = import_csv(data.as_bytes(), &mut log).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 2"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn import_appends_after_existing_entries() {
        let mut log = sample_log();
        let data = "Name,Date,Q3\nCleo,2024-01-03,24\n";
        assert_eq!(import_csv(data.as_bytes(), &mut log).unwrap(), 1);
        let names: Vec<&str> = log.records().filter_map(|r| r.get("Name")).collect();
        assert_eq!(names, vec!["Ana", "Ben", "Cleo"]);
    }
}
