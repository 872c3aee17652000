//! Report rendering for comparison results.
//!
//! Every format carries the same four columns. Absent partner clauses render
//! as empty cells in the tabular formats and as `null` in JSON.


use serde::{Deserialize, Serialize};

use crate::compare::ComparisonRecord;
use crate::judge::Verdict;

/// Column order shared by the CSV and table renderings.
pub const REPORT_COLUMNS: [&str; 4] = ["bank_clause", "partner_clause", "compliance", "explanation"];

/// Export format for analysis reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// RFC 4180 CSV with a header row.
    Csv,
    /// Plain-text aligned table.
    Table,
}

impl ReportFormat {
    /// Content type for HTTP responses carrying this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Json => "application/json",
            ReportFormat::Csv => "text/csv",
            ReportFormat::Table => "text/plain; charset=utf-8",
        }
    }
}

/// Verdict counts for one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub missing: usize,
    pub unknown: usize,
}

/// Counts records by verdict.
pub fn summarize(records: &[ComparisonRecord]) -> AnalysisSummary {
    let mut summary = AnalysisSummary {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.compliance {
            Verdict::Compliant => summary.compliant += 1,
            Verdict::NonCompliant => summary.non_compliant += 1,
            Verdict::Missing => summary.missing += 1,
            Verdict::Unknown => summary.unknown += 1,
        }
    }

    summary
}

/// Renders records in the requested format.
pub fn render(records: &[ComparisonRecord], format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => to_json(records),
        ReportFormat::Csv => Ok(to_csv(records)),
        ReportFormat::Table => Ok(render_table(records)),
    }
}

/// Pretty-printed JSON array of records.
pub fn to_json(records: &[ComparisonRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// CSV document with a header row, CRLF line endings, and minimal quoting.
pub fn to_csv(records: &[ComparisonRecord]) -> String {
    let mut out = String::new();

    out.push_str(&REPORT_COLUMNS.join(","));
    out.push_str("\r\n");

    for record in records {
        let row = record_row(record);
        let encoded: Vec<String> = row.iter().map(|field| escape_csv_field(field)).collect();
        out.push_str(&encoded.join(","));
        out.push_str("\r\n");
    }

    out
}

/// Row-major projection of the four report columns.
pub fn to_table(records: &[ComparisonRecord]) -> Vec<[String; 4]> {
    records.iter().map(record_row).collect()
}

/// Plain-text table with a header row and aligned columns.
pub fn render_table(records: &[ComparisonRecord]) -> String {
    let rows = to_table(records);

    let mut widths: [usize; 4] = [0; 4];
    for (i, header) in REPORT_COLUMNS.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    render_row(&mut out, &REPORT_COLUMNS.map(str::to_string), &widths);

    let rule = widths.map(|w| "-".repeat(w));
    render_row(&mut out, &rule, &widths);

    for row in &rows {
        render_row(&mut out, row, &widths);
    }

    out
}

fn record_row(record: &ComparisonRecord) -> [String; 4] {
    [
        record.bank_clause.clone(),
        record.partner_clause.clone().unwrap_or_default(),
        record.compliance.as_str().to_string(),
        record.explanation.clone(),
    ]
}

fn render_row(out: &mut String, row: &[String; 4], widths: &[usize; 4]) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        out.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        if i < 3 {
            out.push_str(&" ".repeat(pad));
        }
    }
    out.push('\n');
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
