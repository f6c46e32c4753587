//! Validation report model: errors, warnings, row accounting, rendering.

use std::fmt::Write as _;

use serde::Serialize;

/// Sentinel recorded in place of an empty offending value.
pub const EMPTY_VALUE: &str = "<empty>";

/// Advisory thresholds for the corpus-level health checks. Forecast quality
/// degrades sharply below these, but small datasets are still accepted.
pub const MIN_RECOMMENDED_ROWS: usize = 100;
pub const MIN_DISTINCT_CATEGORIES: usize = 3;
pub const MIN_DISTINCT_REGIONS: usize = 2;

/// Synthetic field names for failures not tied to one data column.
pub const HEADER_FIELD: &str = "header";
pub const GENERAL_FIELD: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: String,
    pub row_number: usize,
    pub value: String,
    pub reason: String,
}

impl ValidationError {
    pub fn field(field: &str, row_number: usize, value: &str, reason: impl Into<String>) -> Self {
        let value = if value.is_empty() {
            EMPTY_VALUE.to_string()
        } else {
            value.to_string()
        };
        Self {
            field: field.to_string(),
            row_number,
            value,
            reason: reason.into(),
        }
    }

    /// A header-scoped failure, attributed to row 1.
    pub fn header(reason: impl Into<String>) -> Self {
        Self::field(HEADER_FIELD, 1, "", reason)
    }

    /// A whole-file failure with no meaningful row, attributed to row 0.
    pub fn general(reason: impl Into<String>) -> Self {
        Self::field(GENERAL_FIELD, 0, "", reason)
    }
}

pub type ValidationWarning = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowStats {
    pub total_rows: usize,
    pub valid_rows: usize,
}

/// The immutable outcome of one validation run, handed by value to the
/// caller. `is_valid` holds exactly when no blocking error was recorded;
/// warnings never block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub stats: RowStats,
}

impl DataValidationResult {
    pub fn aggregate(
        errors: Vec<ValidationError>,
        warnings: Vec<ValidationWarning>,
        total_rows: usize,
        valid_rows: usize,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            stats: RowStats {
                total_rows,
                valid_rows,
            },
        }
    }

    /// Short-circuit outcome for file-kind and structural failures: the
    /// single error is the sole content, no rows count as valid.
    pub fn rejected(error: ValidationError, total_rows: usize) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
            warnings: Vec::new(),
            stats: RowStats {
                total_rows,
                valid_rows: 0,
            },
        }
    }
}

/// Corpus-level advisories evaluated once the whole table has been scanned.
pub fn corpus_warnings(
    total_rows: usize,
    distinct_categories: usize,
    distinct_regions: usize,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if total_rows < MIN_RECOMMENDED_ROWS {
        warnings.push(format!(
            "only {total_rows} transaction row(s) found; the minimum recommended volume is {MIN_RECOMMENDED_ROWS}"
        ));
    }
    if distinct_categories < MIN_DISTINCT_CATEGORIES {
        warnings.push(format!(
            "only {distinct_categories} distinct product categories found; at least {MIN_DISTINCT_CATEGORIES} are recommended"
        ));
    }
    if distinct_regions < MIN_DISTINCT_REGIONS {
        warnings.push(format!(
            "only {distinct_regions} distinct region(s) found; at least {MIN_DISTINCT_REGIONS} are recommended"
        ));
    }
    warnings
}

pub fn render_text(result: &DataValidationResult) -> String {
    let mut out = String::new();
    for error in &result.errors {
        let _ = writeln!(
            out,
            "error: row {}, {}: {} (value: {})",
            error.row_number, error.field, error.reason, error.value
        );
    }
    for warning in &result.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    let _ = writeln!(
        out,
        "rows: {}/{} valid",
        result.stats.valid_rows, result.stats.total_rows
    );
    let _ = writeln!(
        out,
        "result: {}",
        if result.is_valid { "PASS" } else { "FAIL" }
    );
    out
}
