//! Per-row field validation with explicit cross-row accumulator state.
//!
//! Each record is checked against the schema's column rules in declaration
//! order; the first violated check per field is the one reported, and a row
//! can fail several fields at once. Cross-row facts (seen invoice numbers,
//! distinct regions and categories) live in [`RunState`], which is created
//! fresh for every run and threaded through each call.

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::report::{ValidationError, ValidationWarning};
use crate::schema::{FieldRule, RegionPolicy, Schema};
use crate::table::ParsedRecord;

/// Indonesian island regions recognised by the optional PULAU check.
pub const REFERENCE_REGIONS: &[&str] = &[
    "JAWA",
    "SUMATERA",
    "BALI",
    "KALIMANTAN",
    "SULAWESI",
    "PAPUA",
    "NTT",
    "NTB",
];

/// Accumulator scoped to a single validation run.
#[derive(Debug, Default)]
pub struct RunState {
    pub seen_invoices: HashSet<String>,
    pub regions: HashSet<String>,
    pub categories: HashSet<String>,
    pub warnings: Vec<ValidationWarning>,
}

pub fn validate_record(
    record: &ParsedRecord,
    schema: &Schema,
    state: &mut RunState,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for column in &schema.columns {
        let value = record.get(&column.name).unwrap_or("");
        check_field(
            &column.name,
            &column.rule,
            value,
            record.row_number(),
            state,
            &mut errors,
        );
    }
    errors
}

fn check_field(
    name: &str,
    rule: &FieldRule,
    value: &str,
    row: usize,
    state: &mut RunState,
    errors: &mut Vec<ValidationError>,
) {
    match rule {
        FieldRule::Identifier { reject_duplicates } => {
            if value.is_empty() {
                errors.push(ValidationError::field(
                    name,
                    row,
                    value,
                    "number must not be empty",
                ));
                return;
            }
            let first_occurrence = state.seen_invoices.insert(value.to_string());
            if *reject_duplicates && !first_occurrence {
                errors.push(ValidationError::field(
                    name,
                    row,
                    value,
                    "duplicate invoice number",
                ));
            }
        }
        FieldRule::Date => {
            if value.is_empty() {
                errors.push(ValidationError::field(name, row, value, "must not be empty"));
            } else if let Some(format) = date_format(value) {
                if NaiveDate::parse_from_str(value, format).is_err() {
                    errors.push(ValidationError::field(name, row, value, "invalid date"));
                }
            } else {
                errors.push(ValidationError::field(name, row, value, "wrong date format"));
            }
        }
        FieldRule::Region { policy } => {
            if value.is_empty() {
                errors.push(ValidationError::field(name, row, value, "must not be empty"));
                return;
            }
            state.regions.insert(value.to_string());
            match policy {
                RegionPolicy::Off => {}
                RegionPolicy::Warn if !is_reference_region(value) => {
                    state.warnings.push(format!(
                        "row {row}: {name} '{value}' is not in the standard region list"
                    ));
                }
                RegionPolicy::Reject if !is_reference_region(value) => {
                    errors.push(ValidationError::field(
                        name,
                        row,
                        value,
                        "not in the standard region list",
                    ));
                }
                _ => {}
            }
        }
        FieldRule::Category => {
            if value.is_empty() {
                errors.push(ValidationError::field(name, row, value, "must not be empty"));
                return;
            }
            state.categories.insert(value.to_string());
        }
        FieldRule::Quantity => {
            if value.is_empty() {
                errors.push(ValidationError::field(name, row, value, "must not be empty"));
                return;
            }
            // f64 parsing also accepts "inf" and "NaN"; neither is a base-10
            // quantity.
            let parsed = value.parse::<f64>().ok().filter(|q| q.is_finite());
            let Some(quantity) = parsed else {
                errors.push(ValidationError::field(name, row, value, "must be numeric"));
                return;
            };
            if quantity <= 0.0 {
                errors.push(ValidationError::field(
                    name,
                    row,
                    value,
                    "must be greater than zero",
                ));
            } else if quantity.fract() != 0.0 {
                errors.push(ValidationError::field(
                    name,
                    row,
                    value,
                    "must be a whole number",
                ));
            }
        }
    }
}

/// Chrono format string matching the value's shape, if it has one of the two
/// accepted shapes. Pattern match first, calendar validity second, so
/// `01-15-2024` reports a format problem and `2024-02-30` an invalid date.
fn date_format(value: &str) -> Option<&'static str> {
    static ISO: OnceLock<Regex> = OnceLock::new();
    static DAY_FIRST: OnceLock<Regex> = OnceLock::new();
    let iso = ISO.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
    let day_first =
        DAY_FIRST.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));
    if iso.is_match(value) {
        Some("%Y-%m-%d")
    } else if day_first.is_match(value) {
        Some("%d/%m/%Y")
    } else {
        None
    }
}

fn is_reference_region(value: &str) -> bool {
    REFERENCE_REGIONS
        .iter()
        .any(|region| region.eq_ignore_ascii_case(value))
}
