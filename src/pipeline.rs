//! The end-to-end validation pass: gatekeeper, decode, parse, structural
//! check, row scan, corpus health checks, aggregation.
//!
//! File-kind and structural failures short-circuit and become the sole error
//! of the result; field-kind errors accumulate across the whole table. Every
//! run over the same bytes and schema yields an identical result.

use log::debug;

use crate::{
    intake::{self, RawFile},
    report::{self, DataValidationResult, ValidationError},
    rules::{RunState, validate_record},
    schema::Schema,
    table::{self, ParseError},
};

pub fn validate(file: &RawFile, schema: &Schema) -> DataValidationResult {
    if let Err(err) = intake::check_file(file) {
        return DataValidationResult::rejected(ValidationError::general(err.to_string()), 0);
    }
    let text = match intake::decode_text(file) {
        Ok(text) => text,
        Err(err) => {
            return DataValidationResult::rejected(ValidationError::general(err.to_string()), 0);
        }
    };
    validate_text(&text, schema)
}

/// Validates already-decoded text, e.g. spreadsheet content converted by an
/// external adapter.
pub fn validate_text(text: &str, schema: &Schema) -> DataValidationResult {
    let parsed = match table::parse_table(text) {
        Ok(parsed) => parsed,
        Err(err @ ParseError::FileTooShort) => {
            return DataValidationResult::rejected(ValidationError::general(err.to_string()), 0);
        }
    };
    debug!(
        "parsed {} record(s) using delimiter '{}'",
        parsed.records.len(),
        parsed.delimiter
    );

    if parsed.records.is_empty() {
        return DataValidationResult::rejected(ValidationError::general("no data rows found"), 0);
    }

    let missing = schema.missing_columns(&parsed.header);
    if !missing.is_empty() {
        let reason = format!("missing required columns: {}", missing.join(", "));
        return DataValidationResult::rejected(
            ValidationError::header(reason),
            parsed.records.len(),
        );
    }

    let mut state = RunState::default();
    let mut errors = Vec::new();
    let mut valid_rows = 0usize;
    for record in &parsed.records {
        let row_errors = validate_record(record, schema, &mut state);
        if row_errors.is_empty() {
            valid_rows += 1;
        }
        errors.extend(row_errors);
    }

    let mut warnings = std::mem::take(&mut state.warnings);
    warnings.extend(report::corpus_warnings(
        parsed.records.len(),
        state.categories.len(),
        state.regions.len(),
    ));

    DataValidationResult::aggregate(errors, warnings, parsed.records.len(), valid_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::GENERAL_FIELD;

    #[test]
    fn unsupported_files_never_reach_the_parser() {
        let file = RawFile::new("sales.txt", b"InvoiceNo\nINV-1\n".to_vec());
        let result = validate(&file, &Schema::transactions());
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, GENERAL_FIELD);
        assert!(result.errors[0].reason.contains("unsupported file format"));
        assert_eq!(result.stats.total_rows, 0);
    }

    #[test]
    fn empty_files_are_rejected_before_decoding() {
        let file = RawFile::new("sales.csv", Vec::new());
        let result = validate(&file, &Schema::transactions());
        assert_eq!(result.errors[0].reason, "file is empty");
    }

    #[test]
    fn header_only_files_are_too_short() {
        let file = RawFile::new(
            "sales.csv",
            b"InvoiceNo,InvoiceDate,PULAU,PRODUCT_CATEGORY,Quantity\n".to_vec(),
        );
        let result = validate(&file, &Schema::transactions());
        assert!(!result.is_valid);
        assert!(result.errors[0].reason.contains("header row and at least one data row"));
        assert_eq!(result.stats.total_rows, 0);
    }

    #[test]
    fn malformed_utf8_is_a_file_kind_failure() {
        let file = RawFile::new("sales.csv", vec![b'a', 0xff, b'b']);
        let result = validate(&file, &Schema::transactions());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].reason.contains("not valid UTF-8"));
    }
}
