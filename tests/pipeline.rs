mod common;

use common::{HEADER, clean_csv};
use niaga_ingest::{
    intake::RawFile,
    pipeline::{validate, validate_text},
    report::{HEADER_FIELD, MIN_RECOMMENDED_ROWS},
    schema::Schema,
};

#[test]
fn clean_file_is_valid_with_exact_row_accounting() {
    let text = format!(
        "{HEADER}\n\
         INV-1,2024-01-15,JAWA,Beverages,5\n\
         INV-2,15/01/2024,SUMATERA,Snacks,2\n\
         INV-3,2024-02-01,BALI,Dairy,10\n"
    );
    let result = validate_text(&text, &Schema::transactions());
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.stats.total_rows, 3);
    assert_eq!(result.stats.valid_rows, 3);
}

#[test]
fn missing_column_short_circuits_with_one_header_error() {
    let text = "InvoiceNo,InvoiceDate,PULAU,PRODUCT_CATEGORY\n\
                INV-1,2024-01-15,JAWA,Beverages\n\
                INV-2,bad-date,,\n";
    let result = validate_text(text, &Schema::transactions());
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, HEADER_FIELD);
    assert_eq!(result.errors[0].row_number, 1);
    assert!(result.errors[0].reason.contains("Quantity"));
    assert_eq!(result.stats.total_rows, 2);
    assert_eq!(result.stats.valid_rows, 0);
}

#[test]
fn small_single_region_dataset_is_valid_with_warnings() {
    let body = clean_csv(30);
    let result = validate_text(&body, &Schema::transactions());
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.stats.total_rows, 30);
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.contains("minimum recommended volume"))
    );
    assert!(result.warnings.iter().any(|w| w.contains("region")));
}

#[test]
fn semicolon_delimited_files_tokenize_into_five_columns() {
    let text = "InvoiceNo;InvoiceDate;PULAU;PRODUCT_CATEGORY;Quantity\n\
                INV-1;2024-01-15;JAWA;Beverages;5\n";
    let result = validate_text(text, &Schema::transactions());
    assert!(result.is_valid, "errors: {:?}", result.errors);
    assert_eq!(result.stats.valid_rows, 1);
}

#[test]
fn field_errors_accumulate_across_all_rows() {
    let text = format!(
        "{HEADER}\n\
         INV-1,bad-date,JAWA,Beverages,ten\n\
         INV-2,2024-01-15,JAWA,Beverages,5\n\
         ,2024-01-15,JAWA,Beverages,0\n"
    );
    let result = validate_text(&text, &Schema::transactions());
    assert!(!result.is_valid);
    assert_eq!(result.stats.total_rows, 3);
    assert_eq!(result.stats.valid_rows, 1);

    let described: Vec<(usize, &str, &str)> = result
        .errors
        .iter()
        .map(|e| (e.row_number, e.field.as_str(), e.reason.as_str()))
        .collect();
    assert_eq!(
        described,
        vec![
            (2, "InvoiceDate", "wrong date format"),
            (2, "Quantity", "must be numeric"),
            (4, "InvoiceNo", "number must not be empty"),
            (4, "Quantity", "must be greater than zero"),
        ]
    );
}

#[test]
fn date_error_precedes_quantity_error_within_a_row() {
    let text = format!("{HEADER}\nINV-1,2024-02-30,JAWA,Beverages,ten\n");
    let result = validate_text(&text, &Schema::transactions());
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].field, "InvoiceDate");
    assert_eq!(result.errors[0].reason, "invalid date");
    assert_eq!(result.errors[1].field, "Quantity");
}

#[test]
fn validation_is_idempotent_over_the_same_bytes() {
    let body = clean_csv(7);
    let mut tainted = body.clone();
    tainted.push_str("INV-7,2024-01-15,JAWA,Beverages,5.5\n");

    let file = RawFile::new("sales.csv", tainted.into_bytes());
    let schema = Schema::transactions();
    let first = validate(&file, &schema);
    let second = validate(&file, &schema);
    assert_eq!(first, second);
    assert!(!first.is_valid);
}

#[test]
fn warnings_clear_once_thresholds_are_met() {
    let mut body = String::from(HEADER);
    body.push('\n');
    let regions = ["JAWA", "SUMATERA", "BALI"];
    let categories = ["Beverages", "Snacks", "Dairy"];
    for idx in 0..MIN_RECOMMENDED_ROWS {
        body.push_str(&format!(
            "INV-{idx},2024-03-{:02},{},{},{}\n",
            (idx % 28) + 1,
            regions[idx % regions.len()],
            categories[idx % categories.len()],
            idx + 1
        ));
    }
    let result = validate_text(&body, &Schema::transactions());
    assert!(result.is_valid);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
}

#[test]
fn quoted_cells_keep_embedded_delimiters() {
    let text = format!("{HEADER}\nINV-1,2024-01-15,\"JAWA, BARAT\",\"Beverages, Cold\",5\n");
    let result = validate_text(&text, &Schema::transactions());
    assert!(result.is_valid, "errors: {:?}", result.errors);
}
