//! Delimiter inference and quote-aware tokenization of delimited text.
//!
//! The tokenizer is deliberately hand-rolled rather than delegated to a CSV
//! reader: every emitted field is trimmed of surrounding whitespace and then
//! stripped of one stray leading and trailing quote, so headers and values
//! survive files written by tools with loose quoting habits.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("file needs a header row and at least one data row")]
    FileTooShort,
}

/// Field separator candidates considered by inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "\\t"),
            other => write!(f, "{}", other.as_char()),
        }
    }
}

/// Picks the most frequent separator in the header line. Comma is the
/// fallback: semicolon or tab win only on a strict majority over both rivals.
pub fn infer_delimiter(first_line: &str) -> Delimiter {
    let commas = first_line.matches(',').count();
    let semicolons = first_line.matches(';').count();
    let tabs = first_line.matches('\t').count();
    if semicolons > commas && semicolons > tabs {
        Delimiter::Semicolon
    } else if tabs > commas && tabs > semicolons {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

/// Splits one line into fields. A double quote toggles the quoted state, a
/// doubled quote inside a quoted span emits a literal quote, and the
/// delimiter only separates fields outside quotes.
pub fn tokenize_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    let delim = delimiter.as_char();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                field.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == delim && !in_quotes {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    fields.push(field);
    fields.iter().map(|raw| clean_field(raw)).collect()
}

// Second pass over each field: the quote state machine consumes balanced
// quotes, this catches unbalanced leftovers.
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

/// One data row: column names zipped against tokenized cell values.
/// Row numbers are 1-based with the header counted as row 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    row_number: usize,
    fields: Vec<(String, String)>,
}

impl ParsedRecord {
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub delimiter: Delimiter,
    pub header: Vec<String>,
    pub records: Vec<ParsedRecord>,
}

/// Tokenizes the whole decoded text. Blank lines are discarded before
/// counting; fewer than two remaining lines means there is no table to
/// validate. Data lines shorter than the header are padded with empty cells.
pub fn parse_table(text: &str) -> Result<ParsedTable, ParseError> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(ParseError::FileTooShort);
    }
    let delimiter = infer_delimiter(lines[0]);
    let header = tokenize_line(lines[0], delimiter);
    let records = lines[1..]
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let values = tokenize_line(line, delimiter);
            let fields = header
                .iter()
                .enumerate()
                .map(|(col, name)| (name.clone(), values.get(col).cloned().unwrap_or_default()))
                .collect();
            ParsedRecord {
                row_number: idx + 2,
                fields,
            }
        })
        .collect();
    Ok(ParsedTable {
        delimiter,
        header,
        records,
    })
}
