//! Column schema: the ordered rule set a transaction table must satisfy.
//!
//! The required-column list is injectable rather than hard-coded: callers can
//! load an edited JSON schema and the validator follows it. The fixed
//! five-column transaction layout is just the default instance.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Severity of the region reference-list check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionPolicy {
    /// Any non-empty region name is accepted as-is.
    #[default]
    Off,
    /// Names outside the reference list produce an advisory warning.
    Warn,
    /// Names outside the reference list produce a blocking error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    /// Document identifier. Repeats are legitimate by default because one
    /// invoice spans multiple line-item rows.
    Identifier {
        #[serde(default)]
        reject_duplicates: bool,
    },
    /// Calendar date in `YYYY-MM-DD` or `DD/MM/YYYY` form.
    Date,
    /// Sales region; feeds the distinct-region health check.
    Region {
        #[serde(default)]
        policy: RegionPolicy,
    },
    /// Product category; feeds the distinct-category health check.
    Category,
    /// Positive whole number of units.
    Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    pub name: String,
    #[serde(flatten)]
    pub rule: FieldRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<ColumnRule>,
}

impl Schema {
    /// The transaction layout expected by the downstream forecasting and
    /// market-basket services.
    pub fn transactions() -> Self {
        let columns = vec![
            ColumnRule {
                name: "InvoiceNo".to_string(),
                rule: FieldRule::Identifier {
                    reject_duplicates: false,
                },
            },
            ColumnRule {
                name: "InvoiceDate".to_string(),
                rule: FieldRule::Date,
            },
            ColumnRule {
                name: "PULAU".to_string(),
                rule: FieldRule::Region {
                    policy: RegionPolicy::Off,
                },
            },
            ColumnRule {
                name: "PRODUCT_CATEGORY".to_string(),
                rule: FieldRule::Category,
            },
            ColumnRule {
                name: "Quantity".to_string(),
                rule: FieldRule::Quantity,
            },
        ];
        Schema { columns }
    }

    /// Required columns absent from the header, in schema order.
    /// Matching is case-sensitive and exact.
    pub fn missing_columns(&self, header: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| !header.iter().any(|h| h == &column.name))
            .map(|column| column.name.clone())
            .collect()
    }

    pub fn set_region_policy(&mut self, policy: RegionPolicy) {
        for column in &mut self.columns {
            if let FieldRule::Region { policy: current } = &mut column.rule {
                *current = policy;
            }
        }
    }

    pub fn set_reject_duplicates(&mut self, reject: bool) {
        for column in &mut self.columns {
            if let FieldRule::Identifier { reject_duplicates } = &mut column.rule {
                *reject_duplicates = reject;
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Creating schema file {path:?}"))?;
        serde_json::to_writer_pretty(file, self).context("Writing schema JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening schema file {path:?}"))?;
        let reader = BufReader::new(file);
        let schema = serde_json::from_reader(reader).context("Parsing schema JSON")?;
        Ok(schema)
    }
}
