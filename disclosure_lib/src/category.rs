//! Category code to Korean label resolution.
//!
//! The per-exchange tables are embedded from `seed_data/categories.yml` at
//! compile time and parsed once into an immutable [`CategoryResolver`],
//! following the same `include_str!` pattern as the other seed data.

use disclosure_api::types::Exchange;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Error types for category table loading.
#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("Failed to parse category YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Category table for {0} is missing")]
    MissingExchange(Exchange),
    #[error("Category table for {0} is defined more than once")]
    DuplicateExchange(Exchange),
    #[error("Duplicate {exchange} category code: {code}")]
    DuplicateCode { exchange: Exchange, code: String },
    #[error("Empty label for {exchange} category code: {code}")]
    EmptyLabel { exchange: Exchange, code: String },
}

/// Top-level structure for the category YAML file.
#[derive(Deserialize, Debug)]
struct CategoryFile {
    exchanges: Vec<ExchangeCategories>,
}

#[derive(Deserialize, Debug)]
struct ExchangeCategories {
    exchange: Exchange,
    categories: Vec<CategoryEntry>,
}

/// A single code-to-label mapping.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub code: String,
    pub label: String,
}

/// Exact-match lookup of category labels, one ordered table per exchange.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    shenzhen: Vec<CategoryEntry>,
    hongkong: Vec<CategoryEntry>,
}

impl CategoryResolver {
    /// Builds the resolver from the tables compiled into the binary.
    pub fn builtin() -> Result<Self, CategoryError> {
        let yaml_content = include_str!("../../seed_data/categories.yml");
        Self::from_yaml(yaml_content)
    }

    /// Parses and validates category tables from YAML content.
    ///
    /// Both exchanges must be present exactly once; codes must be unique
    /// within an exchange and labels non-empty.
    pub fn from_yaml(yaml_content: &str) -> Result<Self, CategoryError> {
        let file: CategoryFile = serde_yml::from_str(yaml_content)?;

        let mut shenzhen = None;
        let mut hongkong = None;
        for table in file.exchanges {
            validate_table(table.exchange, &table.categories)?;
            let slot = match table.exchange {
                Exchange::Shenzhen => &mut shenzhen,
                Exchange::Hongkong => &mut hongkong,
            };
            if slot.is_some() {
                return Err(CategoryError::DuplicateExchange(table.exchange));
            }
            *slot = Some(table.categories);
        }

        Ok(Self {
            shenzhen: shenzhen.ok_or(CategoryError::MissingExchange(Exchange::Shenzhen))?,
            hongkong: hongkong.ok_or(CategoryError::MissingExchange(Exchange::Hongkong))?,
        })
    }

    /// The ordered table for one exchange.
    pub fn entries(&self, exchange: Exchange) -> &[CategoryEntry] {
        match exchange {
            Exchange::Shenzhen => &self.shenzhen,
            Exchange::Hongkong => &self.hongkong,
        }
    }

    /// Returns the label mapped to `category_id` on `exchange`, or `""`.
    pub fn resolve(&self, category_id: &str, exchange: Exchange) -> &str {
        self.entries(exchange)
            .iter()
            .find(|entry| entry.code == category_id)
            .map(|entry| entry.label.as_str())
            .unwrap_or("")
    }
}

fn validate_table(exchange: Exchange, categories: &[CategoryEntry]) -> Result<(), CategoryError> {
    let mut seen_codes = HashSet::new();
    for entry in categories {
        if !seen_codes.insert(entry.code.as_str()) {
            return Err(CategoryError::DuplicateCode {
                exchange,
                code: entry.code.clone(),
            });
        }
        if entry.label.trim().is_empty() {
            return Err(CategoryError::EmptyLabel {
                exchange,
                code: entry.code.clone(),
            });
        }
    }
    Ok(())
}
