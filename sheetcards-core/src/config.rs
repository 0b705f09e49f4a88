//! Configuration system for loading and rendering

use crate::filter::FilterToggles;
use crate::headers::KnownHeaders;
use anyhow::Result;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetCardsConfig {
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Initial toggle values; the CLI and session commands override them
    #[serde(default)]
    pub filter: FilterToggles,
    #[serde(default)]
    pub columns: KnownHeaders,
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub message: MessageConfig,
}

impl SheetCardsConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SheetCardsConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject settings the loader or range selector cannot use
    pub fn validate(&self) -> Result<()> {
        if self.loader.encodings.is_empty() {
            anyhow::bail!("Configuration error: loader.encodings must list at least one encoding");
        }
        for label in &self.loader.encodings {
            if Encoding::for_label(label.as_bytes()).is_none() {
                anyhow::bail!(
                    "Configuration error: Unknown encoding '{}' in loader.encodings",
                    label
                );
            }
        }

        if !self.loader.delimiter.is_ascii() {
            anyhow::bail!(
                "Configuration error: loader.delimiter '{}' must be a single ASCII character",
                self.loader.delimiter
            );
        }

        if self.range.default_span == 0 {
            anyhow::bail!("Configuration error: range.default_span must be at least 1");
        }

        Ok(())
    }
}

/// How input files are decoded and parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Encoding labels tried in order for delimited text
    pub encodings: Vec<String>,
    /// Field delimiter for delimited text (`.tsv` files always use tabs)
    pub delimiter: char,
    /// Raw field texts read as missing values
    pub missing_markers: Vec<String>,
    /// Sheet to read from workbooks; the first sheet when unset
    pub sheet: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encodings: vec!["utf-8".to_string(), "windows-1252".to_string()],
            delimiter: ',',
            missing_markers: ["", "#N/A", "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sheet: None,
        }
    }
}

/// Default row range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Rows shown when no end row is given
    pub default_span: usize,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self { default_span: 10 }
    }
}

/// Message synthesis settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Include a reminder when its column is missing from the table
    pub remind_when_column_absent: bool,
}
