use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Knobs for the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Keywords that qualify a line for the fallback strategy.
    pub line_keywords: Vec<String>,
    /// A qualifying line containing this keyword is classified as a tip.
    pub tip_keyword: String,
    /// Surface surplus totals/tips dropped by pairing as warnings on the result.
    pub report_unpaired: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            line_keywords: ["credit", "card", "charge", "tip"]
                .into_iter()
                .map(String::from)
                .collect(),
            tip_keyword: "tip".to_string(),
            report_unpaired: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Prefix used when rendering amounts.
    pub currency_symbol: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { currency_symbol: "$".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipscanConfig {
    pub extraction: ExtractorConfig,
    pub report: ReportConfig,
}

impl TipscanConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
