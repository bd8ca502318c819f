// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    pub delimiter: String,
    pub max_file_size_mb: usize,
    #[serde(default)]
    pub aliases: AliasConfig,
}

/// Header synonyms per canonical role, matched in order as lowercase substrings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AliasConfig {
    pub product_name: Vec<String>,
    pub price: Vec<String>,
    pub quantity: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub top_n: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            product_name: strings(&["product_name", "상품명", "제품", "item"]),
            price: strings(&["price", "가격", "단가", "sales", "매출"]),
            quantity: strings(&["quantity", "판매량", "수량", "qty", "count"]),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            max_file_size_mb: 50,
            aliases: AliasConfig::default(),
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { top_n: 8 }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./exports"),
            pretty: true,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

impl IngestConfig {
    /// The delimiter as a single character; must be one ASCII char other than a quote or line break.
    pub fn delimiter_char(&self) -> Result<char> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() && !matches!(c, '"' | '\n' | '\r') => Ok(c),
            _ => Err(PipelineError::Config(format!(
                "ingest.delimiter {:?} is not usable",
                self.delimiter
            ))),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SALES_INGEST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            ingest: IngestConfig::default(),
            aggregation: AggregationConfig::default(),
            export: ExportConfig::default(),
            backend: BackendConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.aggregation.top_n == 0 {
            return Err(PipelineError::Config(
                "aggregation.top_n must be greater than 0".to_string(),
            ));
        }

        self.ingest.delimiter_char()?;

        let aliases = &self.ingest.aliases;
        for (role, list) in [
            ("product_name", &aliases.product_name),
            ("price", &aliases.price),
            ("quantity", &aliases.quantity),
        ] {
            if list.iter().all(|alias| alias.trim().is_empty()) {
                return Err(PipelineError::Config(format!(
                    "ingest.aliases.{} must contain at least one alias",
                    role
                )));
            }
        }

        crate::utils::Validator::validate_url(&self.backend.base_url)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
