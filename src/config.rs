//! Configuration management for PQChain
//!
//! Algorithm selection and benchmark sizing come from a TOML file. A missing
//! file yields the defaults below; every key is optional.

use crate::crypto::{AlgoFamily, Algorithm};
use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "pqchain.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub algorithm: AlgoConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

/// The (family, variant) pair chosen at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgoConfig {
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default = "default_variant")]
    pub variant: String,
}

impl AlgoConfig {
    pub fn resolve(&self) -> Result<Algorithm, ChainError> {
        let family = self
            .family
            .parse::<AlgoFamily>()
            .map_err(|_| ChainError::UnsupportedAlgorithm {
                family: self.family.clone(),
                variant: self.variant.clone(),
            })?;
        Algorithm::from_parts(family, &self.variant)
    }
}

impl Default for AlgoConfig {
    fn default() -> Self {
        Self {
            family: default_family(),
            variant: default_variant(),
        }
    }
}

impl From<Algorithm> for AlgoConfig {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            family: algorithm.family().name().to_string(),
            variant: algorithm.variant().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_wallets")]
    pub wallets: usize,
    #[serde(default = "default_transactions_per_block")]
    pub transactions_per_block: usize,
    #[serde(default = "default_validation_iterations")]
    pub validation_iterations: usize,
    #[serde(default = "default_keygen_iterations")]
    pub keygen_iterations: usize,
    #[serde(default = "default_sign_iterations")]
    pub sign_iterations: usize,
    #[serde(default = "default_message_len")]
    pub message_len: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub parallel_validation: bool,
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), ChainError> {
        let counts = [
            ("wallets", self.wallets),
            ("transactions_per_block", self.transactions_per_block),
            ("validation_iterations", self.validation_iterations),
            ("keygen_iterations", self.keygen_iterations),
            ("sign_iterations", self.sign_iterations),
            ("message_len", self.message_len),
        ];
        for (key, value) in counts {
            if value == 0 {
                return Err(ChainError::ConfigError(format!(
                    "benchmark.{} must be greater than zero",
                    key
                )));
            }
        }
        Ok(())
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            wallets: default_wallets(),
            transactions_per_block: default_transactions_per_block(),
            validation_iterations: default_validation_iterations(),
            keygen_iterations: default_keygen_iterations(),
            sign_iterations: default_sign_iterations(),
            message_len: default_message_len(),
            seed: default_seed(),
            parallel_validation: false,
        }
    }
}

fn default_family() -> String {
    "Falcon".to_string()
}

fn default_variant() -> String {
    "512".to_string()
}

fn default_wallets() -> usize {
    100
}

fn default_transactions_per_block() -> usize {
    1000
}

fn default_validation_iterations() -> usize {
    100
}

fn default_keygen_iterations() -> usize {
    1000
}

fn default_sign_iterations() -> usize {
    10_000
}

fn default_message_len() -> usize {
    64
}

fn default_seed() -> u64 {
    42
}

/// Parse and validate a configuration document.
pub fn parse_config(config_str: &str) -> Result<Config, ChainError> {
    let config: Config = toml::from_str(config_str)?;
    config.algorithm.resolve()?;
    config.benchmark.validate()?;
    Ok(config)
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ChainError> {
    match fs::read_to_string(path.as_ref()) {
        Ok(config_str) => parse_config(&config_str),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}
