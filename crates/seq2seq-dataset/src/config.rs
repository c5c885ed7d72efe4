//! Dataset configuration
//!
//! Length caps and vocabulary sizes can be loaded from a JSON file instead of
//! being passed one by one. Missing fields take their default values.

use crate::error::{DatasetError, DatasetResult};
use anyhow::{Context, Result};
use seq2seq_vocab::NUM_RESERVED;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters consumed when a dataset is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Source sequences with more tokens are dropped
    pub src_max_len: usize,
    /// Target sequences with more tokens are dropped
    pub tgt_max_len: usize,
    /// Source vocabulary cap, reserved symbols included
    /// (ignored for a prebuilt vocabulary)
    pub src_max_vocab: usize,
    /// Target vocabulary cap, reserved symbols included
    /// (ignored for a prebuilt vocabulary)
    pub tgt_max_vocab: usize,
    /// Pairs per mini-batch
    pub batch_size: usize,
    /// Shuffle seed (None = non-deterministic)
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            src_max_len: 50,
            tgt_max_len: 50,
            src_max_vocab: 50000,
            tgt_max_vocab: 50000,
            batch_size: 32,
            seed: None,
        }
    }
}

impl DatasetConfig {
    /// Config with the given length caps and default everything else
    pub fn with_max_len(src_max_len: usize, tgt_max_len: usize) -> Self {
        Self {
            src_max_len,
            tgt_max_len,
            ..Self::default()
        }
    }

    /// Load configuration from JSON file
    ///
    /// # Example
    /// ```no_run
    /// use seq2seq_dataset::config::DatasetConfig;
    /// use std::path::Path;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = DatasetConfig::from_file(Path::new("dataset.json"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: DatasetConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject length caps no pair could pass
    ///
    /// This is the only check dataset construction makes. Vocabulary sizes
    /// are checked when a side actually builds or loads a vocabulary, and
    /// the batch size when batches are made.
    pub fn validate_lengths(&self) -> DatasetResult<()> {
        if self.src_max_len == 0 || self.tgt_max_len == 0 {
            return Err(DatasetError::InvalidConfig(format!(
                "max lengths must be positive (src_max_len = {}, tgt_max_len = {})",
                self.src_max_len, self.tgt_max_len
            )));
        }
        Ok(())
    }

    /// Reject values no dataset can be built or batched with
    ///
    /// Stricter than what construction needs: a config file is expected to
    /// drive a corpus-built vocabulary and a batched pass.
    pub fn validate(&self) -> DatasetResult<()> {
        self.validate_lengths()?;
        if self.src_max_vocab < NUM_RESERVED || self.tgt_max_vocab < NUM_RESERVED {
            return Err(DatasetError::InvalidConfig(format!(
                "vocabulary sizes must hold the {} reserved symbols \
                 (src_max_vocab = {}, tgt_max_vocab = {})",
                NUM_RESERVED, self.src_max_vocab, self.tgt_max_vocab
            )));
        }
        if self.batch_size == 0 {
            return Err(DatasetError::InvalidConfig(
                "batch size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = DatasetConfig::default();
        assert_eq!(config.src_max_vocab, 50000);
        assert_eq!(config.batch_size, 32);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let config_json = r#"{
            "src_max_len": 20,
            "tgt_max_len": 30,
            "src_max_vocab": 1000,
            "batch_size": 16,
            "seed": 7
        }"#;

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(config_json.as_bytes()).expect("Failed to write config");
        file.flush().expect("Failed to flush");

        let config = DatasetConfig::from_file(file.path()).expect("Failed to load config");

        assert_eq!(config.src_max_len, 20);
        assert_eq!(config.tgt_max_len, 30);
        assert_eq!(config.src_max_vocab, 1000);
        assert_eq!(config.tgt_max_vocab, 50000);
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_config_rejects_small_vocab() {
        let config = DatasetConfig {
            tgt_max_vocab: 2,
            ..DatasetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DatasetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_length() {
        let config = DatasetConfig::with_max_len(0, 10);
        assert!(config.validate().is_err());
        assert!(config.validate_lengths().is_err());
    }

    #[test]
    fn test_length_check_ignores_vocab_and_batch_size() {
        let config = DatasetConfig {
            src_max_vocab: 0,
            tgt_max_vocab: 0,
            batch_size: 0,
            ..DatasetConfig::default()
        };
        assert!(config.validate_lengths().is_ok());
        assert!(config.validate().is_err());
    }
}
