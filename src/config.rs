//! Classifier configuration.
//!
//! This module provides `WisardConfig`, the construction parameters of an
//! encoder/classifier pair, and its JSON serialization. Only parameters are
//! covered: learned neuron tables are never serialized.
//!
//! # Example
//!
//! ```
//! use wisard::{Classifier, DataEncoder, WisardConfig};
//!
//! let config = WisardConfig::from_json(r#"{ "neuron_count": 2, "seed": 7 }"#).unwrap();
//! let encoder = config.build_encoder().unwrap();
//! let mut wisard = config.build_classifier();
//!
//! let addresses = encoder.encode(&"11110001".parse().unwrap()).unwrap();
//! wisard.record(&addresses, "edge").unwrap();
//! assert_eq!(wisard.answer_for(&addresses, &"edge").unwrap(), 2);
//! ```

use crate::classifier::{Classifier, Wisard};
use crate::encoder::{BitStringEncoder, Splitting};
use crate::{Result, WisardError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::path::Path;

/// Construction parameters of an encoder and classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WisardConfig {
    /// Addresses produced per bit string (neurons per discriminator)
    pub neuron_count: usize,

    /// Permutation seed; drawn at random when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// How the permuted bits are grouped
    #[serde(default)]
    pub splitting: Splitting,

    /// Threshold applied by [`WisardConfig::bleach`], if any
    #[serde(default)]
    pub bleach_threshold: Option<u64>,
}

impl Default for WisardConfig {
    fn default() -> Self {
        Self {
            neuron_count: 8,
            seed: None,
            splitting: Splitting::default(),
            bleach_threshold: None,
        }
    }
}

impl WisardConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.neuron_count == 0 {
            return Err(WisardError::InvalidArgument(
                "neuron_count must be positive".into(),
            ));
        }
        if self.bleach_threshold == Some(0) {
            return Err(WisardError::InvalidArgument(
                "bleaching threshold must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Build the address encoder described by this configuration.
    pub fn build_encoder(&self) -> Result<BitStringEncoder> {
        self.validate()?;
        let encoder = match self.seed {
            Some(seed) => BitStringEncoder::with_seed(self.neuron_count, seed),
            None => BitStringEncoder::new(self.neuron_count),
        };
        Ok(encoder.with_splitting(self.splitting))
    }

    /// Build an empty classifier.
    pub fn build_classifier<L: Eq + Hash>(&self) -> Wisard<L> {
        Wisard::new()
    }

    /// Bleach `classifier` with the configured threshold; no-op when none is set.
    pub fn bleach<L, C: Classifier<L>>(&self, classifier: &mut C) -> Result<()> {
        match self.bleach_threshold {
            Some(threshold) => classifier.bleach(threshold),
            None => Ok(()),
        }
    }
}
