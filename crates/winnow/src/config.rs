//! Configuration and error types for MOSS robust winnowing.
//!
//! This module defines the public configuration surface of the core. It is
//! free of any I/O or environment-dependent behavior so that fingerprinting
//! stays a pure function of `(document, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default k-gram length in characters.
pub const DEFAULT_K: usize = 5;

/// Default number of consecutive hashes per winnowing window.
pub const DEFAULT_W: usize = 4;

/// Output width of a k-gram hash.
///
/// Narrow hashes keep fingerprints small at the cost of more collisions
/// between distinct k-grams. Values are the low bits of XXH3-64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HashWidth {
    /// 16-bit hashes.
    #[default]
    Bits16,
    /// 32-bit hashes.
    Bits32,
    /// Full 64-bit hashes.
    Bits64,
}

impl HashWidth {
    /// Number of bits kept from each hash.
    pub const fn bits(self) -> u8 {
        match self {
            HashWidth::Bits16 => 16,
            HashWidth::Bits32 => 32,
            HashWidth::Bits64 => 64,
        }
    }

    /// Largest hash value representable at this width.
    pub const fn max_value(self) -> u64 {
        match self {
            HashWidth::Bits16 => u16::MAX as u64,
            HashWidth::Bits32 => u32::MAX as u64,
            HashWidth::Bits64 => u64::MAX,
        }
    }

    /// Keep only the low `bits()` bits of `hash`.
    pub const fn truncate(self, hash: u64) -> u64 {
        hash & self.max_value()
    }

    /// Number of decimal digits needed to print `max_value()`.
    pub const fn decimal_digits(self) -> usize {
        match self {
            HashWidth::Bits16 => 5,
            HashWidth::Bits32 => 10,
            HashWidth::Bits64 => 20,
        }
    }
}

impl TryFrom<u8> for HashWidth {
    type Error = WinnowError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(HashWidth::Bits16),
            32 => Ok(HashWidth::Bits32),
            64 => Ok(HashWidth::Bits64),
            other => Err(WinnowError::InvalidHashWidth { bits: other }),
        }
    }
}

impl From<HashWidth> for u8 {
    fn from(width: HashWidth) -> Self {
        width.bits()
    }
}

/// Configuration for the winnowing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowConfig {
    /// Configuration schema version.
    ///
    /// Any change that can alter produced fingerprints must bump this so that
    /// stored fingerprints stay comparable only with their own kind.
    pub version: u32,
    /// K-gram length in characters. The shortest substring a match can be
    /// detected in.
    pub k: usize,
    /// Number of consecutive hashes per window. At least one fingerprint is
    /// chosen from every window.
    pub w: usize,
    /// Width the k-gram hashes are truncated to.
    #[serde(rename = "hash_bits")]
    pub hash_width: HashWidth,
    /// Seed passed to XXH3.
    pub seed: u64,
    /// Strip ASCII whitespace from the document before hashing. Fingerprint
    /// indices then refer to offsets in the stripped text.
    pub strip_whitespace: bool,
    /// Keep the full hash sequence in [`crate::DocumentFingerprint`].
    pub include_intermediates: bool,
}

impl WinnowConfig {
    /// Create a new configuration with the classic MOSS defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the k-gram length.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the window size.
    pub fn with_w(mut self, w: usize) -> Self {
        self.w = w;
        self
    }

    /// Set the hash width.
    pub fn with_hash_width(mut self, width: HashWidth) -> Self {
        self.hash_width = width;
        self
    }

    /// Set the hash seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable whitespace stripping.
    pub fn with_strip_whitespace(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }

    /// Include or exclude the hash sequence from the returned fingerprint.
    pub fn with_intermediates(mut self, include_intermediates: bool) -> Self {
        self.include_intermediates = include_intermediates;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), WinnowError> {
        if self.version < 1 {
            return Err(WinnowError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.k < 1 {
            return Err(WinnowError::InvalidConfigK { k: self.k });
        }
        if self.w < 1 {
            return Err(WinnowError::InvalidConfigW { w: self.w });
        }
        Ok(())
    }
}

impl Default for WinnowConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: DEFAULT_K,
            w: DEFAULT_W,
            hash_width: HashWidth::Bits16,
            seed: 0,
            strip_whitespace: false,
            include_intermediates: true,
        }
    }
}

/// Errors returned by the winnowing core.
///
/// All of them are precondition violations detected before any work starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WinnowError {
    #[error("input must span at least one k-gram (k = {k} > {len})")]
    InputTooShortForKGram { k: usize, len: usize },

    #[error("input must yield enough hashes for one window (w = {w} > {len})")]
    InputTooShortForWindow { w: usize, len: usize },

    #[error("invalid config: k must be >= 1 (got {k})")]
    InvalidConfigK { k: usize },

    #[error("invalid config: w must be >= 1 (got {w})")]
    InvalidConfigW { w: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid hash width {bits}; expected 16, 32 or 64")]
    InvalidHashWidth { bits: u8 },
}
