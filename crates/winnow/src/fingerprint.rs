//! Fingerprint and metadata types produced by winnowing.
//!
//! The fingerprint schema and metadata are part of the public contract: any
//! incompatible change must result in a new `winnow_version`.

use serde::{Deserialize, Serialize};

use crate::config::{HashWidth, WinnowError};

/// A selected k-gram hash together with the offset it was taken from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Hash of the k-gram, already truncated to the configured width.
    pub hash: u64,
    /// Offset into the hash sequence, which is also the character offset of
    /// the k-gram in the (possibly whitespace-stripped) document.
    pub index: usize,
}

impl Fingerprint {
    pub const fn new(hash: u64, index: usize) -> Self {
        Self { hash, index }
    }
}

/// Complete winnowing result for one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentFingerprint {
    /// Hash of every k-gram, in offset order.
    ///
    /// Empty when the config asked to drop intermediates.
    pub hashes: Vec<u64>,
    /// Fingerprints selected by robust winnowing, strictly increasing by index.
    pub fingerprints: Vec<Fingerprint>,
    /// How and with which configuration the fingerprint was produced.
    pub meta: WinnowMeta,
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowMeta {
    /// Winnowing algorithm version, owned by this crate.
    pub winnow_version: u16,
    /// Human-readable algorithm identifier.
    pub algorithm_name: String,
    /// K-gram length in characters.
    pub k: usize,
    /// Window size.
    pub w: usize,
    /// Hash width in bits.
    pub hash_bits: u8,
    /// XXH3 seed.
    pub seed: u64,
    /// Number of characters that were hashed.
    pub document_chars: usize,
    /// Whether whitespace was stripped before hashing.
    pub strip_whitespace: bool,
    /// Config schema version supplied by the caller.
    pub config_version: u32,
}

impl WinnowMeta {
    /// Width the recorded hashes were truncated to.
    ///
    /// Metadata read back from storage may carry a width this crate never
    /// produces; that is reported rather than guessed.
    pub fn hash_width(&self) -> Result<HashWidth, WinnowError> {
        HashWidth::try_from(self.hash_bits)
    }
}
