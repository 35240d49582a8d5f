//! # MOSS robust winnowing
//!
//! This crate computes compact, position-aware fingerprints of a text
//! document for near-duplicate and plagiarism detection, following the
//! robust winnowing scheme used by MOSS.
//!
//! ## Contract
//!
//! - Every operation is a pure function of `(document, config)`: no I/O, no
//!   logging, no global state.
//! - Invariant: for the same document and the same [`WinnowConfig`], the
//!   hash and fingerprint sequences are bit identical on every run and every
//!   platform.
//!
//! ## Pipeline
//!
//! 1.  **Hash sequencing**: every k-gram (`k` consecutive characters) of the
//!     document is hashed with XXH3-64 and truncated to the configured width,
//!     giving one hash per document offset.
//!
//! 2.  **Robust winnowing**: a window of `w` consecutive hashes slides over the
//!     sequence. Each window is represented by its right-most minimum, and a
//!     fingerprint is only emitted when that representative changes. Any
//!     shared substring of at least `w + k - 1` characters is therefore
//!     guaranteed to share a fingerprint.
//!
//! ## Example Usage
//!
//! ```
//! use winnow_core::{winnow, winnow_with_config, WinnowConfig};
//!
//! let fingerprints = winnow("Hello, world!").unwrap();
//! assert!(!fingerprints.is_empty());
//!
//! let cfg = WinnowConfig::new().with_k(3).with_w(2);
//! let fingerprints = winnow_with_config("abracadabra", &cfg).unwrap();
//! assert!(fingerprints.windows(2).all(|p| p[0].index < p[1].index));
//! ```
//!
pub mod config;
pub mod fingerprint;
mod kgram;
mod text;
mod window;

use std::borrow::Cow;

pub use crate::config::{HashWidth, WinnowConfig, WinnowError, DEFAULT_K, DEFAULT_W};
pub use crate::fingerprint::{DocumentFingerprint, Fingerprint, WinnowMeta};
pub use crate::kgram::{compute_hash_sequence, compute_hash_sequence_with, hash_kgram, kgrams};
pub use crate::text::{remove_characters, remove_whitespace, WHITESPACE};
pub use crate::window::compute_fingerprints;

/// Current winnowing algorithm version for this crate.
pub const WINNOW_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const WINNOW_ALGORITHM: &str = "xxh3+robust_winnow_v1";

/// Fingerprint `document` with the default `k = 5`, `w = 4`, 16-bit hashes.
pub fn winnow(document: &str) -> Result<Vec<Fingerprint>, WinnowError> {
    let hashes = compute_hash_sequence(document, DEFAULT_K)?;
    compute_fingerprints(&hashes, DEFAULT_W)
}

/// Fingerprint `document` with an explicit configuration.
pub fn winnow_with_config(
    document: &str,
    cfg: &WinnowConfig,
) -> Result<Vec<Fingerprint>, WinnowError> {
    fingerprint_document(document, cfg).map(|doc| doc.fingerprints)
}

/// Fingerprint `document` and return the full artifact with metadata.
pub fn fingerprint_document(
    document: &str,
    cfg: &WinnowConfig,
) -> Result<DocumentFingerprint, WinnowError> {
    cfg.validate()?;

    let text: Cow<'_, str> = if cfg.strip_whitespace {
        Cow::Owned(remove_whitespace(document))
    } else {
        Cow::Borrowed(document)
    };

    let mut hashes = compute_hash_sequence_with(&text, cfg.k, cfg.hash_width, cfg.seed)?;
    let fingerprints = compute_fingerprints(&hashes, cfg.w)?;
    let document_chars = hashes.len() + cfg.k - 1;

    if !cfg.include_intermediates {
        hashes.clear();
    }

    Ok(DocumentFingerprint {
        hashes,
        fingerprints,
        meta: WinnowMeta {
            winnow_version: WINNOW_VERSION,
            algorithm_name: WINNOW_ALGORITHM.to_string(),
            k: cfg.k,
            w: cfg.w,
            hash_bits: cfg.hash_width.bits(),
            seed: cfg.seed,
            document_chars,
            strip_whitespace: cfg.strip_whitespace,
            config_version: cfg.version,
        },
    })
}
