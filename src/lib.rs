//! Workspace umbrella crate for MOSS-style document fingerprinting.
//!
//! This crate wraps the pure winnowing core with the pieces a caller needs
//! around it: structured logging, error wrapping for file input, parallel
//! batch fingerprinting, YAML configuration and the one-line-per-fingerprint
//! text rendering.

pub use winnow_core::{
    compute_fingerprints, compute_hash_sequence, compute_hash_sequence_with, fingerprint_document,
    hash_kgram, kgrams, remove_characters, remove_whitespace, winnow, winnow_with_config,
    DocumentFingerprint, Fingerprint, HashWidth, WinnowConfig, WinnowError, WinnowMeta, DEFAULT_K,
    DEFAULT_W, WINNOW_ALGORITHM, WINNOW_VERSION,
};

pub mod config;
mod render;

pub use crate::config::{ConfigLoadError, LoggingYamlConfig, MossConfig, WinnowYamlConfig};
pub use crate::render::{
    format_fingerprint, format_hash, render_fingerprint_list, render_fingerprints, render_hashes,
    write_fingerprints,
};

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn, Level};

/// Sentences fingerprinted by the `samples` command.
pub const SAMPLE_STRINGS: [&str; 4] = [
    "Hello, world!",
    "Hello, wonder.",
    "Science is fun",
    "Pokemon is fun",
];

/// Errors that can occur while fingerprinting a document through the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("winnowing failed: {0}")]
    Winnow(#[from] WinnowError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// The core error, if the failure happened while winnowing.
    pub fn as_winnow(&self) -> Option<&WinnowError> {
        match self {
            PipelineError::Winnow(err) => Some(err),
            PipelineError::Io { .. } => None,
        }
    }
}

/// Fingerprint one in-memory document.
///
/// Emits a `winnow_success` or `winnow_failure` event inside a
/// `winnow.fingerprint` span.
pub fn fingerprint_text(
    text: &str,
    cfg: &WinnowConfig,
) -> Result<DocumentFingerprint, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "winnow.fingerprint",
        k = cfg.k,
        w = cfg.w,
        hash_bits = cfg.hash_width.bits()
    );
    let _guard = span.enter();

    match fingerprint_document(text, cfg) {
        Ok(doc) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                document_chars = doc.meta.document_chars,
                fingerprints = doc.fingerprints.len(),
                elapsed_micros,
                "winnow_success"
            );
            Ok(doc)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(
                error = %err,
                input_bytes = text.len(),
                elapsed_micros,
                "winnow_failure"
            );
            Err(err.into())
        }
    }
}

/// Read a file and fingerprint its contents.
///
/// The bytes are decoded lossily: invalid UTF-8 sequences become U+FFFD and
/// each counts as one character.
pub fn fingerprint_file(
    path: impl AsRef<Path>,
    cfg: &WinnowConfig,
) -> Result<DocumentFingerprint, PipelineError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        debug!(path = %path.display(), "invalid_utf8_replaced");
    }
    debug!(path = %path.display(), bytes = bytes.len(), "document_loaded");
    fingerprint_text(&text, cfg)
}

/// Fingerprint many independent documents in parallel.
///
/// Results are returned in input order; a failure on one document does not
/// affect the others.
pub fn fingerprint_batch<S>(
    texts: &[S],
    cfg: &WinnowConfig,
) -> Vec<Result<DocumentFingerprint, PipelineError>>
where
    S: AsRef<str> + Sync,
{
    let start = Instant::now();
    let results: Vec<_> = texts
        .par_iter()
        .map(|text| fingerprint_text(text.as_ref(), cfg))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        documents = texts.len(),
        failed,
        elapsed_micros = start.elapsed().as_micros(),
        "winnow_batch"
    );
    results
}
