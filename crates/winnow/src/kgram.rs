//! K-gram extraction and hashing.
//!
//! A document of `n` characters has `n - k + 1` k-grams, one starting at every
//! offset. Each k-gram is hashed independently with XXH3-64 over its UTF-8
//! bytes and truncated to the configured [`HashWidth`], so the sequence is
//! identical on every run and every platform.

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::config::{HashWidth, WinnowError};

/// Iterate over every k-gram of `document`, in offset order.
///
/// K-grams are counted in characters, not bytes, and borrowed from the
/// document. Yields nothing when `k` is zero or longer than the document.
pub fn kgrams(document: &str, k: usize) -> impl Iterator<Item = &str> + '_ {
    // Byte offset of every char start, plus the end of the string.
    let bounds: Vec<usize> = document
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(document.len()))
        .collect();
    let chars = bounds.len() - 1;
    let count = if k == 0 || chars < k { 0 } else { chars - k + 1 };

    (0..count).map(move |i| &document[bounds[i]..bounds[i + k]])
}

/// Hash a single k-gram.
pub fn hash_kgram(kgram: &str, width: HashWidth, seed: u64) -> u64 {
    width.truncate(xxh3_64_with_seed(kgram.as_bytes(), seed))
}

/// Hash every k-gram of `document` using 16-bit hashes and seed 0.
pub fn compute_hash_sequence(document: &str, k: usize) -> Result<Vec<u64>, WinnowError> {
    compute_hash_sequence_with(document, k, HashWidth::default(), 0)
}

/// Hash every k-gram of `document`.
///
/// Entry `i` of the result is the hash of the `k` characters starting at
/// character offset `i`. Fails when the document is shorter than one k-gram.
pub fn compute_hash_sequence_with(
    document: &str,
    k: usize,
    width: HashWidth,
    seed: u64,
) -> Result<Vec<u64>, WinnowError> {
    if k == 0 {
        return Err(WinnowError::InvalidConfigK { k });
    }
    let len = document.chars().count();
    if len < k {
        return Err(WinnowError::InputTooShortForKGram { k, len });
    }

    let mut hashes = Vec::with_capacity(len - k + 1);
    hashes.extend(kgrams(document, k).map(|kgram| hash_kgram(kgram, width, seed)));
    Ok(hashes)
}
