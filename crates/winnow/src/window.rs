//! Robust winnowing over a k-gram hash sequence.
//!
//! Every window of `w` consecutive hashes contributes its right-most minimum.
//! A minimum is only re-emitted when it slides out of the window or when a
//! new hash at the right edge ties or beats it, so runs of windows sharing a
//! minimum are represented by a single fingerprint. See Schleimer, Wilkerson
//! and Aiken, "Winnowing: Local Algorithms for Document Fingerprinting"
//! (SIGMOD 2003).

use crate::config::WinnowError;
use crate::fingerprint::Fingerprint;

/// Select fingerprints from `hashes` using windows of `w` hashes.
///
/// The result is strictly increasing by index and every window of `w`
/// consecutive positions contains at least one selected index. Runs in
/// O(n·w) worst case, O(n) when minima rarely expire.
pub fn compute_fingerprints(hashes: &[u64], w: usize) -> Result<Vec<Fingerprint>, WinnowError> {
    if w == 0 {
        return Err(WinnowError::InvalidConfigW { w });
    }
    let n = hashes.len();
    if n < w {
        return Err(WinnowError::InputTooShortForWindow { w, len: n });
    }

    // At most one emission for the first window and one per later position.
    let mut out = Vec::with_capacity(n - w + 1);

    let mut selected = rightmost_min(hashes, 0, w);
    out.push(selected);

    for curr in w..n {
        if curr - selected.index == w {
            // The selected minimum just left the window.
            selected = rightmost_min(hashes, curr + 1 - w, curr + 1);
            out.push(selected);
        } else if hashes[curr] <= selected.hash {
            selected = Fingerprint::new(hashes[curr], curr);
            out.push(selected);
        }
    }

    Ok(out)
}

/// Minimum of `hashes[start..end]`, ties resolved to the highest index.
///
/// The range must be non-empty.
fn rightmost_min(hashes: &[u64], start: usize, end: usize) -> Fingerprint {
    let mut best = Fingerprint::new(hashes[start], start);
    for (idx, &hash) in hashes.iter().enumerate().take(end).skip(start + 1) {
        if hash <= best.hash {
            best = Fingerprint::new(hash, idx);
        }
    }
    best
}
