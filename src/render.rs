//! Text rendering of hashes and fingerprints.
//!
//! Hashes are printed as zero-padded decimals, padded to the digit count of
//! the largest value at the configured width, so columns line up and files
//! sort lexically.

use std::io::{self, Write};

use winnow_core::{Fingerprint, HashWidth};

/// Zero-padded decimal form of `hash`.
pub fn format_hash(hash: u64, width: HashWidth) -> String {
    format!("{hash:0digits$}", digits = width.decimal_digits())
}

/// `hash, index` form of a single fingerprint.
pub fn format_fingerprint(fp: &Fingerprint, width: HashWidth) -> String {
    format!("{}, {}", format_hash(fp.hash, width), fp.index)
}

/// One `hash, index` line per fingerprint, each newline-terminated.
pub fn render_fingerprints(fps: &[Fingerprint], width: HashWidth) -> String {
    let mut out = String::with_capacity(fps.len() * (width.decimal_digits() + 8));
    for fp in fps {
        out.push_str(&format_fingerprint(fp, width));
        out.push('\n');
    }
    out
}

/// Stream the lines of [`render_fingerprints`] into `writer`.
pub fn write_fingerprints<W: Write>(
    mut writer: W,
    fps: &[Fingerprint],
    width: HashWidth,
) -> io::Result<()> {
    for fp in fps {
        writeln!(writer, "{}", format_fingerprint(fp, width))?;
    }
    writer.flush()
}

/// Space-separated hashes, as shown by the `samples` command.
pub fn render_hashes(hashes: &[u64], width: HashWidth) -> String {
    hashes
        .iter()
        .map(|&h| format_hash(h, width))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-separated `[hash index]` pairs, as shown by the `samples` command.
pub fn render_fingerprint_list(fps: &[Fingerprint], width: HashWidth) -> String {
    fps.iter()
        .map(|fp| format!("[{} {}]", format_hash(fp.hash, width), fp.index))
        .collect::<Vec<_>>()
        .join(" ")
}
