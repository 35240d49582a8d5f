use std::fs;

use mossfp::{
    compute_hash_sequence, fingerprint_file, fingerprint_text, render_fingerprints,
    write_fingerprints, Fingerprint, HashWidth, MossConfig, WinnowConfig,
};

fn assert_robust(hashes_len: usize, w: usize, fps: &[Fingerprint]) {
    assert!(fps.windows(2).all(|p| p[0].index < p[1].index));
    for start in 0..=hashes_len - w {
        assert!(
            fps.iter().any(|fp| fp.index >= start && fp.index < start + w),
            "window {start}..{} uncovered",
            start + w
        );
    }
}

#[test]
fn hello_world_end_to_end() {
    let hashes = compute_hash_sequence("Hello, world!", 5).unwrap();
    assert_eq!(hashes.len(), 9);

    let doc = fingerprint_text("Hello, world!", &WinnowConfig::default()).unwrap();
    assert_eq!(doc.hashes, hashes);
    assert_robust(9, 4, &doc.fingerprints);
    for fp in &doc.fingerprints {
        assert_eq!(fp.hash, hashes[fp.index]);
        assert!(fp.hash <= u64::from(u16::MAX));
    }
}

#[test]
fn multiple_k_w_pairs() {
    let text = "It was the best of times, it was the worst of times, it was the age of wisdom";
    let n = text.chars().count();
    for k in [1, 3, 5, 8] {
        for w in [1, 2, 4, 7] {
            let cfg = WinnowConfig::new().with_k(k).with_w(w);
            let doc = fingerprint_text(text, &cfg).unwrap();
            assert_eq!(doc.hashes.len(), n - k + 1);
            assert_robust(doc.hashes.len(), w, &doc.fingerprints);
        }
    }
}

#[test]
fn file_round_trip_writes_one_line_per_fingerprint() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "Science is fun\nPokemon is fun\n").unwrap();

    let cfg = WinnowConfig::default();
    let doc = fingerprint_file(&input, &cfg).unwrap();
    let file = fs::File::create(&output).unwrap();
    write_fingerprints(file, &doc.fingerprints, cfg.hash_width).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, render_fingerprints(&doc.fingerprints, cfg.hash_width));
    assert_eq!(written.lines().count(), doc.fingerprints.len());

    for (line, fp) in written.lines().zip(&doc.fingerprints) {
        let (hash, index) = line.split_once(", ").expect("hash, index");
        assert_eq!(hash.len(), 5);
        assert_eq!(hash.parse::<u64>().unwrap(), fp.hash);
        assert_eq!(index.parse::<usize>().unwrap(), fp.index);
    }
}

#[test]
fn yaml_config_drives_pipeline() {
    let yaml = r#"
version: "1.0"
winnow:
  k: 3
  w: 2
  hash_bits: 64
  strip_whitespace: true
  include_intermediates: false
"#;
    let cfg = MossConfig::from_yaml(yaml).unwrap().winnow_config().unwrap();
    let doc = fingerprint_text("a b c d e f", &cfg).unwrap();

    assert!(doc.hashes.is_empty());
    assert_eq!(doc.meta.hash_width(), Ok(HashWidth::Bits64));
    assert_eq!(doc.meta.document_chars, 6);
    assert_robust(6 - 3 + 1, 2, &doc.fingerprints);
}

#[test]
fn fingerprint_document_serializes_to_json() {
    let doc = fingerprint_text("Hello, wonder.", &WinnowConfig::default()).unwrap();
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["meta"]["k"], 5);
    assert_eq!(value["meta"]["w"], 4);
    assert_eq!(value["meta"]["hash_bits"], 16);
    assert_eq!(
        value["fingerprints"].as_array().unwrap().len(),
        doc.fingerprints.len()
    );
}
