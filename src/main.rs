//! # mossfp
//!
//! Command-line front end for robust winnowing fingerprints.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mossfp` / `mossfp prompt` | Read one line from stdin and print its fingerprints |
//! | `mossfp file <INPUT> <OUTPUT>` | Fingerprint a file, one `hash, index` line per fingerprint |
//! | `mossfp samples` | Print hashes and fingerprints of a few sample sentences |

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mossfp::{
    fingerprint_batch, fingerprint_file, fingerprint_text, render_fingerprint_list,
    render_hashes, write_fingerprints, DocumentFingerprint, HashWidth, MossConfig, WinnowConfig,
    SAMPLE_STRINGS,
};

/// Fingerprint text with MOSS robust winnowing.
#[derive(Parser)]
#[command(name = "mossfp", version, about)]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (overrides RUST_LOG and the config file).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// K-gram length in characters.
    #[arg(short = 'k', long, global = true)]
    k: Option<usize>,

    /// Window size in hashes.
    #[arg(short = 'w', long, global = true)]
    w: Option<usize>,

    /// Hash width in bits (16, 32 or 64).
    #[arg(long, global = true)]
    hash_bits: Option<u8>,

    /// Strip whitespace before hashing.
    #[arg(long, global = true, overrides_with = "no_strip_whitespace")]
    strip_whitespace: bool,

    /// Hash whitespace even if the config file strips it.
    #[arg(long, global = true, overrides_with = "strip_whitespace")]
    no_strip_whitespace: bool,

    /// Print the full fingerprint document as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for a line of text and print its fingerprints.
    Prompt,

    /// Fingerprint INPUT and write one `hash, index` line per fingerprint to OUTPUT.
    ///
    /// Invalid UTF-8 sequences in INPUT are replaced with U+FFFD before hashing.
    File { input: PathBuf, output: PathBuf },

    /// Print hashes and fingerprints of the built-in sample sentences.
    Samples,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => MossConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MossConfig::default(),
    };
    init_tracing(&cli, &file_config);

    let cfg = effective_config(&cli, &file_config)?;

    match cli.command.unwrap_or(Commands::Prompt) {
        Commands::Prompt => run_prompt(&cfg, cli.json),
        Commands::File { input, output } => run_file(&cfg, &input, &output, cli.json),
        Commands::Samples => run_samples(&cfg),
    }
}

fn init_tracing(cli: &Cli, file_config: &MossConfig) {
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&file_config.logging.level)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if file_config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Config file values with command-line overrides applied.
fn effective_config(cli: &Cli, file_config: &MossConfig) -> Result<WinnowConfig> {
    let mut cfg = file_config.winnow_config()?;
    if let Some(k) = cli.k {
        cfg.k = k;
    }
    if let Some(w) = cli.w {
        cfg.w = w;
    }
    if let Some(bits) = cli.hash_bits {
        cfg.hash_width = HashWidth::try_from(bits)?;
    }
    if cli.strip_whitespace {
        cfg.strip_whitespace = true;
    }
    if cli.no_strip_whitespace {
        cfg.strip_whitespace = false;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run_prompt(cfg: &WinnowConfig, json: bool) -> Result<()> {
    prompt_and_fingerprint(
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
        cfg,
        json,
    )
}

/// Read one line from `input` and print its fingerprints to `out`.
///
/// In JSON mode the prompt goes to `err` so `out` holds only the document.
fn prompt_and_fingerprint<R, W, E>(
    mut input: R,
    mut out: W,
    mut err: E,
    cfg: &WinnowConfig,
    json: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let prompt: &mut dyn Write = if json { &mut err } else { &mut out };
    write!(prompt, "Enter string to be fingerprinted: ")?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']);

    let doc = fingerprint_text(line, cfg)?;
    if json {
        writeln!(err)?;
        return print_json(&mut out, &doc);
    }

    writeln!(out)?;
    writeln!(out, "Hash | Position")?;
    write_fingerprints(&mut out, &doc.fingerprints, cfg.hash_width)?;
    writeln!(out)?;
    Ok(())
}

fn run_file(cfg: &WinnowConfig, input: &Path, output: &Path, json: bool) -> Result<()> {
    let doc = fingerprint_file(input, cfg)?;

    let file = File::create(output)
        .with_context(|| format!("creating output file {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    if json {
        print_json(&mut writer, &doc)?;
    } else {
        write_fingerprints(&mut writer, &doc.fingerprints, cfg.hash_width)
            .with_context(|| format!("writing {}", output.display()))?;
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        fingerprints = doc.fingerprints.len(),
        "fingerprints_written"
    );
    Ok(())
}

fn run_samples(cfg: &WinnowConfig) -> Result<()> {
    let cfg = cfg.clone().with_intermediates(true);
    let docs = fingerprint_batch(&SAMPLE_STRINGS, &cfg)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (text, doc) in SAMPLE_STRINGS.iter().zip(&docs) {
        writeln!(out, "String: {text}")?;
        writeln!(out, "Hashes: {}\n", render_hashes(&doc.hashes, cfg.hash_width))?;
    }
    for (text, doc) in SAMPLE_STRINGS.iter().zip(&docs) {
        writeln!(out, "String: {text}")?;
        writeln!(
            out,
            "Prints: {}\n",
            render_fingerprint_list(&doc.fingerprints, cfg.hash_width)
        )?;
    }
    Ok(())
}

fn print_json<W: Write>(mut out: W, doc: &DocumentFingerprint) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, doc)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mossfp::render_fingerprints;
    use std::io::Cursor;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mossfp").chain(args.iter().copied())).unwrap()
    }

    fn file_config(yaml: &str) -> MossConfig {
        MossConfig::from_yaml(yaml).unwrap()
    }

    #[test]
    fn no_subcommand_defaults_to_prompt() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command.unwrap_or(Commands::Prompt),
            Commands::Prompt
        ));
    }

    #[test]
    fn defaults_without_flags_or_file() {
        let cfg = effective_config(&parse(&[]), &MossConfig::default()).unwrap();
        assert_eq!(cfg, WinnowConfig::default());
    }

    #[test]
    fn file_values_beat_defaults() {
        let file = file_config("version: \"1.0\"\nwinnow:\n  k: 7\n  hash_bits: 32\n");
        let cfg = effective_config(&parse(&["samples"]), &file).unwrap();
        assert_eq!(cfg.k, 7);
        assert_eq!(cfg.w, 4);
        assert_eq!(cfg.hash_width, HashWidth::Bits32);
    }

    #[test]
    fn flags_beat_file_values() {
        let file = file_config("version: \"1.0\"\nwinnow:\n  k: 7\n  w: 6\n  hash_bits: 32\n");
        let cli = parse(&["-k", "3", "--hash-bits", "64", "samples"]);
        let cfg = effective_config(&cli, &file).unwrap();
        assert_eq!(cfg.k, 3);
        assert_eq!(cfg.w, 6);
        assert_eq!(cfg.hash_width, HashWidth::Bits64);
    }

    #[test]
    fn global_flags_accepted_after_subcommand() {
        let cli = parse(&["file", "in.txt", "out.txt", "-w", "9"]);
        let cfg = effective_config(&cli, &MossConfig::default()).unwrap();
        assert_eq!(cfg.w, 9);
        assert!(matches!(cli.command, Some(Commands::File { .. })));
    }

    #[test]
    fn bad_hash_bits_rejected() {
        let cli = parse(&["--hash-bits", "24"]);
        let err = effective_config(&cli, &MossConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid hash width 24"));
    }

    #[test]
    fn zero_window_flag_rejected() {
        let cli = parse(&["-w", "0"]);
        assert!(effective_config(&cli, &MossConfig::default()).is_err());
    }

    #[test]
    fn strip_whitespace_flag_enables_stripping() {
        let cfg = effective_config(&parse(&["--strip-whitespace"]), &MossConfig::default()).unwrap();
        assert!(cfg.strip_whitespace);
    }

    #[test]
    fn no_strip_whitespace_overrides_file() {
        let file = file_config("version: \"1.0\"\nwinnow:\n  strip_whitespace: true\n");
        let cfg = effective_config(&parse(&["--no-strip-whitespace"]), &file).unwrap();
        assert!(!cfg.strip_whitespace);

        let cfg = effective_config(&parse(&[]), &file).unwrap();
        assert!(cfg.strip_whitespace);
    }

    #[test]
    fn last_strip_flag_wins() {
        let cli = parse(&["--strip-whitespace", "--no-strip-whitespace"]);
        let cfg = effective_config(&cli, &MossConfig::default()).unwrap();
        assert!(!cfg.strip_whitespace);
    }

    #[test]
    fn prompt_prints_header_and_fingerprint_lines() {
        let cfg = WinnowConfig::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        prompt_and_fingerprint(Cursor::new("Hello, world!\n"), &mut out, &mut err, &cfg, false)
            .unwrap();

        let expected_fps = fingerprint_text("Hello, world!", &cfg).unwrap().fingerprints;
        let expected = format!(
            "Enter string to be fingerprinted: \nHash | Position\n{}\n",
            render_fingerprints(&expected_fps, HashWidth::Bits16)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert!(err.is_empty());
    }

    #[test]
    fn prompt_json_output_is_only_the_document() {
        let cfg = WinnowConfig::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        prompt_and_fingerprint(Cursor::new("Hello, world!\r\n"), &mut out, &mut err, &cfg, true)
            .unwrap();

        let doc: DocumentFingerprint = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc, fingerprint_text("Hello, world!", &cfg).unwrap());
        assert!(String::from_utf8(err)
            .unwrap()
            .starts_with("Enter string to be fingerprinted: "));
    }

    #[test]
    fn prompt_reports_short_input() {
        let mut out = Vec::new();
        let result = prompt_and_fingerprint(
            Cursor::new("hi\n"),
            &mut out,
            io::sink(),
            &WinnowConfig::default(),
            false,
        );
        assert!(result.is_err());
    }
}
