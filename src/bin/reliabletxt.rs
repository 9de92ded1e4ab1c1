//! reliabletxt CLI
//!
//! Inspect, create and re-encode ReliableTXT documents.

use anyhow::{Context, Result};
use base64::Engine;
use clap::{ArgAction, Parser, Subcommand};
use reliabletxt::{Decoder, Document, Encoder, Encoding, EncodingConfig, Error, MARKER};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reliabletxt")]
#[command(version)]
#[command(about = "ReliableTXT document tool")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report the encoding of files (directories are walked recursively)
    Detect {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Only accept UTF-8 and UTF-16 documents
        #[arg(long)]
        strict: bool,
    },

    /// Decode a document and print its text
    Cat {
        /// Document to read (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,
    },

    /// Wrap plain UTF-8 text into a ReliableTXT document
    Encode {
        /// Plain text file (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Output document (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[arg(short, long, default_value = "utf-8", value_parser = parse_encoding)]
        encoding: Encoding,

        /// Print the document bytes as base64 instead of raw bytes
        #[arg(long, conflicts_with = "output")]
        base64: bool,
    },

    /// Re-encode an existing document
    Convert {
        #[arg(short = 'i', long)]
        input: PathBuf,

        #[arg(short = 'o', long)]
        output: PathBuf,

        #[arg(short, long, value_parser = parse_encoding)]
        encoding: Encoding,
    },
}

fn parse_encoding(value: &str) -> Result<Encoding, String> {
    value.parse().map_err(|e: reliabletxt::ParseEncodingError| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Detect { paths, strict } => {
            detect_files(&paths, strict)?;
        }
        Commands::Cat { input } => {
            cat_document(input)?;
        }
        Commands::Encode { input, output, encoding, base64 } => {
            encode_text(input, output, encoding, base64)?;
        }
        Commands::Convert { input, output, encoding } => {
            convert_document(&input, &output, encoding)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reliabletxt={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = input {
        fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

fn detect_files(paths: &[PathBuf], strict: bool) -> Result<()> {
    let config = if strict { EncodingConfig::strict() } else { EncodingConfig::default() };
    let decoder = Decoder::with_config(config);

    for root in paths {
        if root.is_dir() {
            for path in collect_files(root) {
                report_file(&decoder, &path)?;
            }
        } else {
            report_file(&decoder, root)?;
        }
    }

    Ok(())
}

/// Regular files below `root` in name order; unreadable entries are logged and skipped
fn collect_files(root: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Skipping {}: {}", err.path().unwrap_or(root).display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn report_file(decoder: &Decoder, path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;

    match decoder.decode(&bytes) {
        Ok((encoding, text)) => {
            println!("{}: {}", path.display(), encoding);
            tracing::info!("{}: {} code points", path.display(), text.chars().count());
        }
        Err(Error::MissingPreamble) => {
            println!("{}: not a ReliableTXT document", path.display());
        }
        Err(err @ Error::Decoding { .. }) => {
            println!("{}: corrupt ({})", path.display(), err);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn cat_document(input: Option<PathBuf>) -> Result<()> {
    let bytes = read_input(input.as_deref())?;
    let (encoding, text) = Decoder::new().decode(&bytes).context("Failed to decode document")?;
    tracing::info!("Detected {}", encoding);

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn encode_text(input: Option<PathBuf>, output: Option<PathBuf>, encoding: Encoding, base64: bool) -> Result<()> {
    let bytes = read_input(input.as_deref())?;
    let text = String::from_utf8(bytes).context("Input is not valid UTF-8 text")?;

    // Plain text may already carry a UTF-8 BOM
    let text = match text.strip_prefix(MARKER) {
        Some(rest) => {
            tracing::info!("Dropping existing byte order mark");
            rest
        }
        None => text.as_str(),
    };

    let encoder = Encoder::new();

    if let Some(output_path) = output {
        encoder
            .encode_to_file(text, encoding, &output_path)
            .with_context(|| format!("Failed to write: {}", output_path.display()))?;
        tracing::info!("Created {} ({})", output_path.display(), encoding);
    } else if base64 {
        let document = encoder.encode_with_preamble(text, encoding);
        println!("{}", base64::engine::general_purpose::STANDARD.encode(document));
    } else {
        let mut stdout = io::stdout().lock();
        encoder.encode_to_writer(text, encoding, &mut stdout)?;
        stdout.flush()?;
    }

    Ok(())
}

fn convert_document(input: &Path, output: &Path, encoding: Encoding) -> Result<()> {
    let mut document = Document::load(input)
        .with_context(|| format!("Failed to load: {}", input.display()))?;
    let from = document.encoding();
    document.set_encoding(encoding)?;
    document
        .save(output)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    tracing::info!("Converted {} from {} to {}", input.display(), from, encoding);
    Ok(())
}
