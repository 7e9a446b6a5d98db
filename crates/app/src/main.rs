use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use tipscan_ocr::{
    Extractor, OcrBackend, PipelineError, ReceiptPipeline, ScanOutcome, TipscanConfig,
    TranscriptRecognizer,
};

mod report;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "tif", "tiff", "bmp", "gif"];

/// Pull sale and tip amounts out of receipt scans.
#[derive(Parser)]
#[command(name = "tipscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan one or more receipts (images, or text transcripts; `-` reads stdin)
    Scan(ScanArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Args)]
struct ScanArgs {
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Tesseract language
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Tesseract data directory
    #[arg(long)]
    tessdata: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan(args) => scan(args, config).await,
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// An explicit `--config` must exist; the per-user default is optional.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<TipscanConfig> {
    if let Some(path) = explicit {
        return TipscanConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let Some(dirs) = directories::ProjectDirs::from("com", "tipscan", "Tipscan") else {
        return Ok(TipscanConfig::default());
    };
    let path = dirs.config_dir().join("config.toml");
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(TipscanConfig::default());
    }
    tracing::info!("Loading config from {}", path.display());
    TipscanConfig::from_file(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

async fn scan(args: ScanArgs, config: TipscanConfig) -> anyhow::Result<()> {
    let currency = config.report.currency_symbol.clone();
    let transcripts = ReceiptPipeline::new(TranscriptRecognizer, Extractor::new(config.extraction.clone()));
    let images = ReceiptPipeline::new(image_backend(&args), Extractor::new(config.extraction));

    let mut failures = 0usize;
    for input in &args.inputs {
        let label = input.display().to_string();
        let outcome = if label == "-" {
            let mut buf = Vec::new();
            let read = tokio::io::stdin().read_to_end(&mut buf).await;
            ScanOutcome::from_result(
                read.map_err(PipelineError::from)
                    .and_then(|_| transcripts.process_bytes(&buf)),
            )
        } else if is_image(input) {
            images.scan(input).await
        } else {
            transcripts.scan(input).await
        };

        match &outcome {
            ScanOutcome::Failed { message } => {
                failures += 1;
                tracing::warn!("Receipt pipeline error for {label}: {message}");
            }
            ScanOutcome::NoData => tracing::info!("No summary data in {label}"),
            ScanOutcome::Summary(r) => tracing::info!(
                "Extracted {} record(s) from {label}",
                r.extraction.records.len()
            ),
        }

        match args.format {
            OutputFormat::Text => print!("{}", report::render_text(&label, &outcome, &currency)),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string(&report::render_json(&label, &outcome, &currency))?
            ),
        }
    }

    if failures == args.inputs.len() {
        anyhow::bail!("All {failures} input(s) failed");
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(feature = "tesseract")]
fn image_backend(args: &ScanArgs) -> Box<dyn OcrBackend> {
    use tipscan_ocr::recognizer::tesseract_backend::TesseractRecognizer;
    Box::new(TesseractRecognizer::new(args.tessdata.clone(), &args.lang))
}

#[cfg(not(feature = "tesseract"))]
fn image_backend(args: &ScanArgs) -> Box<dyn OcrBackend> {
    tracing::debug!(
        "Built without tesseract; images will fail (lang={}, tessdata={:?})",
        args.lang,
        args.tessdata
    );
    Box::new(tipscan_ocr::UnavailableRecognizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image(Path::new("receipt.JPG")));
        assert!(is_image(Path::new("a/b/receipt.png")));
        assert!(!is_image(Path::new("receipt.txt")));
        assert!(!is_image(Path::new("receipt")));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ncurrency_symbol = \"€\"").unwrap();
        let c = load_config(Some(file.path())).unwrap();
        assert_eq!(c.report.currency_symbol, "€");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn cli_parses_scan_args() {
        let cli = Cli::try_parse_from(["tipscan", "-vv", "scan", "a.txt", "b.png", "--format", "json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert!(matches!(args.format, OutputFormat::Json));
                assert_eq!(args.lang, "eng");
            }
            Commands::Config => panic!("expected scan"),
        }
    }
}
