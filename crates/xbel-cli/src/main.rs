use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use xbel::{ConvertOptions, DateZone, ImportOptions, WriteOptions};

#[derive(Debug, Parser)]
#[command(
    name = "opera2xbel",
    version,
    about = "Convert an Opera hotlist bookmark export to XBEL"
)]
struct Args {
    /// Input hotlist (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Output encoding label
    #[arg(short, long, default_value = "utf-8")]
    encoding: String,
    /// Input encoding label (defaults to UTF-8, falling back to windows-1252)
    #[arg(long, value_name = "LABEL")]
    input_encoding: Option<String>,
    /// XBEL version written to the document
    #[arg(long, value_name = "VERSION", default_value = xbel::document::DEFAULT_VERSION)]
    xbel_version: String,
    /// Indent nested elements
    #[arg(short, long)]
    pretty: bool,
    /// Fail on folder close markers without an open folder
    #[arg(long)]
    strict: bool,
    /// Format dates in UTC instead of the local time zone
    #[arg(long)]
    utc: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = run(Args::parse()) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let options = options(&args)?;
    let raw = read_input(&args.input)?;
    let text = xbel::decode_input(&raw, args.input_encoding.as_deref())?;
    debug!(bytes = raw.len(), "input read");

    let bytes = xbel::convert_with_options(&text, &options).with_context(|| {
        format!(
            "failed to convert {}",
            args.input
                .as_ref()
                .map_or_else(|| "stdin".to_string(), |path| path.display().to_string())
        )
    })?;

    write_output(&args.output, &bytes)
}

fn options(args: &Args) -> Result<ConvertOptions> {
    let zone = if args.utc {
        DateZone::utc()
    } else {
        DateZone::Local
    };
    let write = WriteOptions::default()
        .with_encoding_label(&args.encoding)
        .context("invalid --encoding")?
        .pretty(args.pretty);

    Ok(ConvertOptions::default()
        .with_version(args.xbel_version.as_str())
        .with_import(ImportOptions::new(args.strict, zone))
        .with_write(write))
}

fn read_input(path: &Option<PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).context("failed to write stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}
