//! Parse command - extract the notes of a single PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use corretagem_core::{BrokerageNote, CorretagemConfig, ParserFactory};

use super::load_config;
use super::output::{FormatArg, format_notes};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Password of an encrypted PDF
    #[arg(short, long)]
    password: Option<String>,

    /// Maximum pages to read (0 = all)
    #[arg(long)]
    max_pages: Option<usize>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.password.is_some() {
        config.pdf.password = args.password.clone();
    }
    if let Some(max_pages) = args.max_pages {
        config.pdf.max_pages = max_pages;
    }
    let format = args.format.map(Into::into).unwrap_or(config.output.format);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Parsing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Reading brokerage notes...");

    let notes = parse_file(&args.input, &config);
    pb.finish_and_clear();
    let notes = notes?;

    if notes.is_empty() {
        warn!("No brokerage notes found in {}", args.input.display());
    }

    let output = format_notes(&notes, format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read and parse one PDF with the configured templates.
pub fn parse_file(path: &Path, config: &CorretagemConfig) -> anyhow::Result<Vec<BrokerageNote>> {
    let data = fs::read(path)?;
    let factory = ParserFactory::new(&data, config.pdf.password.as_deref())?.with_config(config);
    debug!(
        "{}: {} pages, {} template",
        path.display(),
        factory.document().page_count(),
        factory.template().name
    );
    Ok(factory.parse())
}
