use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use docx_comments::{
    config::Config,
    document::extract_comments,
    render::render,
    DisplayFormat,
};

#[derive(Parser)]
#[command(name = "docx-comments")]
#[command(about = "Extract and display comments and their associated text from a DOCX file")]
#[command(version)]
struct Cli {
    /// Path to the DOCX file to be processed
    #[arg(required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// Format for displaying the extracted comments [default: original]
    #[arg(long, value_enum)]
    display_format: Option<DisplayFormat>,

    /// Include the author's name and timestamp alongside each comment
    #[arg(long)]
    include_details: bool,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still wins when set
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.init_config {
        match Config::init_default()? {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => eprintln!("No config directory available on this platform"),
        }
        return Ok(());
    }

    let config = Config::load()?;
    let (format, options) = config.resolve(cli.display_format, cli.include_details);

    let Some(file) = cli.file else {
        anyhow::bail!("no input file given");
    };

    let extraction = extract_comments(&file)
        .with_context(|| format!("failed to extract comments from {}", file.display()))?;
    log::debug!(
        "{} groups from {} comments in {}",
        extraction.groups.len(),
        extraction.records.len(),
        file.display()
    );

    let output = render(&extraction.groups, format, &options)?;
    std::io::stdout().lock().write_all(output.as_bytes())?;

    Ok(())
}
