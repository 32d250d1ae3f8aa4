use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "cardstamp", version)]
struct Cli {
    /// Run configuration JSON. Relative paths inside it resolve against its directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `cardstamp=debug`. Falls back to `RUST_LOG`, then `info`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp collection info onto every selected card.
    Stamp(StampArgs),
    /// Tile processed cards onto 6x4 contact sheets.
    Tile(TileArgs),
    /// Write the artwork reconciliation report.
    Report,
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Skip the regular cards.
    #[arg(long)]
    no_cards: bool,

    /// Skip the tokens.
    #[arg(long)]
    no_tokens: bool,

    /// Skip the basic lands.
    #[arg(long)]
    no_basic_lands: bool,

    /// Skip the alternate arts.
    #[arg(long)]
    no_alt_arts: bool,

    /// Only process cards marked as updated in the spreadsheet.
    #[arg(long)]
    only_updated: bool,

    /// Only process the named card (repeatable).
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Use the quarantine subdirectory for output.
    #[arg(long)]
    quarantine: bool,
}

impl SelectArgs {
    fn run_options(&self) -> cardstamp::RunOptions {
        cardstamp::RunOptions {
            cards: !self.no_cards,
            tokens: !self.no_tokens,
            basic_lands: !self.no_basic_lands,
            alt_arts: !self.no_alt_arts,
            only_updated: self.only_updated,
            only_names: self.only.clone(),
            quarantine: self.quarantine,
        }
    }
}

#[derive(Args, Debug)]
struct StampArgs {
    #[command(flatten)]
    select: SelectArgs,

    /// Write the reconciliation report after stamping.
    #[arg(long)]
    find_files: bool,
}

#[derive(Args, Debug)]
struct TileArgs {
    #[command(flatten)]
    select: SelectArgs,

    /// First sheet to write (1-based); earlier sheets are counted but skipped.
    #[arg(long, default_value_t = 1)]
    start_sheet: u32,

    /// Last sheet to write.
    #[arg(long)]
    end_sheet: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = read_config(cli.config.as_deref())?;
    init_logging(&config.log_path, cli.log_level.as_deref())?;

    match cli.cmd {
        Command::Stamp(args) => cmd_stamp(&config, args),
        Command::Tile(args) => cmd_tile(&config, args),
        Command::Report => cmd_report(&config),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<cardstamp::StampConfig> {
    let Some(path) = path else {
        return Ok(cardstamp::StampConfig::default());
    };
    let config = cardstamp::StampConfig::from_path(path)
        .with_context(|| format!("load config '{}'", path.display()))?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.rebased(root))
}

/// Log to stderr and to the run log, which is truncated first.
fn init_logging(log_path: &Path, level: Option<&str>) -> anyhow::Result<()> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log dir '{}'", parent.display()))?;
    }
    let log_file = File::create(log_path)
        .with_context(|| format!("reset log '{}'", log_path.display()))?;

    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("parse log level '{level}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(
            fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .without_time()
                .with_target(false),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

fn cmd_stamp(config: &cardstamp::StampConfig, args: StampArgs) -> anyhow::Result<()> {
    let options = args.select.run_options();
    let collections = cardstamp::load(&config.sources)?;

    let stats = cardstamp::Assembler::new(config, &options).run(&collections);
    println!(
        "processed {} card(s), {} missing artwork, {} missing overlays, {} unreadable",
        stats.processed,
        stats.missing_artwork.len(),
        stats.missing_overlays.len(),
        stats.unreadable.len()
    );

    if args.find_files {
        cardstamp::Report::build(config, &collections)?.write(&config.report_path)?;
    }
    Ok(())
}

fn cmd_tile(config: &cardstamp::StampConfig, args: TileArgs) -> anyhow::Result<()> {
    let options = args.select.run_options();
    let range = cardstamp::SheetRange::new(args.start_sheet, args.end_sheet)?;
    let collections = cardstamp::load(&config.sources)?;

    let stats = cardstamp::Tiler::new(config, &options, range).run(&collections)?;
    println!(
        "placed {} card(s) on {} sheet(s), {} missing",
        stats.placed,
        stats.sheets.len(),
        stats.missing.len()
    );
    Ok(())
}

fn cmd_report(config: &cardstamp::StampConfig) -> anyhow::Result<()> {
    let collections = cardstamp::load(&config.sources)?;
    let report = cardstamp::Report::build(config, &collections)?;
    report.write(&config.report_path)?;
    println!(
        "{} file(s) not in spreadsheets, {} not processed",
        report.not_in_sources.len(),
        report.not_processed.len()
    );
    Ok(())
}
