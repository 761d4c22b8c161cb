use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "deckfit", version)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Repair a payload and assign every selected block to a layout slot.
    Run(RunArgs),
    /// Repair a payload and print the diagnostics only.
    Check(CheckArgs),
    /// Print the built-in schema catalog as JSON.
    Catalog,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input payload JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Layout catalog JSON.
    #[arg(long)]
    layouts: PathBuf,

    /// Pipeline options JSON; any subset of fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the variety window size.
    #[arg(long)]
    window: Option<usize>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input payload JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Check(args) => cmd_check(args),
        Command::Catalog => cmd_catalog(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse json '{}'", path.display()))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let payload = read_json(&args.in_path)?;
    let layouts_text = std::fs::read_to_string(&args.layouts)
        .with_context(|| format!("read layouts '{}'", args.layouts.display()))?;
    let layouts = deckfit::LayoutCatalog::from_json_str(&layouts_text)
        .with_context(|| format!("load layouts '{}'", args.layouts.display()))?;

    let mut opts = match &args.config {
        Some(path) => serde_json::from_value::<deckfit::PipelineOpts>(read_json(path)?)
            .with_context(|| format!("parse config '{}'", path.display()))?,
        None => deckfit::PipelineOpts::default(),
    };
    if let Some(window) = args.window {
        opts.assign.variety_window = window;
    }

    let pipeline = deckfit::Pipeline::new(deckfit::SchemaCatalog::standard(), &layouts, opts);
    let output = pipeline.run(&payload);
    for block in output.unassigned() {
        eprintln!("no layout slot for '{block}'");
    }

    let json = serde_json::to_string_pretty(&output).context("serialize pipeline output")?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let payload = read_json(&args.in_path)?;
    let catalog = deckfit::SchemaCatalog::standard();
    let (_, mut diagnostics) = deckfit::coerce(&payload, catalog);
    let (selection, selection_diagnostics) = deckfit::select(&payload, catalog);
    diagnostics.extend(selection_diagnostics);

    for d in &diagnostics {
        println!("{d}");
    }
    eprintln!(
        "{} blocks in {} sections, {} repairs",
        selection.selected_blocks.len(),
        selection.sections.len(),
        diagnostics.len()
    );
    Ok(())
}

fn cmd_catalog() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(deckfit::SchemaCatalog::standard())
        .context("serialize schema catalog")?;
    println!("{json}");
    Ok(())
}
