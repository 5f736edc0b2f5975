//! Gardenlink CLI

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gardenlink::GardenEngine;
use gardenlink_core::{ConfigProfile, EngineConfig, NoteId, NoteSnapshot};
use serde::Serialize;
use std::path::PathBuf;

/// Gardenlink - wiki-link resolution and garden analytics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the array of notes
    #[arg(short, long, env = "GARDENLINK_NOTES")]
    notes: PathBuf,

    /// YAML engine configuration (overrides --profile)
    #[arg(short, long, env = "GARDENLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration profile to use (standard, large-garden, minimal)
    #[arg(short, long, default_value = "standard")]
    profile: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Every resolved link occurrence
    Links,
    /// Notes linking to a note
    Backlinks { id: String },
    /// Notes nothing else links to
    Orphans,
    /// Unresolved links with suggestions
    Broken,
    /// Notes most similar to a note
    Similar { id: String },
    /// Fuzzy search over titles, content and tags
    Search { query: String },
    /// Nodes and edges for drawing
    Graph,
    /// Link texts by occurrence count
    Frequency,
    /// Health report and score
    Health,
    /// Dashboard statistics as of now
    Stats,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level.as_str()))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Gardenlink v{}", env!("CARGO_PKG_VERSION"));

    let engine = GardenEngine::new(load_config(&args)?)?;
    let snapshot = NoteSnapshot::load(&args.notes)
        .with_context(|| format!("Failed to load notes from {}", args.notes.display()))?;

    log::info!("Loaded {} notes from {}", snapshot.len(), args.notes.display());

    run(&engine, &snapshot, &args.command)
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    if let Some(path) = &args.config {
        return EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let profile: ConfigProfile = args.profile.parse()?;
    log::debug!("Using profile '{}'", profile.name());
    Ok(profile.create_config())
}

fn run(engine: &GardenEngine, snapshot: &NoteSnapshot, command: &Command) -> Result<()> {
    match command {
        Command::Links => print_json(&engine.resolve(snapshot)),
        Command::Backlinks { id } => print_json(&engine.backlinks(snapshot, &NoteId::from(id.as_str()))?),
        Command::Orphans => print_json(&engine.orphans(snapshot)),
        Command::Broken => print_json(&engine.broken_links(snapshot)),
        Command::Similar { id } => print_json(&engine.similar(snapshot, &NoteId::from(id.as_str()))?),
        Command::Search { query } => print_json(&engine.search(snapshot, query)),
        Command::Graph => print_json(&engine.view(snapshot)),
        Command::Frequency => print_json(&engine.frequency(snapshot)),
        Command::Health => print_json(&engine.health(snapshot)),
        Command::Stats => print_json(&engine.stats(snapshot, Utc::now())),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
