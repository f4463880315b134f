// SPDX-License-Identifier: GPL-3.0-or-later
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use arlo_config::load as load_config;
use arlo_musicbrainz::{ArtistLookup, LookupError, MusicBrainzClient};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

mod output;

use output::{render, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "arlo")]
#[command(about = "Search MusicBrainz artists")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search artists by name
    Search(SearchArgs),

    /// Show a single artist by MusicBrainz ID
    Show(ShowArgs),

    /// Read queries from stdin, one per line, as a search box would send them
    Interactive(InteractiveArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Artist name to search for
    #[arg(value_name = "QUERY")]
    query: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Only print the first N results
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// MusicBrainz artist ID
    #[arg(value_name = "MBID")]
    mbid: Uuid,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct InteractiveArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(log_level(cli.verbose, &config.telemetry.log_level));
    debug!(target: "cli", ?config, "starting");

    let lookup = ArtistLookup::from_config(&config.musicbrainz)
        .context("failed to build MusicBrainz client")?;

    match cli.command {
        Commands::Search(args) => search(&lookup, args).await,
        Commands::Show(args) => show(lookup.client(), args).await,
        Commands::Interactive(args) => interactive(&lookup, args).await,
    }
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn log_level(verbose: bool, configured: &str) -> &str {
    if verbose {
        "debug"
    } else {
        configured
    }
}

async fn search(lookup: &ArtistLookup, args: SearchArgs) -> Result<()> {
    let mut artists = lookup
        .lookup(&args.query)
        .await
        .with_context(|| format!("artist search for '{}' failed", args.query))?;

    if let Some(limit) = args.limit {
        artists.truncate(limit);
    }

    println!("{}", render(&artists, args.format)?);
    Ok(())
}

async fn show(client: &MusicBrainzClient, args: ShowArgs) -> Result<()> {
    let artist = client
        .lookup_artist(args.mbid)
        .await
        .with_context(|| format!("artist lookup for {} failed", args.mbid))?;

    println!("{}", render(std::slice::from_ref(&artist), args.format)?);
    Ok(())
}

async fn interactive(lookup: &ArtistLookup, args: InteractiveArgs) -> Result<()> {
    info!(
        target: "cli",
        "reading queries from stdin (throttle window {:?})",
        lookup.window()
    );

    run_interactive(
        lookup,
        args.format,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
        shutdown_signal(),
    )
    .await
}

/// Feed each non-blank input line to the throttled lookup until EOF or `shutdown`.
async fn run_interactive<R, O, E, S>(
    lookup: &ArtistLookup,
    format: OutputFormat,
    input: R,
    out: &mut O,
    err: &mut E,
    shutdown: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    O: Write,
    E: Write,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown => break,
        };

        let Some(line) = line else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        match lookup.lookup(query).await {
            Ok(artists) => {
                writeln!(out, "> {}", query)?;
                writeln!(out, "{}", render(&artists, format)?)?;
            }
            Err(LookupError::Throttled) => {
                debug!(target: "cli", query, "skipped");
            }
            Err(e) => {
                writeln!(err, "lookup for '{}' failed: {}", query, e)?;
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No handler could be installed; rely on EOF to stop.
        std::future::pending::<()>().await;
    }

    info!(target: "cli", "shutdown signal received");
}
