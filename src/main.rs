mod config;
mod error;
mod executor;
mod icons;
mod matcher;
mod model;
mod packages;
mod search;
mod sources;
mod uri;

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use crate::config::load_config;
use crate::icons::ThemeIconLoader;
use crate::model::{Entry, Target};
use crate::search::SearchState;
use crate::sources::{Source, custom::CustomLaunchables, desktop::DesktopSource};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the per-user one
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the results for a query
    Search {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        query: Vec<String>,
    },
    /// Launch a result, counted from 1
    Launch {
        index: usize,
        query: Vec<String>,
    },
    /// Write a result's icon as PNG
    Icon {
        index: usize,
        query: Vec<String>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let desktop = DesktopSource::new(&config.sources.application_dirs);

    let custom = if config.sources.custom_launchables {
        let custom = CustomLaunchables::new(&desktop);
        info!("Maps shortcuts available: {}", custom.maps_available());
        Some(custom)
    } else {
        None
    };

    let mut state = SearchState::new(config.clone(), custom);
    if config.sources.scan_desktop {
        match desktop.scan() {
            Ok(entries) => state.set_entries(entries),
            Err(e) => warn!("Desktop scan failed: {}", e),
        }
    }

    match args.command {
        Commands::Search { json, query } => {
            state.update_query(&query.join(" "));
            if json {
                println!("{}", serde_json::to_string_pretty(state.results())?);
            } else if state.results().is_empty() {
                println!("No results for '{}'", state.query());
            } else {
                for (i, entry) in state.results().iter().enumerate() {
                    println!("{:>3}. {:<32} [{}] {}", i + 1, entry.label(), entry.kind(), describe(entry));
                }
            }
        }
        Commands::Launch { index, query } => {
            state.update_query(&query.join(" "));
            let entry = select(&state, index)?;
            executor::execute(entry, &config, &desktop)
                .with_context(|| format!("launching {}", entry.label()))?;
        }
        Commands::Icon { index, query, output } => {
            state.update_query(&query.join(" "));
            let entry = select(&state, index)?;
            let loader = ThemeIconLoader::new();
            let icon = entry
                .icon(&loader, config.general.icon_size)
                .with_context(|| format!("{} has no icon", entry.label()))?;
            icon.save_png(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("Wrote {}x{} icon to {:?}", icon.width(), icon.height(), output);
        }
    }

    Ok(())
}

fn select(state: &SearchState, index: usize) -> Result<&Entry> {
    index
        .checked_sub(1)
        .and_then(|i| state.get(i))
        .with_context(|| format!("no result #{} for '{}'", index, state.query()))
}

fn describe(entry: &Entry) -> &str {
    match entry.target() {
        Target::Command { command, .. } => command,
        Target::Intent(intent) => &intent.uri,
    }
}
