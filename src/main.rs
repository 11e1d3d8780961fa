// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! santa - Secret Santa matching from the command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gift_match::{
    generate, reveal, Assignment, FallbackMode, MatchOptions, MatchingOutcome, Participant, Roster,
    Verdict, Wishlist, WishlistBook, DEFAULT_ATTEMPT_BUDGET,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// santa - Secret Santa matching with group exclusions
#[derive(Parser, Debug)]
#[command(name = "santa")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw an assignment for a roster
    Match {
        /// Roster JSON: [{"id": "...", "group": "..."}, ...]
        #[arg(long)]
        roster: PathBuf,

        /// Write the assignment here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing output file
        #[arg(long)]
        force: bool,

        /// Random attempts before the fallback search
        #[arg(long, default_value_t = DEFAULT_ATTEMPT_BUDGET)]
        budget: usize,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Give up after the random attempts instead of searching
        #[arg(long)]
        no_fallback: bool,
    },

    /// Report whether a roster can be matched at all
    Check {
        /// Roster JSON
        #[arg(long)]
        roster: PathBuf,
    },

    /// Show a giver their recipient and that recipient's wishlist
    Reveal {
        /// Assignment JSON written by `santa match`
        #[arg(long)]
        assignments: PathBuf,

        /// Wishlist JSON
        #[arg(long)]
        wishlists: PathBuf,

        /// The giver's identifier
        #[arg(long)]
        id: String,
    },

    /// Save a wishlist, one item per line
    Wishlist {
        /// Wishlist JSON, created if missing
        #[arg(long)]
        wishlists: PathBuf,

        /// The owner's identifier
        #[arg(long)]
        id: String,

        /// Text file with one item per line
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Match {
            roster,
            output,
            force,
            budget,
            seed,
            no_fallback,
        } => {
            let fallback = if no_fallback {
                FallbackMode::Disabled
            } else {
                FallbackMode::Guaranteed
            };
            let options = MatchOptions {
                attempt_budget: budget,
                random_seed: seed,
                fallback,
            };
            run_match(&roster, output.as_deref(), force, &options)
        }
        Commands::Check { roster } => run_check(&roster),
        Commands::Reveal {
            assignments,
            wishlists,
            id,
        } => run_reveal(&assignments, &wishlists, &id),
        Commands::Wishlist {
            wishlists,
            id,
            file,
        } => run_wishlist(&wishlists, &id, &file),
    }
}

fn run_match(
    roster_path: &Path,
    output: Option<&Path>,
    force: bool,
    options: &MatchOptions,
) -> Result<ExitCode> {
    if let Some(path) = output {
        if path.exists() && !force {
            bail!(
                "{} already exists; drawing again replaces everyone's match, pass --force to overwrite",
                path.display()
            );
        }
    }

    let roster = load_roster(roster_path)?;
    match generate(&roster, options) {
        MatchingOutcome::Matched {
            assignment,
            strategy,
        } => {
            debug!(?strategy, "matched");
            match output {
                Some(path) => {
                    write_json(path, &assignment)?;
                    info!(path = %path.display(), pairs = assignment.len(), "assignment saved");
                }
                None => println!("{}", serde_json::to_string_pretty(&assignment)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        MatchingOutcome::Infeasible(reason) => {
            eprintln!("No valid assignment exists: {reason}.");
            eprintln!("Add participants outside the largest group, or split it, and try again.");
            Ok(ExitCode::from(2))
        }
        MatchingOutcome::Exhausted { attempts } => {
            eprintln!("No assignment found after {attempts} random attempts.");
            eprintln!("Run again without --no-fallback, or raise --budget.");
            Ok(ExitCode::from(3))
        }
    }
}

fn run_check(roster_path: &Path) -> Result<ExitCode> {
    let roster = load_roster(roster_path)?;
    let verdict = gift_match::feasibility::screen(&roster);

    println!("{} participants in {} groups", roster.len(), roster.group_count());
    for (group, count) in roster.group_counts() {
        println!("  {group}: {count}");
    }
    match verdict {
        Verdict::Feasible => {
            println!("feasible");
            Ok(ExitCode::SUCCESS)
        }
        Verdict::Infeasible(reason) => {
            println!("infeasible: {reason}");
            Ok(ExitCode::from(2))
        }
    }
}

fn run_reveal(assignments: &Path, wishlists: &Path, giver: &str) -> Result<ExitCode> {
    let assignment = if assignments.exists() {
        read_json(assignments)?
    } else {
        Assignment::default()
    };
    let book = if wishlists.exists() {
        read_json(wishlists)?
    } else {
        WishlistBook::new()
    };

    let seen = reveal(&assignment, giver, &book);
    match seen.recipient {
        None => {
            println!("Matches have not been made yet.");
            Ok(ExitCode::FAILURE)
        }
        Some(recipient) => {
            println!("You are giving a gift to {recipient}.");
            if seen.wishlist.is_empty() {
                println!("{recipient} has not added a wishlist yet.");
            } else {
                println!("Their wishlist:");
                for item in seen.wishlist.items() {
                    println!("  - {item}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_wishlist(wishlists: &Path, owner: &str, file: &Path) -> Result<ExitCode> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read wishlist items from {}", file.display()))?;
    let mut book = if wishlists.exists() {
        read_json(wishlists)?
    } else {
        WishlistBook::new()
    };

    let wishlist = Wishlist::parse(&text);
    info!(owner, items = wishlist.items().len(), "wishlist saved");
    book.set(owner, wishlist);
    write_json(wishlists, &book)?;
    Ok(ExitCode::SUCCESS)
}

fn load_roster(path: &Path) -> Result<Roster> {
    let participants: Vec<Participant> = read_json(path)?;
    Roster::from_participants(participants)
        .with_context(|| format!("Invalid roster in {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text + "\n").with_context(|| format!("Failed to write {}", path.display()))
}
