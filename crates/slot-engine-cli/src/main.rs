//! `slots` CLI — compute bookable appointment slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Compute one day's slots (stdin → stdout)
//! slots compute < input.json
//!
//! # From file to file, pinning "now" for reproducible output
//! slots compute -i input.json -o slots.json --now 2026-03-16T08:00:00Z
//!
//! # Check a weekly recurrence rule against a day of week (0 = Sunday)
//! slots matches --rule "FREQ=WEEKLY;BYDAY=MO,WE" --day 1
//!
//! # List the open dates of a schedule over a range
//! slots days -i schedule.json --from 2026-03-16 --to 2026-03-31
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=slot_engine=debug` to trace each
//! stage of the computation.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slot_engine::{AvailabilityInput, Schedule, TimeRange};
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Bookable appointment slot calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the bookable slots for one day
    Compute {
        /// Input JSON file with an availability request (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Override the request's "now" (RFC 3339)
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Check whether a weekly recurrence rule fires on a day of the week
    Matches {
        /// Rule such as "FREQ=WEEKLY;BYDAY=MO,WE"
        #[arg(long)]
        rule: String,
        /// Day of week, 0 = Sunday through 6 = Saturday
        #[arg(long)]
        day: u8,
    },
    /// List the dates in a range that have at least one bookable slot
    Days {
        /// Input JSON file with `schedule` and `busy` (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Evaluate minimum notice against this instant instead of the clock (RFC 3339)
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
}

/// Input document for the `days` subcommand.
#[derive(Deserialize)]
struct DaysRequest {
    schedule: Schedule,
    #[serde(default)]
    busy: Vec<TimeRange>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            input,
            output,
            now,
            pretty,
        } => {
            let raw = read_input(input.as_deref())?;
            let mut request: AvailabilityInput =
                serde_json::from_str(&raw).context("Failed to parse availability request")?;
            if let Some(now) = now {
                request.now = now;
            }

            let slots = slot_engine::calculate_available_slots(&request)
                .context("Unable to compute availability")?;
            info!(date = %request.date, slots = slots.len(), "computed slots");

            let json = if pretty {
                serde_json::to_string_pretty(&slots)?
            } else {
                serde_json::to_string(&slots)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Matches { rule, day } => {
            println!("{}", slot_engine::recurrence::matches(&rule, day));
        }
        Commands::Days {
            input,
            from,
            to,
            now,
        } => {
            let raw = read_input(input.as_deref())?;
            let request: DaysRequest =
                serde_json::from_str(&raw).context("Failed to parse schedule request")?;
            let now = now.unwrap_or_else(Utc::now);

            let days = request
                .schedule
                .bookable_days(from, to, &request.busy, now)
                .context("Unable to compute availability")?;
            info!(%from, %to, open = days.len(), "computed bookable days");

            for day in days {
                println!("{day}");
            }
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable. Level comes from `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid RFC 3339 instant: {}", s))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
