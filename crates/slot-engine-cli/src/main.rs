//! `slots` CLI -- compute appointment availability from JSON on the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Free start times for one provider on one date (stdin → stdout)
//! cat day.json | slots compute
//!
//! # Override grid and appointment length
//! slots compute -i day.json --granularity 15 --duration 45
//!
//! # Resolve the slots to UTC for a clinic timezone
//! slots compute -i day.json --date 2026-03-16 --timezone America/New_York
//!
//! # Slots for every working day in a range, or just the first one
//! slots week -i range.json
//! slots week -i range.json --first
//!
//! # Free windows and double-booking audit
//! slots free -i day.json
//! slots conflicts -i bookings.json
//! ```
//!
//! Logging goes to stderr; `-v` raises it to info, `-vv` to debug, and
//! `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::dst::DstPolicy;
use slot_engine::request::{DayRequest, RangeRequest};
use slot_engine::schedule::weekday_index;
use slot_engine::slots::{BookedInterval, SlotOptions};
use slot_engine::{find_booking_conflicts, find_first_available, WeeklySchedule};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment-slot availability calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with default slot options ({"granularity_minutes", "duration_minutes"})
    #[arg(long, global = true)]
    config: Option<String>,

    /// Step between candidate start times, in minutes
    #[arg(long, global = true, env = "SLOTS_GRANULARITY")]
    granularity: Option<u32>,

    /// Length of the appointment being booked, in minutes
    #[arg(long, global = true, env = "SLOTS_DURATION")]
    duration: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Free start times for one provider on one date
    Compute {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Date of the slots; with --timezone, prints UTC instants
        #[arg(long, requires = "timezone")]
        date: Option<NaiveDate>,
        /// IANA timezone of the clinic (e.g., "America/New_York")
        #[arg(long, requires = "date")]
        timezone: Option<String>,
        /// How to treat slots inside a spring-forward gap
        #[arg(long, value_enum, default_value_t = DstArg::WallClock)]
        dst: DstArg,
    },
    /// Slots for each working day in a date range
    Week {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print only the first available slot
        #[arg(long)]
        first: bool,
        /// With --first, ignore slots starting before this local time (YYYY-MM-DDTHH:MM:SS)
        #[arg(long, requires = "first")]
        not_before: Option<NaiveDateTime>,
    },
    /// Free windows between bookings inside working hours
    Free {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report bookings that overlap each other
    Conflicts {
        /// JSON array of bookings (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DstArg {
    Skip,
    ShiftForward,
    WallClock,
}

impl From<DstArg> for DstPolicy {
    fn from(arg: DstArg) -> Self {
        match arg {
            DstArg::Skip => DstPolicy::Skip,
            DstArg::ShiftForward => DstPolicy::ShiftForward,
            DstArg::WallClock => DstPolicy::WallClock,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let defaults = load_config(cli.config.as_deref())?;
    let resolve = |request_options: SlotOptions| {
        let mut options = defaults.unwrap_or(request_options);
        if let Some(g) = cli.granularity {
            options.granularity_minutes = g;
        }
        if let Some(d) = cli.duration {
            options.duration_minutes = d;
        }
        debug!(
            granularity_minutes = options.granularity_minutes,
            duration_minutes = options.duration_minutes,
            "slot options resolved"
        );
        options
    };

    match cli.command {
        Commands::Compute {
            input,
            output,
            date,
            timezone,
            dst,
        } => {
            let mut request = DayRequest::from_json(&read_input(input.as_deref())?)
                .context("Failed to parse day request")?;
            request.options = resolve(request.options);

            if let Some(date) = date {
                let weekday = weekday_index(date.weekday());
                if weekday != request.template.weekday {
                    anyhow::bail!(
                        "Date {} is a {} (weekday {}), but the working hours are for weekday {}",
                        date,
                        date.weekday(),
                        weekday,
                        request.template.weekday
                    );
                }
            }

            let slots = request
                .available_slots()
                .context("Failed to compute available slots")?;
            info!(count = slots.len(), "computed available slots");

            let json = match (date, timezone) {
                (Some(date), Some(tz)) => {
                    let zoned = slot_engine::zoned::to_utc_instants(
                        date,
                        &slots,
                        request.options.duration_minutes,
                        &tz,
                        dst.into(),
                    )
                    .context("Failed to resolve slots in timezone")?;
                    serde_json::to_string_pretty(&zoned)?
                }
                _ => serde_json::to_string_pretty(&slots)?,
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Week {
            input,
            output,
            first,
            not_before,
        } => {
            let mut request = RangeRequest::from_json(&read_input(input.as_deref())?)
                .context("Failed to parse range request")?;
            request.options = resolve(request.options);

            let json = if first {
                let schedule = WeeklySchedule::new(request.schedule.iter().cloned())
                    .context("Invalid weekly schedule")?;
                let found = find_first_available(
                    &schedule,
                    &request.bookings,
                    &request.blackout_dates,
                    request.from,
                    request.to,
                    &request.options,
                    not_before,
                )
                .context("Failed to search for the first available slot")?;
                serde_json::to_string_pretty(&found)?
            } else {
                let days = request
                    .available_days()
                    .context("Failed to compute availability range")?;
                info!(days = days.len(), "computed availability range");
                serde_json::to_string_pretty(&days)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Free { input, output } => {
            let request = DayRequest::from_json(&read_input(input.as_deref())?)
                .context("Failed to parse day request")?;
            let windows = request
                .free_windows()
                .context("Failed to compute free windows")?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&windows)?)?;
        }
        Commands::Conflicts { input, output } => {
            let bookings: Vec<BookedInterval> =
                serde_json::from_str(&read_input(input.as_deref())?)
                    .context("Failed to parse bookings")?;
            let conflicts = find_booking_conflicts(&bookings);
            if !conflicts.is_empty() {
                tracing::warn!(count = conflicts.len(), "overlapping bookings found");
            }
            write_output(output.as_deref(), &serde_json::to_string_pretty(&conflicts)?)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Read slot options from `--config`. `None` when no file was given.
fn load_config(path: Option<&str>) -> Result<Option<SlotOptions>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let options: SlotOptions = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config file: {}", path))?;
    info!(path, "loaded slot options");
    Ok(Some(options))
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
