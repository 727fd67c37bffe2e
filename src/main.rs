use anyhow::Context;
use clap::{Parser, Subcommand};
use pvshuffle::engine::extent::NamedExtents;
use pvshuffle::engine::layout::{Layout, PlanSnapshot};
use pvshuffle::engine::planner::MovePlanner;
use pvshuffle::engine::report::{Segment, parse_pvs_report};
use pvshuffle::logging;
use pvshuffle::shared::config::CONFIG;
use pvshuffle::shared::response::OutputFormat;
use std::fs;
use std::io::{self, Read, Write};
use tracing::info;

#[derive(Parser)]
#[command(name = "pvshuffle")]
#[command(about = "Plan physical-volume segment relocations as pvmove steps", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert `pvs --segments --reportformat json` output into a segment list
    Parse {
        /// Report file, or `-` for stdin
        report: String,
    },

    /// Plan the moves that turn the original layout into the edited one
    Plan {
        /// Edited segment list, or `-` for stdin
        segments: String,

        /// text, json or pvmove (defaults to `output.format` from config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Allow moves that start and end on this device
        #[arg(long, value_name = "DEVICE")]
        allow_local: Vec<String>,

        /// Allow moves into this device to be cut on both sides
        #[arg(long, value_name = "DEVICE")]
        allow_split: Vec<String>,

        /// Never stage other devices' data on this device
        #[arg(long, value_name = "DEVICE")]
        no_indirect: Vec<String>,
    },

    /// Move an occupied entry to a new position and print the edited list
    Move {
        segments: String,

        #[arg(long)]
        from: String,

        /// Entry index on the source device
        #[arg(long)]
        index: usize,

        #[arg(long)]
        to: String,

        /// Insertion index on the target device
        #[arg(long)]
        position: usize,
    },

    /// Group each volume's segments on a device in logical order
    Sort {
        segments: String,

        #[arg(long)]
        device: String,
    },
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

fn read_segments(path: &str) -> anyhow::Result<Vec<Segment>> {
    let input = read_input(path)?;
    serde_json::from_str(&input).with_context(|| format!("Invalid segment list in {path}"))
}

fn print_segments(segments: &[Segment]) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, segments)?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&CONFIG.logging)?;

    match args.command {
        Command::Parse { report } => {
            let segments = parse_pvs_report(&read_input(&report)?)?;
            print_segments(&segments)?;
        }

        Command::Plan {
            segments,
            format,
            allow_local,
            allow_split,
            no_indirect,
        } => {
            let format = match format {
                Some(format) => format,
                None => CONFIG
                    .output
                    .format
                    .parse()
                    .map_err(anyhow::Error::msg)?,
            };

            let mut devices = CONFIG.devices.clone();
            for device in &allow_local {
                devices.override_mut(device).local_allowed = true;
            }
            for device in &allow_split {
                devices.override_mut(device).split_allowed = true;
            }
            for device in &no_indirect {
                devices.override_mut(device).indirect_allowed = false;
            }

            let mut snapshot = PlanSnapshot::from_segments(&read_segments(&segments)?)?;
            snapshot.apply_policies(&devices);

            let mut used = NamedExtents::new();
            let requests = std::mem::take(&mut snapshot.requests);
            let outcome = MovePlanner::default()
                .plan(requests, &mut snapshot.free, &mut used)
                .inspect_err(|e| e.log_error())?;

            let mut stdout = io::stdout().lock();
            stdout.write_all(&format.renderer().render(&outcome))?;
            stdout.flush()?;
            info!(
                moves = outcome.moves.len(),
                failed = outcome.failed_moves.len(),
                "Plan rendered"
            );
            if !outcome.is_complete() {
                std::process::exit(2);
            }
        }

        Command::Move {
            segments,
            from,
            index,
            to,
            position,
        } => {
            let mut layout = Layout::from_segments(&read_segments(&segments)?);
            layout.move_entry(&from, index, &to, position)?;
            print_segments(&layout.to_segments())?;
        }

        Command::Sort { segments, device } => {
            let mut layout = Layout::from_segments(&read_segments(&segments)?);
            layout.sort_device(&device)?;
            print_segments(&layout.to_segments())?;
        }
    }

    Ok(())
}
