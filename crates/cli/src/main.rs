//! Superscalar scheduling simulator CLI.
//!
//! This binary is the presentation layer over the `scalarsim-core` engine.
//! It performs:
//! 1. **Program loading:** A JSON instruction list, or the bundled example.
//! 2. **Policy selection:** One of the three issue/commit combinations.
//! 3. **Stepping:** Runs the driver to completion (or a cycle budget),
//!    printing the per-cycle event summary derived from each snapshot.
//! 4. **Reporting:** Prints final run statistics, or the last snapshot as
//!    JSON for machine consumption.

use std::fs;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use scalarsim_core::program::BlockReason;
use scalarsim_core::{CycleDriver, DriverState, Policy, Program, Snapshot};

#[derive(Parser, Debug)]
#[command(
    name = "scalarsim",
    author,
    version,
    about = "Cycle-driven superscalar instruction scheduling simulator",
    long_about = "Simulates how a fixed program moves through decode, issue, execute and \
commit under a selectable scheduling policy.\n\nExamples:\n  scalarsim run\n  scalarsim run \
--policy out-out\n  scalarsim run --program program.json --policy in-out --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion, printing one summary line per cycle.
    Run {
        /// Program file: a JSON array of {id, type, deps, latency}.
        /// Defaults to the bundled six-instruction example.
        #[arg(short, long)]
        program: Option<String>,

        /// Scheduling policy (issue/commit pair).
        #[arg(long, value_enum, default_value = "in-in")]
        policy: PolicyArg,

        /// Stop after this many cycles even if not complete.
        #[arg(long, default_value_t = 1000)]
        max_cycles: u64,

        /// Print the final snapshot as JSON instead of the statistics report.
        #[arg(long)]
        json: bool,

        /// Enable engine trace output (also honors RUST_LOG).
        #[arg(short, long)]
        verbose: bool,
    },
}

/// CLI spelling of the three supported policy pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// In-order issue, in-order commit.
    InIn,
    /// In-order issue, out-of-order commit.
    InOut,
    /// Out-of-order issue, out-of-order commit.
    OutOut,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::InIn => Self::IN_IN,
            PolicyArg::InOut => Self::IN_OUT,
            PolicyArg::OutOut => Self::OUT_OUT,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            program,
            policy,
            max_cycles,
            json,
            verbose,
        } => cmd_run(program.as_deref(), policy.into(), max_cycles, json, verbose),
    }
}

/// Loads the program, steps the driver, and prints cycle summaries.
fn cmd_run(program: Option<&str>, policy: Policy, max_cycles: u64, json: bool, verbose: bool) {
    init_tracing(verbose);

    let program = match program {
        Some(path) => match load_program(path) {
            Ok(program) => program,
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        },
        None => Program::example(),
    };

    println!(
        "Program: {} instructions  Policy: {:?}/{:?}",
        program.len(),
        policy.issue(),
        policy.commit()
    );
    println!();

    let mut driver = CycleDriver::new(program, policy);
    let mut snapshot = driver.snapshot();

    while driver.state() != DriverState::Completed && driver.cycle() < max_cycles {
        snapshot = driver.step();
        print_cycle_row(&snapshot);
    }

    println!();
    if driver.state() != DriverState::Completed {
        eprintln!("warning: not complete after {max_cycles} cycles");
    }

    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: snapshot serialization failed: {err}");
                process::exit(1);
            }
        }
    } else {
        driver.stats().print();
    }
}

fn load_program(path: &str) -> Result<Program, Box<dyn std::error::Error + Send + Sync>> {
    let json = fs::read_to_string(path)?;
    Program::from_json(&json)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "trace" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// One summary line for the snapshot's own cycle.
fn print_cycle_row(snapshot: &Snapshot) {
    let summary = snapshot.cycle_summary(snapshot.cycle);
    let labels = |indices: &[usize]| -> String {
        if indices.is_empty() {
            "-".to_owned()
        } else {
            indices
                .iter()
                .map(|&i| snapshot.instructions[i].label.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        }
    };
    let stalls = if summary.stalled.is_empty() {
        "-".to_owned()
    } else {
        summary
            .stalled
            .iter()
            .map(|&(idx, reason)| {
                format!(
                    "{} ({})",
                    snapshot.instructions[idx].label,
                    render_reason(snapshot, reason)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!(
        "cycle {:>3} | decode: {:<7} | issue: {:<7} | commit: {:<7} | stalled: {}",
        snapshot.cycle,
        labels(&summary.decoded),
        labels(&summary.issued),
        labels(&summary.completed),
        stalls
    );
}

/// Renders a block reason for humans. Text belongs to the presentation
/// boundary; the engine only carries the tagged reason.
fn render_reason(snapshot: &Snapshot, reason: BlockReason) -> String {
    match reason {
        BlockReason::Dependencies => "waiting on dependencies".to_owned(),
        BlockReason::FunctionalUnitBusy => "functional unit busy".to_owned(),
        BlockReason::Order(blocking) => {
            format!("waiting for {}", snapshot.instructions[blocking].label)
        }
        BlockReason::WriteBusFull => "write bus full".to_owned(),
    }
}
