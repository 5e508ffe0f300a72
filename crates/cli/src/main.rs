//! Cycle-level pipeline simulator CLI.
//!
//! This binary is a thin driver over the `scalar-core` engine. It performs:
//! 1. **Demo run:** Build a chip from defaults (or a JSON config), load the
//!    built-in demo program, and tick for a fixed cycle budget.
//! 2. **Reporting:** Print the retirement summary, and optionally the full
//!    end-of-run snapshot as JSON.

use clap::{Parser, Subcommand};
use std::{fs, process};

use scalar_core::isa::{Instruction, Opcode};
use scalar_core::mem::AccessSource;
use scalar_core::{Chip, Config};

#[derive(Parser, Debug)]
#[command(
    name = "scalarsim",
    author,
    version,
    about = "Cycle-level single-issue pipeline simulator",
    long_about = "Run the built-in demo program on a configurable chip.\n\nConfiguration is JSON (all fields optional; defaults apply). The demo\nprogram is a counted accumulate loop followed by a store, exercising\nthe ALU, the branch path, and the load/store unit.\n\nExamples:\n  scalarsim run\n  scalarsim run --cycles 100 --snapshot\n  scalarsim run --config chip.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the built-in demo program for a fixed number of cycles.
    Run {
        /// JSON chip configuration (defaults when omitted).
        #[arg(short, long)]
        config: Option<String>,

        /// Cycle budget for the run.
        #[arg(long, default_value_t = 32)]
        cycles: u64,

        /// Print the full end-of-run snapshot as JSON.
        #[arg(long)]
        snapshot: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            config,
            cycles,
            snapshot,
        }) => cmd_run(config.as_deref(), cycles, snapshot),
        None => {
            eprintln!("scalarsim — pass a subcommand");
            eprintln!();
            eprintln!("  scalarsim run                Demo run with defaults");
            eprintln!("  scalarsim run --cycles 100   Longer cycle budget");
            eprintln!("  scalarsim run --snapshot     Dump end-of-run state as JSON");
            eprintln!();
            eprintln!("  scalarsim --help  for full options");
            process::exit(1);
        }
    }
}

/// Runs the demo program: builds the chip, ticks for the cycle budget,
/// then prints the retirement summary (and the snapshot, if requested).
///
/// The demo seeds registers from the external port (`r0 = 0`, `r1 = 1`,
/// `r3 = 3`), accumulates `r0 += r1` until `r0 >= r3`, then stores the
/// result to `memory[0]`.
fn cmd_run(config_path: Option<&str>, cycles: u64, snapshot: bool) {
    let config = config_path.map_or_else(Config::default, load_config);

    println!(
        "Configuration: {}  (fetch {} Hz, decode {} Hz, {} mode)",
        config_path.unwrap_or("default"),
        config.clocks.fetch_hz,
        config.clocks.decode_hz,
        if config.pipeline.pipelined {
            "pipelined"
        } else {
            "non-pipelined"
        }
    );

    let mut chip = Chip::new(&config);

    if let Err(e) = seed_demo(&mut chip) {
        eprintln!("Error: demo program does not fit this configuration: {e}");
        process::exit(1);
    }

    if let Err(e) = chip.run(cycles) {
        eprintln!("\n[!] FATAL: {e}");
        println!("{}", chip.stats.summary());
        process::exit(1);
    }

    println!("{}", chip.stats.summary());

    if snapshot {
        match serde_json::to_string_pretty(&chip.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing snapshot: {e}");
                process::exit(1);
            }
        }
    }
}

/// Seeds the demo registers and loads the demo program.
///
/// # Errors
///
/// Bounds errors when the configured storage is too small for the demo.
fn seed_demo(chip: &mut Chip) -> Result<(), scalar_core::SimError> {
    chip.regs.write(0, 0, AccessSource::External)?;
    chip.regs.write(1, 1, AccessSource::External)?;
    chip.regs.write(3, 3, AccessSource::External)?;

    chip.load_program(&[
        Instruction::alu(Opcode::Add, 0, 1, 0),
        Instruction::branch(Opcode::BranchLt, 0, 3, 0),
        Instruction::store(0, 0),
    ])
}

/// Reads and parses a JSON configuration file; exits on failure.
fn load_config(path: &str) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {path}: {e}");
        process::exit(1);
    })
}
