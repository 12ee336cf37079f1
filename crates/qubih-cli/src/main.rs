//! qubih Command-Line Interface
//!
//! Drives the `qubih-core` simulator from the shell: apply gates to a
//! register, evolve a state under a Pauli-sum Hamiltonian, or sample
//! measurement statistics of a single qubit.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{apply, evolve, measure, version};
use config::Config;

/// qubih - state-vector simulation of small qubit registers
#[derive(Parser)]
#[command(name = "qubih")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "QUBIH_CONFIG")]
    config: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a state under a Pauli-sum Hamiltonian
    Evolve {
        /// Hamiltonian term COEFF*PAULIS, e.g. -1.0*ZZ (repeatable)
        #[arg(long = "term", required = true, allow_hyphen_values = true)]
        terms: Vec<String>,

        /// Evolution time
        #[arg(short, long, allow_negative_numbers = true)]
        time: f64,

        /// Initial amplitudes, comma separated (defaults to |0...0⟩)
        #[arg(long, allow_hyphen_values = true)]
        state: Option<String>,

        /// Reduced Planck constant (overrides configuration)
        #[arg(long)]
        hbar: Option<f64>,
    },

    /// Apply a sequence of gates to a register
    Apply {
        /// Gate NAME, NAME(θ) or NAME(θ)@TARGET (repeatable, applied in order)
        #[arg(short, long = "gate")]
        gates: Vec<String>,

        /// Number of qubits in the register
        #[arg(short, long, default_value = "1")]
        qubits: usize,

        /// Initial amplitudes, comma separated (defaults to |0...0⟩)
        #[arg(long, allow_hyphen_values = true)]
        state: Option<String>,
    },

    /// Prepare a qubit with gates and sample measurement outcomes
    Measure {
        /// Gate NAME or NAME(θ) (repeatable, applied in order)
        #[arg(short, long = "gate")]
        gates: Vec<String>,

        /// Number of shots (overrides configuration)
        #[arg(short, long)]
        shots: Option<u32>,

        /// RNG seed (overrides configuration)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        version::execute();
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    tracing::info!(?config, "configuration loaded");

    match cli.command {
        Commands::Evolve {
            terms,
            time,
            state,
            hbar,
        } => evolve::execute(&config, &terms, time, state.as_deref(), hbar, cli.format),

        Commands::Apply {
            gates,
            qubits,
            state,
        } => apply::execute(&config, &gates, qubits, state.as_deref(), cli.format),

        Commands::Measure { gates, shots, seed } => {
            measure::execute(&config, &gates, shots, seed, cli.format)
        }

        Commands::Version => Ok(()),
    }
}
