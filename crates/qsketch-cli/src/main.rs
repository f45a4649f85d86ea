//! qsketch Command-Line Interface
//!
//! Build small circuits from H, X, CX, CZ and Measure, simulate them on an
//! exact statevector and print the sampled outcome histogram.
//!
//! ```text
//! $ qsketch example bell --shots 1000
//! → Bell State (Entanglement) on 2 qubits (1000 shots)
//!     0: H q0
//!     1: CX q0 -> q1
//!
//! ✓ Results (1000 shots):
//!   (measurement appended to all qubits)
//!   00:    507 (50.70%) █████████████████████████
//!   11:    493 (49.30%) █████████████████████████
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use qsketch_sim::{SimulationService, SimulatorConfig};

mod commands;
mod policy;
mod session;

use commands::common::OutputFormat;
use commands::{example, examples, run, shell, version};
use policy::Policy;
use session::Session;

/// qsketch - statevector simulation of small quantum circuits
#[derive(Parser)]
#[command(name = "qsketch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Policy file (YAML) with qubit and shot limits
    #[arg(long, env = "QSKETCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Seed for the measurement RNG
    #[arg(long, env = "QSKETCH_SEED", global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a circuit from a JSON file
    Run {
        /// Input file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of shots (policy default if omitted)
        #[arg(short, long, env = "QSKETCH_SHOTS")]
        shots: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Simulate a prebuilt example circuit
    Example {
        /// Example name (bell, grover)
        name: String,

        /// Register size
        #[arg(short = 'n', long)]
        qubits: Option<u32>,

        /// Number of shots (policy default if omitted)
        #[arg(short, long, env = "QSKETCH_SHOTS")]
        shots: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List available examples
    Examples,

    /// Edit and simulate a circuit interactively (reads commands from stdin)
    Shell {
        /// Start with an empty circuit on this many qubits
        #[arg(short = 'n', long)]
        qubits: Option<u32>,
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
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = execute(cli);

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let policy = Policy::load_or_default(cli.config.as_deref())?;
    debug!("Policy: {:?}", policy);

    let mut config = SimulatorConfig::new();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let service = SimulationService::with_config(config);

    match cli.command {
        Commands::Run {
            input,
            shots,
            format,
        } => run::execute(&input, shots, format, &policy, &service),

        Commands::Example {
            name,
            qubits,
            shots,
            format,
        } => example::execute(&name, qubits, shots, format, &policy, &service),

        Commands::Examples => {
            examples::execute();
            Ok(())
        }

        Commands::Shell { qubits } => {
            let session = Session::new(policy, service);
            shell::execute(&session, qubits)
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
