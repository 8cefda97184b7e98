// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Steane code CLI
//!
//! Builds the Steane encoder, measures its syndrome on a backend and applies
//! the lookup-table correction.
//!
//! # Usage
//!
//! ```bash
//! # Run once on the default backend
//! steane-qec run
//!
//! # Run on a named backend and print the report as JSON
//! steane-qec run --backend ibm_aer_simulator --json
//!
//! # Show the encoder circuit
//! steane-qec draw encoder
//!
//! # Look a syndrome up without running anything
//! steane-qec correct 0000001
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use steane_qec::backend::{BackendRegistry, HealthStatus};
use steane_qec::code::{create_steane_code, syndrome_circuit};
use steane_qec::config::Config;
use steane_qec::correction::{Corrector, UnmappedPolicy};
use steane_qec::pipeline::{self, RunOptions, RunReport};
use steane_qec::syndrome::Syndrome;
use steane_qec::{Result, VERSION};

/// Steane [[7,1,3]] encode, syndrome extraction and correction
#[derive(Parser)]
#[command(name = "steane-qec")]
#[command(author = "QubitOS Contributors")]
#[command(version = VERSION)]
#[command(about = "Steane code encoding, syndrome extraction and lookup correction")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode, measure the syndrome and correct
    Run {
        /// Backend to execute on (registry default if omitted)
        #[arg(short, long)]
        backend: Option<String>,

        /// Shots for the syndrome measurement
        #[arg(long)]
        shots: Option<u32>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,

        /// Fail on syndromes with no table entry
        #[arg(long)]
        reject_unmapped: bool,
    },

    /// Print a circuit
    Draw {
        /// Circuit to print
        #[arg(value_enum)]
        circuit: DrawTarget,

        /// Emit OpenQASM 3 instead of a text diagram
        #[arg(long)]
        qasm: bool,
    },

    /// Apply the correction for a syndrome to the encoder circuit
    Correct {
        /// Seven-character syndrome, rightmost character is bit 0
        syndrome: String,
    },

    /// Check backend health
    Health {
        /// Specific backend to check
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// List available backends
    Backends {
        /// Also query each backend for its description and limits
        #[arg(long)]
        info: bool,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum DrawTarget {
    /// Encoder circuit
    Encoder,
    /// Syndrome-extraction circuit
    Syndrome,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging.level, &config.logging.format);

    match cli.command {
        Commands::Run {
            backend,
            shots,
            json,
            reject_unmapped,
        } => {
            // Override config with CLI args
            if let Some(shots) = shots {
                config.execution.shots = shots;
            }
            if backend.is_some() {
                config.execution.backend = backend;
            }
            if reject_unmapped {
                config.correction.unmapped = UnmappedPolicy::Reject;
            }

            config.validate()?;

            let registry = BackendRegistry::from_config(&config)?;
            let backend = registry.get_or_default(config.execution.backend.as_deref())?;

            info!(
                version = VERSION,
                backend = backend.name(),
                shots = config.execution.shots,
                "Starting Steane run"
            );

            let report = pipeline::run(backend.as_ref(), &RunOptions::from_config(&config)).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Draw { circuit, qasm } => {
            let circuit = match circuit {
                DrawTarget::Encoder => create_steane_code(),
                DrawTarget::Syndrome => syndrome_circuit()?,
            };
            if qasm {
                print!("{}", circuit.to_qasm());
            } else {
                println!("{}", circuit.draw());
            }
        }

        Commands::Correct { syndrome } => {
            let syndrome: Syndrome = syndrome.parse()?;
            let mut circuit = create_steane_code();
            let correction =
                Corrector::new(config.correction.unmapped).apply(&mut circuit, syndrome)?;

            println!("Syndrome:   {}", syndrome);
            println!("Correction: {}", correction);
            println!();
            println!("{}", circuit.draw());
        }

        Commands::Health { backend } => {
            let registry = BackendRegistry::from_config(&config)?;

            if let Some(name) = backend {
                // Check specific backend
                match registry.get(&name) {
                    Ok(b) => match b.health_check().await {
                        Ok(status) => {
                            println!("{}: {:?}", name, status);
                        }
                        Err(e) => {
                            eprintln!("{}: Error - {}", name, e);
                            std::process::exit(1);
                        }
                    },
                    Err(e) => {
                        eprintln!("Backend not found: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                // Check all backends
                let mut all_healthy = true;
                for name in registry.list() {
                    if let Ok(b) = registry.get(&name) {
                        match b.health_check().await {
                            Ok(status) => {
                                println!("{}: {:?}", name, status);
                                if status != HealthStatus::Healthy {
                                    all_healthy = false;
                                }
                            }
                            Err(e) => {
                                println!("{}: Error - {}", name, e);
                                all_healthy = false;
                            }
                        }
                    }
                }

                if !all_healthy {
                    std::process::exit(1);
                }
            }
        }

        Commands::Backends { info } => {
            let registry = BackendRegistry::from_config(&config)?;

            println!("Available backends:");
            for (name, backend_type) in registry.list_with_types() {
                let default_marker = if Some(&name) == registry.default_backend_name().as_ref() {
                    " (default)"
                } else {
                    ""
                };
                println!("  {} [{}]{}", name, backend_type, default_marker);

                if info {
                    let backend = registry.get(&name)?;
                    match backend.backend_info().await {
                        Ok(details) => {
                            println!("    qubits:   {}", details.num_qubits);
                            println!("    gates:    {}", details.supported_gates.join(", "));
                            println!("    version:  {}", details.software_version);
                        }
                        Err(e) => println!("    info unavailable: {}", e),
                    }
                    let limits = backend.resource_limits();
                    println!(
                        "    limits:   {} qubits, {} shots, {} gates",
                        limits.max_qubits, limits.max_shots, limits.max_gates
                    );
                }
            }
        }

        Commands::Config => {
            // Show effective configuration
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => match config.validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Initialize logging with tracing. Logs go to stderr so stdout stays parseable.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let layer = if format == "json" {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn print_report(report: &RunReport) {
    println!("Run:        {}", report.run_id);
    println!("Backend:    {}", report.backend);
    println!("Shots:      {}", report.shots);

    let counts: BTreeMap<_, _> = report.counts.iter().collect();
    println!("Counts:");
    for (outcome, count) in counts {
        println!("  {}: {}", outcome, count);
    }

    println!("Syndrome:   {}", report.syndrome);
    println!("Correction: {}", report.correction);
    println!();
    println!("Corrected encoder:");
    println!("{}", report.encoder.draw());
}
