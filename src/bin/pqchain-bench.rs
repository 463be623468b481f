#![forbid(unsafe_code)]
//! Ledger benchmark: build a full block of signed transfers and time its validation.

use clap::Parser;
use colored::*;
use pqchain::bench::{run_ledger_benchmark, LedgerReport};
use pqchain::config::{load_config, DEFAULT_CONFIG_PATH};
use pqchain::crypto::{Algorithm, SignatureBackend};
use pqchain::report::status_label;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Signature algorithm, e.g. ML-DSA-65 or falcon-1024 (overrides the config file)
    #[arg(long)]
    algorithm: Option<Algorithm>,
    /// Number of keypairs generated for the wallet keygen timing
    #[arg(long)]
    wallets: Option<usize>,
    /// Number of transfers placed in the benchmark block
    #[arg(long)]
    transactions: Option<usize>,
    /// Number of timed validations of the block
    #[arg(long)]
    iterations: Option<usize>,
    /// Verify signatures on the rayon thread pool
    #[arg(long)]
    parallel: bool,
    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(wallets) = cli.wallets {
        config.benchmark.wallets = wallets;
    }
    if let Some(transactions) = cli.transactions {
        config.benchmark.transactions_per_block = transactions;
    }
    if let Some(iterations) = cli.iterations {
        config.benchmark.validation_iterations = iterations;
    }
    if cli.parallel {
        config.benchmark.parallel_validation = true;
    }

    let backend = match cli.algorithm {
        Some(algorithm) => SignatureBackend::new(algorithm)?,
        None => SignatureBackend::from_config(&config.algorithm)?,
    };
    let report = run_ledger_benchmark(Arc::new(backend), &config.benchmark)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.tampered_rejected {
        return Err("tampered block was accepted".into());
    }
    Ok(())
}

fn print_report(report: &LedgerReport) {
    println!(
        "{} {}",
        "Ledger benchmark:".bright_cyan().bold(),
        report.algorithm.bright_yellow()
    );
    println!(
        "Generated {} keypairs in {:.2} ms ({:.2} us each)",
        report.wallet_keygen.iterations,
        report.wallet_keygen.total_ms,
        report.wallet_keygen.average_us
    );
    println!(
        "Signed {} transactions in {:.2} ms",
        report.tx_sign.iterations, report.tx_sign.total_ms
    );
    println!(
        "Avg tx sign time (in block context): {:.2} us",
        report.tx_sign.average_us
    );
    println!(
        "Created block with {} transactions in {:.2} ms",
        report.block.transaction_count, report.block_creation.total_ms
    );

    if let Some(tx) = &report.first_transaction {
        println!("\n{}", "First transaction".bright_cyan());
        println!("{}", tx.to_table());
    }

    println!("\n{}", "Block".bright_cyan());
    println!("{}", report.block.to_table());

    println!(
        "\nTampered signature rejected: {}",
        status_label(report.tampered_rejected)
    );

    let mode = if report.parallel_validation {
        "parallel"
    } else {
        "sequential"
    };
    println!(
        "Validated {} times ({}): {:.2} ms total, {:.2} ms per block, {:.1} blocks/s",
        report.validation.iterations,
        mode,
        report.validation.total_ms,
        report.validation.average_us / 1000.0,
        report.validation.per_second()
    );
    println!("Avg verify time per tx: {:.2} us", report.verify_per_tx_us);
}
