#![forbid(unsafe_code)]
//! Oracle benchmark: raw keygen, sign and verify timings for one algorithm.

use clap::Parser;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use pqchain::bench::{run_crypto_benchmark, CryptoReport};
use pqchain::config::{load_config, DEFAULT_CONFIG_PATH};
use pqchain::crypto::{Algorithm, SignatureBackend};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Signature algorithm, e.g. ML-DSA-44 or falcon512 (overrides the config file)
    #[arg(long)]
    algorithm: Option<Algorithm>,
    /// Benchmark every bundled algorithm in turn
    #[arg(long, conflicts_with = "algorithm")]
    all: bool,
    /// Number of timed key generations
    #[arg(long)]
    keygen_iterations: Option<usize>,
    /// Number of timed sign/verify rounds
    #[arg(long)]
    sign_iterations: Option<usize>,
    /// Length of each random message in bytes
    #[arg(long)]
    message_len: Option<usize>,
    /// Seed for the message generator
    #[arg(long)]
    seed: Option<u64>,
    /// Print the reports as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(n) = cli.keygen_iterations {
        config.benchmark.keygen_iterations = n;
    }
    if let Some(n) = cli.sign_iterations {
        config.benchmark.sign_iterations = n;
    }
    if let Some(n) = cli.message_len {
        config.benchmark.message_len = n;
    }
    if let Some(seed) = cli.seed {
        config.benchmark.seed = seed;
    }

    let algorithms: Vec<Algorithm> = if cli.all {
        Algorithm::ALL
            .into_iter()
            .filter(|a| SignatureBackend::new(*a).is_ok())
            .collect()
    } else {
        match cli.algorithm {
            Some(algorithm) => vec![algorithm],
            None => vec![config.algorithm.resolve()?],
        }
    };

    let mut reports = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        if !cli.json {
            println!(
                "{} {}",
                "Benchmarking".bright_cyan(),
                algorithm.name().bright_yellow()
            );
        }
        let backend = SignatureBackend::new(algorithm)?;
        reports.push(run_crypto_benchmark(&backend, &config.benchmark)?);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", render_table(&reports));
        println!(
            "{} {} sign/verify rounds over {}-byte messages (seed {})",
            "✓".green().bold(),
            config.benchmark.sign_iterations,
            config.benchmark.message_len,
            config.benchmark.seed
        );
    }
    Ok(())
}

fn render_table(reports: &[CryptoReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Algorithm",
        "PK bytes",
        "SK bytes",
        "Sig bytes (max)",
        "Keygen us",
        "Sign us",
        "Verify us",
    ]);
    for report in reports {
        table.add_row(vec![
            report.algorithm.clone(),
            report.public_key_size.to_string(),
            report.secret_key_size.to_string(),
            format!(
                "{} ({})",
                report.sample_signature_size, report.max_signature_size
            ),
            format!("{:.1}", report.keygen.average_us),
            format!("{:.1}", report.sign.average_us),
            format!("{:.1}", report.verify.average_us),
        ]);
    }
    table
}
