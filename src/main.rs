use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use driver_registry::{DetailsFile, DriverRecord, RegistryConfig};

/// Register a sample driver, replay an update and a run of offenses.
#[derive(Parser, Debug)]
#[command(name = "driver-registry", version, about)]
struct Cli {
    /// JSON configuration file (defaults to the regulated constants)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override where the details file is written
    #[arg(long)]
    details: Option<PathBuf>,

    /// Print the final snapshot and ledger as JSON
    #[arg(long)]
    json: bool,
}

const SAMPLE_ID: &str = "56_ada&fAB";
const SAMPLE_ADDRESS: &str = "32|Highland Street|Melbourne|Victoria|Australia";
const SAMPLE_BIRTH_DATE: &str = "27-02-2015";

const OFFENSES: [(&str, i32); 4] = [
    ("27-02-2023", 123216),
    ("26-02-2001231225", 6),
    ("25-02-2023", 5),
    ("24-02-2024", 6),
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RegistryConfig::from_file(path)?,
        None => RegistryConfig::default(),
    };
    if let Some(details) = cli.details {
        config.details_path = details;
    }

    run_demo(&config, cli.json)
}

fn run_demo(config: &RegistryConfig, json: bool) -> Result<()> {
    println!("🪪 Driver Registry v{}", driver_registry::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut record = DriverRecord::with_config(DetailsFile::new(&config.details_path), config);

    // 1. Register
    let registered = record.register(SAMPLE_ID, "John", "Doe", SAMPLE_ADDRESS, SAMPLE_BIRTH_DATE);
    println!("\n📝 register: {}", registered);

    // 2. Update (same values, rewrites the details file)
    if registered {
        let updated = record.update(SAMPLE_ID, "John", "Doe", SAMPLE_ADDRESS, SAMPLE_BIRTH_DATE);
        println!("✏️  update: {}", updated);
        println!("✓ Details written to {:?}", config.details_path);
    }

    // 3. Demerit points
    println!("\n🚦 Demerit points");
    for (offense_date, points) in OFFENSES {
        let outcome = record.accrue(offense_date, points);
        println!("   {} ({} points): {}", offense_date, points, outcome);
    }
    println!("\nSuspended: {}", record.is_suspended());

    if json {
        let summary = serde_json::json!({
            "details": record.details(),
            "ledger": record.ledger(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
