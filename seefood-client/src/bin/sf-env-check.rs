use anyhow::Result;
use clap::Parser;

/// Check that the API keys the pipeline needs are configured
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {}

fn main() -> Result<()> {
    if dotenvy::dotenv().is_err() {
        eprintln!("Warning: Failed to load .env file");
    }
    Args::parse();

    let mut missing = false;
    for (key, purpose) in [
        ("MISTRAL_API_KEY", "recipe extraction (vision model)"),
        ("HEYGEN_API_KEY", "avatar video synthesis"),
    ] {
        match dotenvy::var(key) {
            Ok(_) => println!("{key}: found ({purpose})"),
            Err(_) => {
                eprintln!("{key}: MISSING ({purpose})");
                eprintln!("Please set {key} in your .env file or environment");
                missing = true;
            }
        }
    }
    if missing {
        std::process::exit(1);
    }
    println!("All keys present.");
    Ok(())
}
