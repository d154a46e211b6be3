use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use seefood_client::pipeline::{self, run_submission, PollSettings, SessionState, SubmitOptions};

// Shown when the avatar video never materialized.
const FALLBACK_VIDEO_URL: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

/// Turn a photo of a dish into a recipe and an instructional video
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the photo of the dish
    image: PathBuf,
    /// Skip the avatar-video stage
    #[arg(long)]
    no_video: bool,
    /// Seconds between video status checks
    #[arg(long, default_value_t = 2)]
    poll_interval: u64,
    /// Maximum number of video status checks
    #[arg(long, default_value_t = 10)]
    poll_attempts: usize,
    /// Vision LLM API base URL
    #[arg(long, default_value = "https://api.mistral.ai/v1")]
    llm_api_base: String,
    /// Avatar video API base URL
    #[arg(long, default_value = "https://api.heygen.com")]
    video_api_base: String,
    /// Dry run mode: encode the image and print the prompt, no API calls
    #[arg(long)]
    dry: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    if dotenvy::dotenv().is_err() {
        eprintln!("Warning: Failed to load .env file");
    }
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let image_bytes = std::fs::read(&args.image)?;
    println!("Image: {} ({} bytes)", args.image.display(), image_bytes.len());

    if args.dry {
        println!("Dry run mode enabled, skipping API calls");
        println!(
            "Encoded image: {} base64 chars",
            pipeline::encode_image(&image_bytes).len()
        );
        println!("Prompt:\n{}", pipeline::vision::PROMPT);
        return Ok(());
    }

    let opts = SubmitOptions {
        llm_api_base: Some(&args.llm_api_base),
        video_api_base: Some(&args.video_api_base),
        poll: PollSettings {
            interval: std::time::Duration::from_secs(args.poll_interval),
            max_attempts: args.poll_attempts,
        },
        skip_video: args.no_video,
    };
    let mut state = SessionState::default();
    run_submission(&mut state, &image_bytes, &opts).await;

    println!("\nIngredients:");
    println!(
        "{}",
        state
            .ingredients
            .as_deref()
            .unwrap_or("No ingredients to display yet.")
    );
    println!("\nRecipe:");
    println!(
        "{}",
        state
            .instructions
            .as_deref()
            .unwrap_or("No recipe to display yet.")
    );
    match state.video_url {
        Some(url) => println!("\nInstruction video: {url}"),
        None => println!("\nNo videos yet but you can still watch this: {FALLBACK_VIDEO_URL}"),
    }

    Ok(())
}
