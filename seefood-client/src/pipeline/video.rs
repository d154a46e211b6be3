use std::time::Duration;

use seefood::basic_models::VideoJob;
use serde_json::json;
use tokio_retry::RetryIf;

use super::reqwest_client;
use crate::errors::VideoError;

pub const DEFAULT_API_BASE: &str = "https://api.heygen.com";

// Fixed presenter identity for every generated video.
const AVATAR_ID: &str = "Daisy-inskirt-20220818";
const VOICE_ID: &str = "2d5b0e6cf36f460aa7fc47e3eee4ba54";
const BACKGROUND_COLOR: &str = "#008000";

/// How the status poll behaves: one lookup, then up to `max_attempts - 1`
/// more spaced `interval` apart. Generation usually takes a while even with
/// the test flag on, so a single check almost always comes back empty.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: usize,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 10,
        }
    }
}

fn poll_strategy(poll: &PollSettings) -> impl Iterator<Item = Duration> {
    tokio_retry::strategy::FixedInterval::new(poll.interval)
        .take(poll.max_attempts.saturating_sub(1))
}

/// Submits an avatar-video job that reads the instructions aloud.
///
/// Returns the job handle as soon as the API hands back an id. The API key
/// comes from `HEYGEN_API_KEY` at call time; its absence fails this call and
/// nothing else.
pub async fn submit_video(
    instructions: &str,
    api_base: Option<&str>,
) -> Result<VideoJob, VideoError> {
    let api_key = dotenvy::var("HEYGEN_API_KEY").map_err(|_| VideoError::MissingApiKey)?;
    let api_base = api_base.unwrap_or(DEFAULT_API_BASE);

    let response = reqwest_client
        .post(format!("{api_base}/v2/video/generate"))
        .header("X-Api-Key", &api_key)
        .json(&json!({
            "video_inputs": [{
                "character": {
                    "type": "avatar",
                    "avatar_id": AVATAR_ID,
                    "avatar_style": "normal",
                },
                "voice": {
                    "type": "text",
                    "input_text": instructions,
                    "voice_id": VOICE_ID,
                },
                "background": {
                    "type": "color",
                    "value": BACKGROUND_COLOR,
                },
            }],
            "dimension": { "width": 1280, "height": 720 },
            "aspect_ratio": "16:9",
            "test": true,
        }))
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(VideoError::SubmitFailed(response.status()));
    }
    let envelope: serde_json::Value = response.json().await?;

    let video_id = envelope
        .pointer("/data/video_id")
        .and_then(|v| v.as_str())
        .ok_or(VideoError::JobNotFound)?;
    tracing::info!("Submitted video job {video_id}");
    Ok(VideoJob {
        video_id: video_id.to_string(),
    })
}

/// One status lookup. A well-formed response without a `video_url` means the
/// video is still rendering (`Pending`); a non-2xx status is a hard failure.
async fn fetch_video_url(job: &VideoJob, api_base: &str, api_key: &str) -> Result<String, VideoError> {
    let response = reqwest_client
        .get(format!("{api_base}/v1/video_status.get"))
        .query(&[("video_id", job.video_id.as_str())])
        .header("X-Api-Key", api_key)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(VideoError::StatusFetch(response.status()));
    }
    let envelope: serde_json::Value = response.json().await?;

    match envelope.pointer("/video_url").and_then(|v| v.as_str()) {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => {
            tracing::debug!("Video {} not ready yet", job.video_id);
            Err(VideoError::Pending)
        }
    }
}

/// Polls the status endpoint until the job has a playable URL.
///
/// Hard failures (transport, non-2xx) abort immediately; only `Pending`
/// lookups are retried, and exhausting the attempts yields `Timeout` so
/// callers can tell "still rendering" apart from "broken". Dropping the
/// returned future abandons the poll while the `VideoJob` handle stays
/// usable for a later try.
pub async fn await_video_url(
    job: &VideoJob,
    api_base: Option<&str>,
    poll: PollSettings,
) -> Result<String, VideoError> {
    let api_key = dotenvy::var("HEYGEN_API_KEY").map_err(|_| VideoError::MissingApiKey)?;
    let api_base = api_base.unwrap_or(DEFAULT_API_BASE);

    let url = RetryIf::spawn(
        poll_strategy(&poll),
        || fetch_video_url(job, api_base, &api_key),
        |err: &VideoError| matches!(err, VideoError::Pending),
    )
    .await
    .map_err(|err| match err {
        VideoError::Pending => VideoError::Timeout {
            video_id: job.video_id.clone(),
            attempts: poll.max_attempts,
        },
        other => other,
    })?;
    tracing::info!("Video {} ready at {url}", job.video_id);
    Ok(url)
}

/// Submit-then-poll convenience wrapper for the whole video stage.
pub async fn synthesize_video(
    instructions: &str,
    api_base: Option<&str>,
    poll: PollSettings,
) -> Result<String, VideoError> {
    let job = submit_video(instructions, api_base).await?;
    await_video_url(&job, api_base, poll).await
}
