use reqwest::StatusCode;

/// What can go wrong turning a photo into a recipe. Malformed model *text*
/// is deliberately not here: the section parser always degrades to
/// placeholder values instead of erroring.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("no image to submit")]
    EmptyImage,
    #[error("MISTRAL_API_KEY not found in the environment")]
    MissingApiKey,
    #[error("vision API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("vision API returned status {0}")]
    BadStatus(StatusCode),
    #[error("vision API response had no message content")]
    MissingContent,
}

#[derive(thiserror::Error, Debug)]
pub enum VideoError {
    #[error("HEYGEN_API_KEY not found in the environment")]
    MissingApiKey,
    #[error("video API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("video generation response returned status {0}")]
    SubmitFailed(StatusCode),
    #[error("video generation response had no video_id")]
    JobNotFound,
    #[error("video status lookup returned status {0}")]
    StatusFetch(StatusCode),
    /// One status lookup found the video still rendering. Only surfaced
    /// between poll attempts; callers see `Timeout` once attempts run out.
    #[error("video not ready yet")]
    Pending,
    #[error("video {video_id} had no URL after {attempts} status checks")]
    Timeout { video_id: String, attempts: usize },
}
