use base64::Engine;
use reqwest::Client;

pub mod parse;
pub mod session;
pub mod video;
pub mod vision;

pub use session::{run_submission, SessionState, SubmitOptions};
pub use video::{await_video_url, submit_video, synthesize_video, PollSettings};
pub use vision::extract_recipe;

lazy_static::lazy_static! {
    pub(crate) static ref reqwest_client: Client = Client::new();
}

/// Encode raw image bytes as standard base64. The `data:image/jpeg;base64,`
/// prefix is added where the request body is built, not here.
pub fn encode_image(bytes: &[u8]) -> String {
    // For the purpose of data urls, you do NOT need to use the URL_SAFE variant
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
