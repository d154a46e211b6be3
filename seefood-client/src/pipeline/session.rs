use seefood::basic_models::RecipeResponse;

use super::encode_image;
use super::video::{synthesize_video, PollSettings};
use super::vision::extract_recipe;
use crate::errors::VideoError;

/// The display slots for one session: each is independently optional, and a
/// failed operation leaves its slot untouched rather than clearing it.
///
/// Overlapping submissions are serialized by a monotonic sequence token:
/// `begin_submission` bumps it, commits carry the token they started with,
/// and commits from a superseded submission are discarded.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    pub image_base64: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub video_url: Option<String>,
    pub submitting: bool,
    seq: u64,
}

impl SessionState {
    pub fn begin_submission(&mut self) -> u64 {
        self.seq += 1;
        self.submitting = true;
        self.seq
    }

    fn is_current(&self, token: u64) -> bool {
        if token != self.seq {
            tracing::debug!("Discarding result from superseded submission {token}");
            return false;
        }
        true
    }

    pub fn commit_image(&mut self, token: u64, encoded: String) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.image_base64 = Some(encoded);
        true
    }

    pub fn commit_recipe(&mut self, token: u64, recipe: &RecipeResponse) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.ingredients = Some(recipe.ingredients.clone());
        self.instructions = Some(recipe.instructions.clone());
        true
    }

    pub fn commit_video_url(&mut self, token: u64, url: String) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.video_url = Some(url);
        true
    }

    pub fn finish_submission(&mut self, token: u64) {
        if token == self.seq {
            self.submitting = false;
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions<'a> {
    /// Vision API base URL override, `None` for the Mistral default.
    pub llm_api_base: Option<&'a str>,
    /// Avatar-video API base URL override, `None` for the HeyGen default.
    pub video_api_base: Option<&'a str>,
    pub poll: PollSettings,
    pub skip_video: bool,
}

/// Runs one full submission: encode the photo, extract the recipe, then
/// (on success) synthesize the spoken-instructions video.
///
/// Errors never escape here. Each stage's failure is logged and its state
/// slot left as it was, so the display keeps whatever the last successful
/// submission produced. A video `Timeout` is expected operation, not a
/// failure: the slot stays empty and the caller falls back to a placeholder.
pub async fn run_submission(
    state: &mut SessionState,
    image_bytes: &[u8],
    opts: &SubmitOptions<'_>,
) {
    let token = state.begin_submission();
    let encoded = encode_image(image_bytes);
    state.commit_image(token, encoded.clone());

    match extract_recipe(&encoded, opts.llm_api_base).await {
        Ok(recipe) => {
            let committed = state.commit_recipe(token, &recipe);
            if committed && !opts.skip_video {
                match synthesize_video(&recipe.instructions, opts.video_api_base, opts.poll).await {
                    Ok(url) => {
                        state.commit_video_url(token, url);
                    }
                    Err(VideoError::Timeout { video_id, attempts }) => {
                        tracing::warn!(
                            "Video {video_id} not ready after {attempts} checks, leaving placeholder"
                        );
                    }
                    Err(err) => tracing::error!("Error synthesizing video: {err}"),
                }
            }
        }
        Err(err) => tracing::error!("Error submitting image: {err}"),
    }
    state.finish_submission(token);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    #[test]
    fn stale_commits_are_discarded() {
        let mut state = SessionState::default();
        let first = state.begin_submission();
        let second = state.begin_submission();

        assert!(!state.commit_video_url(first, "https://cdn/old.mp4".to_string()));
        assert_eq!(state.video_url, None);

        assert!(state.commit_video_url(second, "https://cdn/new.mp4".to_string()));
        assert_eq!(state.video_url.as_deref(), Some("https://cdn/new.mp4"));

        state.finish_submission(first);
        assert!(state.submitting);
        state.finish_submission(second);
        assert!(!state.submitting);
    }

    #[tokio::test]
    async fn full_chain_fills_every_slot() {
        std::env::set_var("MISTRAL_API_KEY", "test-key");
        std::env::set_var("HEYGEN_API_KEY", "test-key");
        let mut server = Server::new_async().await;
        let raw = "#### Ingredients:\n- Flour\n- Sugar\n#### Instructions:\n1. Mix\n2. Bake";
        let _chat = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(
                json!({ "choices": [{ "message": { "content": raw } }] }).to_string(),
            )
            .create();
        let _submit = server
            .mock("POST", "/v2/video/generate")
            .with_status(200)
            .with_body(r#"{"data":{"video_id":"abc123"}}"#)
            .create();
        let _status = server
            .mock("GET", "/v1/video_status.get")
            .match_query(mockito::Matcher::UrlEncoded(
                "video_id".into(),
                "abc123".into(),
            ))
            .with_status(200)
            .with_body(r#"{"video_url":"https://cdn/x.mp4"}"#)
            .create();

        let url = server.url();
        let opts = SubmitOptions {
            llm_api_base: Some(&url),
            video_api_base: Some(&url),
            poll: PollSettings {
                interval: std::time::Duration::from_millis(1),
                max_attempts: 3,
            },
            skip_video: false,
        };
        let mut state = SessionState::default();
        run_submission(&mut state, b"jpeg bytes", &opts).await;

        assert!(state.image_base64.is_some());
        assert_eq!(state.ingredients.as_deref(), Some("- Flour\n- Sugar"));
        assert_eq!(state.instructions.as_deref(), Some("1. Mix\n2. Bake"));
        assert_eq!(state.video_url.as_deref(), Some("https://cdn/x.mp4"));
        assert!(!state.submitting);
    }

    #[tokio::test]
    async fn failed_extraction_leaves_previous_state() {
        std::env::set_var("MISTRAL_API_KEY", "test-key");
        let mut server = Server::new_async().await;
        let _chat = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create();

        let url = server.url();
        let opts = SubmitOptions {
            llm_api_base: Some(&url),
            video_api_base: Some(&url),
            skip_video: true,
            ..Default::default()
        };
        let mut state = SessionState {
            ingredients: Some("- Salt".to_string()),
            instructions: Some("1. Season".to_string()),
            ..Default::default()
        };
        run_submission(&mut state, b"jpeg bytes", &opts).await;

        // Stale but valid: the failed call must not blank out the display.
        assert_eq!(state.ingredients.as_deref(), Some("- Salt"));
        assert_eq!(state.instructions.as_deref(), Some("1. Season"));
        assert_eq!(state.video_url, None);
        assert!(!state.submitting);
    }

    #[tokio::test]
    async fn video_timeout_leaves_url_unset_without_failing() {
        std::env::set_var("MISTRAL_API_KEY", "test-key");
        std::env::set_var("HEYGEN_API_KEY", "test-key");
        let mut server = Server::new_async().await;
        let raw = "#### Ingredients:\n- Flour\n#### Instructions:\n1. Mix";
        let _chat = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(
                json!({ "choices": [{ "message": { "content": raw } }] }).to_string(),
            )
            .create();
        let _submit = server
            .mock("POST", "/v2/video/generate")
            .with_status(200)
            .with_body(r#"{"data":{"video_id":"abc123"}}"#)
            .create();
        let _status = server
            .mock("GET", "/v1/video_status.get")
            .match_query(mockito::Matcher::UrlEncoded(
                "video_id".into(),
                "abc123".into(),
            ))
            .with_status(200)
            .with_body(r#"{}"#)
            .create();

        let url = server.url();
        let opts = SubmitOptions {
            llm_api_base: Some(&url),
            video_api_base: Some(&url),
            poll: PollSettings {
                interval: std::time::Duration::from_millis(1),
                max_attempts: 2,
            },
            skip_video: false,
        };
        let mut state = SessionState::default();
        run_submission(&mut state, b"jpeg bytes", &opts).await;

        assert_eq!(state.ingredients.as_deref(), Some("- Flour"));
        assert_eq!(state.video_url, None);
        assert!(!state.submitting);
    }
}
