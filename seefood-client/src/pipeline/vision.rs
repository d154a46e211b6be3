use seefood::basic_models::RecipeResponse;
use serde_json::json;

use super::parse::split_sections;
use super::reqwest_client;
use crate::errors::ExtractError;

pub const DEFAULT_API_BASE: &str = "https://api.mistral.ai/v1";
const MODEL: &str = "pixtral-12b-2409";

/// The section markers in this prompt are what `parse::split_sections` keys
/// off, so the two must change together.
pub const PROMPT: &str = "What's the recipe for this food? Return two parts: one for the recipe and one for the ingredients, Please provide the recipe using the following format:\n\n### Recipe: {Recipe Title}\n\n#### Ingredients:\n{List of Ingredients}\n\n#### Instructions:\n1. {Step 1}\n2. {Step 2}\n...\n";

/// Sends one photo to the vision model and splits its reply into sections.
///
/// `image_base64` is the bare base64 payload (no data-URL prefix). The API
/// key is read from `MISTRAL_API_KEY` at call time. `api_base` overrides the
/// Mistral endpoint, mainly for tests.
///
/// This always yields a `RecipeResponse` for any reply text the model sends;
/// only transport problems, a non-2xx status, or a response envelope without
/// message content are errors, and none of them are retried.
pub async fn extract_recipe(
    image_base64: &str,
    api_base: Option<&str>,
) -> Result<RecipeResponse, ExtractError> {
    if image_base64.is_empty() {
        tracing::error!("No image to submit.");
        return Err(ExtractError::EmptyImage);
    }
    let api_key = dotenvy::var("MISTRAL_API_KEY").map_err(|_| ExtractError::MissingApiKey)?;
    let api_base = api_base.unwrap_or(DEFAULT_API_BASE);

    let body = json!({
        "model": MODEL,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": PROMPT },
                {
                    "type": "image_url",
                    "image_url": format!("data:image/jpeg;base64,{image_base64}"),
                },
            ],
        }],
    });

    let response = reqwest_client
        .post(format!("{api_base}/chat/completions"))
        .bearer_auth(&api_key)
        .json(&body)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ExtractError::BadStatus(response.status()));
    }
    let envelope: serde_json::Value = response.json().await?;

    let content = envelope
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .ok_or(ExtractError::MissingContent)?;
    tracing::debug!("Model reply: {content}");

    let (ingredients, instructions) = split_sections(content);
    Ok(RecipeResponse {
        raw_text: content.to_string(),
        ingredients,
        instructions,
    })
}
