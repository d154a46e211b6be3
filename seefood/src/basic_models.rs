use serde::{Deserialize, Serialize};

/// The structured result of one recipe extraction: the model's full reply
/// plus the two sections split out of it. The sections are non-overlapping
/// substrings of `raw_text`, or placeholder text when a marker was missing.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RecipeResponse {
    pub raw_text: String,
    pub ingredients: String,
    pub instructions: String,
}

impl std::fmt::Debug for RecipeResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeResponse")
            .field("raw_text", &self.raw_text.len())
            .field("ingredients", &self.ingredients)
            .field("instructions", &self.instructions)
            .finish()
    }
}

/// Handle for a submitted avatar-video job. The id comes back synchronously;
/// the playable URL only exists once a later status lookup reports it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct VideoJob {
    pub video_id: String,
}
