use lazy_static::lazy_static;
use regex::Regex;

pub const NO_INGREDIENTS: &str = "No ingredients found.";
pub const NO_RECIPE: &str = "No recipe found.";

lazy_static! {
    // The markers come from the prompt template, so they are a soft contract:
    // the model usually honors them but nothing guarantees it.
    static ref INGREDIENTS: Regex =
        Regex::new(r"(?s)#### Ingredients:(.*?)#### Instructions:").unwrap();
    static ref INSTRUCTIONS: Regex = Regex::new(r"(?s)#### Instructions:(.*)").unwrap();
}

/// Split the model's free-text reply into (ingredients, instructions).
///
/// Ingredients is the text strictly between the two section markers,
/// instructions is everything after the second one, both trimmed. A missing
/// marker substitutes a placeholder instead of failing, so this never errors
/// no matter how badly the model ignored the prompt format.
pub fn split_sections(raw: &str) -> (String, String) {
    let ingredients = match INGREDIENTS.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => NO_INGREDIENTS.to_string(),
    };
    let instructions = match INSTRUCTIONS.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => NO_RECIPE.to_string(),
    };
    (ingredients, instructions)
}
