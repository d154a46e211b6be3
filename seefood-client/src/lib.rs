pub mod errors;
pub mod pipeline;
