pub mod gemini;
pub mod prompts;
pub mod schema;
pub mod traits;
