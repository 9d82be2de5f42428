pub mod parser;
pub mod prompt;
pub mod service;

pub use crate::domain::model::{Prompt, SynthesisMethod, SynthesisResult};
pub use crate::domain::ports::CompletionClient;
pub use crate::utils::error::Result;
