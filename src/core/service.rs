use crate::core::parser::parse_response;
use crate::core::prompt::build_prompt;
use crate::domain::cas::CasNumber;
use crate::domain::model::SynthesisResult;
use crate::domain::ports::CompletionClient;
use crate::utils::error::{Result, SynthesisError};
use std::sync::Arc;

/// Runs one lookup: validate, build the prompt, query upstream once, parse.
#[derive(Clone)]
pub struct SynthesisService {
    client: Arc<dyn CompletionClient>,
}

impl SynthesisService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn lookup(&self, raw_cas: &str) -> Result<SynthesisResult> {
        let cas_number = CasNumber::parse(raw_cas)?;
        tracing::info!("🔎 Looking up synthesis methods for CAS {}", cas_number);

        let prompt = build_prompt(&cas_number);
        let raw_response = self.client.complete(&prompt).await?;
        tracing::debug!("Upstream answered with {} bytes", raw_response.len());

        let methods = parse_response(&raw_response)?;
        if methods.is_empty() {
            return Err(SynthesisError::NotFoundError {
                cas_number: cas_number.to_string(),
            });
        }

        tracing::info!(
            "✅ Found {} synthesis methods for CAS {}",
            methods.len(),
            cas_number
        );
        Ok(SynthesisResult::new(cas_number.as_str(), methods))
    }
}
