//! Generation relay — pluggable, trait-based seam around the one external call.
//!
//! `AppState` holds an `Arc<dyn NameGenerator>` built once at startup.
//! Default: `LlmNameGenerator`. Tests swap in a scripted generator.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::contract::request::GenerateRequest;
use crate::contract::response::{validate_response, GenerateResponse};
use crate::errors::AppError;
use crate::generation::prompts::{build_prompt, Prompt};
use crate::llm_client::{LlmClient, LlmError};

/// Performs exactly one external generation call per invocation and returns
/// the raw, unverified JSON payload.
#[async_trait]
pub trait NameGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<Value, LlmError>;
}

/// Default backend: chat completions in JSON mode.
pub struct LlmNameGenerator(pub LlmClient);

#[async_trait]
impl NameGenerator for LlmNameGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<Value, LlmError> {
        self.0.call_json(&prompt.user, &prompt.system).await
    }
}

/// Relay pipeline for an already-validated request:
/// build prompt → one external call → response contract.
///
/// Every failure is terminal; nothing is retried or repaired.
pub async fn generate_names(
    generator: &dyn NameGenerator,
    request: &GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    let prompt = build_prompt(request);

    let raw = generator.generate(&prompt).await?;

    let candidates = validate_response(&raw).map_err(|violations| {
        warn!(%violations, "Model output violated the response contract");
        AppError::InvalidOutput(violations.to_string())
    })?;

    info!(candidates = candidates.len(), "Name candidates generated");

    Ok(GenerateResponse::new(candidates))
}

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    type Script = Box<dyn Fn() -> Result<Value, LlmError> + Send + Sync>;

    /// Generator that replays a fixed outcome and counts invocations.
    pub struct ScriptedGenerator {
        script: Script,
        calls: AtomicUsize,
        last_prompt: std::sync::Mutex<Option<Prompt>>,
    }

    impl ScriptedGenerator {
        pub fn replying(payload: Value) -> Self {
            Self::new(Box::new(move || Ok(payload.clone())))
        }

        pub fn failing(error: fn() -> LlmError) -> Self {
            Self::new(Box::new(move || Err(error())))
        }

        fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
                last_prompt: std::sync::Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<Prompt> {
            self.last_prompt.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NameGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &Prompt) -> Result<Value, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.clone());
            (self.script)()
        }
    }
}
