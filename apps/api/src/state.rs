use std::sync::Arc;

use crate::generation::generator::NameGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once before serving and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation backend. Default: LlmNameGenerator over the process-wide LlmClient.
    pub generator: Arc<dyn NameGenerator>,
}
