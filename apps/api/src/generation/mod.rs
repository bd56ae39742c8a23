// Name generation: prompt building, the external relay, and the HTTP handler.
// All model calls go through llm_client — no direct API calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
