//! AppForge generation pipeline
//!
//! request → classify → build prompt → bounded model call →
//! {valid response → model app; any failure → deterministic fallback} →
//! assemble bundle.
//!
//! One-shot, fallback-covers-failure: the model is called exactly once per
//! request with a hard deadline, and every failure mode (timeout, upstream
//! error, empty or malformed response) is recovered by synthesizing a valid
//! app locally. A well-formed request therefore always yields a bundle.

use std::time::Instant;

use tracing::{info, warn};

pub mod bundle;
pub mod classify;
pub mod claude;
pub mod error;
pub mod fallback;
pub mod parse;
pub mod prompt;
pub mod request;

pub use bundle::{assemble, slugify, GeneratedApp, ProjectBundle};
pub use classify::{classify, AppCategory};
pub use claude::{ClaudeClient, Credential, GeneratorConfig};
pub use error::{ConfigError, GenerateError};
pub use fallback::synthesize;
pub use request::{GenerationRequest, Layout, Theme};

/// Result of running the full pipeline for one request.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub app: GeneratedApp,
    pub bundle: ProjectBundle,
    /// True when the deterministic fallback was substituted for the model.
    pub fallback: bool,
    pub generation_ms: u64,
}

/// Decide between the model's output and the fallback. Pure: the async call
/// has already happened (or failed) by the time this runs.
pub fn resolve(
    request: &GenerationRequest,
    category: AppCategory,
    model_result: Result<String, GenerateError>,
) -> (GeneratedApp, bool) {
    let error = match model_result {
        Ok(raw) => match parse::parse_response(&raw, request, category) {
            Ok(app) => return (app, false),
            Err(e) => e,
        },
        Err(e) => e,
    };

    warn!("substituting fallback app: {error}");
    (fallback::synthesize(request, category), true)
}

/// Run the pipeline end to end with a live generator client.
pub async fn generate(client: &ClaudeClient, request: &GenerationRequest) -> GenerationOutcome {
    let start = Instant::now();

    let category = classify::classify(&request.idea);
    info!(
        "generating: category={} theme={} layout={}",
        category.name(),
        request.theme.name(),
        request.layout.name()
    );

    let prompt = prompt::build_prompt(request, category);
    let model_result = client.invoke(&prompt).await;
    let (app, fallback) = resolve(request, category, model_result);

    let bundle = bundle::assemble(&app);

    GenerationOutcome {
        app,
        bundle,
        fallback,
        generation_ms: start.elapsed().as_millis() as u64,
    }
}
