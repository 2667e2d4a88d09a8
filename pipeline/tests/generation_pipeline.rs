//! End-to-end pipeline properties
//!
//! Exercises the classify → resolve → assemble chain for every supported
//! input combination, including the worked scenarios from the product
//! requirements and the failure modes the fallback must absorb.

use appforge_pipeline::{
    assemble, classify, generate, resolve, synthesize, AppCategory, ClaudeClient, Credential,
    GenerateError, GenerationRequest, GeneratorConfig, Layout, Theme,
};

const ALL_THEMES: [Theme; 5] = [
    Theme::Minimal,
    Theme::Playful,
    Theme::Professional,
    Theme::Artistic,
    Theme::Techy,
];
const ALL_LAYOUTS: [Layout; 4] = [Layout::Single, Layout::Dual, Layout::Triple, Layout::Quad];

/// assemble(synthesize(..)) yields manifest + source + readme for every
/// category × theme × layout combination.
#[test]
fn every_combination_assembles_a_complete_bundle() {
    for category in AppCategory::ALL {
        for theme in ALL_THEMES {
            for layout in ALL_LAYOUTS {
                let request = GenerationRequest::new("anything", theme, layout);
                let app = synthesize(&request, category);
                let bundle = assemble(&app);

                assert!(bundle.contains("package.json"), "{}", category.name());
                assert!(bundle.contains("src/App.jsx"), "{}", category.name());
                assert!(bundle.contains("README.md"), "{}", category.name());

                let manifest: serde_json::Value =
                    serde_json::from_str(bundle.get("package.json").unwrap()).unwrap();
                let entry = manifest["main"].as_str().unwrap();
                assert!(bundle.contains(entry), "entry point emitted");
            }
        }
    }
}

#[test]
fn grocery_todo_scenario() {
    let request = GenerationRequest::new("A todo app for groceries", Theme::Minimal, Layout::Dual);
    let category = classify(&request.idea);
    assert_eq!(category, AppCategory::Todo);

    let app = synthesize(&request, category);
    assert!(app.title.contains("Todo") || app.title.contains("Task"));
    assert!(app.feature_list.iter().any(|f| f == "Add/Edit Tasks"));
    assert!(app.feature_list.iter().any(|f| f == "Mark Complete"));

    let source = &app.source_code["App"];
    assert!(source.contains("addTask"));
    assert!(source.contains("toggleTask"));
    assert!(source.contains("deleteTask"));
}

#[test]
fn city_weather_scenario() {
    let request = GenerationRequest::new("Weather for my city", Theme::Techy, Layout::Quad);
    let category = classify(&request.idea);
    assert_eq!(category, AppCategory::Weather);

    let app = synthesize(&request, category);
    let source = &app.source_code["App"];
    assert!(source.contains("City name"));
    assert!(source.contains("setCelsius"));
}

#[test]
fn malformed_model_response_falls_back_silently() {
    let request = GenerationRequest::new("A todo app", Theme::Minimal, Layout::Single);
    let (app, fallback) = resolve(
        &request,
        AppCategory::Todo,
        Ok("Sure! Here's your app: {not valid json".to_string()),
    );
    assert!(fallback);
    assert!(!app.source_code["App"].is_empty());
    assert!(!assemble(&app).is_empty());
}

#[test]
fn every_generator_failure_mode_yields_a_valid_bundle() {
    let request = GenerationRequest::new("budget planner", Theme::Professional, Layout::Triple);
    let category = classify(&request.idea);
    assert_eq!(category, AppCategory::Budget);

    let failures = [
        GenerateError::Timeout(25),
        GenerateError::Upstream("429 rate limited".to_string()),
        GenerateError::EmptyResponse,
        GenerateError::MalformedResponse("not json".to_string()),
    ];
    for failure in failures {
        let (app, fallback) = resolve(&request, category, Err(failure));
        assert!(fallback);
        let bundle = assemble(&app);
        assert!(bundle.len() >= 3);
    }
}

/// With the model unreachable, `generate` still succeeds with a complete
/// bundle, flags the fallback, and stays within the deadline.
#[tokio::test]
async fn unreachable_model_still_yields_a_complete_bundle() {
    // Nothing listens on the discard port; the connection is refused long
    // before the deadline.
    let client = ClaudeClient::new(
        Credential::new("test-key"),
        GeneratorConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..GeneratorConfig::default()
        },
    );
    let request = GenerationRequest::new("A todo app for groceries", Theme::Minimal, Layout::Dual);

    let start = std::time::Instant::now();
    let outcome = generate(&client, &request).await;

    assert!(outcome.fallback);
    assert!(outcome.bundle.len() >= 3);
    assert!(outcome.bundle.contains("package.json"));
    assert!(outcome.bundle.contains("src/App.jsx"));
    assert!(outcome.bundle.contains("README.md"));
    // Deadline (2s) plus negligible overhead.
    assert!(start.elapsed() < std::time::Duration::from_secs(5));
}

#[test]
fn valid_model_response_is_preferred_over_fallback() {
    let request = GenerationRequest::new("note taking", Theme::Artistic, Layout::Single);
    let raw = serde_json::json!({
        "title": "Inkwell",
        "description": "Notes with flair.",
        "code": { "App": "export default function App() { return null; }" },
        "config": { "theme": "artistic", "layout": "single", "features": ["Create Notes"] }
    })
    .to_string();

    let (app, fallback) = resolve(&request, AppCategory::Notes, Ok(raw));
    assert!(!fallback);
    assert_eq!(app.title, "Inkwell");
    let bundle = assemble(&app);
    assert_eq!(
        bundle.get("src/App.jsx"),
        Some("export default function App() { return null; }")
    );
}
