//! Prompt builder — turns a request into one model instruction string
//!
//! Owns the authoritative theme-description and category-requirements
//! tables. The output contract stated at the end of every prompt is the
//! only wire-level interface toward the model; `parse.rs` checks it
//! mechanically.

use crate::classify::AppCategory;
use crate::request::{GenerationRequest, Theme};

/// Human-readable theme description used inside the prompt.
pub fn theme_description(theme: Theme) -> &'static str {
    match theme {
        Theme::Minimal => "clean whitespace, muted grayscale palette, thin typography",
        Theme::Playful => "rounded corners, bright candy colors, bouncy micro-interactions",
        Theme::Professional => "structured grid, navy and slate palette, dense information display",
        Theme::Artistic => "expressive gradients, serif display type, asymmetric composition",
        Theme::Techy => "dark background, neon green accents, monospace typography",
    }
}

/// Required functional behaviors per category. The default arm covers any
/// category without a dedicated list.
pub fn category_requirements(category: AppCategory) -> &'static [&'static str] {
    match category {
        AppCategory::Todo => &[
            "add new tasks from a text input",
            "toggle tasks between open and complete",
            "delete individual tasks",
            "show a remaining-task counter",
        ],
        AppCategory::Weather => &[
            "accept a city name in a text field",
            "display a current temperature value",
            "toggle between Celsius and Fahrenheit",
            "show a short condition summary",
        ],
        AppCategory::HabitTracker => &[
            "define habits with a name",
            "mark a habit done for today",
            "display the current streak per habit",
        ],
        AppCategory::Recipe => &[
            "list recipes with title and ingredients",
            "add a new recipe from a form",
            "filter recipes by a search field",
        ],
        AppCategory::Notes => &[
            "create notes with a title and body",
            "edit an existing note in place",
            "delete notes",
        ],
        AppCategory::Timer => &[
            "start, pause, and reset a countdown",
            "let the user set the duration",
            "show elapsed/remaining time prominently",
        ],
        AppCategory::Calculator => &[
            "digit and operator buttons",
            "evaluate the current expression",
            "clear the display",
        ],
        AppCategory::Calendar => &[
            "show a month grid",
            "add events to a selected day",
            "list upcoming events",
        ],
        AppCategory::Budget => &[
            "record income and expense entries",
            "show the running balance",
            "group spending by category",
        ],
        AppCategory::AudioTracker => &[
            "log listened items with title and artist",
            "rate entries",
            "show total listening count",
        ],
        AppCategory::Productivity => &[
            "present a summary dashboard of the user's items",
            "add and remove items",
            "persist state across interactions within the session",
        ],
    }
}

/// Build the full instruction string sent as the user message.
pub fn build_prompt(request: &GenerationRequest, category: AppCategory) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str("Generate a small single-page web application.\n\n");
    prompt.push_str(&format!("App idea: {}\n", request.idea));
    prompt.push_str(&format!("Category: {}\n", category.name()));
    prompt.push_str(&format!(
        "Theme: {} ({})\n",
        request.theme.name(),
        theme_description(request.theme)
    ));
    prompt.push_str(&format!(
        "Layout: {} column(s) ({})\n\n",
        request.layout.columns(),
        request.layout.name()
    ));

    prompt.push_str("Required behaviors:\n");
    for requirement in category_requirements(category) {
        prompt.push_str(&format!("- {requirement}\n"));
    }

    prompt.push_str(
        "\nRespond with exactly one JSON object and nothing else: no prose, \
         no markdown fences. Required top-level keys:\n\
         - \"title\": short app title (string)\n\
         - \"description\": one-sentence description (string)\n\
         - \"code\": object with an \"App\" key holding the complete source \
         of a single-file React component (string)\n\
         - \"config\": object with \"theme\" (string), \"layout\" (string), \
         and \"features\" (array of feature-name strings)\n",
    );

    prompt
}

/// Fixed system message for the generator call.
pub const SYSTEM_PROMPT: &str =
    "You are an expert front-end engineer. You output only strict JSON app \
     descriptions, never commentary.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Layout;

    fn request() -> GenerationRequest {
        GenerationRequest::new("A todo app for groceries", Theme::Minimal, Layout::Dual)
    }

    #[test]
    fn test_prompt_contains_idea_and_theme() {
        let p = build_prompt(&request(), AppCategory::Todo);
        assert!(p.contains("A todo app for groceries"));
        assert!(p.contains("minimal"));
        assert!(p.contains(theme_description(Theme::Minimal)));
    }

    #[test]
    fn test_prompt_contains_layout_columns() {
        let p = build_prompt(&request(), AppCategory::Todo);
        assert!(p.contains("2 column(s)"));
    }

    #[test]
    fn test_prompt_states_output_contract() {
        let p = build_prompt(&request(), AppCategory::Weather);
        for key in ["\"title\"", "\"description\"", "\"code\"", "\"App\"", "\"config\"", "\"features\""] {
            assert!(p.contains(key), "missing contract key {key}");
        }
        assert!(p.contains("no markdown fences"));
    }

    #[test]
    fn test_prompt_lists_category_requirements() {
        let p = build_prompt(&request(), AppCategory::Weather);
        assert!(p.contains("Celsius and Fahrenheit"));
    }

    #[test]
    fn test_every_category_has_requirements() {
        for category in AppCategory::ALL {
            assert!(
                !category_requirements(category).is_empty(),
                "no requirements for {}",
                category.name()
            );
        }
    }
}
