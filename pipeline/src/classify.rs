//! Idea classifier — maps free text to a closed set of app categories
//!
//! Classification is keyword containment over a fixed, ordered rule list.
//! The first matching rule wins, so the table order below is part of the
//! observable contract and must stay stable.

use serde::{Deserialize, Serialize};

/// Closed set of supported app categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppCategory {
    Todo,
    Weather,
    HabitTracker,
    Recipe,
    Notes,
    Timer,
    Calculator,
    Calendar,
    Budget,
    AudioTracker,
    Productivity,
}

impl AppCategory {
    pub fn name(&self) -> &'static str {
        match self {
            AppCategory::Todo => "todo",
            AppCategory::Weather => "weather",
            AppCategory::HabitTracker => "habit-tracker",
            AppCategory::Recipe => "recipe",
            AppCategory::Notes => "notes",
            AppCategory::Timer => "timer",
            AppCategory::Calculator => "calculator",
            AppCategory::Calendar => "calendar",
            AppCategory::Budget => "budget",
            AppCategory::AudioTracker => "audio-tracker",
            AppCategory::Productivity => "productivity",
        }
    }

    /// Every category, in classification priority order.
    pub const ALL: [AppCategory; 11] = [
        AppCategory::Todo,
        AppCategory::Weather,
        AppCategory::HabitTracker,
        AppCategory::Recipe,
        AppCategory::Notes,
        AppCategory::Timer,
        AppCategory::Calculator,
        AppCategory::Calendar,
        AppCategory::Budget,
        AppCategory::AudioTracker,
        AppCategory::Productivity,
    ];
}

/// Ordered rule table: first keyword hit decides the category.
const RULES: &[(&[&str], AppCategory)] = &[
    (&["todo", "to-do", "task", "checklist"], AppCategory::Todo),
    (&["weather", "forecast", "temperature"], AppCategory::Weather),
    (&["habit", "streak", "daily goal"], AppCategory::HabitTracker),
    (&["recipe", "cooking", "meal", "ingredient"], AppCategory::Recipe),
    (&["note", "journal", "diary", "memo"], AppCategory::Notes),
    (&["timer", "stopwatch", "pomodoro", "countdown"], AppCategory::Timer),
    (&["calculator", "calculate", "converter"], AppCategory::Calculator),
    (&["calendar", "schedule", "appointment", "event"], AppCategory::Calendar),
    (&["budget", "expense", "spending", "finance", "money"], AppCategory::Budget),
    (&["music", "podcast", "audio", "listening"], AppCategory::AudioTracker),
];

/// Classify an idea. Total and deterministic: unknown or empty input maps to
/// the default category.
pub fn classify(idea: &str) -> AppCategory {
    let lowered = idea.to_lowercase();
    for (keywords, category) in RULES {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return *category;
        }
    }
    AppCategory::Productivity
}
