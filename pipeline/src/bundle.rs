//! App description model and project bundle assembly

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::classify::AppCategory;
use crate::request::{Layout, Theme};

/// Entry point every assembled bundle declares and emits.
pub const APP_SOURCE_PATH: &str = "src/App.jsx";

/// A complete app description, produced either by the model or by the
/// fallback synthesizer. Invariant: `source_code["App"]` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedApp {
    pub title: String,
    pub description: String,
    pub app_type: AppCategory,
    /// File label → source text. Always contains at least "App".
    pub source_code: BTreeMap<String, String>,
    pub feature_list: Vec<String>,
    pub theme: Theme,
    pub layout: Layout,
}

/// Relative file path → file content. Ordered for deterministic output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectBundle {
    files: BTreeMap<String, String>,
}

impl ProjectBundle {
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Derive a manifest-safe project name from a title: lowercase, every run of
/// non-alphanumeric characters collapsed to one `-`. Idempotent.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if slug.is_empty() {
        "generated-app".to_string()
    } else {
        slug
    }
}

/// Assemble the fixed project layout from an app description. Pure: no
/// network or filesystem access.
pub fn assemble(app: &GeneratedApp) -> ProjectBundle {
    let mut bundle = ProjectBundle::default();
    let slug = slugify(&app.title);

    let manifest = json!({
        "name": slug,
        "version": "0.1.0",
        "private": true,
        "main": APP_SOURCE_PATH,
        "scripts": {
            "start": "vite",
            "build": "vite build"
        },
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0"
        }
    });
    // to_string_pretty on a json! literal cannot fail
    let manifest_text =
        serde_json::to_string_pretty(&manifest).unwrap_or_else(|_| manifest.to_string());
    bundle.insert("package.json", manifest_text);

    for (label, source) in &app.source_code {
        if label == "App" {
            bundle.insert(APP_SOURCE_PATH, source.clone());
        } else {
            bundle.insert(format!("src/{label}.jsx"), source.clone());
        }
    }

    bundle.insert("README.md", render_readme(app));
    bundle
}

fn render_readme(app: &GeneratedApp) -> String {
    let mut readme = format!("# {}\n\n{}\n\n## Features\n\n", app.title, app.description);
    if app.feature_list.is_empty() {
        readme.push_str("- Responsive single-page layout\n");
        readme.push_str("- Zero-configuration startup\n");
    } else {
        for feature in &app.feature_list {
            readme.push_str(&format!("- {feature}\n"));
        }
    }
    readme.push_str(&format!(
        "\nTheme: {} · Layout: {} column(s)\n",
        app.theme.name(),
        app.layout.columns()
    ));
    readme
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app(features: Vec<String>) -> GeneratedApp {
        let mut source_code = BTreeMap::new();
        source_code.insert("App".to_string(), "export default function App() {}".to_string());
        GeneratedApp {
            title: "Grocery Todo!".to_string(),
            description: "Track groceries.".to_string(),
            app_type: AppCategory::Todo,
            source_code,
            feature_list: features,
            theme: Theme::Minimal,
            layout: Layout::Dual,
        }
    }

    #[test]
    fn test_slugify_collapses_non_alphanumeric_runs() {
        assert_eq!(slugify("Grocery  Todo!"), "grocery-todo");
        assert_eq!(slugify("My -- App (v2)"), "my-app-v2");
    }

    #[test]
    fn test_slugify_idempotent() {
        let once = slugify("Weather: Now & Later");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_slugify_empty_title() {
        assert_eq!(slugify("!!!"), "generated-app");
        assert_eq!(slugify(""), "generated-app");
    }

    #[test]
    fn test_assemble_contains_required_files() {
        let bundle = assemble(&sample_app(vec!["Add items".to_string()]));
        assert!(bundle.contains("package.json"));
        assert!(bundle.contains(APP_SOURCE_PATH));
        assert!(bundle.contains("README.md"));
    }

    #[test]
    fn test_assemble_manifest_entry_point_matches_source_path() {
        let bundle = assemble(&sample_app(vec![]));
        let manifest: serde_json::Value =
            serde_json::from_str(bundle.get("package.json").unwrap()).unwrap();
        let entry = manifest["main"].as_str().unwrap();
        assert!(bundle.contains(entry));
        assert_eq!(manifest["name"], "grocery-todo");
    }

    #[test]
    fn test_assemble_extra_source_labels() {
        let mut app = sample_app(vec![]);
        app.source_code
            .insert("Sidebar".to_string(), "export const Sidebar = () => null;".to_string());
        let bundle = assemble(&app);
        assert!(bundle.contains("src/Sidebar.jsx"));
    }

    #[test]
    fn test_readme_empty_features_renders_two_defaults() {
        let bundle = assemble(&sample_app(vec![]));
        let readme = bundle.get("README.md").unwrap();
        assert!(readme.contains("- Responsive single-page layout"));
        assert!(readme.contains("- Zero-configuration startup"));
    }

    #[test]
    fn test_readme_lists_features() {
        let bundle = assemble(&sample_app(vec!["Add items".to_string(), "Delete items".to_string()]));
        let readme = bundle.get("README.md").unwrap();
        assert!(readme.contains("- Add items"));
        assert!(readme.contains("- Delete items"));
        assert!(!readme.contains("Zero-configuration"));
    }
}
