//! Deterministic fallback synthesizer
//!
//! The correctness backbone of the pipeline: a pure, total function that
//! produces a complete, valid app description for any (request, category)
//! pair without any I/O. Whatever the model does upstream, this output
//! satisfies every invariant the bundle assembler relies on.

use std::collections::BTreeMap;

use crate::bundle::GeneratedApp;
use crate::classify::AppCategory;
use crate::request::GenerationRequest;

/// Synthesize a complete app description. Never fails.
pub fn synthesize(request: &GenerationRequest, category: AppCategory) -> GeneratedApp {
    let template = template_for(category);

    let description = format!(
        "A {} {} app built from the idea: \"{}\".",
        request.theme.name(),
        category.name(),
        request.idea.trim()
    );

    let mut source_code = BTreeMap::new();
    source_code.insert("App".to_string(), template.source.to_string());

    GeneratedApp {
        title: template.title.to_string(),
        description,
        app_type: category,
        source_code,
        feature_list: template.features.iter().map(|f| f.to_string()).collect(),
        theme: request.theme,
        layout: request.layout,
    }
}

struct Template {
    title: &'static str,
    features: &'static [&'static str],
    source: &'static str,
}

/// Generic feature list for categories without a dedicated one.
const GENERIC_FEATURES: &[&str] = &["Item Dashboard", "Add/Remove Items", "Session Persistence"];

fn template_for(category: AppCategory) -> Template {
    match category {
        AppCategory::Todo => Template {
            title: "Todo List",
            features: &["Add/Edit Tasks", "Mark Complete", "Delete Tasks", "Remaining Counter"],
            source: TODO_SOURCE,
        },
        AppCategory::Weather => Template {
            title: "Weather Now",
            features: &["City Lookup", "Current Temperature", "Unit Toggle (°C/°F)"],
            source: WEATHER_SOURCE,
        },
        AppCategory::Timer => Template {
            title: "Focus Timer",
            features: &["Start/Pause/Reset", "Custom Duration", "Large Time Display"],
            source: TIMER_SOURCE,
        },
        AppCategory::Calculator => Template {
            title: "Quick Calculator",
            features: &["Digit Pad", "Basic Operators", "Clear Display"],
            source: CALCULATOR_SOURCE,
        },
        AppCategory::Notes => Template {
            title: "Sticky Notes",
            features: &["Create Notes", "Edit In Place", "Delete Notes"],
            source: NOTES_SOURCE,
        },
        AppCategory::HabitTracker => Template {
            title: "Habit Tracker",
            features: &["Define Habits", "Daily Check-In", "Streak Counter"],
            source: DASHBOARD_SOURCE,
        },
        AppCategory::Recipe => Template {
            title: "Recipe Box",
            features: &["Recipe List", "Add Recipes", "Ingredient Search"],
            source: DASHBOARD_SOURCE,
        },
        AppCategory::Calendar => Template {
            title: "Simple Calendar",
            features: &["Month Grid", "Add Events", "Upcoming List"],
            source: DASHBOARD_SOURCE,
        },
        AppCategory::Budget => Template {
            title: "Budget Keeper",
            features: &["Income/Expense Entries", "Running Balance", "Category Totals"],
            source: DASHBOARD_SOURCE,
        },
        AppCategory::AudioTracker => Template {
            title: "Listening Log",
            features: &["Log Entries", "Ratings", "Listening Count"],
            source: DASHBOARD_SOURCE,
        },
        AppCategory::Productivity => Template {
            title: "Productivity Board",
            features: GENERIC_FEATURES,
            source: DASHBOARD_SOURCE,
        },
    }
}

/// Add/toggle/delete over an id-keyed task list.
const TODO_SOURCE: &str = r##"import { useState } from 'react';

export default function App() {
  const [tasks, setTasks] = useState({});
  const [draft, setDraft] = useState('');
  const [nextId, setNextId] = useState(1);

  const addTask = () => {
    const text = draft.trim();
    if (!text) return;
    setTasks({ ...tasks, [nextId]: { text, done: false } });
    setNextId(nextId + 1);
    setDraft('');
  };

  const toggleTask = (id) => {
    const task = tasks[id];
    setTasks({ ...tasks, [id]: { ...task, done: !task.done } });
  };

  const deleteTask = (id) => {
    const next = { ...tasks };
    delete next[id];
    setTasks(next);
  };

  const entries = Object.entries(tasks);
  const remaining = entries.filter(([, t]) => !t.done).length;

  return (
    <div style={{ maxWidth: 480, margin: '2rem auto', fontFamily: 'sans-serif' }}>
      <h1>Todo List</h1>
      <p>{remaining} task(s) remaining</p>
      <input
        value={draft}
        onChange={(e) => setDraft(e.target.value)}
        onKeyDown={(e) => e.key === 'Enter' && addTask()}
        placeholder="What needs doing?"
      />
      <button onClick={addTask}>Add</button>
      <ul>
        {entries.map(([id, task]) => (
          <li key={id}>
            <label style={{ textDecoration: task.done ? 'line-through' : 'none' }}>
              <input type="checkbox" checked={task.done} onChange={() => toggleTask(id)} />
              {task.text}
            </label>
            <button onClick={() => deleteTask(id)}>Delete</button>
          </li>
        ))}
      </ul>
    </div>
  );
}
"##;

/// City field, temperature value, °C/°F unit toggle.
const WEATHER_SOURCE: &str = r##"import { useState } from 'react';

export default function App() {
  const [city, setCity] = useState('');
  const [celsius, setCelsius] = useState(true);
  const [tempC, setTempC] = useState(21);

  const lookup = () => {
    // Demo data: a stable pseudo-reading derived from the city name.
    const seed = city.split('').reduce((sum, ch) => sum + ch.charCodeAt(0), 0);
    setTempC(5 + (seed % 25));
  };

  const shown = celsius ? tempC : Math.round((tempC * 9) / 5 + 32);
  const unit = celsius ? '°C' : '°F';

  return (
    <div style={{ maxWidth: 360, margin: '2rem auto', fontFamily: 'sans-serif' }}>
      <h1>Weather Now</h1>
      <input
        value={city}
        onChange={(e) => setCity(e.target.value)}
        placeholder="City name"
      />
      <button onClick={lookup}>Check</button>
      <p style={{ fontSize: '3rem' }}>
        {shown}{unit}
      </p>
      <button onClick={() => setCelsius(!celsius)}>
        Switch to {celsius ? '°F' : '°C'}
      </button>
      {city && <p>Conditions for {city}: partly cloudy</p>}
    </div>
  );
}
"##;

/// Start/pause/reset countdown with a settable duration.
const TIMER_SOURCE: &str = r##"import { useEffect, useState } from 'react';

export default function App() {
  const [duration, setDuration] = useState(300);
  const [remaining, setRemaining] = useState(300);
  const [running, setRunning] = useState(false);

  useEffect(() => {
    if (!running) return undefined;
    const tick = setInterval(() => {
      setRemaining((r) => {
        if (r <= 1) {
          setRunning(false);
          return 0;
        }
        return r - 1;
      });
    }, 1000);
    return () => clearInterval(tick);
  }, [running]);

  const minutes = String(Math.floor(remaining / 60)).padStart(2, '0');
  const seconds = String(remaining % 60).padStart(2, '0');

  return (
    <div style={{ textAlign: 'center', fontFamily: 'sans-serif' }}>
      <h1>Focus Timer</h1>
      <p style={{ fontSize: '4rem' }}>{minutes}:{seconds}</p>
      <button onClick={() => setRunning(!running)}>{running ? 'Pause' : 'Start'}</button>
      <button onClick={() => { setRunning(false); setRemaining(duration); }}>Reset</button>
      <div>
        <label>
          Duration (seconds):
          <input
            type="number"
            value={duration}
            onChange={(e) => {
              const next = Math.max(1, Number(e.target.value) || 1);
              setDuration(next);
              setRemaining(next);
            }}
          />
        </label>
      </div>
    </div>
  );
}
"##;

/// Digit pad, basic operators, clear.
const CALCULATOR_SOURCE: &str = r##"import { useState } from 'react';

export default function App() {
  const [display, setDisplay] = useState('0');

  const press = (key) => {
    setDisplay((d) => (d === '0' ? key : d + key));
  };

  const evaluate = () => {
    const tokens = display.match(/\d+(\.\d+)?|[+\-*/]/g) || [];
    let result = Number(tokens[0] || 0);
    for (let i = 1; i < tokens.length - 1; i += 2) {
      const value = Number(tokens[i + 1]);
      switch (tokens[i]) {
        case '+': result += value; break;
        case '-': result -= value; break;
        case '*': result *= value; break;
        case '/': result = value === 0 ? 0 : result / value; break;
        default: break;
      }
    }
    setDisplay(String(result));
  };

  const keys = ['7', '8', '9', '/', '4', '5', '6', '*', '1', '2', '3', '-', '0', '.', '+'];

  return (
    <div style={{ maxWidth: 240, margin: '2rem auto', fontFamily: 'monospace' }}>
      <h1>Quick Calculator</h1>
      <div style={{ fontSize: '2rem', textAlign: 'right' }}>{display}</div>
      <div style={{ display: 'grid', gridTemplateColumns: 'repeat(4, 1fr)' }}>
        {keys.map((key) => (
          <button key={key} onClick={() => press(key)}>{key}</button>
        ))}
        <button onClick={evaluate}>=</button>
        <button onClick={() => setDisplay('0')}>C</button>
      </div>
    </div>
  );
}
"##;

/// Create/edit/delete notes.
const NOTES_SOURCE: &str = r##"import { useState } from 'react';

export default function App() {
  const [notes, setNotes] = useState([]);
  const [title, setTitle] = useState('');
  const [body, setBody] = useState('');

  const addNote = () => {
    if (!title.trim()) return;
    setNotes([{ id: Date.now(), title, body }, ...notes]);
    setTitle('');
    setBody('');
  };

  const updateNote = (id, nextBody) => {
    setNotes(notes.map((n) => (n.id === id ? { ...n, body: nextBody } : n)));
  };

  const deleteNote = (id) => {
    setNotes(notes.filter((n) => n.id !== id));
  };

  return (
    <div style={{ maxWidth: 520, margin: '2rem auto', fontFamily: 'sans-serif' }}>
      <h1>Sticky Notes</h1>
      <input value={title} onChange={(e) => setTitle(e.target.value)} placeholder="Title" />
      <textarea value={body} onChange={(e) => setBody(e.target.value)} placeholder="Write a note..." />
      <button onClick={addNote}>Add Note</button>
      {notes.map((note) => (
        <div key={note.id} style={{ border: '1px solid #ccc', margin: '0.5rem 0', padding: '0.5rem' }}>
          <strong>{note.title}</strong>
          <textarea value={note.body} onChange={(e) => updateNote(note.id, e.target.value)} />
          <button onClick={() => deleteNote(note.id)}>Delete</button>
        </div>
      ))}
    </div>
  );
}
"##;

/// Shared dashboard template: item list with add/remove and a count summary.
const DASHBOARD_SOURCE: &str = r##"import { useState } from 'react';

export default function App() {
  const [items, setItems] = useState([]);
  const [draft, setDraft] = useState('');

  const addItem = () => {
    const label = draft.trim();
    if (!label) return;
    setItems([...items, { id: Date.now(), label, count: 0 }]);
    setDraft('');
  };

  const bump = (id) => {
    setItems(items.map((it) => (it.id === id ? { ...it, count: it.count + 1 } : it)));
  };

  const removeItem = (id) => {
    setItems(items.filter((it) => it.id !== id));
  };

  const total = items.reduce((sum, it) => sum + it.count, 0);

  return (
    <div style={{ maxWidth: 560, margin: '2rem auto', fontFamily: 'sans-serif' }}>
      <h1>Dashboard</h1>
      <p>{items.length} item(s) · {total} total check-ins</p>
      <input
        value={draft}
        onChange={(e) => setDraft(e.target.value)}
        onKeyDown={(e) => e.key === 'Enter' && addItem()}
        placeholder="Add an item"
      />
      <button onClick={addItem}>Add</button>
      <ul>
        {items.map((it) => (
          <li key={it.id}>
            {it.label} — {it.count}
            <button onClick={() => bump(it.id)}>+1</button>
            <button onClick={() => removeItem(it.id)}>Remove</button>
          </li>
        ))}
      </ul>
    </div>
  );
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Layout, Theme};

    const ALL_THEMES: [Theme; 5] = [
        Theme::Minimal,
        Theme::Playful,
        Theme::Professional,
        Theme::Artistic,
        Theme::Techy,
    ];
    const ALL_LAYOUTS: [Layout; 4] = [Layout::Single, Layout::Dual, Layout::Triple, Layout::Quad];

    #[test]
    fn test_synthesize_total_over_all_combinations() {
        for category in AppCategory::ALL {
            for theme in ALL_THEMES {
                for layout in ALL_LAYOUTS {
                    let request = GenerationRequest::new("anything at all", theme, layout);
                    let app = synthesize(&request, category);
                    assert!(!app.title.is_empty(), "{} title", category.name());
                    assert!(!app.feature_list.is_empty(), "{} features", category.name());
                    let source = app.source_code.get("App").expect("App source present");
                    assert!(!source.trim().is_empty(), "{} source", category.name());
                    assert_eq!(app.app_type, category);
                }
            }
        }
    }

    #[test]
    fn test_synthesize_description_interpolates_theme_and_idea() {
        let request = GenerationRequest::new("A todo app for groceries", Theme::Techy, Layout::Dual);
        let app = synthesize(&request, AppCategory::Todo);
        assert!(app.description.contains("techy"));
        assert!(app.description.contains("A todo app for groceries"));
    }

    #[test]
    fn test_todo_template_behaviors() {
        let request = GenerationRequest::new("groceries", Theme::Minimal, Layout::Dual);
        let app = synthesize(&request, AppCategory::Todo);
        assert!(app.title.contains("Todo") || app.title.contains("Task"));
        assert!(app.feature_list.iter().any(|f| f == "Add/Edit Tasks"));
        assert!(app.feature_list.iter().any(|f| f == "Mark Complete"));
        let source = &app.source_code["App"];
        assert!(source.contains("addTask"));
        assert!(source.contains("toggleTask"));
        assert!(source.contains("deleteTask"));
    }

    #[test]
    fn test_weather_template_behaviors() {
        let request = GenerationRequest::new("Weather for my city", Theme::Techy, Layout::Quad);
        let app = synthesize(&request, AppCategory::Weather);
        let source = &app.source_code["App"];
        assert!(source.contains("City name"), "city field");
        assert!(source.contains("setCelsius"), "unit toggle");
        assert!(source.contains("tempC"), "temperature value");
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let request = GenerationRequest::new("habits", Theme::Playful, Layout::Triple);
        let a = synthesize(&request, AppCategory::HabitTracker);
        let b = synthesize(&request, AppCategory::HabitTracker);
        assert_eq!(a.title, b.title);
        assert_eq!(a.feature_list, b.feature_list);
        assert_eq!(a.source_code, b.source_code);
    }

    #[test]
    fn test_default_category_uses_generic_features() {
        let request = GenerationRequest::new("", Theme::Minimal, Layout::Single);
        let app = synthesize(&request, AppCategory::Productivity);
        assert_eq!(app.feature_list.len(), GENERIC_FEATURES.len());
    }
}
