//! Thumbnail rendering — a small SVG derived from (theme, title)

/// Theme-keyed background color; unknown names get the default.
fn theme_color(theme_name: &str) -> &'static str {
    match theme_name {
        "minimal" => "#f5f5f4",
        "playful" => "#fb7185",
        "professional" => "#1e3a5f",
        "artistic" => "#7c3aed",
        "techy" => "#052e16",
        _ => "#64748b",
    }
}

fn text_color(theme_name: &str) -> &'static str {
    match theme_name {
        "minimal" => "#1c1917",
        _ => "#ffffff",
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render an inline SVG thumbnail: theme-colored background, centered title.
/// Pure function of its inputs.
pub fn render_thumbnail(theme_name: &str, title: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="180" viewBox="0 0 320 180"><rect width="320" height="180" rx="12" fill="{background}"/><text x="160" y="90" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif" font-size="20" fill="{foreground}">{title}</text></svg>"#,
        background = theme_color(theme_name),
        foreground = text_color(theme_name),
        title = escape_xml(title),
    )
}
