//! Theme variables derived from the tokens record

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use serde_json::Value;

/// Characters escaped inside a Google Fonts family name
const FAMILY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?');

/// Resolved theme values for one render.
///
/// Brand colors are shared by both modes; the palette comes from the
/// `dark_*` columns when `color_mode` is `dark` and from `light_*` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeVars {
    pub dark: bool,
    pub primary: String,
    pub primary_hover: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub surface_alt: String,
    pub text: String,
    pub text_body: String,
    pub text_muted: String,
    pub border: String,
    pub font_heading: String,
    pub font_body: String,
    pub radius: String,
    pub fonts_url: Option<String>,
}

impl ThemeVars {
    /// Compute the theme from a tokens row; `null` or missing columns fall
    /// back to the stock palette
    pub fn from_tokens(tokens: &Value) -> Self {
        let dark = text(tokens, "color_mode").as_deref() == Some("dark");
        let mode = if dark { "dark" } else { "light" };
        let color = |key: &str| {
            text(tokens, &format!("{}_{}", mode, key)).unwrap_or_else(|| stock(dark, key).to_string())
        };

        let heading = text(tokens, "font_heading");
        let body = text(tokens, "font_body");

        Self {
            dark,
            primary: text(tokens, "primary_color").unwrap_or_else(|| "#2563eb".into()),
            primary_hover: text(tokens, "primary_hover").unwrap_or_else(|| "#1d4ed8".into()),
            secondary: text(tokens, "secondary_color").unwrap_or_else(|| "#0f172a".into()),
            accent: text(tokens, "accent_color").unwrap_or_else(|| "#f59e0b".into()),
            background: color("background"),
            surface: color("surface"),
            surface_alt: color("surface_alt"),
            text: color("text"),
            text_body: color("text_body"),
            text_muted: color("text_muted"),
            border: color("border"),
            font_heading: font_stack(heading.as_deref().unwrap_or("Inter")),
            font_body: font_stack(body.as_deref().unwrap_or("Inter")),
            radius: text(tokens, "radius").unwrap_or_else(|| "0.5rem".into()),
            fonts_url: fonts_url(&[heading.as_deref(), body.as_deref()]),
        }
    }

    /// CSS custom property declarations for the `:root` rule
    pub fn css_variables(&self) -> String {
        [
            ("--color-primary", &self.primary),
            ("--color-primary-hover", &self.primary_hover),
            ("--color-secondary", &self.secondary),
            ("--color-accent", &self.accent),
            ("--color-background", &self.background),
            ("--color-surface", &self.surface),
            ("--color-surface-alt", &self.surface_alt),
            ("--color-text", &self.text),
            ("--color-text-body", &self.text_body),
            ("--color-text-muted", &self.text_muted),
            ("--color-border", &self.border),
            ("--font-heading", &self.font_heading),
            ("--font-body", &self.font_body),
            ("--radius", &self.radius),
        ]
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

impl Default for ThemeVars {
    fn default() -> Self {
        Self::from_tokens(&Value::Null)
    }
}

fn text(tokens: &Value, key: &str) -> Option<String> {
    tokens
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn stock(dark: bool, key: &str) -> &'static str {
    match (dark, key) {
        (false, "background") => "#ffffff",
        (false, "surface") => "#f8fafc",
        (false, "surface_alt") => "#f1f5f9",
        (false, "text") => "#0f172a",
        (false, "text_body") => "#334155",
        (false, "text_muted") => "#64748b",
        (false, _) => "#e2e8f0",
        (true, "background") => "#0b1120",
        (true, "surface") => "#111827",
        (true, "surface_alt") => "#1f2937",
        (true, "text") => "#f8fafc",
        (true, "text_body") => "#cbd5e1",
        (true, "text_muted") => "#94a3b8",
        (true, _) => "#334155",
    }
}

/// `'<font>', system-ui, sans-serif`
pub fn font_stack(font: &str) -> String {
    format!("'{}', system-ui, sans-serif", font)
}

/// Stylesheet URL loading each distinct, non-empty font once
pub fn fonts_url(fonts: &[Option<&str>]) -> Option<String> {
    let mut families: Vec<&str> = Vec::new();
    for font in fonts.iter().flatten() {
        if !font.is_empty() && !families.contains(font) {
            families.push(*font);
        }
    }
    if families.is_empty() {
        return None;
    }

    let query = families
        .iter()
        .map(|f| format!("family={}:wght@400;500;600;700", utf8_percent_encode(f, FAMILY)))
        .collect::<Vec<_>>()
        .join("&");
    Some(format!(
        "https://fonts.googleapis.com/css2?{}&display=swap",
        query
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tokens(mode: &str) -> Value {
        json!({
            "color_mode": mode,
            "primary_color": "#2563eb",
            "light_background": "#ffffff",
            "light_text": "#0f172a",
            "dark_background": "#0b1120",
            "dark_text": "#f8fafc",
            "font_heading": "Plus Jakarta Sans",
            "font_body": "Inter",
            "radius": "0.75rem"
        })
    }

    #[test]
    fn test_dark_mode_uses_dark_palette() {
        let theme = ThemeVars::from_tokens(&tokens("dark"));
        assert!(theme.dark);
        assert_eq!(theme.background, "#0b1120");
        assert_eq!(theme.text, "#f8fafc");
        assert_eq!(theme.primary, "#2563eb");
    }

    #[test]
    fn test_light_mode_uses_light_palette() {
        let theme = ThemeVars::from_tokens(&tokens("light"));
        assert!(!theme.dark);
        assert_eq!(theme.background, "#ffffff");
        assert_eq!(theme.text, "#0f172a");
    }

    #[test]
    fn test_unknown_mode_is_light() {
        let theme = ThemeVars::from_tokens(&tokens("sepia"));
        assert!(!theme.dark);
        assert_eq!(theme.background, "#ffffff");
    }

    #[test]
    fn test_font_stacks_and_variables() {
        let theme = ThemeVars::from_tokens(&tokens("light"));
        assert_eq!(
            theme.font_heading,
            "'Plus Jakarta Sans', system-ui, sans-serif"
        );
        let css = theme.css_variables();
        assert!(css.contains("--color-background: #ffffff;"));
        assert!(css.contains("--radius: 0.75rem;"));
    }

    #[test]
    fn test_fonts_url_deduplicates() {
        assert_eq!(
            fonts_url(&[Some("Inter"), Some("Inter")]).unwrap(),
            "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap"
        );
        let url = fonts_url(&[Some("Plus Jakarta Sans"), Some("Inter")]).unwrap();
        assert!(url.contains("family=Plus%20Jakarta%20Sans:wght@400;500;600;700&family=Inter:"));
        assert_eq!(fonts_url(&[None, Some("")]), None);
    }

    #[test]
    fn test_missing_tokens_fall_back() {
        let theme = ThemeVars::default();
        assert!(!theme.dark);
        assert_eq!(theme.background, "#ffffff");
        assert_eq!(theme.fonts_url, None);
    }
}
