//! Colors for every span class.
//!
//! One palette drives both outputs: [`Theme::stylesheet`] emits CSS for the
//! HTML presentation layer and [`Theme::to_ansi`] colors annotated text for
//! a terminal. The default palette follows Dracula:
//!
//! - **Magenta** = keywords
//! - **Green** = strings, good plan values
//! - **Purple** = numbers, types
//! - **Gray** = comments, separators, NULL
//! - **Yellow** = warnings
//! - **Red** = bad plan values

use std::collections::HashMap;

use colored::Colorize;

use crate::{
    error::{AppResult, config_error},
    markup::{Segments, SpanClass}
};

/// A truecolor RGB value with an optional bold weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor {
    pub rgb:  (u8, u8, u8),
    pub bold: bool
}

impl ThemeColor {
    pub const fn new(rgb: (u8, u8, u8)) -> Self {
        Self {
            rgb,
            bold: false
        }
    }

    pub const fn bold(rgb: (u8, u8, u8)) -> Self {
        Self {
            rgb,
            bold: true
        }
    }

    /// `#rrggbb` notation.
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(text: &str) -> Option<(u8, u8, u8)> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

const MAGENTA: (u8, u8, u8) = (255, 121, 198);
const GREEN: (u8, u8, u8) = (80, 250, 123);
const PURPLE: (u8, u8, u8) = (189, 147, 249);
const CYAN: (u8, u8, u8) = (139, 233, 253);
const GRAY: (u8, u8, u8) = (98, 114, 164);
const YELLOW: (u8, u8, u8) = (241, 250, 140);
const ORANGE: (u8, u8, u8) = (255, 184, 108);
const RED: (u8, u8, u8) = (255, 85, 85);
const FOREGROUND: (u8, u8, u8) = (248, 248, 242);

/// Class to color mapping.
#[derive(Debug, Clone)]
pub struct Theme {
    colors: HashMap<SpanClass, ThemeColor>
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dracula-inspired palette.
    pub fn dark() -> Self {
        let colors = SpanClass::ALL
            .into_iter()
            .map(|class| (class, default_color(class)))
            .collect();
        Self {
            colors
        }
    }

    /// Apply `class-name -> #rrggbb` overrides from configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error for an unknown class name or malformed color.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> AppResult<Self> {
        for (name, value) in overrides {
            let class = SpanClass::from_name(name)
                .ok_or_else(|| config_error(format!("Unknown theme class '{}'", name)))?;
            let rgb = ThemeColor::parse_hex(value).ok_or_else(|| {
                config_error(format!("Invalid color '{}' for '{}'", value, name))
            })?;
            let bold = self.color(class).bold;
            self.colors.insert(
                class,
                ThemeColor {
                    rgb,
                    bold
                }
            );
        }
        Ok(self)
    }

    pub fn color(&self, class: SpanClass) -> ThemeColor {
        self.colors
            .get(&class)
            .copied()
            .unwrap_or_else(|| default_color(class))
    }

    /// CSS rules for every class, in [`SpanClass::ALL`] order.
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();
        for class in SpanClass::ALL {
            let color = self.color(class);
            css.push_str(&format!(".{} {{ color: {};", class.as_str(), color.hex()));
            if color.bold {
                css.push_str(" font-weight: bold;");
            }
            if class == SpanClass::SqlComment || class == SpanClass::JavaComment {
                css.push_str(" font-style: italic;");
            }
            css.push_str(" }\n");
        }
        css
    }

    /// Render annotated text with ANSI truecolor escapes.
    ///
    /// Nested spans take the innermost color.
    pub fn to_ansi(&self, annotated: &str) -> String {
        self.render_ansi(Segments::new(annotated), annotated.len())
    }

    /// Like [`Theme::to_ansi`] for unescaped text such as SQL: entity-like
    /// text is printed as written.
    pub fn to_ansi_raw(&self, annotated: &str) -> String {
        self.render_ansi(Segments::raw(annotated), annotated.len())
    }

    fn render_ansi(&self, segments: Segments<'_>, capacity: usize) -> String {
        let mut out = String::with_capacity(capacity);
        for segment in segments {
            match segment.class {
                Some(class) => {
                    let color = self.color(class);
                    let (r, g, b) = color.rgb;
                    let styled = segment.text.truecolor(r, g, b);
                    let styled = if color.bold { styled.bold() } else { styled };
                    out.push_str(&styled.to_string());
                }
                None => out.push_str(&segment.text)
            }
        }
        out
    }
}

fn default_color(class: SpanClass) -> ThemeColor {
    match class {
        SpanClass::SqlKeyword | SpanClass::JavaKeyword => ThemeColor::bold(MAGENTA),
        SpanClass::SqlString => ThemeColor::new(GREEN),
        SpanClass::SqlNumber => ThemeColor::new(PURPLE),
        SpanClass::SqlComment | SpanClass::JavaComment => ThemeColor::new(GRAY),
        SpanClass::JavaType => ThemeColor::new(CYAN),
        SpanClass::JavaMethod => ThemeColor::new(GREEN),
        SpanClass::JavaVariable => ThemeColor::new(ORANGE),
        SpanClass::PlanKey => ThemeColor::new(CYAN),
        SpanClass::PlanValue => ThemeColor::new(FOREGROUND),
        SpanClass::PlanTypeBad | SpanClass::PlanRowsBad => ThemeColor::bold(RED),
        SpanClass::PlanTypeGood
        | SpanClass::PlanRowsGood
        | SpanClass::PlanExtraGood
        | SpanClass::PlanIndex => ThemeColor::new(GREEN),
        SpanClass::PlanNull | SpanClass::PlanSeparator => ThemeColor::new(GRAY),
        SpanClass::PlanRowsWarn | SpanClass::PlanExtraWarn => ThemeColor::new(YELLOW),
        SpanClass::PlanRowHeader => ThemeColor::bold(PURPLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::span;

    #[test]
    fn test_stylesheet_covers_every_class() {
        let css = Theme::default().stylesheet();
        for class in SpanClass::ALL {
            assert!(css.contains(&format!(".{} {{", class.as_str())));
        }
        assert_eq!(css.lines().count(), SpanClass::ALL.len());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(ThemeColor::parse_hex("#ff0080"), Some((255, 0, 128)));
        assert_eq!(ThemeColor::parse_hex("00FF00"), Some((0, 255, 0)));
        assert_eq!(ThemeColor::parse_hex("#fff"), None);
        assert_eq!(ThemeColor::parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("sql-keyword".to_string(), "#010203".to_string());
        let theme = Theme::default().with_overrides(&overrides).unwrap();
        assert_eq!(theme.color(SpanClass::SqlKeyword).rgb, (1, 2, 3));
        assert!(theme.color(SpanClass::SqlKeyword).bold);
    }

    #[test]
    fn test_raw_ansi_keeps_entity_text() {
        let text = format!("{} '&lt;b&gt;'", span(SpanClass::SqlKeyword, "SELECT"));
        let theme = Theme::default();
        assert!(theme.to_ansi_raw(&text).contains("'&lt;b&gt;'"));
        assert!(theme.to_ansi(&text).contains("'<b>'"));
    }

    #[test]
    fn test_unknown_override_class_fails() {
        let mut overrides = HashMap::new();
        overrides.insert("sql-nope".to_string(), "#010203".to_string());
        assert!(Theme::default().with_overrides(&overrides).is_err());
    }
}
