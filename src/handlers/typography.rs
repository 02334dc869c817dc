//! Font families and font weights.

use crate::errors::Result;
use crate::handler::Handler;
use crate::handlers::{json_number, mismatch};
use crate::namespace::TailwindNamespace;
use crate::options::CssConversionOptions;
use crate::types::{FigmaContext, PathValueContext, TokenType, TokenValue};

pub const FONT_FAMILY_PRIORITY: i32 = 45;
pub const FONT_WEIGHT_PRIORITY: i32 = 42;

const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
];

const WEIGHT_KEYWORDS: &[(&str, u16)] = &[
    ("thin", 100),
    ("hairline", 100),
    ("extralight", 200),
    ("ultralight", 200),
    ("light", 300),
    ("normal", 400),
    ("regular", 400),
    ("medium", 500),
    ("semibold", 600),
    ("demibold", 600),
    ("bold", 700),
    ("extrabold", 800),
    ("ultrabold", 800),
    ("black", 900),
    ("heavy", 900),
];

/// Lowercase with `-`, `_` and spaces removed.
fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// Font family

pub fn font_family_handler() -> Handler {
    Handler::new(TokenType::FontFamily, "Font Family", font_family_to_css)
        .with_priority(FONT_FAMILY_PRIORITY)
        .with_figma_detection(detect_font_family_figma)
        .with_variable_defs_detection(detect_font_family_variable_defs)
        .with_figma_parser(|raw| raw.as_str().and_then(parse_font_family).map(TokenValue::FontFamily))
        .with_variable_defs_parser(|raw| parse_font_family(raw).map(TokenValue::FontFamily))
        .with_default_namespace(TailwindNamespace::FontFamily)
}

pub fn detect_font_family_figma(context: &FigmaContext) -> bool {
    context.resolved_type == "STRING" && context.has_scope("FONT_FAMILY")
}

pub fn detect_font_family_variable_defs(context: &PathValueContext) -> bool {
    let path = compact(&context.path);
    (path.contains("fontfamily") || path.contains("family")) && !context.value.trim().is_empty()
}

/// Split a CSS font stack, stripping quotes. An empty stack is absent.
pub fn parse_font_family(input: &str) -> Option<Vec<String>> {
    let families: Vec<String> = input
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if families.is_empty() {
        None
    } else {
        Some(families)
    }
}

fn quote_family(name: &str) -> String {
    let bare = GENERIC_FAMILIES.contains(&name)
        || name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if bare {
        name.to_string()
    } else {
        format!("\"{}\"", name)
    }
}

pub fn font_family_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::FontFamily(families) => Ok(families
            .iter()
            .map(|name| quote_family(name))
            .collect::<Vec<_>>()
            .join(", ")),
        other => Err(mismatch(TokenType::FontFamily, other)),
    }
}

// Font weight

pub fn font_weight_handler() -> Handler {
    Handler::new(TokenType::FontWeight, "Font Weight", font_weight_to_css)
        .with_priority(FONT_WEIGHT_PRIORITY)
        .with_figma_detection(detect_font_weight_figma)
        .with_variable_defs_detection(detect_font_weight_variable_defs)
        .with_figma_parser(|raw| json_number(raw).and_then(weight_from_number).map(TokenValue::FontWeight))
        .with_variable_defs_parser(|raw| parse_font_weight(raw).map(TokenValue::FontWeight))
        .with_default_namespace(TailwindNamespace::FontWeight)
}

pub fn detect_font_weight_figma(context: &FigmaContext) -> bool {
    context.resolved_type == "FLOAT" && context.has_scope("FONT_WEIGHT")
}

pub fn detect_font_weight_variable_defs(context: &PathValueContext) -> bool {
    compact(&context.path).contains("weight") && parse_font_weight(&context.value).is_some()
}

fn weight_from_number(weight: f64) -> Option<u16> {
    let rounded = weight.round();
    (1.0..=1000.0).contains(&rounded).then_some(rounded as u16)
}

/// A numeric weight in `1..=1000` or a named weight such as `semi-bold`.
pub fn parse_font_weight(input: &str) -> Option<u16> {
    let trimmed = input.trim();
    if let Ok(number) = trimmed.parse::<f64>() {
        return weight_from_number(number);
    }
    let keyword = compact(trimmed);
    WEIGHT_KEYWORDS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, weight)| *weight)
}

pub fn font_weight_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::FontWeight(weight) => Ok(weight.to_string()),
        other => Err(mismatch(TokenType::FontWeight, other)),
    }
}
