//! Scalar tokens: numbers, booleans and free-form strings.

use crate::errors::Result;
use crate::format::format_number;
use crate::handler::Handler;
use crate::handlers::{json_number, mismatch};
use crate::namespace::{path_mentions, TailwindNamespace};
use crate::options::CssConversionOptions;
use crate::types::{FigmaContext, TokenType, TokenValue};

pub const BOOLEAN_PRIORITY: i32 = 20;
pub const NUMBER_PRIORITY: i32 = 10;
pub const STRING_PRIORITY: i32 = 0;

fn parse_plain_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

// Number

pub fn number_handler() -> Handler {
    Handler::new(TokenType::Number, "Number", number_to_css)
        .with_priority(NUMBER_PRIORITY)
        .with_figma_detection(|context| context.resolved_type == "FLOAT")
        .with_variable_defs_detection(|context| parse_plain_number(&context.value).is_some())
        .with_figma_parser(|raw| json_number(raw).map(TokenValue::Number))
        .with_variable_defs_parser(|raw| parse_plain_number(raw).map(TokenValue::Number))
        .with_namespace(number_namespace)
}

pub fn number_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::Number(number) => Ok(format_number(*number)),
        other => Err(mismatch(TokenType::Number, other)),
    }
}

/// Unitless numbers only land in a namespace when the path says which one.
pub fn number_namespace(path: &[String]) -> Option<TailwindNamespace> {
    if path_mentions(path, &["opacity", "alpha"]) {
        Some(TailwindNamespace::Opacity)
    } else if path_mentions(path, &["zindex", "layer", "elevation"]) {
        Some(TailwindNamespace::ZIndex)
    } else if path_mentions(path, &["fontweight"]) {
        Some(TailwindNamespace::FontWeight)
    } else if path_mentions(path, &["lineheight", "leading"]) {
        Some(TailwindNamespace::LineHeight)
    } else {
        None
    }
}

// Boolean

pub fn boolean_handler() -> Handler {
    Handler::new(TokenType::Boolean, "Boolean", boolean_to_css)
        .with_priority(BOOLEAN_PRIORITY)
        .with_figma_detection(|context| context.resolved_type == "BOOLEAN")
        .with_variable_defs_detection(|context| parse_boolean(&context.value).is_some())
        .with_figma_parser(|raw| raw.as_bool().map(TokenValue::Boolean))
        .with_variable_defs_parser(|raw| parse_boolean(raw).map(TokenValue::Boolean))
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn boolean_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::Boolean(flag) => Ok(flag.to_string()),
        other => Err(mismatch(TokenType::Boolean, other)),
    }
}

// String

/// The usual detection fallback. Claims native strings but never guesses
/// from a path/value pair.
pub fn string_handler() -> Handler {
    Handler::new(TokenType::String, "String", string_to_css)
        .with_priority(STRING_PRIORITY)
        .with_figma_detection(detect_string_figma)
        .with_figma_parser(|raw| raw.as_str().map(|s| TokenValue::String(s.to_string())))
        .with_variable_defs_parser(|raw| Some(TokenValue::String(raw.to_string())))
}

fn detect_string_figma(context: &FigmaContext) -> bool {
    context.resolved_type == "STRING"
}

pub fn string_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::String(text) => Ok(text.clone()),
        other => Err(mismatch(TokenType::String, other)),
    }
}
