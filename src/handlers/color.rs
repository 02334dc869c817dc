use crate::color::{
    color_to_hex, color_to_hsl, color_to_oklch, color_to_rgb, is_hex_color, parse_hex,
};
use crate::errors::Result;
use crate::handler::Handler;
use crate::handlers::{json_number, mismatch};
use crate::namespace::TailwindNamespace;
use crate::options::{CssColorFormat, CssConversionOptions, ScssColorFormat, ScssConversionOptions};
use crate::types::{ColorValue, FigmaContext, PathValueContext, TokenType, TokenValue};

pub const PRIORITY: i32 = 100;

const PATH_KEYWORDS: &[&str] = &["color", "colour", "palette"];

pub fn handler() -> Handler {
    Handler::new(TokenType::Color, "Color", to_css)
        .with_priority(PRIORITY)
        .with_figma_detection(detect_figma)
        .with_variable_defs_detection(detect_variable_defs)
        .with_figma_parser(parse_figma_value)
        .with_variable_defs_parser(parse_variable_defs_value)
        .with_scss(to_scss)
        .with_default_namespace(TailwindNamespace::Color)
}

pub fn detect_figma(context: &FigmaContext) -> bool {
    context.resolved_type == "COLOR"
}

/// A path keyword only helps if the value is hex anyway; a bare hex value is
/// a color whatever its path, unless it is part of a gradient.
pub fn detect_variable_defs(context: &PathValueContext) -> bool {
    let value = context.value.trim();
    let hinted = PATH_KEYWORDS.iter().any(|k| context.path_contains(k));
    if hinted && is_hex_color(value) {
        return true;
    }
    is_hex_color(value) && !value.contains("gradient")
}

/// The native value is already `{r, g, b, a}` in `[0, 1]`.
pub fn parse_figma_value(raw: &serde_json::Value) -> Option<TokenValue> {
    let channel = |key: &str| raw.get(key).and_then(json_number);
    let a = match raw.get("a") {
        Some(alpha) => json_number(alpha)?,
        None => 1.0,
    };
    Some(TokenValue::Color(ColorValue::new(
        channel("r")?,
        channel("g")?,
        channel("b")?,
        a,
    )))
}

pub fn parse_variable_defs_value(raw: &str) -> Option<TokenValue> {
    parse_hex(raw.trim()).map(TokenValue::Color)
}

fn color_of(value: &TokenValue) -> Result<&ColorValue> {
    match value {
        TokenValue::Color(color) => Ok(color),
        other => Err(mismatch(TokenType::Color, other)),
    }
}

pub fn to_css(value: &TokenValue, options: &CssConversionOptions) -> Result<String> {
    let color = color_of(value)?;
    Ok(match options.color_format.unwrap_or_default() {
        CssColorFormat::Hex => color_to_hex(color),
        CssColorFormat::Rgb => color_to_rgb(color),
        CssColorFormat::Oklch => color_to_oklch(color),
    })
}

pub fn to_scss(value: &TokenValue, options: &ScssConversionOptions) -> Result<String> {
    let color = color_of(value)?;
    Ok(match options.color_format.unwrap_or_default() {
        ScssColorFormat::Hex => color_to_hex(color),
        ScssColorFormat::Rgb => color_to_rgb(color),
        ScssColorFormat::Hsl => color_to_hsl(color),
    })
}
