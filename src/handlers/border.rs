use regex::Regex;
use std::sync::LazyLock;

use crate::color::{color_to_rgb, parse_css_color};
use crate::errors::Result;
use crate::format::format_number;
use crate::handler::Handler;
use crate::handlers::{mismatch, NUMBER};
use crate::namespace::TailwindNamespace;
use crate::options::CssConversionOptions;
use crate::types::{
    BorderStyle, BorderValue, DimensionUnit, DimensionValue, PathValueContext, TokenType,
    TokenValue,
};

pub const PRIORITY: i32 = 80;

const STYLES: &str = "solid|dashed|dotted|double|groove|ridge|inset|outset|none";

/// `<width><unit>? <style> <color>`
static BORDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({NUMBER})(px|rem|em)?\s+({STYLES})\s+(#[0-9a-fA-F]+|rgba?\([^)]*\))$"
    ))
    .unwrap()
});

/// Prefix check used when the path gives no hint.
static BORDER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({NUMBER})(px|rem|em)?\s+({STYLES})\b")).unwrap()
});

pub fn handler() -> Handler {
    Handler::new(TokenType::Border, "Border", to_css)
        .with_priority(PRIORITY)
        .with_variable_defs_detection(detect_variable_defs)
        .with_variable_defs_parser(parse_variable_defs_value)
        .with_default_namespace(TailwindNamespace::Border)
}

pub fn detect_variable_defs(context: &PathValueContext) -> bool {
    let path = context.path_lower();
    if path.contains("border") && !path.contains("radius") {
        return true;
    }
    BORDER_PREFIX.is_match(context.value.trim())
}

/// Parse a border shorthand. The unit defaults to `px`; any deviation from
/// the grammar yields `None`.
pub fn parse_border_string(input: &str) -> Option<BorderValue> {
    let caps = BORDER.captures(input.trim())?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = match caps.get(2) {
        Some(unit) => DimensionUnit::parse(unit.as_str())?,
        None => DimensionUnit::Px,
    };
    let style = BorderStyle::parse(caps.get(3)?.as_str())?;
    let color = parse_css_color(caps.get(4)?.as_str())?;
    Some(BorderValue {
        width: DimensionValue { value, unit },
        style,
        color,
    })
}

pub fn parse_variable_defs_value(raw: &str) -> Option<TokenValue> {
    parse_border_string(raw).map(TokenValue::Border)
}

/// The color is always rendered as `rgb()`; the requested color format does
/// not apply to borders.
pub fn to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    let TokenValue::Border(border) = value else {
        return Err(mismatch(TokenType::Border, value));
    };
    Ok(format!(
        "{}{} {} {}",
        format_number(border.width.value),
        border.width.unit.as_str(),
        border.style.as_str(),
        color_to_rgb(&border.color)
    ))
}
