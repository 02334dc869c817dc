use regex::Regex;
use std::sync::LazyLock;

use crate::errors::Result;
use crate::format::format_number;
use crate::handler::Handler;
use crate::handlers::{json_number, mismatch, NUMBER};
use crate::namespace::{path_mentions, TailwindNamespace};
use crate::options::CssConversionOptions;
use crate::types::{
    DimensionUnit, DimensionValue, FigmaContext, PathValueContext, TokenType, TokenValue,
};

pub const PRIORITY: i32 = 40;

/// Native scopes that only make sense for lengths.
const SIZE_SCOPES: &[&str] = &[
    "WIDTH_HEIGHT",
    "GAP",
    "CORNER_RADIUS",
    "STROKE_FLOAT",
    "FONT_SIZE",
    "LINE_HEIGHT",
    "LETTER_SPACING",
    "EFFECT_FLOAT",
];

static DIMENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^({NUMBER})(px|rem|em)$")).unwrap());

pub fn handler() -> Handler {
    Handler::new(TokenType::Dimension, "Dimension", to_css)
        .with_priority(PRIORITY)
        .with_figma_detection(detect_figma)
        .with_variable_defs_detection(detect_variable_defs)
        .with_figma_parser(parse_figma_value)
        .with_variable_defs_parser(parse_variable_defs_value)
        .with_namespace(namespace)
}

pub fn detect_figma(context: &FigmaContext) -> bool {
    context.resolved_type == "FLOAT" && SIZE_SCOPES.iter().any(|scope| context.has_scope(scope))
}

pub fn detect_variable_defs(context: &PathValueContext) -> bool {
    DIMENSION.is_match(context.value.trim())
}

pub fn parse_dimension(input: &str) -> Option<DimensionValue> {
    let caps = DIMENSION.captures(input.trim())?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = DimensionUnit::parse(caps.get(2)?.as_str())?;
    Some(DimensionValue { value, unit })
}

/// Native lengths are unitless numbers in pixels.
pub fn parse_figma_value(raw: &serde_json::Value) -> Option<TokenValue> {
    json_number(raw).map(|px| TokenValue::Dimension(DimensionValue::px(px)))
}

pub fn parse_variable_defs_value(raw: &str) -> Option<TokenValue> {
    parse_dimension(raw).map(TokenValue::Dimension)
}

pub fn format_dimension(dimension: &DimensionValue) -> String {
    format!("{}{}", format_number(dimension.value), dimension.unit.as_str())
}

pub fn to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::Dimension(dimension) => Ok(format_dimension(dimension)),
        other => Err(mismatch(TokenType::Dimension, other)),
    }
}

/// Lengths default to spacing unless the path names a more specific scale.
pub fn namespace(path: &[String]) -> Option<TailwindNamespace> {
    let rules: &[(&[&str], TailwindNamespace)] = &[
        (&["radius", "rounded"], TailwindNamespace::Radius),
        (&["fontsize", "textsize"], TailwindNamespace::FontSize),
        (&["lineheight", "leading"], TailwindNamespace::LineHeight),
        (&["letterspacing", "tracking"], TailwindNamespace::LetterSpacing),
        (&["blur"], TailwindNamespace::Blur),
        (&["border", "stroke"], TailwindNamespace::Border),
    ];
    let resolved = rules
        .iter()
        .find(|(keywords, _)| path_mentions(path, keywords))
        .map(|(_, namespace)| *namespace)
        .unwrap_or(TailwindNamespace::Spacing);
    Some(resolved)
}
