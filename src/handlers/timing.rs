//! Durations, easing curves, and the composite transition they make up.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::Result;
use crate::format::format_number;
use crate::handler::Handler;
use crate::handlers::{json_number, mismatch, NUMBER};
use crate::namespace::TailwindNamespace;
use crate::options::CssConversionOptions;
use crate::types::{
    CubicBezierValue, DurationUnit, DurationValue, FigmaContext, PathValueContext, TimingFunction,
    TokenType, TokenValue, TransitionValue,
};

pub const CUBIC_BEZIER_PRIORITY: i32 = 60;
pub const DURATION_PRIORITY: i32 = 50;

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^({NUMBER})(ms|s)?$")).unwrap());

static DURATION_WITH_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{NUMBER}(ms|s)$")).unwrap());

static CUBIC_BEZIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^cubic-bezier\(\s*({NUMBER})\s*,\s*({NUMBER})\s*,\s*({NUMBER})\s*,\s*({NUMBER})\s*\)$"
    ))
    .unwrap()
});

// Duration

pub fn duration_handler() -> Handler {
    Handler::new(TokenType::Duration, "Duration", duration_to_css)
        .with_priority(DURATION_PRIORITY)
        .with_figma_detection(detect_duration_figma)
        .with_variable_defs_detection(detect_duration_variable_defs)
        .with_figma_parser(parse_duration_figma_value)
        .with_variable_defs_parser(parse_duration_variable_defs_value)
        .with_default_namespace(TailwindNamespace::TransitionDuration)
}

pub fn detect_duration_figma(context: &FigmaContext) -> bool {
    context.resolved_type == "FLOAT" && context.name_lower().contains("duration")
}

pub fn detect_duration_variable_defs(context: &PathValueContext) -> bool {
    let value = context.value.trim();
    if DURATION_WITH_UNIT.is_match(value) {
        return true;
    }
    context.path_contains("duration") && DURATION.is_match(value)
}

/// `<number>(ms|s)?`, milliseconds when the unit is omitted.
pub fn parse_duration(input: &str) -> Option<DurationValue> {
    let caps = DURATION.captures(input.trim())?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = match caps.get(2).map(|u| u.as_str()) {
        Some("s") => DurationUnit::S,
        _ => DurationUnit::Ms,
    };
    Some(DurationValue { value, unit })
}

/// Native durations are plain numbers in milliseconds.
pub fn parse_duration_figma_value(raw: &serde_json::Value) -> Option<TokenValue> {
    json_number(raw).map(|ms| TokenValue::Duration(DurationValue::ms(ms)))
}

pub fn parse_duration_variable_defs_value(raw: &str) -> Option<TokenValue> {
    parse_duration(raw).map(TokenValue::Duration)
}

pub fn format_duration(duration: &DurationValue) -> String {
    format!("{}{}", format_number(duration.value), duration.unit.as_str())
}

pub fn duration_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::Duration(duration) => Ok(format_duration(duration)),
        other => Err(mismatch(TokenType::Duration, other)),
    }
}

// Cubic bezier

pub fn cubic_bezier_handler() -> Handler {
    Handler::new(TokenType::CubicBezier, "Cubic Bezier", cubic_bezier_to_css)
        .with_priority(CUBIC_BEZIER_PRIORITY)
        .with_variable_defs_detection(detect_cubic_bezier_variable_defs)
        .with_figma_parser(parse_cubic_bezier_figma_value)
        .with_variable_defs_parser(parse_cubic_bezier_variable_defs_value)
        .with_default_namespace(TailwindNamespace::TransitionTimingFunction)
}

pub fn detect_cubic_bezier_variable_defs(context: &PathValueContext) -> bool {
    CUBIC_BEZIER.is_match(context.value.trim())
}

pub fn parse_cubic_bezier(input: &str) -> Option<CubicBezierValue> {
    let caps = CUBIC_BEZIER.captures(input.trim())?;
    let point = |i: usize| -> Option<f64> { caps.get(i)?.as_str().parse().ok() };
    Some(CubicBezierValue::new(point(1)?, point(2)?, point(3)?, point(4)?))
}

/// Native curves are `[x1, y1, x2, y2]`; missing trailing points come from
/// the identity curve.
pub fn parse_cubic_bezier_figma_value(raw: &serde_json::Value) -> Option<TokenValue> {
    let points = raw.as_array()?;
    let identity = [
        CubicBezierValue::LINEAR.x1,
        CubicBezierValue::LINEAR.y1,
        CubicBezierValue::LINEAR.x2,
        CubicBezierValue::LINEAR.y2,
    ];
    let mut curve = identity;
    for (slot, point) in curve.iter_mut().zip(points) {
        *slot = json_number(point)?;
    }
    let [x1, y1, x2, y2] = curve;
    Some(TokenValue::CubicBezier(CubicBezierValue::new(x1, y1, x2, y2)))
}

pub fn parse_cubic_bezier_variable_defs_value(raw: &str) -> Option<TokenValue> {
    parse_cubic_bezier(raw).map(TokenValue::CubicBezier)
}

pub fn format_cubic_bezier(curve: &CubicBezierValue) -> String {
    format!(
        "cubic-bezier({}, {}, {}, {})",
        format_number(curve.x1),
        format_number(curve.y1),
        format_number(curve.x2),
        format_number(curve.y2)
    )
}

pub fn cubic_bezier_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::CubicBezier(curve) => Ok(format_cubic_bezier(curve)),
        other => Err(mismatch(TokenType::CubicBezier, other)),
    }
}

// Transition

/// Render-only: transitions are assembled by callers, never detected.
pub fn transition_handler() -> Handler {
    Handler::new(TokenType::Transition, "Transition", transition_to_css)
}

pub fn format_transition(transition: &TransitionValue) -> String {
    let timing = match &transition.timing_function {
        TimingFunction::Keyword(keyword) => keyword.clone(),
        TimingFunction::CubicBezier(curve) => format_cubic_bezier(curve),
    };
    let mut css = format!("{} {}", format_duration(&transition.duration), timing);
    if let Some(delay) = &transition.delay {
        css.push(' ');
        css.push_str(&format_duration(delay));
    }
    css
}

pub fn transition_to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    match value {
        TokenValue::Transition(transition) => Ok(format_transition(transition)),
        other => Err(mismatch(TokenType::Transition, other)),
    }
}
