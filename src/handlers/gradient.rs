//! Gradients, from CSS gradient functions or from the design tool's native
//! paint objects.

use regex::Regex;
use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::color::{color_to_rgb, parse_css_color};
use crate::errors::Result;
use crate::format::format_number;
use crate::handler::Handler;
use crate::handlers::{json_number, mismatch, NUMBER};
use crate::namespace::TailwindNamespace;
use crate::options::CssConversionOptions;
use crate::types::{
    ColorValue, GradientStop, GradientType, GradientValue, PathValueContext, TokenType, TokenValue,
};

pub const PRIORITY: i32 = 90;

static GRADIENT_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(linear|radial|conic)-gradient\((.*)\)$").unwrap());

static LEADING_ANGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*({NUMBER})(deg|turn|grad|rad)\s*,?")).unwrap()
});

/// A color (hex, `rgb(a)()`, or a bare word) with an optional percentage.
static COLOR_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(#[0-9a-fA-F]+|rgba?\([^)]*\)|[a-zA-Z]+)(?:\s+({NUMBER})%)?"
    ))
    .unwrap()
});

pub fn handler() -> Handler {
    Handler::new(TokenType::Gradient, "Gradient", to_css)
        .with_priority(PRIORITY)
        .with_variable_defs_detection(detect_variable_defs)
        .with_figma_parser(parse_figma_value)
        .with_variable_defs_parser(parse_variable_defs_value)
        .with_default_namespace(TailwindNamespace::Gradient)
}

pub fn detect_variable_defs(context: &PathValueContext) -> bool {
    GRADIENT_FUNCTION.is_match(context.value.trim())
}

fn angle_to_degrees(value: f64, unit: &str) -> f64 {
    let degrees = match unit {
        "turn" => value * 360.0,
        "rad" => value * 180.0 / PI,
        "grad" => value * 0.9,
        _ => value,
    };
    degrees.rem_euclid(360.0)
}

/// Parse `linear-gradient(...)`, `radial-gradient(...)` or
/// `conic-gradient(...)`.
///
/// Only the first and last stop receive a default position (0 and 1); other
/// missing positions stay absent. Named colors are recognized but skipped,
/// since there is no name table to resolve them with.
pub fn parse_gradient_string(input: &str) -> Option<GradientValue> {
    let caps = GRADIENT_FUNCTION.captures(input.trim())?;
    let gradient_type = match caps.get(1)?.as_str() {
        "radial" => GradientType::Radial,
        "conic" => GradientType::Conic,
        _ => GradientType::Linear,
    };
    let mut body = caps.get(2)?.as_str();

    let mut angle = None;
    if gradient_type == GradientType::Linear {
        if let Some(angle_caps) = LEADING_ANGLE.captures(body) {
            let value: f64 = angle_caps.get(1)?.as_str().parse().ok()?;
            angle = Some(angle_to_degrees(value, angle_caps.get(2)?.as_str()));
            body = &body[angle_caps.get(0)?.end()..];
        }
    }

    let mut stops: Vec<GradientStop> = COLOR_STOP
        .captures_iter(body)
        .filter_map(|stop| {
            let color = parse_css_color(stop.get(1)?.as_str())?;
            let position = stop
                .get(2)
                .and_then(|p| p.as_str().parse::<f64>().ok())
                .map(|percent| percent / 100.0);
            Some(GradientStop { color, position })
        })
        .collect();

    if stops.is_empty() {
        return None;
    }
    if let Some(first) = stops.first_mut() {
        first.position.get_or_insert(0.0);
    }
    if stops.len() > 1 {
        if let Some(last) = stops.last_mut() {
            last.position.get_or_insert(1.0);
        }
    }

    Some(GradientValue {
        gradient_type,
        angle,
        stops,
    })
}

pub fn parse_variable_defs_value(raw: &str) -> Option<TokenValue> {
    parse_gradient_string(raw).map(TokenValue::Gradient)
}

/// CSS angle for a gradient whose first two handles run from `start` to
/// `end`, in `[0, 360)`. A handle pointing right maps to `180`.
///
/// The angle is `atan2(dx, dy)`, not `atan2(dy, dx)`, so rotation runs the
/// mirrored way: down is `90`, left is `0`, up is `270`.
pub fn handle_angle(start: (f64, f64), end: (f64, f64)) -> f64 {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    (dx.atan2(dy).to_degrees() + 90.0).rem_euclid(360.0)
}

fn default_stops() -> Vec<GradientStop> {
    vec![
        GradientStop {
            color: ColorValue::BLACK,
            position: Some(0.0),
        },
        GradientStop {
            color: ColorValue::WHITE,
            position: Some(1.0),
        },
    ]
}

fn native_point(raw: &serde_json::Value) -> Option<(f64, f64)> {
    Some((json_number(raw.get("x")?)?, json_number(raw.get("y")?)?))
}

fn native_stop(raw: &serde_json::Value) -> Option<GradientStop> {
    let color: ColorValue = serde_json::from_value(raw.get("color")?.clone()).ok()?;
    let position = raw.get("position").and_then(json_number);
    Some(GradientStop { color, position })
}

/// Build a gradient from a native paint object. Never fails: when no stops
/// can be read, a black to white gradient stands in so the rest of the
/// collection still converts.
pub fn parse_native_gradient(raw: &serde_json::Value) -> GradientValue {
    let gradient_type = match raw.get("type").and_then(|t| t.as_str()) {
        Some("GRADIENT_RADIAL") => GradientType::Radial,
        Some("GRADIENT_ANGULAR") => GradientType::Conic,
        _ => GradientType::Linear,
    };

    let angle = if gradient_type == GradientType::Linear {
        raw.get("gradientHandlePositions")
            .and_then(|handles| handles.as_array())
            .and_then(|handles| {
                let start = native_point(handles.first()?)?;
                let end = native_point(handles.get(1)?)?;
                Some(handle_angle(start, end))
            })
    } else {
        None
    };

    let stops: Vec<GradientStop> = raw
        .get("gradientStops")
        .and_then(|stops| stops.as_array())
        .map(|stops| stops.iter().filter_map(native_stop).collect())
        .unwrap_or_default();

    GradientValue {
        gradient_type,
        angle,
        stops: if stops.is_empty() { default_stops() } else { stops },
    }
}

pub fn parse_figma_value(raw: &serde_json::Value) -> Option<TokenValue> {
    Some(TokenValue::Gradient(parse_native_gradient(raw)))
}

fn render_stop(stop: &GradientStop) -> String {
    match stop.position {
        Some(position) => format!("{} {:.1}%", color_to_rgb(&stop.color), position * 100.0),
        None => color_to_rgb(&stop.color),
    }
}

pub fn to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    let TokenValue::Gradient(gradient) = value else {
        return Err(mismatch(TokenType::Gradient, value));
    };
    let stops = gradient
        .stops
        .iter()
        .map(render_stop)
        .collect::<Vec<_>>()
        .join(", ");
    let kind = gradient.gradient_type.as_str();
    Ok(match gradient.gradient_type {
        GradientType::Linear => format!(
            "{}-gradient({}deg, {})",
            kind,
            format_number(gradient.angle.unwrap_or(0.0)),
            stops
        ),
        GradientType::Radial | GradientType::Conic => format!("{}-gradient({})", kind, stops),
    })
}
