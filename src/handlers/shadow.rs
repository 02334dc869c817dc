use regex::Regex;
use std::sync::LazyLock;

use crate::color::{color_to_rgb, parse_css_color};
use crate::errors::Result;
use crate::handler::Handler;
use crate::handlers::dimension::format_dimension;
use crate::handlers::{json_number, mismatch, NUMBER};
use crate::namespace::TailwindNamespace;
use crate::options::CssConversionOptions;
use crate::types::{
    ColorValue, DimensionUnit, DimensionValue, PathValueContext, ShadowLayer, ShadowValue,
    TokenType, TokenValue,
};

pub const PRIORITY: i32 = 70;

/// `[inset] <x> <y> [<blur>] [<spread>] <color>`
static SHADOW_LAYER: LazyLock<Regex> = LazyLock::new(|| {
    let length = format!(r"{NUMBER}(?:px|rem|em)?");
    Regex::new(&format!(
        r"^(inset\s+)?({length})\s+({length})(?:\s+({length}))?(?:\s+({length}))?\s+(#[0-9a-fA-F]+|rgba?\([^)]*\))$"
    ))
    .unwrap()
});

static LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^({NUMBER})(px|rem|em)?$")).unwrap());

pub fn handler() -> Handler {
    Handler::new(TokenType::Shadow, "Shadow", to_css)
        .with_priority(PRIORITY)
        .with_variable_defs_detection(detect_variable_defs)
        .with_figma_parser(parse_figma_value)
        .with_variable_defs_parser(parse_variable_defs_value)
        .with_default_namespace(TailwindNamespace::Shadow)
}

pub fn detect_variable_defs(context: &PathValueContext) -> bool {
    parse_shadow(&context.value).is_some()
}

/// Split on commas that are not inside parentheses.
fn split_layers(input: &str) -> Vec<&str> {
    let mut layers = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                layers.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    layers.push(&input[start..]);
    layers
}

fn parse_length(input: &str) -> Option<DimensionValue> {
    let caps = LENGTH.captures(input)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = match caps.get(2) {
        Some(unit) => DimensionUnit::parse(unit.as_str())?,
        None => DimensionUnit::Px,
    };
    Some(DimensionValue { value, unit })
}

fn parse_layer(input: &str) -> Option<ShadowLayer> {
    let caps = SHADOW_LAYER.captures(input.trim())?;
    let optional = |i: usize| -> Option<DimensionValue> {
        match caps.get(i) {
            Some(m) => parse_length(m.as_str()),
            None => Some(DimensionValue::px(0.0)),
        }
    };
    Some(ShadowLayer {
        inset: caps.get(1).is_some(),
        offset_x: parse_length(caps.get(2)?.as_str())?,
        offset_y: parse_length(caps.get(3)?.as_str())?,
        blur: optional(4)?,
        spread: optional(5)?,
        color: parse_css_color(caps.get(6)?.as_str())?,
    })
}

/// Parse a `box-shadow` list. One malformed layer makes the whole value
/// absent.
pub fn parse_shadow(input: &str) -> Option<ShadowValue> {
    let layers = split_layers(input)
        .into_iter()
        .map(parse_layer)
        .collect::<Option<Vec<_>>>()?;
    Some(ShadowValue { layers })
}

pub fn parse_variable_defs_value(raw: &str) -> Option<TokenValue> {
    parse_shadow(raw).map(TokenValue::Shadow)
}

fn native_layer(effect: &serde_json::Value) -> Option<ShadowLayer> {
    let inset = match effect.get("type")?.as_str()? {
        "DROP_SHADOW" => false,
        "INNER_SHADOW" => true,
        _ => return None,
    };
    let px = |value: Option<&serde_json::Value>| {
        DimensionValue::px(value.and_then(json_number).unwrap_or(0.0))
    };
    let offset = effect.get("offset");
    let color: ColorValue = match effect.get("color") {
        Some(color) => serde_json::from_value(color.clone()).ok()?,
        None => ColorValue::BLACK,
    };
    Some(ShadowLayer {
        inset,
        offset_x: px(offset.and_then(|o| o.get("x"))),
        offset_y: px(offset.and_then(|o| o.get("y"))),
        blur: px(effect.get("radius")),
        spread: px(effect.get("spread")),
        color,
    })
}

/// A native effect object, or an array of them. Effects other than drop
/// and inner shadows are ignored; no shadow at all is absent.
pub fn parse_figma_value(raw: &serde_json::Value) -> Option<TokenValue> {
    let layers: Vec<ShadowLayer> = match raw.as_array() {
        Some(effects) => effects.iter().filter_map(native_layer).collect(),
        None => native_layer(raw).into_iter().collect(),
    };
    if layers.is_empty() {
        return None;
    }
    Some(TokenValue::Shadow(ShadowValue { layers }))
}

fn render_layer(layer: &ShadowLayer) -> String {
    format!(
        "{}{} {} {} {} {}",
        if layer.inset { "inset " } else { "" },
        format_dimension(&layer.offset_x),
        format_dimension(&layer.offset_y),
        format_dimension(&layer.blur),
        format_dimension(&layer.spread),
        color_to_rgb(&layer.color)
    )
}

pub fn to_css(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
    let TokenValue::Shadow(shadow) = value else {
        return Err(mismatch(TokenType::Shadow, value));
    };
    Ok(shadow.layers.iter().map(render_layer).collect::<Vec<_>>().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_layer_defaults_blur_and_spread() {
        let shadow = parse_shadow("0 1px #000000").unwrap();
        assert_eq!(shadow.layers.len(), 1);
        let layer = shadow.layers[0];
        assert!(!layer.inset);
        assert_eq!(layer.offset_y, DimensionValue::px(1.0));
        assert_eq!(layer.blur, DimensionValue::px(0.0));
        assert_eq!(layer.spread, DimensionValue::px(0.0));
    }

    #[test]
    fn test_parse_multiple_layers_with_rgba() {
        let shadow =
            parse_shadow("0 1px 3px 0 rgba(0, 0, 0, 0.1), inset 0 1px 2px -1px rgba(0, 0, 0, 0.1)")
                .unwrap();
        assert_eq!(shadow.layers.len(), 2);
        assert!(shadow.layers[1].inset);
        assert_eq!(shadow.layers[1].spread, DimensionValue::px(-1.0));
        assert_eq!(shadow.layers[0].color.a, 0.1);
    }

    #[test]
    fn test_malformed_shadow_is_absent() {
        assert_eq!(parse_shadow("1px #000000"), None);
        assert_eq!(parse_shadow("0 1px 2px #000000, broken"), None);
        assert_eq!(parse_shadow("1px solid #000000"), None);
    }

    #[test]
    fn test_render_shadow_list() {
        let value = parse_variable_defs_value("0 4px 6px -1px rgba(0, 0, 0, 0.1)").unwrap();
        assert_eq!(
            to_css(&value, &CssConversionOptions::default()).unwrap(),
            "0px 4px 6px -1px rgba(0, 0, 0, 0.1)"
        );
    }

    #[test]
    fn test_native_effects() {
        let raw = json!([
            {
                "type": "DROP_SHADOW",
                "color": {"r": 0, "g": 0, "b": 0, "a": 0.25},
                "offset": {"x": 0, "y": 4},
                "radius": 4,
                "spread": 0
            },
            {"type": "LAYER_BLUR", "radius": 8}
        ]);
        let value = parse_figma_value(&raw).unwrap();
        assert_eq!(
            to_css(&value, &CssConversionOptions::default()).unwrap(),
            "0px 4px 4px 0px rgba(0, 0, 0, 0.25)"
        );
        assert_eq!(parse_figma_value(&json!({"type": "BACKGROUND_BLUR"})), None);
    }
}
