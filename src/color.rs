//! Color math: encoding a [`ColorValue`] as hex, `rgb()`, `hsl()` and
//! `oklch()` strings, and decoding the hex and `rgb()` forms back.
//!
//! The Oklch path goes sRGB → linear sRGB → XYZ (D65) → LMS → Oklab → Oklch
//! with fixed matrices, so output is reproducible to the printed precision.

use regex::Regex;
use std::sync::LazyLock;

use crate::format::format_number;
use crate::types::ColorValue;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*([+-]?\d*\.?\d+)\s*[,\s]\s*([+-]?\d*\.?\d+)\s*[,\s]\s*([+-]?\d*\.?\d+)\s*(?:[,/]\s*([+-]?\d*\.?\d+)(%)?\s*)?\)$",
    )
    .unwrap()
});

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const XYZ_TO_LMS: [[f64; 3]; 3] = [
    [0.8189330101, 0.3618667424, -0.1288597137],
    [0.0329845436, 0.9293118715, 0.0361456387],
    [0.0482003018, 0.2643662691, 0.6338517070],
];

const LMS_TO_OKLAB: [[f64; 3]; 3] = [
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
];

fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// sRGB transfer function: gamma-encoded channel to linear light.
pub fn to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Oklab `(L, a, b)` for gamma-encoded sRGB channels.
pub fn rgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let linear = [to_linear(r), to_linear(g), to_linear(b)];
    let xyz = mul(&SRGB_TO_XYZ, linear);
    let lms = mul(&XYZ_TO_LMS, xyz).map(f64::cbrt);
    let [l, a, b] = mul(&LMS_TO_OKLAB, lms);
    (l, a, b)
}

/// Oklch `(L, C, H)` with `L` in `[0, 1]` and `H` in degrees, `[0, 360)`.
pub fn rgb_to_oklch(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (l, a, b) = rgb_to_oklab(r, g, b);
    let chroma = (a * a + b * b).sqrt();
    let hue = b.atan2(a).to_degrees().rem_euclid(360.0);
    (l, chroma, hue)
}

fn channel_to_byte(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

fn format_alpha(a: f64) -> String {
    format_number((a * 100.0).round() / 100.0)
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Parse `#RRGGBB` or `#RRGGBBAA`. Anything else yields `None`.
pub fn parse_hex(hex: &str) -> Option<ColorValue> {
    if !is_hex_color(hex) {
        return None;
    }
    let digits = &hex[1..];
    let channel = |i: usize| -> Option<f64> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|byte| f64::from(byte) / 255.0)
    };
    let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Some(ColorValue::new(channel(0)?, channel(2)?, channel(4)?, a))
}

/// Parse `rgb(r, g, b)` / `rgba(r, g, b, a)`, also accepting the
/// space-separated `rgb(r g b / a)` form. Channels are 0-255.
pub fn parse_rgb_function(value: &str) -> Option<ColorValue> {
    let caps = RGB_FUNCTION.captures(value.trim())?;
    let channel = |i: usize| -> Option<f64> {
        let raw: f64 = caps.get(i)?.as_str().parse().ok()?;
        Some((raw / 255.0).clamp(0.0, 1.0))
    };
    let a = match caps.get(4) {
        Some(alpha) => {
            let raw: f64 = alpha.as_str().parse().ok()?;
            let raw = if caps.get(5).is_some() { raw / 100.0 } else { raw };
            raw.clamp(0.0, 1.0)
        }
        None => 1.0,
    };
    Some(ColorValue::new(channel(1)?, channel(2)?, channel(3)?, a))
}

/// Hex or `rgb(a)()`; the two color grammars that appear inside composite
/// values such as borders and gradients.
pub fn parse_css_color(value: &str) -> Option<ColorValue> {
    let value = value.trim();
    if value.starts_with('#') {
        parse_hex(value)
    } else {
        parse_rgb_function(value)
    }
}

/// `#rrggbb`, or `#rrggbbaa` when the color is translucent.
pub fn color_to_hex(color: &ColorValue) -> String {
    let mut hex = format!(
        "#{:02x}{:02x}{:02x}",
        channel_to_byte(color.r),
        channel_to_byte(color.g),
        channel_to_byte(color.b)
    );
    if color.is_translucent() {
        hex.push_str(&format!("{:02x}", channel_to_byte(color.a)));
    }
    hex
}

pub fn color_to_rgb(color: &ColorValue) -> String {
    let (r, g, b) = (
        channel_to_byte(color.r),
        channel_to_byte(color.g),
        channel_to_byte(color.b),
    );
    if color.is_translucent() {
        format!("rgba({}, {}, {}, {})", r, g, b, format_alpha(color.a))
    } else {
        format!("rgb({}, {}, {})", r, g, b)
    }
}

pub fn color_to_hsl(color: &ColorValue) -> String {
    let (r, g, b) = (
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    let (h, s, l) = ((h * 360.0).round(), (s * 100.0).round(), (l * 100.0).round());
    if color.is_translucent() {
        format!("hsla({}, {}%, {}%, {})", h, s, l, format_alpha(color.a))
    } else {
        format!("hsl({}, {}%, {}%)", h, s, l)
    }
}

/// `oklch(L% C H)` with 2/4/2 decimals, plus ` / a` for translucent colors.
pub fn color_to_oklch(color: &ColorValue) -> String {
    let (l, c, h) = rgb_to_oklch(color.r, color.g, color.b);
    let alpha = if color.is_translucent() {
        format!(" / {:.2}", color.a)
    } else {
        String::new()
    };
    format!("oklch({:.2}% {:.4} {:.2}{})", l * 100.0, c, h, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_six_and_eight_digits() {
        assert_eq!(parse_hex("#ff0000"), Some(ColorValue::rgb(1.0, 0.0, 0.0)));

        let translucent = parse_hex("#00000080").unwrap();
        assert_eq!(translucent.a, 128.0 / 255.0);
        assert!(translucent.is_translucent());
    }

    #[test]
    fn test_parse_hex_rejects_other_shapes() {
        for input in ["ff0000", "#fff", "#ff00", "#ff00000", "#gg0000", "rgb(0, 0, 0)", ""] {
            assert_eq!(parse_hex(input), None, "input: {}", input);
        }
    }

    #[test]
    fn test_hex_round_trip_is_a_fixed_point() {
        for hex in ["#1a73e8", "#000000", "#ffffff", "#3366cc80", "#00ff00ff"] {
            let once = parse_hex(hex).unwrap();
            let twice = parse_hex(&color_to_hex(&once)).unwrap();
            assert_eq!(once, twice, "hex: {}", hex);
        }
    }

    #[test]
    fn test_hex_emits_alpha_only_when_translucent() {
        assert_eq!(color_to_hex(&ColorValue::rgb(1.0, 0.0, 0.0)), "#ff0000");
        assert_eq!(color_to_hex(&ColorValue::new(1.0, 0.0, 0.0, 0.5)), "#ff000080");
        // "#ff0000ff" is opaque and normalizes to six digits.
        assert_eq!(color_to_hex(&parse_hex("#ff0000ff").unwrap()), "#ff0000");
    }

    #[test]
    fn test_rgb_formatting() {
        assert_eq!(color_to_rgb(&ColorValue::BLACK), "rgb(0, 0, 0)");
        assert_eq!(
            color_to_rgb(&parse_hex("#3366cc80").unwrap()),
            "rgba(51, 102, 204, 0.5)"
        );
    }

    #[test]
    fn test_hsl_formatting() {
        let color = parse_hex("#3366cc").unwrap();
        assert_eq!(color_to_hsl(&color), "hsl(220, 60%, 50%)");
        assert_eq!(color_to_hsl(&ColorValue::WHITE), "hsl(0, 0%, 100%)");
        assert_eq!(
            color_to_hsl(&ColorValue::new(1.0, 0.0, 0.0, 0.25)),
            "hsla(0, 100%, 50%, 0.25)"
        );
    }

    #[test]
    fn test_oklch_regression_fixtures() {
        assert_eq!(color_to_oklch(&ColorValue::rgb(1.0, 0.0, 0.0)), "oklch(62.80% 0.2576 29.23)");
        assert_eq!(color_to_oklch(&ColorValue::rgb(0.0, 1.0, 0.0)), "oklch(86.64% 0.2948 142.51)");
        assert_eq!(color_to_oklch(&ColorValue::rgb(0.0, 0.0, 1.0)), "oklch(45.20% 0.3133 264.06)");
        assert_eq!(color_to_oklch(&ColorValue::BLACK), "oklch(0.00% 0.0000 0.00)");
    }

    #[test]
    fn test_oklch_appends_alpha() {
        let color = ColorValue::new(1.0, 0.0, 0.0, 0.5);
        assert_eq!(color_to_oklch(&color), "oklch(62.80% 0.2576 29.23 / 0.50)");
    }

    #[test]
    fn test_oklch_hue_is_normalized() {
        for hex in ["#1a73e8", "#ff00ff", "#00ffff", "#123456"] {
            let c = parse_hex(hex).unwrap();
            let (_, _, h) = rgb_to_oklch(c.r, c.g, c.b);
            assert!((0.0..360.0).contains(&h), "{} hue {}", hex, h);
        }
    }

    #[test]
    fn test_to_linear_threshold() {
        assert_eq!(to_linear(0.0), 0.0);
        assert_eq!(to_linear(0.04045), 0.04045 / 12.92);
        assert!((to_linear(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_rgb_function_forms() {
        assert_eq!(parse_rgb_function("rgb(255, 0, 0)"), Some(ColorValue::rgb(1.0, 0.0, 0.0)));
        assert_eq!(
            parse_rgb_function("rgba(0, 0, 0, 0.5)"),
            Some(ColorValue::new(0.0, 0.0, 0.0, 0.5))
        );
        assert_eq!(
            parse_rgb_function("rgb(0 0 0 / 25%)"),
            Some(ColorValue::new(0.0, 0.0, 0.0, 0.25))
        );
        assert_eq!(parse_rgb_function("rgb(0, 0)"), None);
    }
}
