//! Normalized token model shared by every handler.
//!
//! [`TokenType`] is the tag the registry dispatches on and [`TokenValue`] is
//! the matching discriminated union of immutable value objects. Both are plain
//! serde data so a converted token collection can be persisted as-is.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Tag identifying a kind of design token.
///
/// The built-in tags cover everything this crate ships handlers for. Callers
/// registering their own handlers use [`TokenType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TokenType {
    Color,
    Dimension,
    Number,
    Boolean,
    String,
    Border,
    Gradient,
    Duration,
    CubicBezier,
    Transition,
    FontFamily,
    FontWeight,
    Shadow,
    Custom(String),
}

impl TokenType {
    /// A tag for a caller-defined handler. Names owned by a built-in tag
    /// resolve to that tag, so one name always maps to one handler.
    pub fn custom(tag: impl Into<String>) -> Self {
        TokenType::from(tag.into())
    }

    /// Fold a `Custom` tag spelled like a built-in onto the built-in.
    pub fn canonical(self) -> Self {
        match self {
            TokenType::Custom(tag) => TokenType::custom(tag),
            other => other,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::Number => "number",
            TokenType::Boolean => "boolean",
            TokenType::String => "string",
            TokenType::Border => "border",
            TokenType::Gradient => "gradient",
            TokenType::Duration => "duration",
            TokenType::CubicBezier => "cubicBezier",
            TokenType::Transition => "transition",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::Shadow => "shadow",
            TokenType::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "color" => TokenType::Color,
            "dimension" => TokenType::Dimension,
            "number" => TokenType::Number,
            "boolean" => TokenType::Boolean,
            "string" => TokenType::String,
            "border" => TokenType::Border,
            "gradient" => TokenType::Gradient,
            "duration" => TokenType::Duration,
            "cubicBezier" => TokenType::CubicBezier,
            "transition" => TokenType::Transition,
            "fontFamily" => TokenType::FontFamily,
            "fontWeight" => TokenType::FontWeight,
            "shadow" => TokenType::Shadow,
            other => TokenType::Custom(other.to_string()),
        })
    }
}

impl From<String> for TokenType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(token_type) => token_type,
            Err(never) => match never {},
        }
    }
}

impl From<TokenType> for String {
    fn from(value: TokenType) -> Self {
        value.as_str().to_string()
    }
}

fn default_alpha() -> f64 {
    1.0
}

/// An sRGB color with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

impl ColorValue {
    pub const BLACK: ColorValue = ColorValue::rgb(0.0, 0.0, 0.0);
    pub const WHITE: ColorValue = ColorValue::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// True when the color carries any transparency.
    pub fn is_translucent(&self) -> bool {
        self.a < 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    Px,
    Rem,
    Em,
}

impl DimensionUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionUnit::Px => "px",
            DimensionUnit::Rem => "rem",
            DimensionUnit::Em => "em",
        }
    }

    pub fn parse(unit: &str) -> Option<Self> {
        match unit {
            "px" => Some(DimensionUnit::Px),
            "rem" => Some(DimensionUnit::Rem),
            "em" => Some(DimensionUnit::Em),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub value: f64,
    pub unit: DimensionUnit,
}

impl DimensionValue {
    pub const fn px(value: f64) -> Self {
        Self { value, unit: DimensionUnit::Px }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
    None,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
            BorderStyle::Groove => "groove",
            BorderStyle::Ridge => "ridge",
            BorderStyle::Inset => "inset",
            BorderStyle::Outset => "outset",
            BorderStyle::None => "none",
        }
    }

    pub fn parse(style: &str) -> Option<Self> {
        match style {
            "solid" => Some(BorderStyle::Solid),
            "dashed" => Some(BorderStyle::Dashed),
            "dotted" => Some(BorderStyle::Dotted),
            "double" => Some(BorderStyle::Double),
            "groove" => Some(BorderStyle::Groove),
            "ridge" => Some(BorderStyle::Ridge),
            "inset" => Some(BorderStyle::Inset),
            "outset" => Some(BorderStyle::Outset),
            "none" => Some(BorderStyle::None),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderValue {
    pub width: DimensionValue,
    pub style: BorderStyle,
    pub color: ColorValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Linear,
    Radial,
    Conic,
}

impl GradientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradientType::Linear => "linear",
            GradientType::Radial => "radial",
            GradientType::Conic => "conic",
        }
    }
}

/// A color stop. `position` is in `[0, 1]`; only the first and last stop of
/// a parsed gradient are guaranteed to carry one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: ColorValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientValue {
    #[serde(rename = "type")]
    pub gradient_type: GradientType,
    /// Degrees in `[0, 360)`, linear gradients only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Ms,
    S,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Ms => "ms",
            DurationUnit::S => "s",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationValue {
    pub value: f64,
    pub unit: DurationUnit,
}

impl DurationValue {
    pub const fn ms(value: f64) -> Self {
        Self { value, unit: DurationUnit::Ms }
    }
}

/// Control points of a CSS `cubic-bezier()` curve. Out-of-domain curves are
/// accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierValue {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezierValue {
    /// The identity curve `cubic-bezier(0, 0, 1, 1)`.
    pub const LINEAR: CubicBezierValue = CubicBezierValue::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimingFunction {
    Keyword(String),
    CubicBezier(CubicBezierValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionValue {
    pub duration: DurationValue,
    pub timing_function: TimingFunction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<DurationValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowLayer {
    #[serde(default)]
    pub inset: bool,
    pub offset_x: DimensionValue,
    pub offset_y: DimensionValue,
    pub blur: DimensionValue,
    pub spread: DimensionValue,
    pub color: ColorValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowValue {
    pub layers: Vec<ShadowLayer>,
}

/// A normalized token value, keyed by its [`TokenType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TokenValue {
    Color(ColorValue),
    Dimension(DimensionValue),
    Number(f64),
    Boolean(bool),
    String(String),
    Border(BorderValue),
    Gradient(GradientValue),
    Duration(DurationValue),
    CubicBezier(CubicBezierValue),
    Transition(TransitionValue),
    FontFamily(Vec<String>),
    FontWeight(u16),
    Shadow(ShadowValue),
    /// Payload for a caller-registered [`TokenType::Custom`] tag.
    Custom { tag: String, data: serde_json::Value },
}

impl TokenValue {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenValue::Color(_) => TokenType::Color,
            TokenValue::Dimension(_) => TokenType::Dimension,
            TokenValue::Number(_) => TokenType::Number,
            TokenValue::Boolean(_) => TokenType::Boolean,
            TokenValue::String(_) => TokenType::String,
            TokenValue::Border(_) => TokenType::Border,
            TokenValue::Gradient(_) => TokenType::Gradient,
            TokenValue::Duration(_) => TokenType::Duration,
            TokenValue::CubicBezier(_) => TokenType::CubicBezier,
            TokenValue::Transition(_) => TokenType::Transition,
            TokenValue::FontFamily(_) => TokenType::FontFamily,
            TokenValue::FontWeight(_) => TokenType::FontWeight,
            TokenValue::Shadow(_) => TokenType::Shadow,
            TokenValue::Custom { tag, .. } => TokenType::custom(tag.clone()),
        }
    }
}

/// Detection hints exposed by the design tool's native variable API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaContext {
    /// `COLOR`, `FLOAT`, `STRING` or `BOOLEAN`.
    pub resolved_type: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FigmaContext {
    pub fn new(resolved_type: impl Into<String>) -> Self {
        Self {
            resolved_type: resolved_type.into(),
            scopes: Vec::new(),
            name: None,
        }
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Lowercased variable name, empty when the source gave none.
    pub fn name_lower(&self) -> String {
        self.name.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// Detection hints for the path + textual value source shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathValueContext {
    pub path: String,
    pub value: String,
}

impl PathValueContext {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn path_lower(&self) -> String {
        self.path.to_lowercase()
    }

    pub fn path_contains(&self, keyword: &str) -> bool {
        self.path_lower().contains(keyword)
    }
}
