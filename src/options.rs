use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Color encodings available when rendering CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CssColorFormat {
    #[default]
    Hex,
    Rgb,
    Oklch,
}

/// Color encodings available when rendering SCSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScssColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
}

/// Options passed to every CSS renderer.
///
/// Handlers read only what they understand. `prefix` is carried for the
/// stylesheet layer and no handler consumes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CssConversionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_format: Option<CssColorFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl CssConversionOptions {
    pub fn with_color_format(color_format: CssColorFormat) -> Self {
        Self {
            color_format: Some(color_format),
            prefix: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScssConversionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_format: Option<ScssColorFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl ScssConversionOptions {
    pub fn with_color_format(color_format: ScssColorFormat) -> Self {
        Self {
            color_format: Some(color_format),
            prefix: None,
        }
    }
}

/// Used when a handler has no SCSS renderer of its own. HSL has no CSS
/// counterpart here and falls back to the CSS default.
impl From<&ScssConversionOptions> for CssConversionOptions {
    fn from(options: &ScssConversionOptions) -> Self {
        let color_format = match options.color_format {
            Some(ScssColorFormat::Hex) => Some(CssColorFormat::Hex),
            Some(ScssColorFormat::Rgb) => Some(CssColorFormat::Rgb),
            Some(ScssColorFormat::Hsl) | None => None,
        };
        Self {
            color_format,
            prefix: options.prefix.clone(),
        }
    }
}
