use serde::{Deserialize, Serialize};
use std::fmt;

/// Tailwind theme namespace a token is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TailwindNamespace {
    Color,
    Spacing,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    LetterSpacing,
    Radius,
    Shadow,
    Opacity,
    TransitionDuration,
    TransitionTimingFunction,
    ZIndex,
    Border,
    Gradient,
    Animation,
    Blur,
}

impl TailwindNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            TailwindNamespace::Color => "color",
            TailwindNamespace::Spacing => "spacing",
            TailwindNamespace::FontFamily => "font-family",
            TailwindNamespace::FontSize => "font-size",
            TailwindNamespace::FontWeight => "font-weight",
            TailwindNamespace::LineHeight => "line-height",
            TailwindNamespace::LetterSpacing => "letter-spacing",
            TailwindNamespace::Radius => "radius",
            TailwindNamespace::Shadow => "shadow",
            TailwindNamespace::Opacity => "opacity",
            TailwindNamespace::TransitionDuration => "transition-duration",
            TailwindNamespace::TransitionTimingFunction => "transition-timing-function",
            TailwindNamespace::ZIndex => "z-index",
            TailwindNamespace::Border => "border",
            TailwindNamespace::Gradient => "gradient",
            TailwindNamespace::Animation => "animation",
            TailwindNamespace::Blur => "blur",
        }
    }
}

impl fmt::Display for TailwindNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased path segments with `-`, `_` and spaces removed, so that
/// `fontSize`, `font-size` and `font_size` all compare equal.
pub(crate) fn normalized_segments(path: &[String]) -> Vec<String> {
    path.iter()
        .map(|segment| {
            segment
                .chars()
                .filter(|c| !matches!(c, '-' | '_' | ' '))
                .flat_map(char::to_lowercase)
                .collect()
        })
        .collect()
}

/// True when any segment contains any of the (already normalized) keywords.
pub(crate) fn path_mentions(path: &[String], keywords: &[&str]) -> bool {
    normalized_segments(path)
        .iter()
        .any(|segment| keywords.iter().any(|keyword| segment.contains(keyword)))
}
