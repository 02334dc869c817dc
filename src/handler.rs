//! The per-type handler record.
//!
//! A handler is a bundle of plain function pointers rather than a trait
//! object: handlers are stateless, the value model stays plain data, and a new
//! token kind is added by registering one more record.

use crate::errors::Result;
use crate::namespace::TailwindNamespace;
use crate::options::{CssConversionOptions, ScssConversionOptions};
use crate::types::{FigmaContext, PathValueContext, TokenType, TokenValue};

pub type DetectFigmaFn = fn(&FigmaContext) -> bool;
pub type DetectVariableDefsFn = fn(&PathValueContext) -> bool;
pub type ParseFigmaFn = fn(&serde_json::Value) -> Option<TokenValue>;
pub type ParseVariableDefsFn = fn(&str) -> Option<TokenValue>;
pub type ToCssFn = fn(&TokenValue, &CssConversionOptions) -> Result<String>;
pub type ToScssFn = fn(&TokenValue, &ScssConversionOptions) -> Result<String>;
pub type NamespaceFn = fn(&[String]) -> Option<TailwindNamespace>;

/// Detection, parsing and rendering for one [`TokenType`].
///
/// `to_css` is the only mandatory slot, so it is taken by [`Handler::new`];
/// everything else is opted into with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct Handler {
    token_type: TokenType,
    name: String,
    priority: i32,
    detect_figma: Option<DetectFigmaFn>,
    detect_variable_defs: Option<DetectVariableDefsFn>,
    parse_figma: Option<ParseFigmaFn>,
    parse_variable_defs: Option<ParseVariableDefsFn>,
    to_css: ToCssFn,
    to_scss: Option<ToScssFn>,
    namespace: Option<NamespaceFn>,
    default_namespace: Option<TailwindNamespace>,
}

impl Handler {
    pub fn new(token_type: TokenType, name: impl Into<String>, to_css: ToCssFn) -> Self {
        Self {
            token_type: token_type.canonical(),
            name: name.into(),
            priority: 0,
            detect_figma: None,
            detect_variable_defs: None,
            parse_figma: None,
            parse_variable_defs: None,
            to_css,
            to_scss: None,
            namespace: None,
            default_namespace: None,
        }
    }

    /// Higher priorities are asked first during detection.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_figma_detection(mut self, detect: DetectFigmaFn) -> Self {
        self.detect_figma = Some(detect);
        self
    }

    pub fn with_variable_defs_detection(mut self, detect: DetectVariableDefsFn) -> Self {
        self.detect_variable_defs = Some(detect);
        self
    }

    pub fn with_figma_parser(mut self, parse: ParseFigmaFn) -> Self {
        self.parse_figma = Some(parse);
        self
    }

    pub fn with_variable_defs_parser(mut self, parse: ParseVariableDefsFn) -> Self {
        self.parse_variable_defs = Some(parse);
        self
    }

    pub fn with_scss(mut self, to_scss: ToScssFn) -> Self {
        self.to_scss = Some(to_scss);
        self
    }

    pub fn with_namespace(mut self, namespace: NamespaceFn) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn with_default_namespace(mut self, namespace: TailwindNamespace) -> Self {
        self.default_namespace = Some(namespace);
        self
    }

    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn has_figma_detection(&self) -> bool {
        self.detect_figma.is_some()
    }

    pub fn has_variable_defs_detection(&self) -> bool {
        self.detect_variable_defs.is_some()
    }

    /// `None` when the handler does not take part in native detection.
    pub fn detect_figma(&self, context: &FigmaContext) -> Option<bool> {
        self.detect_figma.map(|detect| detect(context))
    }

    pub fn detect_variable_defs(&self, context: &PathValueContext) -> Option<bool> {
        self.detect_variable_defs.map(|detect| detect(context))
    }

    pub fn parse_figma(&self, raw: &serde_json::Value) -> Option<TokenValue> {
        self.parse_figma.and_then(|parse| parse(raw))
    }

    pub fn parse_variable_defs(&self, raw: &str) -> Option<TokenValue> {
        self.parse_variable_defs.and_then(|parse| parse(raw))
    }

    pub fn to_css(&self, value: &TokenValue, options: &CssConversionOptions) -> Result<String> {
        (self.to_css)(value, options)
    }

    /// Falls back to the CSS renderer when no SCSS renderer was declared.
    pub fn to_scss(&self, value: &TokenValue, options: &ScssConversionOptions) -> Result<String> {
        match self.to_scss {
            Some(to_scss) => to_scss(value, options),
            None => (self.to_css)(value, &CssConversionOptions::from(options)),
        }
    }

    pub fn namespace(&self, path: &[String]) -> Option<TailwindNamespace> {
        match self.namespace {
            Some(resolve) => resolve(path),
            None => self.default_namespace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RegistryError;

    fn render_custom(value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
        match value {
            TokenValue::Custom { data, .. } => Ok(data.to_string()),
            other => Err(RegistryError::ValueMismatch {
                expected: TokenType::Custom("elevation".into()),
                found: other.token_type(),
            }),
        }
    }

    #[test]
    fn test_minimal_handler_has_no_optional_slots() {
        let handler = Handler::new(TokenType::Custom("elevation".into()), "Elevation", render_custom);
        assert_eq!(handler.priority(), 0);
        assert_eq!(handler.detect_figma(&FigmaContext::new("FLOAT")), None);
        assert_eq!(handler.parse_variable_defs("3"), None);
        assert_eq!(handler.namespace(&[]), None);
    }

    #[test]
    fn test_scss_falls_back_to_css_renderer() {
        let handler = Handler::new(TokenType::Custom("elevation".into()), "Elevation", render_custom);
        let value = TokenValue::Custom {
            tag: "elevation".into(),
            data: serde_json::json!(3),
        };
        let scss = handler.to_scss(&value, &ScssConversionOptions::default()).unwrap();
        assert_eq!(scss, "3");
    }

    #[test]
    fn test_default_namespace_used_without_resolver() {
        let handler = Handler::new(TokenType::Custom("elevation".into()), "Elevation", render_custom)
            .with_default_namespace(TailwindNamespace::Shadow);
        assert_eq!(handler.namespace(&["elevation".into()]), Some(TailwindNamespace::Shadow));
    }
}
