//! The dispatch table from [`TokenType`] to [`Handler`].
//!
//! Registration happens once, up front, through `&mut self`. After that the
//! registry is only read, so a finished `Registry` can be shared across
//! threads without locking.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::errors::{RegistryError, Result};
use crate::handler::Handler;
use crate::handlers::builtin_handlers;
use crate::namespace::TailwindNamespace;
use crate::options::{CssConversionOptions, ScssConversionOptions};
use crate::types::{FigmaContext, PathValueContext, TokenType, TokenValue};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Handlers keyed by type, in registration order.
    handlers: IndexMap<TokenType, Handler>,
    /// Indices into `handlers`, highest priority first. Equal priorities
    /// keep registration order.
    detection_order: Vec<usize>,
    /// Type reported when no handler claims a value.
    fallback: Option<TokenType>,
}

impl Registry {
    /// An empty registry with no detection fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in handler.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for handler in builtin_handlers() {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    pub fn with_fallback(mut self, fallback: TokenType) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn set_fallback(&mut self, fallback: Option<TokenType>) {
        self.fallback = fallback;
    }

    pub fn fallback(&self) -> Option<&TokenType> {
        self.fallback.as_ref()
    }

    /// Add a handler. Each type may only be registered once.
    pub fn register(&mut self, handler: Handler) -> Result<()> {
        let token_type = handler.token_type().clone();
        if self.handlers.contains_key(&token_type) {
            return Err(RegistryError::DuplicateType(token_type));
        }
        debug!(
            "Registering handler '{}' for type '{}' (priority {})",
            handler.name(),
            token_type,
            handler.priority()
        );
        self.handlers.insert(token_type, handler);
        self.rebuild_detection_order();
        Ok(())
    }

    fn rebuild_detection_order(&mut self) {
        let mut order: Vec<usize> = (0..self.handlers.len()).collect();
        // sort_by_key is stable, so ties stay in registration order
        order.sort_by_key(|&i| std::cmp::Reverse(self.handlers[i].priority()));
        self.detection_order = order;
    }

    /// Handler tags are canonical, so a `Custom` lookup spelled like a
    /// built-in is folded before searching.
    pub fn get_handler(&self, token_type: &TokenType) -> Option<&Handler> {
        match token_type {
            TokenType::Custom(_) => self.handlers.get(&token_type.clone().canonical()),
            builtin => self.handlers.get(builtin),
        }
    }

    fn require_handler(&self, token_type: &TokenType) -> Result<&Handler> {
        self.get_handler(token_type)
            .ok_or_else(|| RegistryError::UnknownType(token_type.clone()))
    }

    pub fn contains(&self, token_type: &TokenType) -> bool {
        self.get_handler(token_type).is_some()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TokenType> {
        self.handlers.keys()
    }

    /// Handlers in detection order.
    pub fn handlers(&self) -> impl Iterator<Item = &Handler> {
        self.detection_order.iter().map(|&i| &self.handlers[i])
    }

    /// First handler, by priority, whose native detector claims the context.
    pub fn try_detect_from_figma_shape(&self, context: &FigmaContext) -> Option<TokenType> {
        let detected = self
            .handlers()
            .find(|handler| handler.detect_figma(context) == Some(true))
            .map(|handler| handler.token_type().clone());
        trace!(
            "Native detection for {:?} ({}): {:?}",
            context.name,
            context.resolved_type,
            detected
        );
        detected
    }

    pub fn try_detect_from_path_value_shape(&self, context: &PathValueContext) -> Option<TokenType> {
        let detected = self
            .handlers()
            .find(|handler| handler.detect_variable_defs(context) == Some(true))
            .map(|handler| handler.token_type().clone());
        trace!(
            "Path/value detection for '{}' = '{}': {:?}",
            context.path,
            context.value,
            detected
        );
        detected
    }

    /// Like [`Registry::try_detect_from_figma_shape`], falling back to the
    /// configured fallback type, or `NoMatch` when there is none.
    pub fn detect_from_figma_shape(&self, context: &FigmaContext) -> Result<TokenType> {
        self.try_detect_from_figma_shape(context)
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| RegistryError::NoMatch {
                context: format!(
                    "resolvedType={}, scopes={:?}, name={:?}",
                    context.resolved_type, context.scopes, context.name
                ),
            })
    }

    pub fn detect_from_path_value_shape(&self, context: &PathValueContext) -> Result<TokenType> {
        self.try_detect_from_path_value_shape(context)
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| RegistryError::NoMatch {
                context: format!("path={}, value={}", context.path, context.value),
            })
    }

    /// `Ok(None)` when the value does not parse or the handler has no native
    /// parser.
    pub fn parse_figma_value(
        &self,
        token_type: &TokenType,
        raw: &serde_json::Value,
    ) -> Result<Option<TokenValue>> {
        Ok(self.require_handler(token_type)?.parse_figma(raw))
    }

    pub fn parse_variable_defs_value(
        &self,
        token_type: &TokenType,
        raw: &str,
    ) -> Result<Option<TokenValue>> {
        Ok(self.require_handler(token_type)?.parse_variable_defs(raw))
    }

    /// Detect then parse a native variable.
    pub fn detect_and_parse_figma(
        &self,
        context: &FigmaContext,
        raw: &serde_json::Value,
    ) -> Result<Option<(TokenType, TokenValue)>> {
        let token_type = self.detect_from_figma_shape(context)?;
        let value = self.parse_figma_value(&token_type, raw)?;
        Ok(value.map(|value| (token_type, value)))
    }

    /// Detect then parse a path/value pair.
    pub fn detect_and_parse_variable_defs(
        &self,
        context: &PathValueContext,
    ) -> Result<Option<(TokenType, TokenValue)>> {
        let token_type = self.detect_from_path_value_shape(context)?;
        let value = self.parse_variable_defs_value(&token_type, &context.value)?;
        Ok(value.map(|value| (token_type, value)))
    }

    pub fn to_css(
        &self,
        token_type: &TokenType,
        value: &TokenValue,
        options: &CssConversionOptions,
    ) -> Result<String> {
        self.require_handler(token_type)?.to_css(value, options)
    }

    /// Every type renders as SCSS: handlers without a SCSS renderer use their
    /// CSS one.
    pub fn to_scss(
        &self,
        token_type: &TokenType,
        value: &TokenValue,
        options: &ScssConversionOptions,
    ) -> Result<String> {
        self.require_handler(token_type)?.to_scss(value, options)
    }

    pub fn get_namespace(
        &self,
        token_type: &TokenType,
        path: &[String],
    ) -> Result<Option<TailwindNamespace>> {
        Ok(self.require_handler(token_type)?.namespace(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_context: &PathValueContext) -> bool {
        true
    }

    fn render_nothing(_value: &TokenValue, _options: &CssConversionOptions) -> Result<String> {
        Ok(String::new())
    }

    fn custom(tag: &str, priority: i32) -> Handler {
        Handler::new(TokenType::Custom(tag.into()), tag, render_nothing)
            .with_priority(priority)
            .with_variable_defs_detection(always)
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = Registry::new();
        registry.register(custom("a", 0)).unwrap();
        let err = registry.register(custom("a", 5)).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateType(TokenType::Custom(ref t)) if t == "a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_custom_tag_cannot_shadow_builtin() {
        let mut registry = Registry::builtin().unwrap();
        let before = registry.len();

        let alias = Handler::new(TokenType::Custom("color".into()), "Color Alias", render_nothing);
        let err = registry.register(alias).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateType(TokenType::Color)));

        assert_eq!(registry.len(), before);
        assert_eq!(registry.types().filter(|t| t.as_str() == "color").count(), 1);
        assert_eq!(
            registry.get_handler(&TokenType::Custom("color".into())).unwrap().name(),
            "Color"
        );
    }

    #[test]
    fn test_detection_order_is_priority_then_registration() {
        let mut registry = Registry::new();
        registry.register(custom("low", 1)).unwrap();
        registry.register(custom("first-high", 9)).unwrap();
        registry.register(custom("second-high", 9)).unwrap();

        let order: Vec<_> = registry.handlers().map(|h| h.name().to_string()).collect();
        assert_eq!(order, vec!["first-high", "second-high", "low"]);

        let detected = registry.try_detect_from_path_value_shape(&PathValueContext::new("x", "y"));
        assert_eq!(detected, Some(TokenType::Custom("first-high".into())));
    }

    #[test]
    fn test_types_keep_registration_order() {
        let mut registry = Registry::new();
        registry.register(custom("b", 1)).unwrap();
        registry.register(custom("a", 2)).unwrap();
        let types: Vec<_> = registry.types().map(|t| t.as_str().to_string()).collect();
        assert_eq!(types, vec!["b", "a"]);
    }

    #[test]
    fn test_unknown_type_dispatch_is_an_error() {
        let registry = Registry::new();
        let result = registry.to_css(
            &TokenType::Color,
            &TokenValue::Boolean(true),
            &CssConversionOptions::default(),
        );
        assert!(matches!(result, Err(RegistryError::UnknownType(TokenType::Color))));
        assert!(registry.get_namespace(&TokenType::Color, &[]).is_err());
    }

    #[test]
    fn test_exhausted_detection_uses_fallback() {
        let registry = Registry::new();
        let ctx = PathValueContext::new("x", "y");
        assert!(matches!(
            registry.detect_from_path_value_shape(&ctx),
            Err(RegistryError::NoMatch { .. })
        ));

        let registry = registry.with_fallback(TokenType::String);
        assert_eq!(registry.detect_from_path_value_shape(&ctx).unwrap(), TokenType::String);
        assert_eq!(registry.try_detect_from_path_value_shape(&ctx), None);
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Registry>();
    }
}
