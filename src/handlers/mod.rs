//! Built-in handlers, one module per token family.

pub mod border;
pub mod color;
pub mod dimension;
pub mod gradient;
pub mod primitives;
pub mod shadow;
pub mod timing;
pub mod typography;

use crate::errors::RegistryError;
use crate::handler::Handler;
use crate::types::{TokenType, TokenValue};

/// Unsigned or signed decimal, e.g. `1`, `-0.5`, `.25`.
pub(crate) const NUMBER: &str = r"[+-]?(?:\d+(?:\.\d+)?|\.\d+)";

/// Every handler this crate ships, in registration order.
pub fn builtin_handlers() -> Vec<Handler> {
    vec![
        color::handler(),
        gradient::handler(),
        border::handler(),
        shadow::handler(),
        timing::cubic_bezier_handler(),
        timing::duration_handler(),
        timing::transition_handler(),
        typography::font_family_handler(),
        typography::font_weight_handler(),
        dimension::handler(),
        primitives::boolean_handler(),
        primitives::number_handler(),
        primitives::string_handler(),
    ]
}

pub(crate) fn mismatch(expected: TokenType, value: &TokenValue) -> RegistryError {
    RegistryError::ValueMismatch {
        expected,
        found: value.token_type(),
    }
}

/// Native values are arbitrary JSON; numbers are the only scalar most
/// handlers accept.
pub(crate) fn json_number(raw: &serde_json::Value) -> Option<f64> {
    raw.as_f64().filter(|n| n.is_finite())
}
