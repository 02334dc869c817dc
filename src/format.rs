//! Number formatting shared by the color math and the handlers.

/// Shortest decimal form of a number: `1`, `0.25`, never `1.0` or `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
