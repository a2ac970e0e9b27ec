use serde_json::Value;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Reads a finite number out of a loosely typed JSON value.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace allowed).
/// Everything else, including `NaN` and infinities, yields `None`.
pub fn parse_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Coerces a loosely typed amount to a non-negative number, `0.0` when unusable.
pub fn coerce_amount(value: Option<&Value>, field: &str) -> f64 {
    match parse_number(value) {
        Some(amount) => amount.abs(),
        None => {
            if value.is_some_and(|raw| !raw.is_null()) {
                tracing::debug!(field, "coerced non-numeric value to 0");
            }
            0.0
        }
    }
}

/// Extracts an identifier that may arrive as a string, a number, or a populated
/// document carrying its own `_id`.
pub fn coerce_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Object(map) => coerce_id(map.get("_id").or_else(|| map.get("id"))),
        _ => None,
    }
}

/// Returns the trimmed text, or `None` when it is blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_number_accepts_numeric_strings() {
        assert_eq!(parse_number(Some(&json!(" 12.5 "))), Some(12.5));
        assert_eq!(parse_number(Some(&json!(7))), Some(7.0));
        assert_eq!(parse_number(Some(&json!("abc"))), None);
        assert_eq!(parse_number(Some(&json!(true))), None);
        assert_eq!(parse_number(Some(&json!("NaN"))), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn coerce_amount_drops_sign_and_garbage() {
        assert_eq!(coerce_amount(Some(&json!(-40)), "amount"), 40.0);
        assert_eq!(coerce_amount(Some(&json!("ten")), "amount"), 0.0);
        assert_eq!(coerce_amount(Some(&Value::Null), "amount"), 0.0);
    }

    #[test]
    fn coerce_id_reads_populated_documents() {
        let populated = json!({ "_id": "64f0c0ffee", "name": "Ada" });
        assert_eq!(coerce_id(Some(&populated)), Some("64f0c0ffee".into()));
        assert_eq!(coerce_id(Some(&json!(42))), Some("42".into()));
        assert_eq!(coerce_id(Some(&json!("  "))), None);
    }
}
