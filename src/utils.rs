pub type IntentName = String;
pub type SlotName = String;
pub type SlotType = String;
pub type TagLabel = String;

/// Renders a JSON value the way it reads in an utterance: strings without
/// their quotes, everything else in its JSON form.
pub fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_value_to_text() {
        assert_eq!("celsius", value_to_text(&json!("celsius")));
        assert_eq!("42", value_to_text(&json!(42)));
        assert_eq!("true", value_to_text(&json!(true)));
        assert_eq!("[1,2]", value_to_text(&json!([1, 2])));
    }
}
