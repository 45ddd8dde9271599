//! Fallback-key extraction over heterogeneous JSON company objects.
//!
//! Each field is described by an ordered chain of keys; the first key whose
//! value is a non-empty string wins. Numbers are accepted and rendered as
//! text so `{"batch": 2021}` still produces a value.
use serde_json::Value;

/// Ordered keys tried for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldChain(pub &'static [&'static str]);

pub const NAME: FieldChain = FieldChain(&["name", "companyName", "title"]);
pub const BATCH: FieldChain = FieldChain(&["batch", "ycBatch", "season"]);
pub const DESCRIPTION: FieldChain = FieldChain(&["shortDescription", "description", "pitch"]);
pub const WEBSITE: FieldChain = FieldChain(&["website", "url"]);
pub const FOUNDER_NAME: FieldChain = FieldChain(&["name"]);
pub const FOUNDER_PROFILE: FieldChain = FieldChain(&["linkedinUrl", "linkedin"]);

/// Keys that conventionally hold the company list in an envelope object.
const LIST_KEYS: [&str; 3] = ["companies", "results", "data"];

impl FieldChain {
    /// First present, non-empty value along the chain.
    pub fn first(&self, item: &Value) -> Option<String> {
        self.0.iter().find_map(|key| text_of(item.get(*key)?))
    }

    /// Like [`FieldChain::first`] with a fallback.
    pub fn or(&self, item: &Value, fallback: impl FnOnce() -> String) -> String {
        self.first(item).unwrap_or_else(fallback)
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Locate the list of company objects in a REST payload.
///
/// Accepts a bare list, an envelope with a `companies`, `results` or `data`
/// list, or failing those the first list-valued entry of the object.
/// Anything else has no company list.
pub fn company_list(data: &Value) -> Option<&[Value]> {
    match data {
        Value::Array(items) => Some(items),
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
            .or_else(|| map.values().find_map(Value::as_array))
            .map(Vec::as_slice),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_key_present_wins() {
        let item = json!({"companyName": "Acme", "title": "Ignored"});
        assert_eq!(NAME.first(&item).as_deref(), Some("Acme"));
    }

    #[test]
    fn empty_and_null_values_are_absent() {
        let item = json!({"name": "", "companyName": null, "title": "Acme"});
        assert_eq!(NAME.first(&item).as_deref(), Some("Acme"));
        assert_eq!(BATCH.or(&item, || "Unknown".into()), "Unknown");
    }

    #[test]
    fn numbers_render_as_text() {
        assert_eq!(BATCH.first(&json!({"season": 2021})).as_deref(), Some("2021"));
    }

    #[test]
    fn list_shapes() {
        let bare = json!([{"name": "a"}]);
        assert_eq!(company_list(&bare).map(<[Value]>::len), Some(1));

        let results = json!({"meta": {}, "results": [{}, {}]});
        assert_eq!(company_list(&results).map(<[Value]>::len), Some(2));

        let nested = json!({"data": {"x": 1}, "items": [{}, {}, {}]});
        assert_eq!(company_list(&nested).map(<[Value]>::len), Some(3));

        assert_eq!(company_list(&json!([])).map(<[Value]>::len), Some(0));
    }

    #[test]
    fn shapes_without_a_list_have_none() {
        assert!(company_list(&json!({"count": 0})).is_none());
        assert!(company_list(&json!({"data": {"companies": [{"name": "Acme"}]}})).is_none());
        assert!(company_list(&json!("nope")).is_none());
    }
}
