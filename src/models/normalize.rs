// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use rand::Rng;
use serde_json::Value;

use crate::models::constants::{
    FALLBACK_DESCRIPTION, FALLBACK_FEATURES, FALLBACK_IMPACT, FALLBACK_INNOVATION,
    FALLBACK_NAME_PREFIX, FALLBACK_NAME_SPAN, FALLBACK_TIME_ESTIMATE,
};
use crate::models::types::IdeaRecord;

/// Normalize one raw ideas-array element into a fully populated record.
/// A string field counts as absent when the key is missing, null, not a
/// string, or empty. Entries that are not objects come out all-fallback.
pub fn idea_from_raw(raw: &Value, request_stack: &str) -> IdeaRecord {
    IdeaRecord {
        name: string_field(raw, "name").unwrap_or_else(fallback_name),
        description: string_field(raw, "description")
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
        time_estimate: string_field(raw, "time_estimate")
            .unwrap_or_else(|| FALLBACK_TIME_ESTIMATE.to_string()),
        tech_stack: string_field(raw, "tech_stack")
            .unwrap_or_else(|| request_stack.to_string()),
        innovation_level: string_field(raw, "innovation_level")
            .unwrap_or_else(|| FALLBACK_INNOVATION.to_string()),
        potential_impact: string_field(raw, "potential_impact")
            .unwrap_or_else(|| FALLBACK_IMPACT.to_string()),
        key_features: feature_list(raw),
    }
}

pub fn normalize_ideas(items: &[Value], request_stack: &str) -> Vec<IdeaRecord> {
    items
        .iter()
        .map(|raw| idea_from_raw(raw, request_stack))
        .collect()
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn feature_list(raw: &Value) -> Vec<String> {
    match raw.get("key_features").and_then(Value::as_array) {
        Some(items) => items.iter().map(feature_text).collect(),
        None => FALLBACK_FEATURES.iter().map(|f| f.to_string()).collect(),
    }
}

fn feature_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn fallback_name() -> String {
    let n = rand::thread_rng().gen_range(0..FALLBACK_NAME_SPAN);
    format!("{} {}", FALLBACK_NAME_PREFIX, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_gets_every_fallback() {
        let idea = idea_from_raw(&json!({}), "react-node");

        let suffix = idea
            .name
            .strip_prefix("Hackathon Idea ")
            .expect("fallback name prefix");
        let n: u32 = suffix.parse().expect("numeric fallback suffix");
        assert!(n < 1000);

        assert_eq!(idea.description, "No description provided");
        assert_eq!(idea.time_estimate, "Time estimate not specified");
        assert_eq!(idea.tech_stack, "react-node");
        assert_eq!(idea.innovation_level, "Medium");
        assert_eq!(
            idea.potential_impact,
            "Significant potential impact in target domain"
        );
        assert_eq!(
            idea.key_features,
            vec![
                "Innovative solution approach",
                "User-friendly interface",
                "Scalable architecture",
                "Real-world applicability",
            ]
        );
    }

    #[test]
    fn provided_fields_pass_through() {
        let raw = json!({
            "name": "EcoRoute Optimizer",
            "description": "Smart routing to cut delivery emissions",
            "time_estimate": "36-48 hours",
            "tech_stack": "python-flask",
            "innovation_level": "High",
            "potential_impact": "Cuts urban fleet emissions by a fifth",
            "key_features": ["Live traffic model", "CO2 ledger"],
        });
        let idea = idea_from_raw(&raw, "react-node");
        assert_eq!(idea.name, "EcoRoute Optimizer");
        assert_eq!(idea.description, "Smart routing to cut delivery emissions");
        assert_eq!(idea.time_estimate, "36-48 hours");
        assert_eq!(idea.tech_stack, "python-flask");
        assert_eq!(idea.innovation_level, "High");
        assert_eq!(idea.key_features, vec!["Live traffic model", "CO2 ledger"]);
    }

    #[test]
    fn empty_and_null_strings_fall_back() {
        let raw = json!({
            "name": "",
            "description": null,
            "innovation_level": 3,
        });
        let idea = idea_from_raw(&raw, "flutter");
        assert!(idea.name.starts_with("Hackathon Idea "));
        assert_eq!(idea.description, "No description provided");
        assert_eq!(idea.innovation_level, "Medium");
        assert_eq!(idea.tech_stack, "flutter");
    }

    #[test]
    fn non_object_entries_normalize_to_full_fallback() {
        let idea = idea_from_raw(&json!("just a string"), "svelte");
        assert!(idea.name.starts_with("Hackathon Idea "));
        assert_eq!(idea.tech_stack, "svelte");
        assert_eq!(idea.key_features.len(), 4);
    }

    #[test]
    fn feature_arrays_keep_their_shape() {
        let raw = json!({ "key_features": [] });
        assert!(idea_from_raw(&raw, "x").key_features.is_empty());

        let raw = json!({ "key_features": ["a", 2, true] });
        let idea = idea_from_raw(&raw, "x");
        assert_eq!(idea.key_features, vec!["a", "2", "true"]);

        let raw = json!({ "key_features": "not a list" });
        assert_eq!(idea_from_raw(&raw, "x").key_features.len(), 4);
    }

    #[test]
    fn list_order_is_preserved() {
        let items = vec![json!({"name": "First"}), json!({"name": "Second"})];
        let ideas = normalize_ideas(&items, "nextjs");
        assert_eq!(ideas[0].name, "First");
        assert_eq!(ideas[1].name, "Second");
    }
}
