//! Field precedence for the merged recipe.
//!
//! | field                                   | source                                                      |
//! |-----------------------------------------|-------------------------------------------------------------|
//! | any other field                         | detail overrides search result                              |
//! | `instructions`                          | detail, then search result (non-empty strings), else `""`   |
//! | `analyzedInstructions`                  | separate call, then detail (non-empty arrays), else `null`  |
//! | `readyInMinutes`, `servings`, `summary` | detail, else `null`                                         |

use serde_json::{Map, Value};

const DETAIL_ONLY_FIELDS: [&str; 3] = ["readyInMinutes", "servings", "summary"];

pub fn merge_recipe(search_result: &Value, detail: &Value, analyzed: Option<&Value>) -> Value {
    let mut merged = search_result.as_object().cloned().unwrap_or_default();

    if let Some(detail_fields) = detail.as_object() {
        for (key, value) in detail_fields {
            merged.insert(key.clone(), value.clone());
        }
    }

    let instructions = non_empty_str(detail.get("instructions"))
        .or_else(|| non_empty_str(search_result.get("instructions")))
        .unwrap_or("");
    merged.insert(
        "instructions".to_string(),
        Value::String(instructions.to_string()),
    );

    let analyzed_instructions = non_empty_array(analyzed)
        .or_else(|| non_empty_array(detail.get("analyzedInstructions")))
        .cloned()
        .unwrap_or(Value::Null);
    merged.insert("analyzedInstructions".to_string(), analyzed_instructions);

    for field in DETAIL_ONLY_FIELDS {
        let value = detail
            .get(field)
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or(Value::Null);
        merged.insert(field.to_string(), value);
    }

    Value::Object(merged)
}

/// Id of the first search result, when there is one to enrich.
pub fn first_recipe_id(search_payload: &Value) -> Option<String> {
    let first = search_payload.get("results")?.as_array()?.first()?;
    match first.get("id")? {
        Value::Number(n) => Some(match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(id), _, _) => id.to_string(),
            (None, Some(id), _) => id.to_string(),
            // 42.0 addresses recipe 42
            (None, None, Some(id)) if id.fract() == 0.0 && id.abs() < 9.0e15 => {
                format!("{}", id as i64)
            }
            _ => n.to_string(),
        }),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// The search payload with `results` swapped for the single merged recipe.
pub fn replace_results(search_payload: &Value, merged: Value) -> Value {
    let mut payload: Map<String, Value> = search_payload.as_object().cloned().unwrap_or_default();
    payload.insert("results".to_string(), Value::Array(vec![merged]));
    Value::Object(payload)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn non_empty_array(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| v.as_array().is_some_and(|items| !items.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_overrides_search_fields() {
        let search = json!({"id": 42, "title": "Pasta", "image": "a.jpg"});
        let detail = json!({"id": 42, "title": "Pasta al pomodoro", "sourceUrl": "https://x"});

        let merged = merge_recipe(&search, &detail, None);

        assert_eq!(merged["title"], "Pasta al pomodoro");
        assert_eq!(merged["image"], "a.jpg");
        assert_eq!(merged["sourceUrl"], "https://x");
    }

    #[test]
    fn test_boil_water_scenario() {
        let search = json!({"id": 42, "title": "Pasta"});
        let detail = json!({"instructions": "Boil water", "servings": 4});
        let analyzed = json!([]);

        let merged = merge_recipe(&search, &detail, Some(&analyzed));

        assert_eq!(merged["instructions"], "Boil water");
        assert_eq!(merged["servings"], 4);
        assert_eq!(merged["analyzedInstructions"], Value::Null);
        assert_eq!(merged["readyInMinutes"], Value::Null);
        assert_eq!(merged["summary"], Value::Null);
    }

    #[test]
    fn test_instructions_fall_back_to_search_result_then_empty() {
        let search = json!({"id": 1, "instructions": "From search"});
        let detail = json!({"instructions": ""});
        assert_eq!(
            merge_recipe(&search, &detail, None)["instructions"],
            "From search"
        );

        let merged = merge_recipe(&json!({"id": 1}), &json!({"instructions": null}), None);
        assert_eq!(merged["instructions"], "");
    }

    #[test]
    fn test_analyzed_instructions_precedence() {
        let steps = json!([{"name": "", "steps": [{"number": 1, "step": "Boil"}]}]);
        let detail_steps = json!([{"name": "detail", "steps": []}]);
        let detail = json!({"analyzedInstructions": detail_steps.clone()});

        let merged = merge_recipe(&json!({}), &detail, Some(&steps));
        assert_eq!(merged["analyzedInstructions"], steps);

        let merged = merge_recipe(&json!({}), &detail, Some(&json!([])));
        assert_eq!(merged["analyzedInstructions"], detail_steps);

        let merged = merge_recipe(&json!({}), &detail, None);
        assert_eq!(merged["analyzedInstructions"], detail_steps);

        let merged = merge_recipe(&json!({}), &json!({"analyzedInstructions": []}), None);
        assert_eq!(merged["analyzedInstructions"], Value::Null);
    }

    #[test]
    fn test_detail_only_fields_ignore_search_values() {
        let search = json!({"readyInMinutes": 45, "servings": 2, "summary": "old"});
        let detail = json!({"readyInMinutes": 30});

        let merged = merge_recipe(&search, &detail, None);

        assert_eq!(merged["readyInMinutes"], 30);
        assert_eq!(merged["servings"], Value::Null);
        assert_eq!(merged["summary"], Value::Null);
    }

    #[test]
    fn test_first_recipe_id() {
        assert_eq!(
            first_recipe_id(&json!({"results": [{"id": 42}, {"id": 7}]})),
            Some("42".to_string())
        );
        assert_eq!(
            first_recipe_id(&json!({"results": [{"id": "abc"}]})),
            Some("abc".to_string())
        );
        assert_eq!(
            first_recipe_id(&json!({"results": [{"id": 42.0}]})),
            Some("42".to_string())
        );
        assert_eq!(
            first_recipe_id(&json!({"results": [{"id": -3}]})),
            Some("-3".to_string())
        );
        assert_eq!(first_recipe_id(&json!({"results": []})), None);
        assert_eq!(first_recipe_id(&json!({"results": [{"title": "x"}]})), None);
        assert_eq!(first_recipe_id(&json!({"totalResults": 0})), None);
    }

    #[test]
    fn test_replace_results_keeps_envelope_order() {
        let payload = json!({"offset": 0, "results": [{"id": 1}, {"id": 2}], "totalResults": 2});

        let replaced = replace_results(&payload, json!({"id": 1, "merged": true}));

        let keys: Vec<&String> = replaced.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["offset", "results", "totalResults"]);
        assert_eq!(replaced["results"], json!([{"id": 1, "merged": true}]));
    }
}
