use std::collections::HashMap;

use log::{ debug, warn };
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::errors::{ GameGenError, GameGenResult };
use crate::implementations::config::AgentProfile;

const SYSTEM_TEMPLATE: &str = r#"You are the {{name}}. {{description}}

Instructions:
{{instructions}}

Respond with a single JSON object named {{schema_name}} that conforms to this JSON schema:
{{schema}}

Do not wrap the object in prose."#;

/// JSON schema for `T` with the meta keys providers refuse stripped off
pub fn schema_for<T: JsonSchema>() -> serde_json::Value {
    let mut value = schemars::schema_for!(T).to_value();
    if let Some(object) = value.as_object_mut() {
        object.remove("$schema");
    }
    value
}

/// Render a template with the given parameters
fn render_template(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Build the system prompt for an agent that must answer with `schema`
pub fn build_system_prompt(
    profile: &AgentProfile,
    schema_name: &str,
    schema: &serde_json::Value
) -> GameGenResult<String> {
    let mut params = HashMap::new();
    params.insert("name", profile.name.clone());
    params.insert("description", profile.description.clone());
    params.insert(
        "instructions",
        profile.instructions
            .iter()
            .map(|i| format!("- {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    );
    params.insert("schema_name", schema_name.to_string());
    params.insert("schema", serde_json::to_string_pretty(schema)?);

    Ok(render_template(SYSTEM_TEMPLATE, &params))
}

/// Contents of the first ```json fenced block, if the reply has one
fn fenced_json_block(text: &str) -> Option<&str> {
    let start = text.find("```json")? + "```json".len();
    let end = text[start..].find("```")?;
    Some(text[start..start + end].trim())
}

/// The balanced JSON object opening at byte `start`, which must hold a `{`.
///
/// Braces inside string literals do not count, so embedded code such as
/// `"if (x) { ... }"` does not end the object early.
fn balanced_object_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => {
                    escaped = false;
                }
                '\\' => {
                    escaped = true;
                }
                '"' => {
                    in_string = false;
                }
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
            }
            '{' => {
                depth += 1;
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Every balanced JSON object in `text`, in the order a parser should try them.
///
/// A fenced ```json block comes first. After that the scan walks the text from
/// the first `{`, resuming after each complete object it yields.
fn json_candidates(text: &str) -> Vec<&str> {
    let mut candidates = Vec::new();

    if let Some(object) = fenced_json_block(text).and_then(|block| {
        block.find('{').and_then(|start| balanced_object_at(block, start))
    }) {
        candidates.push(object);
    }

    let mut from = 0;
    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        match balanced_object_at(text, start) {
            Some(object) => {
                if !candidates.contains(&object) {
                    candidates.push(object);
                }
                from = start + object.len();
            }
            None => {
                from = start + 1;
            }
        }
    }

    candidates
}

/// The JSON object a model reply most likely carries: the fenced ```json block
/// when there is one, otherwise the first balanced object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    json_candidates(text).into_iter().next()
}

/// Extract the JSON object from a model reply and deserialize it.
///
/// Candidates are tried in the order of `json_candidates`; the first one that
/// deserializes into `T` wins, and the error reported is the first candidate's.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> GameGenResult<T> {
    let candidates = json_candidates(text);
    if candidates.is_empty() {
        warn!("No JSON object found in model reply ({} characters)", text.len());
        return Err(GameGenError::StructuredOutput("no JSON object in model reply".to_string()));
    }

    let mut first_error = None;
    for (index, json) in candidates.iter().enumerate() {
        debug!("Trying JSON object {} of {} ({} characters)", index + 1, candidates.len(), json.len());
        match serde_json::from_str(json) {
            Ok(value) => {
                return Ok(value);
            }
            Err(e) => {
                debug!("Candidate {} rejected: {}", index + 1, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    let reason = first_error.map(|e| e.to_string()).unwrap_or_default();
    warn!("Model reply did not match the declared schema: {}", reason);
    Err(GameGenError::StructuredOutput(format!("reply does not match schema: {}", reason)))
}
