//! Response contract: model output is verified before it is trusted.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::contract::ContractViolations;

/// One suggested name. Everything except `name` is optional enrichment and is
/// omitted from the serialized body when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation_ipa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_liner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultural_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibe_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_fit: Option<Vec<String>>,
}

/// Success body of `POST /api/generate`. The failure body is produced by
/// `AppError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateResponse {
    ok: bool,
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            ok: true,
            candidates,
        }
    }
}

/// Checks a parsed model payload against the success shape and returns its
/// candidates in order.
///
/// The whole payload is rejected on any violation. Unknown keys are dropped;
/// known fields are passed through verbatim.
pub fn validate_response(raw: &Value) -> Result<Vec<Candidate>, ContractViolations> {
    let mut violations = ContractViolations::default();

    let Some(body) = raw.as_object() else {
        violations.push("payload", "must be a JSON object");
        return Err(violations);
    };

    if body.get("ok") != Some(&Value::Bool(true)) {
        violations.push("ok", "must be true");
    }

    let candidates: Vec<Candidate> = match body.get("candidates") {
        Some(Value::Array(items)) if items.is_empty() => {
            violations.push("candidates", "must contain at least one candidate");
            Vec::new()
        }
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| candidate(i, item, &mut violations))
            .collect(),
        _ => {
            violations.push("candidates", "must be an array");
            Vec::new()
        }
    };

    if violations.is_empty() {
        Ok(candidates)
    } else {
        Err(violations)
    }
}

fn candidate(
    index: usize,
    value: &Value,
    violations: &mut ContractViolations,
) -> Option<Candidate> {
    let path = format!("candidates[{index}]");
    let Some(fields) = value.as_object() else {
        violations.push(path, "must be an object");
        return None;
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
        Some(Value::String(_)) => {
            violations.push(format!("{path}.name"), "must not be empty");
            None
        }
        None | Some(Value::Null) => {
            violations.push(format!("{path}.name"), "is required");
            None
        }
        Some(_) => {
            violations.push(format!("{path}.name"), "must be a string");
            None
        }
    };

    let pronunciation_ipa = optional_text(fields, &path, "pronunciation_ipa", violations);
    let origin = optional_text(fields, &path, "origin", violations);
    let meaning = optional_text(fields, &path, "meaning", violations);
    let one_liner = optional_text(fields, &path, "one_liner", violations);
    let cultural_background = optional_text(fields, &path, "cultural_background", violations);
    let nickname = optional_list(fields, &path, "nickname", violations);
    let vibe_tags = optional_list(fields, &path, "vibe_tags", violations);
    let why_fit = optional_list(fields, &path, "why_fit", violations);

    Some(Candidate {
        name: name?,
        pronunciation_ipa,
        origin,
        meaning,
        one_liner,
        cultural_background,
        nickname,
        vibe_tags,
        why_fit,
    })
}

fn optional_text(
    fields: &Map<String, Value>,
    path: &str,
    key: &str,
    violations: &mut ContractViolations,
) -> Option<String> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            violations.push(format!("{path}.{key}"), "must be a string");
            None
        }
    }
}

fn optional_list(
    fields: &Map<String, Value>,
    path: &str,
    key: &str,
    violations: &mut ContractViolations,
) -> Option<Vec<String>> {
    let items = match fields.get(key) {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items,
        Some(_) => {
            violations.push(format!("{path}.{key}"), "must be an array of strings");
            return None;
        }
    };

    let mut list = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(text) => list.push(text.to_string()),
            None => violations.push(format!("{path}.{key}[{i}]"), "must be a string"),
        }
    }
    Some(list)
}
