//! Request contract: the only gate between client input and prompt construction.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::contract::vocab::{ChineseZodiac, Gender, Mbti, VibeKeyword, Vocabulary, Zodiac};
use crate::contract::ContractViolations;

pub const CHINESE_NAME_MAX_CHARS: usize = 32;
pub const VIBE_KEYWORDS_MIN: usize = 1;
pub const VIBE_KEYWORDS_MAX: usize = 3;

const KNOWN_FIELDS: &[&str] = &[
    "chinese_name",
    "gender",
    "zodiac",
    "chinese_zodiac",
    "mbti",
    "vibe_keywords",
];

/// A request that satisfied every constraint of the contract.
///
/// Only `chinese_name` carries free text; every other field is drawn from a
/// closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese_name: Option<String>,
    pub gender: Gender,
    pub zodiac: Zodiac,
    pub chinese_zodiac: ChineseZodiac,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbti: Option<Mbti>,
    pub vibe_keywords: Vec<VibeKeyword>,
}

/// Validates an arbitrary JSON value against the request contract.
///
/// Fails closed: unknown keys, wrong types, out-of-vocabulary values and
/// out-of-range lengths are all rejected, never coerced. `null` on an
/// optional field counts as absent.
pub fn validate_request(raw: &Value) -> Result<GenerateRequest, ContractViolations> {
    let mut violations = ContractViolations::default();

    let Some(body) = raw.as_object() else {
        violations.push("body", "must be a JSON object");
        return Err(violations);
    };

    for key in body.keys() {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            violations.push(key.as_str(), "is not a recognized field");
        }
    }

    let chinese_name = chinese_name(body.get("chinese_name"), &mut violations);
    let gender = required_enum::<Gender>(body, "gender", &mut violations);
    let zodiac = required_enum::<Zodiac>(body, "zodiac", &mut violations);
    let chinese_zodiac = required_enum::<ChineseZodiac>(body, "chinese_zodiac", &mut violations);
    let mbti = optional_enum::<Mbti>(body, "mbti", &mut violations);
    let vibe_keywords = vibe_keywords(body.get("vibe_keywords"), &mut violations);

    match (gender, zodiac, chinese_zodiac) {
        (Some(gender), Some(zodiac), Some(chinese_zodiac)) if violations.is_empty() => {
            Ok(GenerateRequest {
                chinese_name,
                gender,
                zodiac,
                chinese_zodiac,
                mbti,
                vibe_keywords,
            })
        }
        _ => Err(violations),
    }
}

fn required_enum<T: Vocabulary>(
    body: &Map<String, Value>,
    field: &str,
    violations: &mut ContractViolations,
) -> Option<T> {
    match body.get(field) {
        None | Some(Value::Null) => {
            violations.push(field, "is required");
            None
        }
        Some(value) => enum_value(field, value, violations),
    }
}

fn optional_enum<T: Vocabulary>(
    body: &Map<String, Value>,
    field: &str,
    violations: &mut ContractViolations,
) -> Option<T> {
    match body.get(field) {
        Some(value) if !value.is_null() => enum_value(field, value, violations),
        _ => None,
    }
}

fn enum_value<T: Vocabulary>(
    field: &str,
    value: &Value,
    violations: &mut ContractViolations,
) -> Option<T> {
    let Some(raw) = value.as_str() else {
        violations.push(field, "must be a string");
        return None;
    };
    let parsed = T::parse(raw);
    if parsed.is_none() {
        violations.push(
            field,
            format!("must be one of: {}", T::wire_names().join(", ")),
        );
    }
    parsed
}

/// Surrounding whitespace is trimmed and a blank name counts as absent.
fn chinese_name(value: Option<&Value>, violations: &mut ContractViolations) -> Option<String> {
    let raw = match value {
        None | Some(Value::Null) => return None,
        Some(Value::String(raw)) => raw,
        Some(_) => {
            violations.push("chinese_name", "must be a string");
            return None;
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() > CHINESE_NAME_MAX_CHARS {
        violations.push(
            "chinese_name",
            format!("must be at most {CHINESE_NAME_MAX_CHARS} characters"),
        );
        return None;
    }
    if trimmed.chars().any(char::is_control) {
        violations.push("chinese_name", "must not contain control characters");
        return None;
    }
    Some(trimmed.to_string())
}

fn vibe_keywords(value: Option<&Value>, violations: &mut ContractViolations) -> Vec<VibeKeyword> {
    let items = match value {
        None | Some(Value::Null) => {
            violations.push("vibe_keywords", "is required");
            return Vec::new();
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            violations.push("vibe_keywords", "must be an array");
            return Vec::new();
        }
    };

    if !(VIBE_KEYWORDS_MIN..=VIBE_KEYWORDS_MAX).contains(&items.len()) {
        violations.push(
            "vibe_keywords",
            format!("must contain between {VIBE_KEYWORDS_MIN} and {VIBE_KEYWORDS_MAX} items"),
        );
    }

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| enum_value(&format!("vibe_keywords[{i}]"), item, violations))
        .collect()
}
