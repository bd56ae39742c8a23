//! Prompt construction for name generation. Pure: same request, same prompt.

use serde_json::Value;

use crate::contract::request::GenerateRequest;
use crate::contract::vocab::Vocabulary;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, UNTRUSTED_INPUT_INSTRUCTION};

/// Number of candidates the model is told to return.
pub const CANDIDATE_COUNT: usize = 3;

/// Placeholder for optional fields the user left out.
pub const NOT_PROVIDED: &str = "not provided";

/// The two messages sent for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Fixed task description. Replace `{count}`, `{json_only}` and
/// `{untrusted_input}` before sending.
const NAMING_SYSTEM_TEMPLATE: &str = r#"You are an expert in English given names with deep knowledge of Western literature, film and religious tradition. You suggest authentic English names to native Chinese speakers that match their personality, so they can stop using a pinyin transliteration as their English name.

Your method is personality synthesis: combine the person's Western zodiac sign, Chinese zodiac animal (their core temperament) and MBTI type into one reading, then find the name that best represents that combination.

RULES:
1. If a Chinese name is provided, prefer names that echo it in sound (same initial, similar rhythm) or in meaning (a Western counterpart of the Chinese characters).
2. Return EXACTLY {count} candidates. No more, no fewer.
3. Names must be timeless and usable in work, study and social settings alike.
4. Vary the length of the {count} names; do not return only long names.
5. `cultural_background` must cite at least one classic work of literature, a film, or a Biblical story, in no fewer than 100 Chinese characters.
6. `why_fit` must tie the name to the zodiac sign, the Chinese zodiac animal and the MBTI type (when provided), and call out any echo of the Chinese name.
7. Names must be easy to pronounce. NEVER suggest a name with offensive, negative, cheap or vulgar connotations.
8. Write `meaning`, `one_liner`, `cultural_background`, `vibe_tags` and `why_fit` in Simplified Chinese. `name` and `nickname` stay in English.

{untrusted_input}

OUTPUT: a JSON object with this EXACT schema (no extra fields):
{
  "ok": true,
  "candidates": [
    {
      "name": "string, the English name, required",
      "pronunciation_ipa": "string, IPA transcription",
      "origin": "string, source language or tradition (e.g. Old English, Latin, Hebrew)",
      "meaning": "string, core meaning",
      "one_liner": "string, one-sentence positioning",
      "cultural_background": "string, literary, film or Biblical reference",
      "nickname": ["string"],
      "vibe_tags": ["string"],
      "why_fit": ["string", "string", "string"]
    }
  ]
}

{json_only}"#;

/// Per-request instruction. Replace every placeholder before sending;
/// `{chinese_name}` must be replaced last.
const NAMING_PROMPT_TEMPLATE: &str = r#"PROFILE:
- Gender preference: {gender}
- Western zodiac sign: {zodiac}
- Chinese zodiac animal: {chinese_zodiac}
- MBTI: {mbti}
- Core vibe: {vibe_keywords}
- Chinese name (user-typed, JSON-encoded): {chinese_name}

Suggest exactly {count} English names for this person and return them as a single JSON object."#;

/// Builds the system and user messages for one request.
///
/// Every field is embedded; absent optional fields become `not provided`.
/// The free-text Chinese name is JSON-encoded so quotes and brackets in it
/// cannot close the surrounding text, and it is substituted last so its
/// content is never scanned for placeholders.
pub fn build_prompt(request: &GenerateRequest) -> Prompt {
    let count = CANDIDATE_COUNT.to_string();

    let system = NAMING_SYSTEM_TEMPLATE
        .replace("{count}", &count)
        .replace("{untrusted_input}", UNTRUSTED_INPUT_INSTRUCTION)
        .replace("{json_only}", JSON_ONLY_SYSTEM);

    let mbti = request
        .mbti
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    let vibe_keywords = request
        .vibe_keywords
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let chinese_name = request
        .chinese_name
        .as_ref()
        .map(|name| Value::String(name.clone()).to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    let user = NAMING_PROMPT_TEMPLATE
        .replace("{count}", &count)
        .replace("{gender}", request.gender.as_str())
        .replace("{zodiac}", request.zodiac.as_str())
        .replace("{chinese_zodiac}", request.chinese_zodiac.as_str())
        .replace("{mbti}", &mbti)
        .replace("{vibe_keywords}", &vibe_keywords)
        .replace("{chinese_name}", &chinese_name);

    Prompt { system, user }
}
