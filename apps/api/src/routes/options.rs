//! Vocabularies and limits for the intake form, read from the same constants
//! the request contract enforces.

use axum::Json;
use serde::Serialize;

use crate::contract::request::{CHINESE_NAME_MAX_CHARS, VIBE_KEYWORDS_MAX, VIBE_KEYWORDS_MIN};
use crate::contract::vocab::{ChineseZodiac, Gender, Mbti, VibeKeyword, Vocabulary, Zodiac};

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub gender: Vec<&'static str>,
    pub zodiac: Vec<&'static str>,
    pub chinese_zodiac: Vec<&'static str>,
    pub mbti: Vec<&'static str>,
    pub vibe_keywords: Vec<&'static str>,
    pub limits: Limits,
}

#[derive(Debug, Serialize)]
pub struct Limits {
    pub vibe_keywords_min: usize,
    pub vibe_keywords_max: usize,
    pub chinese_name_max_chars: usize,
}

/// GET /api/options
pub async fn options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        gender: Gender::wire_names(),
        zodiac: Zodiac::wire_names(),
        chinese_zodiac: ChineseZodiac::wire_names(),
        mbti: Mbti::wire_names(),
        vibe_keywords: VibeKeyword::wire_names(),
        limits: Limits {
            vibe_keywords_min: VIBE_KEYWORDS_MIN,
            vibe_keywords_max: VIBE_KEYWORDS_MAX,
            chinese_name_max_chars: CHINESE_NAME_MAX_CHARS,
        },
    })
}
