//! Response Parser — turns the model's free text into a `GenerationResult`.
//!
//! Grammar: three labeled segments, `ENGLISH:`, `FRENCH:`, `KEYWORD:`. Each
//! segment runs from the end of its label to the next label token that follows
//! it, or to end of text, and is trimmed. Fields are extracted independently:
//! a missing or blank segment falls back to that field's default only.

use crate::models::quote::GenerationResult;

pub const DEFAULT_ENGLISH_QUOTE: &str = "💡 Keep pushing forward! Success comes to those who never give up. 🚀 #Motivation #Success #DailyInspiration";
pub const DEFAULT_FRENCH_QUOTE: &str = "💡 Continue à avancer! Le succès vient à ceux qui ne renoncent jamais. 🚀 #Motivation #Succes #InspirationQuotidienne";
pub const DEFAULT_SEARCH_KEYWORD: &str = "motivation success";

const ENGLISH_LABEL: &str = "ENGLISH:";
const FRENCH_LABEL: &str = "FRENCH:";
const KEYWORD_LABEL: &str = "KEYWORD:";

const LABELS: [&str; 3] = [ENGLISH_LABEL, FRENCH_LABEL, KEYWORD_LABEL];

impl GenerationResult {
    /// The content shown when nothing usable came back.
    pub fn fallback() -> Self {
        Self {
            english_quote: DEFAULT_ENGLISH_QUOTE.to_string(),
            french_quote: DEFAULT_FRENCH_QUOTE.to_string(),
            search_keyword: DEFAULT_SEARCH_KEYWORD.to_string(),
        }
    }
}

/// Parses raw model output. Never fails.
pub fn parse_generation(raw: &str) -> GenerationResult {
    if raw.trim().is_empty() {
        return GenerationResult::fallback();
    }

    GenerationResult {
        english_quote: field_or(raw, ENGLISH_LABEL, DEFAULT_ENGLISH_QUOTE),
        french_quote: field_or(raw, FRENCH_LABEL, DEFAULT_FRENCH_QUOTE),
        search_keyword: field_or(raw, KEYWORD_LABEL, DEFAULT_SEARCH_KEYWORD),
    }
}

fn field_or(raw: &str, label: &str, default: &str) -> String {
    extract_segment(raw, label)
        .unwrap_or(default)
        .to_string()
}

/// Returns the trimmed, non-empty content following `label`, if any.
fn extract_segment<'a>(raw: &'a str, label: &str) -> Option<&'a str> {
    let start = raw.find(label)? + label.len();
    let rest = &raw[start..];

    let end = LABELS
        .iter()
        .filter_map(|other| rest.find(other))
        .min()
        .unwrap_or(rest.len());

    let content = rest[..end].trim();
    (!content.is_empty()).then_some(content)
}
