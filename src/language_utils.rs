/*!
 * Language utilities for target-language tag handling.
 *
 * Locale translation targets are BCP 47-style tags whose primary subtag is an
 * ISO 639-1 (2-letter) or ISO 639-3 (3-letter) code, optionally followed by a
 * script or region subtag, e.g. "zh-TW", "zh-Hant", "fr".
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Split a language tag into its primary subtag and the remainder
fn split_tag(tag: &str) -> (String, Option<&str>) {
    let trimmed = tag.trim();
    match trimmed.split_once(['-', '_']) {
        Some((primary, rest)) => (primary.to_lowercase(), Some(rest)),
        None => (trimmed.to_lowercase(), None),
    }
}

/// Look up the primary subtag of a tag as an ISO language
fn primary_language(tag: &str) -> Option<Language> {
    let (primary, _) = split_tag(tag);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// Validate a target language tag
///
/// The primary subtag must be a known ISO 639 code; any script/region
/// subtags are accepted as-is (they only matter to the backend prompt).
pub fn validate_language_tag(tag: &str) -> Result<()> {
    if tag.trim().is_empty() {
        return Err(anyhow!("Language tag is empty"));
    }
    primary_language(tag)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language tag: {}", tag))
}

/// Get the English name for a language tag, for prompts and logging
///
/// Subtags are appended verbatim: "zh-TW" becomes "Chinese (TW)".
pub fn get_language_name(tag: &str) -> Result<String> {
    let lang = primary_language(tag)
        .ok_or_else(|| anyhow!("Invalid language tag: {}", tag))?;
    let (_, rest) = split_tag(tag);
    Ok(match rest {
        Some(rest) => format!("{} ({})", lang.to_name(), rest),
        None => lang.to_name().to_string(),
    })
}

/// Whether a tag targets a Chinese variant, where script conversion applies
pub fn is_chinese_tag(tag: &str) -> bool {
    matches!(primary_language(tag), Some(lang) if lang.to_639_3() == "zho")
}
