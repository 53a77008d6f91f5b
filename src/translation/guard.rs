/*!
 * Placeholder guard for reserved tokens.
 *
 * Locale strings embed substrings that must survive translation byte-for-byte:
 * PlaceholderAPI placeholders (`%player_name%`), color and formatting codes
 * (`&c`, `§l`, `&#ff0000`), bracketed reserved keywords (`[close]`) and
 * technical identifiers (`minecraft:diamond_sword`, `plugin.command.give`).
 *
 * The guard scans a scalar with a grammar compiled once from configuration,
 * masks every match with an opaque sentinel before the backend call, and
 * restores the original text afterwards. A sentinel the backend dropped or
 * mangled is a recoverable anomaly, never a document failure.
 */

use anyhow::{Result, Context};
use log::warn;
use regex::Regex;

use crate::app_config::{MaskingMode, TokenGrammarConfig};

/// A single protected token within one scalar
#[derive(Debug, Clone, PartialEq)]
pub struct GuardedToken {
    /// Sentinel substituted into the masked text
    pub sentinel: String,
    /// Original token text to restore
    pub original: String,
}

/// Result of protecting one scalar: the masked text plus the restore list
#[derive(Debug, Clone)]
pub struct GuardedScalar {
    /// Text safe to hand to the translation backend
    pub masked: String,
    /// Tokens to restore after translation, in scan order
    pub tokens: Vec<GuardedToken>,
}

impl GuardedScalar {
    /// A scalar that needed no protection
    fn untouched(text: &str) -> Self {
        Self { masked: text.to_string(), tokens: Vec::new() }
    }
}

/// Compiled reserved-token grammar
///
/// Built once from [`TokenGrammarConfig`] and reused for every scalar; the
/// regexes are never recompiled per leaf.
pub struct PlaceholderGuard {
    patterns: Vec<Regex>,
    masking: MaskingMode,
}

impl PlaceholderGuard {
    /// Compile the guard from grammar configuration
    pub fn new(grammar: &TokenGrammarConfig) -> Result<Self> {
        let mut patterns = Vec::new();

        // %identifier% placeholders are always protected
        patterns.push(Regex::new(r"%\w+%").context("placeholder pattern")?);

        if grammar.color_codes {
            // Hex form first so `&#ff0000` is not eaten as `&f` later
            patterns.push(Regex::new(r"[&§]#[0-9a-fA-F]{6}").context("hex color pattern")?);
            patterns.push(Regex::new(r"[&§][0-9a-fk-orA-FK-ORxX]").context("color code pattern")?);
        }

        if grammar.technical_ids {
            // Namespaced ids: minecraft:diamond_sword, pluginname:some/path
            patterns.push(
                Regex::new(r"\b[a-z0-9_][a-z0-9_.-]*:[a-z0-9_][a-z0-9_./-]*\b")
                    .context("namespaced id pattern")?,
            );
            // Dotted permission nodes: pluginname.command.give, essentials.fly.*
            patterns.push(
                Regex::new(r"\b[A-Za-z][A-Za-z0-9_]*(?:\.[A-Za-z0-9_*]+){2,}\b")
                    .context("permission node pattern")?,
            );
        }

        if !grammar.bracket_keywords.is_empty() {
            let alternation = grammar
                .bracket_keywords
                .iter()
                .map(|kw| regex::escape(kw))
                .collect::<Vec<_>>()
                .join("|");
            patterns.push(
                Regex::new(&format!(r"\[(?:{})\]", alternation))
                    .context("bracket keyword pattern")?,
            );
        }

        Ok(Self { patterns, masking: grammar.masking })
    }

    /// Find all protected spans in scan order: leftmost first, and on a tie
    /// the longest match wins; overlapping later matches are discarded.
    fn find_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.find_iter(text) {
                candidates.push((m.start(), m.end()));
            }
        }

        // Leftmost-longest: sort by start ascending, then by length descending
        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut spans: Vec<(usize, usize)> = Vec::new();
        for (start, end) in candidates {
            match spans.last() {
                Some(&(_, prev_end)) if start < prev_end => continue,
                _ => spans.push((start, end)),
            }
        }
        spans
    }

    /// Mask every reserved token in a scalar
    ///
    /// An empty scalar comes back unchanged with no tokens; a token-free
    /// scalar has `masked` equal to the input and an empty restore list.
    pub fn protect(&self, scalar: &str) -> GuardedScalar {
        if scalar.is_empty() {
            return GuardedScalar::untouched(scalar);
        }

        let spans = self.find_spans(scalar);
        if spans.is_empty() {
            return GuardedScalar::untouched(scalar);
        }

        let mut masked = String::with_capacity(scalar.len());
        let mut tokens = Vec::with_capacity(spans.len());
        let mut cursor = 0;
        let mut next_index = 0;

        for (start, end) in spans {
            masked.push_str(&scalar[cursor..start]);
            let original = scalar[start..end].to_string();
            let sentinel = match self.masking {
                // Marker-style sentinels survive LLM rewording far better
                // than natural-language text would. A sentinel must not
                // already occur literally in the scalar, or unprotect would
                // rewrite the wrong occurrence; skip colliding indices.
                MaskingMode::Sentinel => {
                    let mut sentinel = format!("<<T{}>>", next_index);
                    while scalar.contains(sentinel.as_str()) {
                        next_index += 1;
                        sentinel = format!("<<T{}>>", next_index);
                    }
                    next_index += 1;
                    sentinel
                },
                MaskingMode::Passthrough => original.clone(),
            };
            masked.push_str(&sentinel);
            tokens.push(GuardedToken { sentinel, original });
            cursor = end;
        }
        masked.push_str(&scalar[cursor..]);

        GuardedScalar { masked, tokens }
    }

    /// Restore every sentinel in the translated text back to its token
    ///
    /// A missing sentinel means the backend dropped or reworded it; the
    /// anomaly is logged and the rest of the scalar is still restored.
    pub fn unprotect(&self, translated: &str, guarded: &GuardedScalar) -> String {
        let mut result = translated.to_string();
        for token in &guarded.tokens {
            if result.contains(token.sentinel.as_str()) {
                if token.sentinel != token.original {
                    result = result.replacen(token.sentinel.as_str(), token.original.as_str(), 1);
                }
            } else {
                warn!(
                    "Reserved token {:?} was dropped by the backend; leaving it unrestored",
                    token.original
                );
            }
        }
        result
    }
}
