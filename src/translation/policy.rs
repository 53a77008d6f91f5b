/*!
 * Translation policy boundary.
 *
 * The walkers know nothing about backends; they call one of these traits and
 * handle success or failure per leaf (or per batch). Backends are injected by
 * the caller and own their own retry, timeout and rate-limit behavior.
 */

use async_trait::async_trait;

use crate::errors::TranslationError;

/// A translate-or-convert function applied to one eligible scalar at a time
#[async_trait]
pub trait TranslationPolicy: Send + Sync {
    /// Translate a single masked scalar
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// A policy that translates several scalars in one backend round-trip
///
/// Implementations must return exactly one output entry per input entry, in
/// the same order. The batch walker verifies the count and treats any
/// mismatch as a batch alignment failure.
#[async_trait]
pub trait BatchTranslationPolicy: Send + Sync {
    /// Translate a batch of masked scalars, positionally
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, TranslationError>;
}

