/*!
 * # mptranslate - Minecraft Plugin Locale Translator
 *
 * A Rust library for structure-preserving translation of Minecraft plugin
 * locale files (YAML/JSON).
 *
 * ## Features
 *
 * - Parse YAML and JSON locale files into an order-preserving document tree
 * - Protect placeholders, color codes and technical identifiers across
 *   translation with sentinel masking
 * - Translate string leaves through configurable backends:
 *   - Gemini (Google Generative Language API)
 *   - Ollama (local LLM)
 *   - Built-in simplified-to-traditional Chinese script conversion
 * - Batch leaves into marker-framed requests with positional alignment
 *   checking and whole-chunk fallback
 * - Per-leaf failure recovery: a failed translation keeps the original text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Locale document tree model and YAML/JSON mapping
 * - `translation`: The translation pipeline:
 *   - `translation::guard`: Placeholder masking and restoration
 *   - `translation::walker`: Structure-preserving tree walking
 *   - `translation::batch`: Batched walking with alignment checking
 *   - `translation::service`: Backend dispatch
 *   - `translation::prompts`: LLM prompt construction
 *   - `translation::script`: Local script conversion
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language tag utilities
 * - `providers`: Client implementations for LLM backends:
 *   - `providers::gemini`: Gemini API client
 *   - `providers::ollama`: Ollama API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{DocumentFormat, DocumentNode};
pub use errors::{AppError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, validate_language_tag};
pub use translation::{BatchWalker, PlaceholderGuard, TranslationService, TreeWalker, WalkReport};
