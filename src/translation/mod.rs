/*!
 * Translation pipeline: placeholder guarding, tree walking, batching and
 * backend dispatch.
 *
 * The pieces compose in layers. [`guard::PlaceholderGuard`] masks reserved
 * tokens in one scalar; [`walker::TreeWalker`] applies a
 * [`policy::TranslationPolicy`] to every eligible leaf of a document tree;
 * [`batch::BatchWalker`] does the same through a
 * [`policy::BatchTranslationPolicy`] with chunked round-trips; and
 * [`service::TranslationService`] implements both policies on top of a
 * configured backend.
 */

pub mod batch;
pub mod guard;
pub mod policy;
pub mod prompts;
pub mod script;
pub mod service;
pub mod walker;

pub use batch::BatchWalker;
pub use guard::PlaceholderGuard;
pub use policy::{BatchTranslationPolicy, TranslationPolicy};
pub use service::TranslationService;
pub use walker::{TreeWalker, WalkReport};
