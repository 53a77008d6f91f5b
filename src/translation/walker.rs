/*!
 * Structure-preserving tree walker.
 *
 * Recurses depth-first over a parsed locale document and applies the injected
 * translation policy to eligible string leaves, guarded by the placeholder
 * guard. The output tree is always structurally isomorphic to the input:
 * same variant at every position, same key set and order in every mapping,
 * same length and order in every sequence. Keys are structural identifiers
 * and are never translated.
 */

use futures::future::BoxFuture;
use log::{debug, warn};

use crate::document::DocumentNode;
use crate::translation::guard::PlaceholderGuard;
use crate::translation::policy::TranslationPolicy;

/// Per-walk counters, reported to the caller for summary logging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkReport {
    /// Leaves successfully translated
    pub translated: usize,
    /// Leaves where the policy failed; original text retained
    pub failed: usize,
    /// Empty or all-whitespace leaves never sent to the policy
    pub skipped_empty: usize,
    /// Leaves under a protected key prefix, copied verbatim
    pub skipped_protected: usize,
    /// Batches discarded because the response count did not match
    pub alignment_failures: usize,
}

impl WalkReport {
    /// Total leaves the walker visited
    pub fn total(&self) -> usize {
        self.translated + self.failed + self.skipped_empty + self.skipped_protected
    }
}

/// Depth-first translating walker
pub struct TreeWalker {
    guard: PlaceholderGuard,
    protected_key_prefixes: Vec<String>,
}

impl TreeWalker {
    /// Create a walker owning a compiled guard
    pub fn new(guard: PlaceholderGuard, protected_key_prefixes: Vec<String>) -> Self {
        Self { guard, protected_key_prefixes }
    }

    /// Borrow the guard, e.g. for batch protection
    pub fn guard(&self) -> &PlaceholderGuard {
        &self.guard
    }

    /// Whether a mapping key roots a subtree that must be copied verbatim
    pub fn is_protected_key(&self, key: &str) -> bool {
        self.protected_key_prefixes.iter().any(|prefix| key.starts_with(prefix.as_str()))
    }

    /// Whether a string leaf is eligible for translation at all
    pub fn is_eligible(text: &str) -> bool {
        !text.trim().is_empty()
    }

    /// Walk a document, translating eligible leaves through the policy
    ///
    /// Never fails: a leaf whose policy call errors keeps its original,
    /// unmasked text, and the walk continues with the next leaf.
    pub async fn walk(
        &self,
        node: &DocumentNode,
        policy: &dyn TranslationPolicy,
    ) -> (DocumentNode, WalkReport) {
        let mut report = WalkReport::default();
        let tree = self.walk_node(node, policy, &mut report).await;
        debug!(
            "Walk finished: {} translated, {} failed, {} empty, {} protected",
            report.translated, report.failed, report.skipped_empty, report.skipped_protected
        );
        (tree, report)
    }

    /// Recursive step; boxed because async recursion needs a fixed-size future
    fn walk_node<'a>(
        &'a self,
        node: &'a DocumentNode,
        policy: &'a dyn TranslationPolicy,
        report: &'a mut WalkReport,
    ) -> BoxFuture<'a, DocumentNode> {
        Box::pin(async move {
            match node {
                DocumentNode::Mapping(pairs) => {
                    let mut result = Vec::with_capacity(pairs.len());
                    for (key, value) in pairs {
                        if self.is_protected_key(key) {
                            report.skipped_protected += value.count_text_leaves();
                            result.push((key.clone(), value.clone()));
                        } else {
                            let walked = self.walk_node(value, policy, report).await;
                            result.push((key.clone(), walked));
                        }
                    }
                    DocumentNode::Mapping(result)
                },
                DocumentNode::Sequence(items) => {
                    let mut result = Vec::with_capacity(items.len());
                    for item in items {
                        result.push(self.walk_node(item, policy, report).await);
                    }
                    DocumentNode::Sequence(result)
                },
                DocumentNode::Text(text) => {
                    DocumentNode::Text(self.translate_leaf(text, policy, report).await)
                },
                // Non-string leaves pass through untouched
                DocumentNode::Bool(_)
                | DocumentNode::Int(_)
                | DocumentNode::Float(_)
                | DocumentNode::Null => node.clone(),
            }
        })
    }

    /// Protect, translate and restore one string leaf
    async fn translate_leaf(
        &self,
        text: &str,
        policy: &dyn TranslationPolicy,
        report: &mut WalkReport,
    ) -> String {
        if !Self::is_eligible(text) {
            report.skipped_empty += 1;
            return text.to_string();
        }

        let guarded = self.guard.protect(text);
        match policy.translate(&guarded.masked).await {
            Ok(translated) => {
                report.translated += 1;
                self.guard.unprotect(&translated, &guarded)
            },
            Err(e) => {
                // Keep the original, unmasked text; never a partial translation
                warn!("Leaf translation failed, keeping original text: {}", e);
                report.failed += 1;
                text.to_string()
            },
        }
    }
}
