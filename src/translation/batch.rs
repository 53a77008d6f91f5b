/*!
 * Batched tree walking.
 *
 * Backends with per-request overhead translate many leaves in one round-trip.
 * The batch walker collects eligible leaves depth-first, submits fixed-size
 * chunks to a [`BatchTranslationPolicy`], and writes the results back into an
 * isomorphic tree in the original order.
 *
 * Positional correspondence is owned here: the Nth submitted string maps to
 * the Nth response string. A response with a different entry count is a batch
 * alignment failure; the whole chunk falls back to original text rather than
 * risking a shifted assignment corrupting unrelated keys.
 */

use futures::stream::{self, StreamExt};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::document::DocumentNode;
use crate::errors::TranslationError;
use crate::translation::guard::GuardedScalar;
use crate::translation::policy::BatchTranslationPolicy;
use crate::translation::walker::{TreeWalker, WalkReport};

/// Regex for matching entry markers in a framed batch response
static ENTRY_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<<ENTRY_(\d+)>>").expect("Invalid entry marker regex")
});

/// End marker constant
const END_MARKER: &str = "<<END>>";

/// Frame a batch of entries with positional markers
///
/// Explicit markers survive translation far better than a newline-per-entry
/// framing, which breaks as soon as one translated string contains a newline.
pub fn frame_entries(texts: &[String]) -> String {
    let mut framed = String::new();
    for (index, text) in texts.iter().enumerate() {
        framed.push_str(&format!("<<ENTRY_{}>>\n", index));
        framed.push_str(text);
        framed.push('\n');
    }
    framed.push_str(END_MARKER);
    framed
}

/// Split a framed response back into its entries
///
/// Every marker must be present, in order, with the end marker last;
/// anything else is a batch alignment failure for the whole chunk.
pub fn split_entries(response: &str, expected: usize) -> Result<Vec<String>, TranslationError> {
    if expected == 0 {
        return Ok(Vec::new());
    }

    let found: Vec<usize> = ENTRY_MARKER_REGEX
        .captures_iter(response)
        .filter_map(|cap| cap.get(1).and_then(|m| m.as_str().parse().ok()))
        .collect();

    let in_order = found.iter().enumerate().all(|(i, &idx)| i == idx);
    if found.len() != expected || !in_order || !response.contains(END_MARKER) {
        return Err(TranslationError::BatchAlignment { expected, actual: found.len() });
    }

    let mut entries = Vec::with_capacity(expected);
    for index in 0..expected {
        let start_marker = format!("<<ENTRY_{}>>", index);
        let end_marker = if index == expected - 1 {
            END_MARKER.to_string()
        } else {
            format!("<<ENTRY_{}>>", index + 1)
        };

        let start = response
            .find(&start_marker)
            .map(|pos| pos + start_marker.len())
            .ok_or(TranslationError::BatchAlignment { expected, actual: index })?;
        let end = response[start..]
            .find(&end_marker)
            .map(|pos| pos + start)
            .ok_or(TranslationError::BatchAlignment { expected, actual: index })?;

        // Strip only the single newline frame_entries adds on each side;
        // whitespace inside the entry belongs to the leaf
        let raw = &response[start..end];
        let raw = raw.strip_prefix('\n').unwrap_or(raw);
        let raw = raw.strip_suffix('\n').unwrap_or(raw);
        entries.push(raw.to_string());
    }

    Ok(entries)
}

/// One chunk's outcome: per-entry translated text, or None when the whole
/// chunk fell back
enum ChunkOutcome {
    Translated(Vec<String>),
    FellBack { alignment: bool },
}

/// Batch-translating walker
pub struct BatchWalker {
    walker: TreeWalker,
    batch_size: usize,
    max_concurrent_requests: usize,
}

impl BatchWalker {
    /// Create a batch walker around a configured tree walker
    pub fn new(walker: TreeWalker, batch_size: usize, max_concurrent_requests: usize) -> Self {
        Self {
            walker,
            batch_size: batch_size.max(1),
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Number of chunks a walk over this document will submit
    pub fn chunk_count(&self, node: &DocumentNode) -> usize {
        let mut leaves = Vec::new();
        self.collect_leaves(node, &mut leaves, &mut WalkReport::default());
        leaves.len().div_ceil(self.batch_size)
    }

    /// Walk a document, translating eligible leaves in chunks
    ///
    /// Chunks are submitted concurrently up to the configured limit and
    /// re-sorted by index before reassembly, so output order always matches
    /// input order. Never fails: failed chunks keep their original text.
    pub async fn walk_batched(
        &self,
        node: &DocumentNode,
        policy: &dyn BatchTranslationPolicy,
        progress_callback: impl Fn(usize, usize) + Clone + Send + Sync + 'static,
    ) -> (DocumentNode, WalkReport) {
        let mut report = WalkReport::default();

        // Collect eligible leaves in DFS order and protect each one
        let mut leaves: Vec<String> = Vec::new();
        self.collect_leaves(node, &mut leaves, &mut report);

        if leaves.is_empty() {
            return (node.clone(), report);
        }

        let guarded: Vec<GuardedScalar> =
            leaves.iter().map(|text| self.walker.guard().protect(text)).collect();

        let chunks: Vec<Vec<String>> = guarded
            .chunks(self.batch_size)
            .map(|chunk| chunk.iter().map(|g| g.masked.clone()).collect())
            .collect();
        let total_chunks = chunks.len();
        let completed = Arc::new(AtomicUsize::new(0));

        // Translate chunks concurrently, then restore submission order
        let mut results: Vec<(usize, ChunkOutcome)> = stream::iter(chunks.into_iter().enumerate())
            .map(|(chunk_index, masked)| {
                let completed = completed.clone();
                let progress_callback = progress_callback.clone();
                async move {
                    let outcome = match policy.translate_batch(&masked).await {
                        Ok(translated) if translated.len() == masked.len() => {
                            ChunkOutcome::Translated(translated)
                        },
                        Ok(translated) => {
                            error!(
                                "Batch alignment failure in chunk {}: submitted {}, received {}; \
                                 discarding the whole chunk",
                                chunk_index + 1,
                                masked.len(),
                                translated.len()
                            );
                            ChunkOutcome::FellBack { alignment: true }
                        },
                        Err(e) if e.is_batch_alignment() => {
                            error!("Batch alignment failure in chunk {}: {}", chunk_index + 1, e);
                            ChunkOutcome::FellBack { alignment: true }
                        },
                        Err(e) => {
                            error!("Chunk {} failed, keeping original text: {}", chunk_index + 1, e);
                            ChunkOutcome::FellBack { alignment: false }
                        },
                    };

                    let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total_chunks);
                    (chunk_index, outcome)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;
        results.sort_by_key(|(index, _)| *index);

        // Flatten chunk outcomes back into one output string per leaf
        let mut outputs: Vec<String> = Vec::with_capacity(leaves.len());
        for (chunk_index, outcome) in results {
            let chunk_start = chunk_index * self.batch_size;
            let chunk_len = guarded[chunk_start..].len().min(self.batch_size);
            match outcome {
                ChunkOutcome::Translated(translated) => {
                    for (offset, text) in translated.into_iter().enumerate() {
                        let restored =
                            self.walker.guard().unprotect(&text, &guarded[chunk_start + offset]);
                        outputs.push(restored);
                        report.translated += 1;
                    }
                },
                ChunkOutcome::FellBack { alignment } => {
                    for offset in 0..chunk_len {
                        outputs.push(leaves[chunk_start + offset].clone());
                        report.failed += 1;
                    }
                    if alignment {
                        report.alignment_failures += 1;
                    }
                },
            }
        }

        info!(
            "Batched walk: {} translated, {} kept original ({} alignment failures)",
            report.translated, report.failed, report.alignment_failures
        );

        let mut iter = outputs.into_iter();
        let tree = self.apply_outputs(node, &mut iter);
        debug_assert!(iter.next().is_none(), "output count diverged from leaf count");
        (tree, report)
    }

    /// Collect eligible leaves depth-first, honoring protected key prefixes
    fn collect_leaves(&self, node: &DocumentNode, out: &mut Vec<String>, report: &mut WalkReport) {
        match node {
            DocumentNode::Mapping(pairs) => {
                for (key, value) in pairs {
                    if self.walker.is_protected_key(key) {
                        report.skipped_protected += value.count_text_leaves();
                    } else {
                        self.collect_leaves(value, out, report);
                    }
                }
            },
            DocumentNode::Sequence(items) => {
                for item in items {
                    self.collect_leaves(item, out, report);
                }
            },
            DocumentNode::Text(text) => {
                if TreeWalker::is_eligible(text) {
                    out.push(text.clone());
                } else {
                    report.skipped_empty += 1;
                }
            },
            _ => {},
        }
    }

    /// Rebuild the tree, consuming one output per eligible leaf in the same
    /// DFS order as [`collect_leaves`]
    fn apply_outputs(
        &self,
        node: &DocumentNode,
        outputs: &mut std::vec::IntoIter<String>,
    ) -> DocumentNode {
        match node {
            DocumentNode::Mapping(pairs) => {
                let mut result = Vec::with_capacity(pairs.len());
                for (key, value) in pairs {
                    if self.walker.is_protected_key(key) {
                        result.push((key.clone(), value.clone()));
                    } else {
                        result.push((key.clone(), self.apply_outputs(value, outputs)));
                    }
                }
                DocumentNode::Mapping(result)
            },
            DocumentNode::Sequence(items) => {
                DocumentNode::Sequence(items.iter().map(|i| self.apply_outputs(i, outputs)).collect())
            },
            DocumentNode::Text(text) => {
                if TreeWalker::is_eligible(text) {
                    // collect_leaves pushed one entry for this leaf
                    DocumentNode::Text(outputs.next().unwrap_or_else(|| text.clone()))
                } else {
                    DocumentNode::Text(text.clone())
                }
            },
            other => other.clone(),
        }
    }
}
