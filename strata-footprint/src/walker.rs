//! Graph walker: iterative traversal computing the total reachable size.

use crate::filter::{FilterPolicy, IncludeAll};
use crate::metadata::FieldMetadataCache;
use crate::node::{node_identity, Measurable};
use crate::visitor::{MemSizeVisitor, SizeVisitor};
use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;
use strata_core::{FootprintConfig, FootprintError};

/// Outcome of one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Total shallow size of all counted nodes.
    pub bytes: u64,
    /// Nodes sized and expanded.
    pub counted: u64,
    /// Nodes skipped by the filter policy.
    pub filtered: u64,
}

/// Computes the total reachable size from a set of roots.
///
/// Traversal is iterative over an explicit work stack, so arbitrarily deep
/// graphs cannot exhaust the call stack. Each `walk` call owns a private
/// visited set and stack; only the field metadata cache is shared, and it is
/// safe under concurrent walks.
pub struct GraphWalker<F: FilterPolicy, V: SizeVisitor> {
    filter: F,
    visitor: V,
    metadata: Arc<FieldMetadataCache>,
}

impl<F: FilterPolicy, V: SizeVisitor> GraphWalker<F, V> {
    pub fn new(filter: F, visitor: V, metadata: Arc<FieldMetadataCache>) -> Self {
        Self {
            filter,
            visitor,
            metadata,
        }
    }

    /// Total size in bytes of everything reachable from `roots`.
    ///
    /// Terminates on any finite graph, cycles included; each node is counted
    /// at most once. An introspection failure aborts the whole walk.
    pub fn walk(&self, roots: &[&dyn Measurable]) -> Result<u64, FootprintError> {
        self.walk_with_stats(roots).map(|stats| stats.bytes)
    }

    /// As [`walk`](Self::walk), additionally reporting node counts.
    pub fn walk_with_stats(&self, roots: &[&dyn Measurable]) -> Result<WalkStats, FootprintError> {
        let mut to_visit: Vec<&dyn Measurable> = roots.to_vec();
        let mut visited: HashSet<(usize, TypeId)> = HashSet::new();
        let mut stats = WalkStats::default();

        while let Some(node) = to_visit.pop() {
            // Mark visited before descending so cycles and diamond sharing
            // are processed exactly once.
            if !visited.insert(node_identity(node)) {
                continue;
            }

            let token = node.type_token();
            if !self.filter.filter_type(&token) {
                // Excluded types are neither sized nor expanded.
                stats.filtered += 1;
                continue;
            }

            if let Some(elements) = node.elements() {
                to_visit.extend(elements);
            } else {
                let fields =
                    self.metadata
                        .filtered_fields(token, node.declared_fields(), &self.filter);
                for field in fields.iter() {
                    to_visit.extend(node.field_references(field));
                }
            }

            stats.bytes += self.visitor.shallow_size(node)?;
            stats.counted += 1;
        }

        tracing::trace!(
            bytes = stats.bytes,
            counted = stats.counted,
            filtered = stats.filtered,
            "walk completed"
        );
        Ok(stats)
    }
}

/// Convenience facade bundling the walker with the default filter and
/// visitor; the shape the resource manager consumes for eviction checks.
pub struct Footprint {
    walker: GraphWalker<IncludeAll, MemSizeVisitor>,
}

impl Footprint {
    pub fn new(config: &FootprintConfig) -> Self {
        Self {
            walker: GraphWalker::new(
                IncludeAll,
                MemSizeVisitor,
                Arc::new(FieldMetadataCache::new(config.metadata_cache_capacity)),
            ),
        }
    }

    /// Total reachable size from the given roots.
    pub fn measure(&self, roots: &[&dyn Measurable]) -> Result<u64, FootprintError> {
        self.walker.walk(roots)
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::new(&FootprintConfig::default())
    }
}
