//! Size measurement primitive.

use crate::node::Measurable;
use std::mem;
use strata_core::FootprintError;

/// Computes the shallow size of a single node.
///
/// A failed measurement is fatal for the walk that requested it: the walker
/// aborts with the error rather than returning a partial total.
pub trait SizeVisitor: Send + Sync {
    fn shallow_size(&self, node: &dyn Measurable) -> Result<u64, FootprintError>;
}

/// Default visitor: the in-place size of the node's own representation,
/// excluding anything it merely points to (those are separate nodes).
#[derive(Debug, Default, Clone, Copy)]
pub struct MemSizeVisitor;

impl SizeVisitor for MemSizeVisitor {
    fn shallow_size(&self, node: &dyn Measurable) -> Result<u64, FootprintError> {
        Ok(mem::size_of_val(node) as u64)
    }
}
