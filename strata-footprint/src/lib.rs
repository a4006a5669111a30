//! STRATA Footprint - Resource Accounting Engine
//!
//! Computes the total in-memory size of the object graph reachable from a
//! set of cache roots, feeding byte-based capacity enforcement and eviction.
//!
//! Sizing is descriptor-based: types expose their direct, non-primitive,
//! owned references through [`Measurable`] and the walker traverses that
//! explicit graph. Filtering is a predicate over type identity, memoized per
//! type by the [`FieldMetadataCache`].

pub mod filter;
pub mod metadata;
pub mod node;
pub mod visitor;
pub mod walker;

pub use filter::{DenyListFilter, FilterPolicy, IncludeAll};
pub use metadata::FieldMetadataCache;
pub use node::{Measurable, TypeToken};
pub use visitor::{MemSizeVisitor, SizeVisitor};
pub use walker::{Footprint, GraphWalker, WalkStats};
