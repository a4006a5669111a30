//! Filter policies deciding which types and fields participate in sizing
//! and traversal.

use crate::node::TypeToken;
use std::collections::HashSet;

/// Policy consulted once per type (results are memoized by the field
/// metadata cache).
///
/// An excluded type contributes nothing to the total and is never expanded;
/// excluded fields are simply not followed.
pub trait FilterPolicy: Send + Sync {
    /// True when the type is eligible for traversal and sizing.
    fn filter_type(&self, token: &TypeToken) -> bool;

    /// Retain the traversal-eligible subset of a type's declared fields.
    fn filter_fields(
        &self,
        token: &TypeToken,
        declared: &'static [&'static str],
    ) -> Vec<&'static str>;
}

/// Every type and every field participates.
#[derive(Debug, Default, Clone, Copy)]
pub struct IncludeAll;

impl FilterPolicy for IncludeAll {
    fn filter_type(&self, _token: &TypeToken) -> bool {
        true
    }

    fn filter_fields(
        &self,
        _token: &TypeToken,
        declared: &'static [&'static str],
    ) -> Vec<&'static str> {
        declared.to_vec()
    }
}

/// Deny-list policy over type names and `(type, field)` pairs.
#[derive(Debug, Default)]
pub struct DenyListFilter {
    denied_types: HashSet<&'static str>,
    denied_fields: HashSet<(&'static str, &'static str)>,
}

impl DenyListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a type from sizing and traversal entirely.
    pub fn deny_type(mut self, type_name: &'static str) -> Self {
        self.denied_types.insert(type_name);
        self
    }

    /// Exclude a single field of a type from traversal.
    pub fn deny_field(mut self, type_name: &'static str, field: &'static str) -> Self {
        self.denied_fields.insert((type_name, field));
        self
    }
}

impl FilterPolicy for DenyListFilter {
    fn filter_type(&self, token: &TypeToken) -> bool {
        !self.denied_types.contains(token.name())
    }

    fn filter_fields(
        &self,
        token: &TypeToken,
        declared: &'static [&'static str],
    ) -> Vec<&'static str> {
        declared
            .iter()
            .copied()
            .filter(|field| !self.denied_fields.contains(&(token.name(), *field)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_all_keeps_everything() {
        let token = TypeToken::of::<String>();
        assert!(IncludeAll.filter_type(&token));
        assert_eq!(
            IncludeAll.filter_fields(&token, &["a", "b"]),
            vec!["a", "b"]
        );
    }

    #[test]
    fn deny_list_excludes_type() {
        let filter = DenyListFilter::new().deny_type(TypeToken::of::<String>().name());
        assert!(!filter.filter_type(&TypeToken::of::<String>()));
        assert!(filter.filter_type(&TypeToken::of::<u64>()));
    }

    #[test]
    fn deny_list_excludes_field() {
        let token = TypeToken::of::<u64>();
        let filter = DenyListFilter::new().deny_field(token.name(), "b");
        assert_eq!(filter.filter_fields(&token, &["a", "b", "c"]), vec!["a", "c"]);
    }
}
