//! Measurable node model: the descriptor-based replacement for runtime
//! reflection.
//!
//! Every type that participates in footprint accounting exposes its direct,
//! non-primitive, owned references through [`Measurable`]. The walker never
//! inspects memory layouts; it only follows the edges a type declares.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identity of a measurable type: its `TypeId` plus a human-readable
/// name used by filter policies and diagnostics.
///
/// Equality and hashing use the `TypeId` only; the name is informational.
#[derive(Debug, Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Token for a concrete `'static` type.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A node in the measurable object graph.
///
/// Implementations declare their reference-bearing fields once per type
/// (`declared_fields`) and resolve the targets per instance
/// (`field_references`). Sequence-like types (the array analog) expose their
/// elements instead.
pub trait Measurable {
    /// Type identity used for filtering and field-metadata caching.
    fn type_token(&self) -> TypeToken;

    /// Names of this type's reference-bearing fields. Instance-independent;
    /// must return the same slice for every instance of the type.
    fn declared_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Direct references reachable through the named field. Absent
    /// references (the null analog) are simply omitted.
    fn field_references(&self, _field: &str) -> Vec<&dyn Measurable> {
        Vec::new()
    }

    /// `Some(elements)` for sequence-like types; elements are traversed
    /// instead of fields.
    fn elements(&self) -> Option<Vec<&dyn Measurable>> {
        None
    }
}

/// Per-walk identity of a node: data pointer plus type identity.
///
/// The pointer alone is not enough: a struct and its first field share an
/// address, so the pair disambiguates them.
pub(crate) fn node_identity(node: &dyn Measurable) -> (usize, TypeId) {
    (
        node as *const dyn Measurable as *const () as usize,
        node.type_token().id(),
    )
}

/// Implement [`Measurable`] for leaf types that own no traversable
/// references.
#[macro_export]
macro_rules! leaf_measurable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Measurable for $ty {
                fn type_token(&self) -> $crate::TypeToken {
                    $crate::TypeToken::of::<$ty>()
                }
            }
        )+
    };
}

leaf_measurable!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, bool, char, String);

impl<T: Measurable + 'static> Measurable for Vec<T> {
    fn type_token(&self) -> TypeToken {
        TypeToken::of::<Vec<T>>()
    }

    fn elements(&self) -> Option<Vec<&dyn Measurable>> {
        Some(self.iter().map(|e| e as &dyn Measurable).collect())
    }
}

impl<T: Measurable + 'static> Measurable for Box<T> {
    fn type_token(&self) -> TypeToken {
        TypeToken::of::<Box<T>>()
    }

    fn declared_fields(&self) -> &'static [&'static str] {
        &["inner"]
    }

    fn field_references(&self, field: &str) -> Vec<&dyn Measurable> {
        match field {
            "inner" => vec![&**self as &dyn Measurable],
            _ => Vec::new(),
        }
    }
}

impl<T: Measurable + 'static> Measurable for Option<T> {
    fn type_token(&self) -> TypeToken {
        TypeToken::of::<Option<T>>()
    }

    fn declared_fields(&self) -> &'static [&'static str] {
        &["some"]
    }

    fn field_references(&self, field: &str) -> Vec<&dyn Measurable> {
        match (field, self) {
            ("some", Some(v)) => vec![v as &dyn Measurable],
            _ => Vec::new(),
        }
    }
}
