use super::TypeId;
use std::fmt;

/// A single named, typed, numbered member of a struct, union or exception.
///
/// Everything except the compatibility-optional flag is fixed at
/// construction. The flag setter takes `&mut self`, so it can only run while
/// the field is exclusively borrowed, before the field is shared with
/// concurrent readers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// The field's type, owned by the [`Types`](super::Types) registry.
    ty: TypeId,

    /// The field name
    name: String,

    /// Wire identifier
    key: FieldKey,

    /// Schema-derived optionality used by some generators. Unrelated to the
    /// field's own required/optional semantics.
    compatibility_optional: bool,
}

/// The wire identifier of a field, with "not supplied" kept distinct from an
/// explicit zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKey {
    /// The declaration did not specify a key.
    Unassigned,

    /// The key written in the declaration, stored verbatim.
    Explicit(i32),

    /// A key chosen by the assignment pass.
    Implicit(i32),
}

impl Field {
    /// Creates a field whose key was not supplied.
    pub fn new(ty: TypeId, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            key: FieldKey::Unassigned,
            compatibility_optional: false,
        }
    }

    /// Creates a field with an explicit key. No range checking happens here.
    pub fn with_key(ty: TypeId, name: impl Into<String>, key: i32) -> Self {
        Self {
            ty,
            name: name.into(),
            key: FieldKey::Explicit(key),
            compatibility_optional: false,
        }
    }

    /// Gets the type.
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the wire key. Returns `0` while the key is unassigned.
    pub fn key(&self) -> i32 {
        self.key.value().unwrap_or(0)
    }

    pub fn key_spec(&self) -> FieldKey {
        self.key
    }

    /// The key written in the declaration, if any.
    pub fn explicit_key(&self) -> Option<i32> {
        match self.key {
            FieldKey::Explicit(key) => Some(key),
            _ => None,
        }
    }

    pub fn has_assigned_key(&self) -> bool {
        !self.key.is_unassigned()
    }

    pub fn compatibility_optional(&self) -> bool {
        self.compatibility_optional
    }

    pub fn set_compatibility_optional(&mut self, compatibility_optional: bool) {
        self.compatibility_optional = compatibility_optional;
    }

    /// Replaces an unassigned key with an implicit one, consuming the field.
    pub(crate) fn into_implicit(self, key: i32) -> Self {
        debug_assert!(self.key.is_unassigned(), "field already has a key");
        Self {
            key: FieldKey::Implicit(key),
            ..self
        }
    }
}

impl FieldKey {
    /// The numeric key, or `None` when unassigned.
    pub fn value(self) -> Option<i32> {
        match self {
            Self::Unassigned => None,
            Self::Explicit(key) | Self::Implicit(key) => Some(key),
        }
    }

    pub fn is_unassigned(self) -> bool {
        matches!(self, Self::Unassigned)
    }

    pub fn is_explicit(self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    pub fn is_implicit(self) -> bool {
        matches!(self, Self::Implicit(_))
    }
}

impl fmt::Debug for FieldKey {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => fmt.write_str("FieldKey(unassigned)"),
            Self::Explicit(key) => write!(fmt, "FieldKey({key})"),
            Self::Implicit(key) => write!(fmt, "FieldKey(implicit {key})"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key.value() {
            Some(key) => write!(fmt, "{key}: {}", self.name),
            None => fmt.write_str(&self.name),
        }
    }
}
