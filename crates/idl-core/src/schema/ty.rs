use super::Composite;
use std::fmt;

/// Index of a [`Type`] inside the [`Types`](super::Types) registry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeId(pub usize);

/// A type known to the compiler.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// Built-in scalar type
    Base(BaseType),

    /// Struct, union or exception
    Composite(Composite),

    /// Named set of integer constants
    Enum(Enum),

    /// Alias for another type
    Typedef(Typedef),

    /// Ordered sequence of a single element type
    List(TypeId),

    /// Unordered collection of unique elements
    Set(TypeId),

    /// Key/value pairs
    Map(TypeId, TypeId),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseType {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Typedef {
    pub name: String,
    pub target: TypeId,
}

impl Type {
    /// The declared name for named types, `None` for base and container types.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Composite(composite) => Some(composite.name()),
            Self::Enum(e) => Some(&e.name),
            Self::Typedef(typedef) => Some(&typedef.name),
            Self::Base(_) | Self::List(_) | Self::Set(_) | Self::Map(..) => None,
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(..))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    pub fn is_typedef(&self) -> bool {
        matches!(self, Self::Typedef(_))
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn as_composite_mut(&mut self) -> Option<&mut Composite> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_composite(&self) -> &Composite {
        match self {
            Self::Composite(composite) => composite,
            _ => panic!("expected composite type, but was {self:?}"),
        }
    }

    /// Type ids this type refers to directly.
    pub(crate) fn references(&self) -> Vec<TypeId> {
        match self {
            Self::Base(_) | Self::Enum(_) => vec![],
            Self::Composite(composite) => composite.fields().iter().map(|f| f.ty()).collect(),
            Self::Typedef(typedef) => vec![typedef.target],
            Self::List(elem) | Self::Set(elem) => vec![*elem],
            Self::Map(key, value) => vec![*key, *value],
        }
    }
}

impl BaseType {
    /// The keyword used for this type in IDL source.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Double => "double",
            Self::String => "string",
            Self::Binary => "binary",
        }
    }
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![],
        }
    }

    pub fn value(mut self, name: impl Into<String>, value: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value,
        });
        self
    }
}

impl Typedef {
    pub fn new(name: impl Into<String>, target: TypeId) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

impl From<BaseType> for Type {
    fn from(base: BaseType) -> Self {
        Self::Base(base)
    }
}

impl From<Composite> for Type {
    fn from(composite: Composite) -> Self {
        Self::Composite(composite)
    }
}

impl From<Enum> for Type {
    fn from(e: Enum) -> Self {
        Self::Enum(e)
    }
}

impl From<Typedef> for Type {
    fn from(typedef: Typedef) -> Self {
        Self::Typedef(typedef)
    }
}

impl From<&Self> for TypeId {
    fn from(val: &Self) -> Self {
        *val
    }
}

impl From<TypeId> for usize {
    fn from(val: TypeId) -> Self {
        val.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeId({})", self.0)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.keyword())
    }
}
