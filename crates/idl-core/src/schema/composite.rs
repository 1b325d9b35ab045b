use super::Field;
use std::fmt;

/// A struct, union or exception definition.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composite {
    /// Name of the composite
    name: String,

    /// Struct, union or exception
    kind: CompositeKind,

    /// Fields in declaration order. The composite owns them exclusively.
    fields: Vec<Field>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompositeKind {
    Struct,
    Union,
    Exception,
}

impl Composite {
    pub fn new(kind: CompositeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: vec![],
        }
    }

    pub fn new_struct(name: impl Into<String>) -> Self {
        Self::new(CompositeKind::Struct, name)
    }

    pub fn new_union(name: impl Into<String>) -> Self {
        Self::new(CompositeKind::Union, name)
    }

    pub fn new_exception(name: impl Into<String>) -> Self {
        Self::new(CompositeKind::Exception, name)
    }

    /// Appends a field after every field already declared.
    pub fn append(&mut self, field: Field) -> &mut Field {
        self.fields.push(field);
        let index = self.fields.len() - 1;
        &mut self.fields[index]
    }

    /// Builder-style variant of [`Composite::append`].
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CompositeKind {
        self.kind
    }

    pub fn is_union(&self) -> bool {
        self.kind == CompositeKind::Union
    }

    pub fn is_exception(&self) -> bool {
        self.kind == CompositeKind::Exception
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    /// Finds the first field with the given wire key. Unassigned fields never
    /// match, even when searching for `0`.
    pub fn field_by_key(&self, key: i32) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.key_spec().value() == Some(key))
    }

    /// Runs `f` over the fields by value so transitions that consume a field
    /// can be applied in place.
    pub(crate) fn rebuild_fields(&mut self, f: impl FnMut(Field) -> Field) {
        let fields = std::mem::take(&mut self.fields);
        self.fields = fields.into_iter().map(f).collect();
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match self {
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Exception => "exception",
        })
    }
}
