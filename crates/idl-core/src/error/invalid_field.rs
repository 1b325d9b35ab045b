use super::Error;

/// Error when a field declaration cannot be used for wire encoding.
///
/// Raised by the key-assignment and verification passes, never by
/// [`Field`](crate::schema::Field) itself.
#[derive(Debug, Clone)]
pub(super) struct InvalidField {
    kind: InvalidFieldKind,
}

#[derive(Debug, Clone)]
pub(super) enum InvalidFieldKind {
    EmptyName,
    DuplicateName {
        name: Box<str>,
    },
    DuplicateKey {
        key: i32,
        first: Box<str>,
        second: Box<str>,
    },
    ReservedKey {
        field: Box<str>,
    },
    NegativeKey {
        field: Box<str>,
        key: i32,
    },
    KeyOutOfRange {
        field: Box<str>,
        key: i32,
    },
    UnassignedKey {
        field: Box<str>,
    },
    ImplicitKey {
        field: Box<str>,
    },
    UnknownType {
        field: Box<str>,
        ty: usize,
    },
}

impl std::error::Error for InvalidField {}

impl core::fmt::Display for InvalidField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use InvalidFieldKind::*;

        f.write_str("invalid field: ")?;

        match &self.kind {
            EmptyName => f.write_str("field name must not be empty"),
            DuplicateName { name } => write!(f, "field `{name}` is declared more than once"),
            DuplicateKey { key, first, second } => {
                write!(f, "fields `{first}` and `{second}` share key {key}")
            }
            ReservedKey { field } => write!(f, "field `{field}` uses reserved key 0"),
            NegativeKey { field, key } => write!(
                f,
                "field `{field}` has negative key {key}; negative keys are not allowed"
            ),
            KeyOutOfRange { field, key } => write!(
                f,
                "key {key} of field `{field}` is outside the range {}..={}",
                i16::MIN,
                i16::MAX
            ),
            UnassignedKey { field } => write!(f, "field `{field}` has no key assigned"),
            ImplicitKey { field } => write!(
                f,
                "no key specified for field `{field}`; implicit field keys are not allowed in strict mode"
            ),
            UnknownType { field, ty } => {
                write!(f, "field `{field}` references unknown type #{ty}")
            }
        }
    }
}

impl Error {
    fn invalid_field(kind: InvalidFieldKind) -> Error {
        Error::from(super::ErrorKind::InvalidField(InvalidField { kind }))
    }

    pub fn empty_field_name() -> Error {
        Error::invalid_field(InvalidFieldKind::EmptyName)
    }

    pub fn duplicate_field_name(name: &str) -> Error {
        Error::invalid_field(InvalidFieldKind::DuplicateName { name: name.into() })
    }

    /// Two fields of the same composite resolved to the same wire key.
    pub fn duplicate_field_key(key: i32, first: &str, second: &str) -> Error {
        Error::invalid_field(InvalidFieldKind::DuplicateKey {
            key,
            first: first.into(),
            second: second.into(),
        })
    }

    pub fn reserved_field_key(field: &str) -> Error {
        Error::invalid_field(InvalidFieldKind::ReservedKey {
            field: field.into(),
        })
    }

    pub fn negative_field_key(field: &str, key: i32) -> Error {
        Error::invalid_field(InvalidFieldKind::NegativeKey {
            field: field.into(),
            key,
        })
    }

    pub fn field_key_out_of_range(field: &str, key: i32) -> Error {
        Error::invalid_field(InvalidFieldKind::KeyOutOfRange {
            field: field.into(),
            key,
        })
    }

    pub fn unassigned_field_key(field: &str) -> Error {
        Error::invalid_field(InvalidFieldKind::UnassignedKey {
            field: field.into(),
        })
    }

    pub fn implicit_field_key(field: &str) -> Error {
        Error::invalid_field(InvalidFieldKind::ImplicitKey {
            field: field.into(),
        })
    }

    pub fn unknown_field_type(field: &str, ty: usize) -> Error {
        Error::invalid_field(InvalidFieldKind::UnknownType {
            field: field.into(),
            ty,
        })
    }

    /// Returns `true` if this error, or any error in its cause chain, is an
    /// invalid field error.
    pub fn is_invalid_field(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), super::ErrorKind::InvalidField(_)))
    }

    /// Returns `true` if the chain contains a duplicate key error.
    pub fn is_duplicate_field_key(&self) -> bool {
        self.chain().any(|err| {
            matches!(
                err.kind(),
                super::ErrorKind::InvalidField(InvalidField {
                    kind: InvalidFieldKind::DuplicateKey { .. }
                })
            )
        })
    }
}
