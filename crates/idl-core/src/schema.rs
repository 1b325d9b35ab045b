//! In-memory model of the data shapes declared by an IDL program.

mod assign;

mod builder;
pub use builder::Builder;

mod composite;
pub use composite::{Composite, CompositeKind};

mod field;
pub use field::{Field, FieldKey};

mod ty;
pub use ty::{BaseType, Enum, EnumValue, Type, TypeId, Typedef};

mod types;
pub use types::Types;

mod verify;

use crate::Result;
