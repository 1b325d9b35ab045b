use super::{Builder, Composite, Field, FieldKey, Result, Type, Types};
use crate::Error;

use std::collections::{HashMap, HashSet};

struct Verify<'a> {
    types: &'a Types,
    builder: &'a Builder,
}

impl Types {
    pub(super) fn verify(&self, builder: &Builder) -> Result<()> {
        Verify {
            types: self,
            builder,
        }
        .verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for (_, composite) in self.types.composites() {
            self.verify_composite(composite).map_err(|err| {
                err.context(format!("{} `{}`", composite.kind(), composite.name()))
            })?;
        }

        self.verify_type_references()?;

        tracing::debug!(types = self.types.len(), "schema verified");
        Ok(())
    }

    fn verify_composite(&self, composite: &Composite) -> Result<()> {
        let mut names = HashSet::new();
        let mut keys = HashMap::new();

        for field in composite.fields() {
            self.verify_field(field)?;

            if !names.insert(field.name()) {
                return Err(Error::duplicate_field_name(field.name()));
            }

            if let Some(first) = keys.insert(field.key(), field.name()) {
                return Err(Error::duplicate_field_key(
                    field.key(),
                    first,
                    field.name(),
                ));
            }
        }

        Ok(())
    }

    fn verify_field(&self, field: &Field) -> Result<()> {
        if field.name().is_empty() {
            return Err(Error::empty_field_name());
        }

        if !self.types.contains(field.ty()) {
            return Err(Error::unknown_field_type(field.name(), field.ty().0));
        }

        match field.key_spec() {
            FieldKey::Unassigned => return Err(Error::unassigned_field_key(field.name())),
            FieldKey::Explicit(0) => return Err(Error::reserved_field_key(field.name())),
            FieldKey::Explicit(key) if key < 0 && !self.builder.allows_negative_keys() => {
                return Err(Error::negative_field_key(field.name(), key));
            }
            _ => {}
        }

        // Keys travel as 16-bit field ids on the wire.
        if i16::try_from(field.key()).is_err() {
            return Err(Error::field_key_out_of_range(field.name(), field.key()));
        }

        Ok(())
    }

    fn verify_type_references(&self) -> Result<()> {
        for (id, ty) in self.types.iter() {
            for referenced in ty.references() {
                // Field types are reported with the field name above.
                if !self.types.contains(referenced) && !ty.is_composite() {
                    return Err(Error::invalid_type(format!(
                        "`{}` references unknown type #{}",
                        self.types.display_name(id),
                        referenced.0
                    )));
                }
            }

            if let Type::Typedef(_) = ty {
                self.types.resolve(id)?;
            }
        }

        Ok(())
    }
}
