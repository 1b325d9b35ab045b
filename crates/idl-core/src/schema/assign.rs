use super::{Builder, Composite, Result, Types};
use crate::Error;

use std::collections::HashSet;

/// Gives every field declared without a key a negative key of its own.
///
/// Keys are handed out per composite from `-1` downwards, in declaration
/// order, skipping negative values already held by another field, whether
/// written in the source or assigned by an earlier build.
struct AssignKeys<'a> {
    builder: &'a Builder,
}

impl Types {
    pub(super) fn assign_keys(&mut self, builder: &Builder) -> Result<()> {
        AssignKeys { builder }.assign(self)
    }
}

impl AssignKeys<'_> {
    fn assign(&self, types: &mut Types) -> Result<()> {
        if self.builder.is_strict() {
            for (_, composite) in types.composites() {
                self.reject_implicit_keys(composite)?;
            }
        }

        for composite in types.composites_mut() {
            self.assign_composite(composite);
        }

        Ok(())
    }

    fn reject_implicit_keys(&self, composite: &Composite) -> Result<()> {
        match composite
            .fields()
            .iter()
            .find(|field| field.key_spec().is_unassigned())
        {
            Some(field) => Err(Error::implicit_field_key(field.name())
                .context(format!("{} `{}`", composite.kind(), composite.name()))),
            None => Ok(()),
        }
    }

    fn assign_composite(&self, composite: &mut Composite) {
        let taken: HashSet<i32> = composite
            .fields()
            .iter()
            .filter_map(|field| field.key_spec().value())
            .filter(|key| *key < 0)
            .collect();

        let name = composite.name().to_string();
        let mut next = -1;

        composite.rebuild_fields(|field| {
            if field.has_assigned_key() {
                return field;
            }

            while taken.contains(&next) {
                next -= 1;
            }

            tracing::warn!(
                key = next,
                "no field key specified for `{}.{}`, resorting to auto-assignment",
                name,
                field.name()
            );

            let field = field.into_implicit(next);
            next -= 1;
            tracing::debug!(field = %field, composite = %name, "assigned implicit key");
            field
        });
    }
}
