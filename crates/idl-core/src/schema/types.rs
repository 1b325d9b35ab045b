use super::{BaseType, Composite, Type, TypeId};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Arena that owns every type of a program.
///
/// Types are never removed, so a [`TypeId`] handed out by a registry stays
/// valid for the registry's whole lifetime. Fields refer to their types by
/// id instead of by reference.
#[derive(Debug, Default, Clone)]
pub struct Types {
    types: Vec<Type>,

    /// Named declarations, in declaration order
    names: IndexMap<String, TypeId>,

    /// Base and container types are shared by every field that uses them
    interned: IndexMap<Interned, TypeId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum Interned {
    Base(BaseType),
    List(TypeId),
    Set(TypeId),
    Map(TypeId, TypeId),
}

impl Types {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the id of a base type, registering it on first use.
    pub fn base(&mut self, base: BaseType) -> TypeId {
        self.intern(Interned::Base(base), Type::Base(base))
    }

    #[track_caller]
    pub fn list(&mut self, elem: impl Into<TypeId>) -> TypeId {
        let elem = self.expect_registered(elem.into());
        self.intern(Interned::List(elem), Type::List(elem))
    }

    #[track_caller]
    pub fn set(&mut self, elem: impl Into<TypeId>) -> TypeId {
        let elem = self.expect_registered(elem.into());
        self.intern(Interned::Set(elem), Type::Set(elem))
    }

    #[track_caller]
    pub fn map(&mut self, key: impl Into<TypeId>, value: impl Into<TypeId>) -> TypeId {
        let key = self.expect_registered(key.into());
        let value = self.expect_registered(value.into());
        self.intern(Interned::Map(key, value), Type::Map(key, value))
    }

    /// Registers a named type: a composite, an enum or a typedef.
    pub fn declare(&mut self, ty: impl Into<Type>) -> Result<TypeId> {
        let ty = ty.into();

        let Some(name) = ty.name() else {
            return Err(Error::invalid_type(format!(
                "only named types can be declared, got {ty:?}"
            )));
        };

        if self.names.contains_key(name) {
            return Err(Error::invalid_type(format!(
                "type `{name}` is declared twice"
            )));
        }

        let id = TypeId(self.types.len());
        self.names.insert(name.to_string(), id);
        self.types.push(ty);
        Ok(id)
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.0 < self.types.len()
    }

    pub fn get(&self, id: impl Into<TypeId>) -> Option<&Type> {
        self.types.get(id.into().0)
    }

    /// Get a type by ID
    #[track_caller]
    pub fn ty(&self, id: impl Into<TypeId>) -> &Type {
        self.get(id).expect("invalid type ID")
    }

    /// Finds a declared type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types.iter().enumerate().map(|(i, ty)| (TypeId(i), ty))
    }

    /// Follows typedefs until reaching a type that is not an alias.
    pub fn resolve(&self, id: impl Into<TypeId>) -> Result<TypeId> {
        let start = id.into();
        let mut id = start;

        // A chain longer than the registry must revisit a typedef.
        for _ in 0..=self.types.len() {
            match self.get(id) {
                Some(Type::Typedef(typedef)) => id = typedef.target,
                Some(_) => return Ok(id),
                None => {
                    return Err(Error::invalid_type(format!(
                        "type #{} is not registered",
                        id.0
                    )))
                }
            }
        }

        Err(Error::invalid_type(format!(
            "typedef `{}` is cyclic",
            self.display_name(start)
        )))
    }

    /// Composite types in declaration order.
    pub fn composites(&self) -> impl Iterator<Item = (TypeId, &Composite)> {
        self.iter()
            .filter_map(|(id, ty)| ty.as_composite().map(|composite| (id, composite)))
    }

    pub(crate) fn composites_mut(&mut self) -> impl Iterator<Item = &mut Composite> {
        self.types.iter_mut().filter_map(Type::as_composite_mut)
    }

    pub fn composite(&self, id: impl Into<TypeId>) -> Option<&Composite> {
        self.get(id).and_then(Type::as_composite)
    }

    /// Mutable access for the annotation phase, e.g. to set
    /// compatibility-optional flags before generators run.
    pub fn composite_mut(&mut self, id: impl Into<TypeId>) -> Option<&mut Composite> {
        self.types
            .get_mut(id.into().0)
            .and_then(Type::as_composite_mut)
    }

    /// Renders a type the way it would be spelled in IDL source.
    pub fn display_name(&self, id: impl Into<TypeId>) -> String {
        let id = id.into();
        match self.get(id) {
            None => format!("<unknown #{}>", id.0),
            Some(Type::Base(base)) => base.keyword().to_string(),
            Some(Type::List(elem)) => format!("list<{}>", self.display_name(*elem)),
            Some(Type::Set(elem)) => format!("set<{}>", self.display_name(*elem)),
            Some(Type::Map(key, value)) => format!(
                "map<{},{}>",
                self.display_name(*key),
                self.display_name(*value)
            ),
            Some(named) => named.name().unwrap_or_default().to_string(),
        }
    }

    fn intern(&mut self, key: Interned, ty: Type) -> TypeId {
        if let Some(id) = self.interned.get(&key) {
            return *id;
        }

        let id = TypeId(self.types.len());
        self.types.push(ty);
        self.interned.insert(key, id);
        id
    }

    #[track_caller]
    fn expect_registered(&self, id: TypeId) -> TypeId {
        assert!(self.contains(id), "invalid type ID: {id:?}");
        id
    }
}
