use idl_core::schema::{BaseType, Composite, Field, Types};
use pretty_assertions::assert_eq;

#[test]
fn flag_toggles() {
    let mut types = Types::new();
    let t = types.base(BaseType::String);
    let mut field = Field::new(t, "nickname");

    field.set_compatibility_optional(true);
    assert!(field.compatibility_optional());

    field.set_compatibility_optional(true);
    assert!(field.compatibility_optional());

    field.set_compatibility_optional(false);
    assert!(!field.compatibility_optional());
}

#[test]
fn flag_does_not_touch_other_attributes() {
    let mut types = Types::new();
    let t = types.base(BaseType::I16);
    let mut field = Field::with_key(t, "port", 2);

    field.set_compatibility_optional(true);

    assert_eq!(field.ty(), t);
    assert_eq!(field.name(), "port");
    assert_eq!(field.key(), 2);
}

#[test]
fn equal_fields_are_independent() {
    let mut types = Types::new();
    let t = types.base(BaseType::I32);

    let mut a = Field::with_key(t, "x", 1);
    let b = Field::with_key(t, "x", 1);
    assert_eq!(a, b);

    a.set_compatibility_optional(true);
    assert!(a.compatibility_optional());
    assert!(!b.compatibility_optional());

    let c = a.clone();
    a.set_compatibility_optional(false);
    assert!(c.compatibility_optional());
}

#[test]
fn id_and_tag_scenario() {
    let mut types = Types::new();
    let t = types.base(BaseType::I64);

    let mut record = Composite::new_struct("Record");
    record.append(Field::new(t, "id"));
    record.append(Field::with_key(t, "tag", 5));

    let id = types.declare(record).unwrap();

    types
        .composite_mut(id)
        .unwrap()
        .field_by_name_mut("tag")
        .unwrap()
        .set_compatibility_optional(true);

    let record = types.composite(id).unwrap();
    let id_field = record.field_by_name("id").unwrap();
    let tag_field = record.field_by_name("tag").unwrap();

    assert_eq!(id_field.key(), 0);
    assert!(!id_field.compatibility_optional());
    assert_eq!(tag_field.key(), 5);
    assert!(tag_field.compatibility_optional());
}
