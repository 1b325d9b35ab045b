use idl_core::schema::{BaseType, Builder, Composite, Field, Types};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std_util::prelude::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn model_is_send_and_sync() {
    assert_send_sync::<Field>();
    assert_send_sync::<Composite>();
    assert_send_sync::<Types>();
    assert_send_sync::<idl_core::Error>();
}

#[test]
fn built_schema_is_read_from_many_threads() {
    let mut types = Types::new();
    let string = types.base(BaseType::String);
    let i64_ty = types.base(BaseType::I64);
    let list = types.list(string);

    let mut composite = Composite::new_struct("Account");
    composite.append(Field::with_key(i64_ty, "id", 1));
    composite.append(Field::with_key(string, "owner", 2));
    composite.append(Field::new(list, "aliases"));
    let id = assert_ok!(types.declare(composite));

    let mut types = assert_ok!(Builder::new().build(types));

    // Annotation phase: single writer, before sharing.
    types
        .composite_mut(id)
        .unwrap()
        .field_by_name_mut("aliases")
        .unwrap()
        .set_compatibility_optional(true);

    let types = Arc::new(types);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let types = types.clone();
            std::thread::spawn(move || {
                types
                    .composite(id)
                    .unwrap()
                    .fields()
                    .iter()
                    .map(|field| {
                        (
                            field.name().to_string(),
                            types.display_name(field.ty()),
                            field.key(),
                            field.compatibility_optional(),
                        )
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let fields = handle.join().unwrap();
        assert_eq!(
            fields,
            [
                ("id".to_string(), "i64".to_string(), 1, false),
                ("owner".to_string(), "string".to_string(), 2, false),
                ("aliases".to_string(), "list<string>".to_string(), -1, true),
            ]
        );
    }
}
