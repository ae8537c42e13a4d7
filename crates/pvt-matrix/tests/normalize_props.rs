use pvt_matrix::{normalize, PrepositionSchema, SchemaMigration, SchemaVersion};
use proptest::prelude::*;

fn schemas() -> impl Strategy<Value = PrepositionSchema> {
    prop_oneof![
        Just(PrepositionSchema::legacy()),
        Just(PrepositionSchema::current()),
        Just(PrepositionSchema::new(SchemaVersion(42), ["In"]).unwrap()),
    ]
}

#[test]
fn nineteen_columns_gain_leading_slot() {
    let schema = PrepositionSchema::current();
    let input = vec!["a".to_string(); 19];

    let mut expected = vec![String::new()];
    expected.extend(input.clone());

    assert_eq!(normalize(&input, &schema), expected);
}

proptest! {
    #[test]
    fn prop_output_has_schema_length(
        schema in schemas(),
        raw in prop::collection::vec("[a-z]{0,6}", 0..40),
    ) {
        prop_assert_eq!(normalize(&raw, &schema).len(), schema.len());
    }

    #[test]
    fn prop_normalize_is_idempotent(
        schema in schemas(),
        raw in prop::collection::vec("[a-z]{0,6}", 0..40),
    ) {
        let once = normalize(&raw, &schema);
        let twice = normalize(&once, &schema);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_padding_preserves_prefix(
        raw in prop::collection::vec("[a-z]{1,6}", 0..16),
    ) {
        let schema = PrepositionSchema::legacy();
        let out = normalize(&raw, &schema);
        prop_assert_eq!(&out[..raw.len()], &raw[..]);
        prop_assert!(out[raw.len()..].iter().all(String::is_empty));
    }

    #[test]
    fn prop_migration_shifts_tail_by_two(
        raw in prop::collection::vec("[a-z]{1,6}", 18..=18),
    ) {
        let out = SchemaMigration::up_with_and_forward().apply(&raw);
        prop_assert_eq!(out.len(), 20);
        prop_assert_eq!(&out[..15], &raw[..15]);
        prop_assert_eq!(&out[17..], &raw[15..]);
        prop_assert!(out[15].is_empty() && out[16].is_empty());
    }
}
