//! The annotation codec: the two inverse transforms at the heart of the
//! bridge.
//!
//! `decode` flattens a surface annotation into an ordered list of
//! [`TypeExpr`] alternatives, `aggregate` folds that list into a document
//! [`Property`] plus a required flag, and `encode` rebuilds an annotation
//! from a single property. For the supported shapes (primitives, references,
//! single-level lists, optionals, unions of those) the transforms invert
//! each other exactly; everything else degrades silently rather than
//! erroring.

use crate::ast::{Annotation, SubscriptIndex};
use crate::document::{Property, SCHEMA_REF_PREFIX};
use crate::types::{source_type_name, Primitive, TypeExpr};

/// Decode an annotation into its flattened alternative sequence.
///
/// Order is left-to-right as written: the left-associative union
/// `(A | B) | C` flattens to `[A, B, C]`.
pub fn decode(annotation: &Annotation) -> Vec<TypeExpr> {
    match annotation {
        Annotation::Name(name) => vec![TypeExpr::from_name(name)],

        Annotation::None => vec![TypeExpr::Null],

        Annotation::Union(left, right) => {
            let mut alternatives = decode(left);
            alternatives.extend(decode(right));
            alternatives
        }

        Annotation::Subscript { base, index } => match (base.as_str(), index) {
            ("list", SubscriptIndex::Name(name)) => {
                vec![TypeExpr::List(Box::new(TypeExpr::from_name(name)))]
            }
            // Only one extra level of nesting is decoded; the inner
            // alternatives are carried opaquely and aggregate to an
            // object schema.
            ("list", SubscriptIndex::Nested(inner)) => {
                vec![TypeExpr::List(Box::new(TypeExpr::Opaque(decode(inner))))]
            }
            ("list", SubscriptIndex::Tuple(_)) => {
                vec![TypeExpr::List(Box::new(TypeExpr::Opaque(Vec::new())))]
            }
            ("dict", SubscriptIndex::Pair(key, value)) => {
                vec![TypeExpr::Dict(key.clone(), value.clone())]
            }
            // Silently unsupported.
            _ => Vec::new(),
        },

        Annotation::Unsupported(_) => Vec::new(),
    }
}

/// Fold a flattened alternative sequence into a property and required flag.
///
/// A field is required unless the sequence contains a null alternative;
/// null alternatives are then dropped from consideration.
pub fn aggregate(alternatives: &[TypeExpr]) -> (Property, bool) {
    let required = !alternatives.iter().any(TypeExpr::is_null);

    let mapped: Vec<Property> = alternatives
        .iter()
        .filter(|alternative| !alternative.is_null())
        .map(map_alternative)
        .collect();

    let property = match mapped.len() {
        0 => Property::default(),
        1 => mapped.into_iter().next().unwrap_or_default(),
        _ => Property::one_of(mapped),
    };

    (property, required)
}

/// Map one non-null alternative to a property.
fn map_alternative(alternative: &TypeExpr) -> Property {
    match alternative {
        TypeExpr::List(element) => Property::array(map_element(element)),
        other => map_element(other),
    }
}

/// Map a scalar alternative (or list element) to a property.
///
/// Anything that is not a bare primitive or reference name falls back to a
/// plain object schema.
fn map_element(element: &TypeExpr) -> Property {
    match element {
        TypeExpr::Primitive(primitive) => Property::primitive(*primitive),
        TypeExpr::Reference(name) => Property::reference(name),
        _ => Property::primitive(Primitive::Object),
    }
}

/// Rebuild an annotation from a single property.
///
/// This is the inverse of `aggregate` for one property (not a whole field):
/// the nullable wrapper is the caller's concern. The empty `{}` shape maps
/// to the `None` literal.
pub fn encode(property: &Property) -> Annotation {
    if property.is_array() {
        let element_name = property
            .items
            .as_deref()
            .map(element_name)
            .unwrap_or_default();
        return Annotation::list_of(source_type_name(&element_name));
    }

    if let Some(type_name) = &property.type_name {
        return Annotation::Name(source_type_name(type_name));
    }

    if let Some(reference) = &property.reference {
        let name = reference.replace(SCHEMA_REF_PREFIX, "");
        return Annotation::Name(source_type_name(&name));
    }

    if let Some(alternatives) = &property.one_of {
        return fold_union(alternatives.iter().map(encode).collect());
    }

    Annotation::None
}

/// The document-side name of an array element property.
fn element_name(items: &Property) -> String {
    if let Some(reference) = &items.reference {
        reference.replace(SCHEMA_REF_PREFIX, "")
    } else {
        items.type_name.clone().unwrap_or_default()
    }
}

/// Left-fold encoded alternatives into a binary union chain.
///
/// `fold([a, b, c])` is `Union(Union(a, b), c)`, which exactly inverts the
/// decode flattening order.
fn fold_union(mut alternatives: Vec<Annotation>) -> Annotation {
    match alternatives.len() {
        0 => Annotation::None,
        1 => alternatives.remove(0),
        _ => {
            let last = alternatives.remove(alternatives.len() - 1);
            Annotation::union(fold_union(alternatives), last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Annotation as A;

    fn three_way_union() -> Annotation {
        // int | str | Ref, left-associative
        A::union(A::union(A::name("int"), A::name("str")), A::name("Ref"))
    }

    #[test]
    fn test_decode_flattens_left_to_right() {
        let alternatives = decode(&three_way_union());
        assert_eq!(
            alternatives,
            vec![
                TypeExpr::Primitive(Primitive::Integer),
                TypeExpr::Primitive(Primitive::String),
                TypeExpr::Reference("Ref".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_none_literal() {
        assert_eq!(decode(&A::None), vec![TypeExpr::Null]);
    }

    #[test]
    fn test_decode_list_of_name() {
        assert_eq!(
            decode(&A::list_of("str")),
            vec![TypeExpr::List(Box::new(TypeExpr::Primitive(
                Primitive::String
            )))]
        );
    }

    #[test]
    fn test_decode_dict_captures_bare_names_only() {
        assert_eq!(
            decode(&A::dict_of("str", "int")),
            vec![TypeExpr::Dict("str".to_string(), "int".to_string())]
        );
    }

    #[test]
    fn test_decode_nested_union_in_list_is_opaque() {
        let ann = A::Subscript {
            base: "list".to_string(),
            index: SubscriptIndex::Nested(Box::new(A::union(A::name("int"), A::name("str")))),
        };
        assert_eq!(
            decode(&ann),
            vec![TypeExpr::List(Box::new(TypeExpr::Opaque(vec![
                TypeExpr::Primitive(Primitive::Integer),
                TypeExpr::Primitive(Primitive::String),
            ])))]
        );
    }

    #[test]
    fn test_decode_unknown_subscript_is_silently_unsupported() {
        let ann = A::Subscript {
            base: "set".to_string(),
            index: SubscriptIndex::Name("int".to_string()),
        };
        assert!(decode(&ann).is_empty());
    }

    #[test]
    fn test_decode_unsupported_marker_is_empty() {
        let ann = A::Unsupported("tuple[int, ...]".to_string());
        assert!(decode(&ann).is_empty());
        let (property, required) = aggregate(&decode(&ann));
        assert!(required);
        assert_eq!(property, Property::default());
    }

    #[test]
    fn test_aggregate_required_three_way_union() {
        // Scenario B: int | str | Ref
        let (property, required) = aggregate(&decode(&three_way_union()));
        assert!(required);
        assert_eq!(
            property,
            Property::one_of(vec![
                Property::typed("integer"),
                Property::typed("string"),
                Property::reference("Ref"),
            ])
        );
    }

    #[test]
    fn test_aggregate_drops_null_and_clears_required() {
        // Scenario C: int | Ref | None
        let ann = A::union(A::union(A::name("int"), A::name("Ref")), A::None);
        let (property, required) = aggregate(&decode(&ann));
        assert!(!required);
        assert_eq!(
            property,
            Property::one_of(vec![
                Property::typed("integer"),
                Property::reference("Ref"),
            ])
        );
    }

    #[test]
    fn test_aggregate_single_alternative_is_bare() {
        let (property, required) = aggregate(&decode(&A::name("bool")));
        assert!(required);
        assert_eq!(property, Property::typed("boolean"));
    }

    #[test]
    fn test_aggregate_empty_is_empty_property() {
        let (property, required) = aggregate(&[]);
        assert!(required);
        assert_eq!(property, Property::default());
    }

    #[test]
    fn test_array_law() {
        // Scenario D shape: list[Ref] <-> {type: array, items: {$ref: ...}}
        let (property, required) = aggregate(&decode(&A::list_of("Ref")));
        assert!(required);
        assert_eq!(property, Property::array(Property::reference("Ref")));
        assert_eq!(encode(&property), A::list_of("Ref"));
    }

    #[test]
    fn test_nested_list_aggregates_to_array_of_object() {
        let ann = A::Subscript {
            base: "list".to_string(),
            index: SubscriptIndex::Nested(Box::new(A::list_of("int"))),
        };
        let (property, _) = aggregate(&decode(&ann));
        assert_eq!(property, Property::array(Property::typed("object")));
    }

    #[test]
    fn test_dict_aggregates_to_object() {
        let (property, required) = aggregate(&decode(&A::dict_of("str", "int")));
        assert!(required);
        assert_eq!(property, Property::typed("object"));
    }

    #[test]
    fn test_reference_law() {
        let (property, _) = aggregate(&decode(&A::name("UserTaxDeclarationInfo")));
        assert_eq!(
            property.reference.as_deref(),
            Some("#/components/schemas/UserTaxDeclarationInfo")
        );
        assert_eq!(encode(&property), A::name("UserTaxDeclarationInfo"));
    }

    #[test]
    fn test_encode_preserves_union_order() {
        // Scenario B, reverse half: re-encoding keeps int | str | Ref order.
        let property = Property::one_of(vec![
            Property::typed("integer"),
            Property::typed("string"),
            Property::reference("Ref"),
        ]);
        assert_eq!(encode(&property), three_way_union());
    }

    #[test]
    fn test_encode_empty_property_is_none_literal() {
        assert_eq!(encode(&Property::default()), A::None);
    }

    #[test]
    fn test_encode_array_of_primitive() {
        let property = Property::array(Property::typed("string"));
        assert_eq!(encode(&property), A::list_of("str"));
    }

    #[test]
    fn test_round_trip_annotation_to_annotation() {
        for ann in [
            A::name("int"),
            A::name("Ref"),
            A::list_of("str"),
            A::list_of("Ref"),
            three_way_union(),
        ] {
            let (property, required) = aggregate(&decode(&ann));
            assert!(required);
            assert_eq!(encode(&property), ann, "round trip failed for {ann:?}");
        }
    }

    #[test]
    fn test_round_trip_optional_re_adds_none() {
        // Scenario C, reverse half: the nullable wrapper is re-added by the
        // caller; encode itself stays order-exact on the remaining union.
        let ann = A::union(A::union(A::name("int"), A::name("Ref")), A::None);
        let (property, required) = aggregate(&decode(&ann));
        assert!(!required);
        assert_eq!(encode(&property).optional(), ann);
    }
}
