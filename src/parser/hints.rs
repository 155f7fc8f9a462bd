/// Type hint extraction.
///
/// Converts mago's `Hint` tree into the flat [`TypeUnion`] used by the
/// normalizer: unions are flattened in declaration order, a leading `?`
/// becomes the nullability flag, and anything more exotic (intersections,
/// DNF groups) is kept as one opaque member string.
use mago_syntax::ast::*;

use crate::types::TypeUnion;

/// Render a hint back to source-like text.
pub fn hint_to_string(hint: &Hint) -> String {
    match hint {
        Hint::Identifier(ident) => ident.value().to_string(),
        Hint::Nullable(nullable) => format!("?{}", hint_to_string(nullable.hint)),
        Hint::Union(union) => format!(
            "{}|{}",
            hint_to_string(union.left),
            hint_to_string(union.right)
        ),
        Hint::Intersection(intersection) => format!(
            "{}&{}",
            hint_to_string(intersection.left),
            hint_to_string(intersection.right)
        ),
        Hint::Void(ident)
        | Hint::Never(ident)
        | Hint::Float(ident)
        | Hint::Bool(ident)
        | Hint::Integer(ident)
        | Hint::String(ident)
        | Hint::Object(ident)
        | Hint::Mixed(ident)
        | Hint::Iterable(ident) => ident.value.to_string(),
        Hint::Null(keyword)
        | Hint::True(keyword)
        | Hint::False(keyword)
        | Hint::Array(keyword)
        | Hint::Callable(keyword)
        | Hint::Static(keyword)
        | Hint::Self_(keyword)
        | Hint::Parent(keyword) => keyword.value.to_string(),
        Hint::Parenthesized(paren) => format!("({})", hint_to_string(paren.hint)),
        #[allow(unreachable_patterns)]
        _ => crate::normalize::MIXED.to_string(),
    }
}

/// Flatten a hint into an ordered, de-duplicated member list.
pub fn hint_to_union(hint: &Hint) -> TypeUnion {
    let mut union = TypeUnion::default();
    collect_members(hint, &mut union);
    union
}

/// Same as [`hint_to_union`] for an optional hint; a missing hint yields
/// an empty union, which normalizes to `mixed`.
pub fn optional_hint_to_union(hint: Option<&Hint>) -> TypeUnion {
    hint.map(hint_to_union).unwrap_or_default()
}

fn collect_members(hint: &Hint, union: &mut TypeUnion) {
    match hint {
        Hint::Nullable(nullable) => {
            union.nullable = true;
            collect_members(nullable.hint, union);
        }
        Hint::Union(u) => {
            collect_members(u.left, union);
            collect_members(u.right, union);
        }
        other => union.push(hint_to_string(other)),
    }
}
