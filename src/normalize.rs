//! Type normalization.
//!
//! Turns an extracted [`TypeUnion`] into the two strings the templates
//! need:
//!
//! - the **doc hint**, used in `@var` / `@param` / `@return` tags, where
//!   nullability is spelled as a trailing `|null`;
//! - the **declared type**, used in native signatures, where a single
//!   nullable type is spelled `?T`.
//!
//! A union with no members always normalizes to `mixed`.

use crate::types::TypeUnion;

pub const MIXED: &str = "mixed";
const NULL: &str = "null";

/// Members in order, with `null` appended when the union is nullable and
/// does not already list it.
fn doc_members(types: &TypeUnion) -> Vec<&str> {
    let mut members: Vec<&str> = types.members.iter().map(String::as_str).collect();
    if types.nullable && !members.contains(&NULL) {
        members.push(NULL);
    }
    members
}

/// Documentation-facing hint: `Foo|Bar|null`.
pub fn doc_hint(types: &TypeUnion) -> String {
    if types.is_empty() {
        return MIXED.to_string();
    }
    doc_members(types).join("|")
}

/// Language-facing declared type.
///
/// Without `null` this is the doc hint verbatim.  With `null` and exactly
/// one other member it becomes `?T`; with several other members the union
/// is kept and `null` stays its last member (`A|B|null`), since `?A|B` is
/// not valid PHP.
pub fn declared_type(types: &TypeUnion) -> String {
    if types.is_empty() {
        return MIXED.to_string();
    }

    let members = doc_members(types);
    if !members.contains(&NULL) {
        return members.join("|");
    }

    let rest: Vec<&str> = members.into_iter().filter(|m| *m != NULL).collect();
    match rest.as_slice() {
        [] => NULL.to_string(),
        [single] => format!("?{}", single),
        _ => format!("{}|{}", rest.join("|"), NULL),
    }
}

/// Whether the doc hint describes a boolean (drives `is*` getter names).
pub fn is_boolean_hint(hint: &str) -> bool {
    matches!(hint, "bool" | "boolean")
}
