/// Declaration extractors.
///
/// One extractor per declaration kind.  The class, constant and property
/// extractors repair the fragment line, wrap it in a throwaway PHP shell
/// and parse only that.  The function extractor parses the whole document
/// instead, because a method body needs its real enclosing class.
use mago_span::HasSpan;
use mago_syntax::ast::*;

use super::body::{collect_throws, lower_statements};
use super::hints::{hint_to_union, optional_hint_to_union};
use super::{ExtractError, class_likes, parse_and_locate};
use crate::normalize::{MIXED, doc_hint};
use crate::recognize::{Recognized, match_constant, match_function};
use crate::repair::{repair_class_header, repair_member, wrap_header, wrap_in_class};
use crate::types::*;

/// Extract name and keyword from a class-like header line.
pub fn extract_class(fragment: &Fragment) -> Result<ClassSignature, ExtractError> {
    let snippet = wrap_header(&repair_class_header(fragment.trimmed()));

    parse_and_locate(&snippet, "Class", |statements| {
        class_likes(statements)
            .into_iter()
            .find_map(|statement| match statement {
                Statement::Class(class) => {
                    let keyword = if class.modifiers.contains_abstract() {
                        ClassKeyword::AbstractClass
                    } else if class.modifiers.contains_final() {
                        ClassKeyword::FinalClass
                    } else {
                        ClassKeyword::Class
                    };
                    Some(ClassSignature {
                        name: class.name.value.to_string(),
                        keyword,
                    })
                }
                Statement::Interface(iface) => Some(ClassSignature {
                    name: iface.name.value.to_string(),
                    keyword: ClassKeyword::Interface,
                }),
                Statement::Trait(trait_def) => Some(ClassSignature {
                    name: trait_def.name.value.to_string(),
                    keyword: ClassKeyword::Trait,
                }),
                Statement::Enum(enum_def) => Some(ClassSignature {
                    name: enum_def.name.value.to_string(),
                    keyword: ClassKeyword::Enum,
                }),
                _ => None,
            })
    })
}

/// Extract name and documented type from a class constant line.
///
/// A native constant type wins.  Otherwise the type-ish token the line
/// recognizer captured is used, unless it is a bare upper-case word (an
/// enum-style token, not a type), in which case the type is `mixed`.
pub fn extract_constant(fragment: &Fragment) -> Result<ConstantSignature, ExtractError> {
    let snippet = wrap_in_class(&repair_member(fragment.trimmed()));

    let (name, native_hint) = parse_and_locate(&snippet, "Constant", |statements| {
        first_member(statements, |member| match member {
            ClassLikeMember::Constant(constant) => {
                let item = constant.items.iter().next()?;
                let hint = constant.hint.as_ref().map(|h| doc_hint(&hint_to_union(h)));
                Some((item.name.value.to_string(), hint))
            }
            _ => None,
        })
    })?;

    let hint = native_hint.unwrap_or_else(|| {
        match match_constant(fragment.trimmed()) {
            Some(Recognized::Constant {
                type_token: Some(token),
                ..
            }) if !is_enum_style_token(&token) => doc_hint(&union_from_token(&token)),
            _ => MIXED.to_string(),
        }
    });

    Ok(ConstantSignature { name, hint })
}

/// Extract name and type union from a property line.
pub fn extract_property(fragment: &Fragment) -> Result<PropertySignature, ExtractError> {
    let snippet = wrap_in_class(&repair_member(fragment.trimmed()));

    parse_and_locate(&snippet, "Property", |statements| {
        first_member(statements, |member| match member {
            ClassLikeMember::Property(property) => {
                let variables = property.variables();
                let variable = variables.iter().next()?;
                let raw_name = variable.name.to_string();
                let name = raw_name
                    .strip_prefix('$')
                    .map(str::to_string)
                    .unwrap_or(raw_name);
                Some(PropertySignature {
                    name,
                    types: optional_hint_to_union(property.hint()),
                })
            }
            _ => None,
        })
    })
}

/// Extract the full signature of the method declared on the fragment
/// line, parsing the whole `document` for context.
///
/// The method is looked up by name, preferring the class-like whose body
/// contains the fragment line.
pub fn extract_function(
    document: &str,
    fragment: &Fragment,
) -> Result<FunctionSignature, ExtractError> {
    let Some(Recognized::Function { name, .. }) = match_function(&fragment.text) else {
        return Err(ExtractError::NameNotFound("Function"));
    };
    let offset = line_offset(document, fragment.line);

    parse_and_locate(document, "Method", |statements| {
        let candidates = class_likes(statements);
        let containing = candidates.iter().find(|statement| {
            let span = statement.span();
            span.start.offset <= offset && offset <= span.end.offset
        });

        let method = containing
            .and_then(|statement| find_method(statement, &name))
            .or_else(|| candidates.iter().find_map(|s| find_method(s, &name)))?;

        Some(function_signature(&name, method))
    })
}

fn function_signature(name: &str, method: &Method<'_>) -> FunctionSignature {
    let parameters = method
        .parameter_list
        .parameters
        .iter()
        .map(|param| {
            let raw_name = param.variable.name;
            Parameter {
                name: raw_name.strip_prefix('$').unwrap_or(raw_name).to_string(),
                hint: doc_hint(&optional_hint_to_union(param.hint.as_ref())),
            }
        })
        .collect();

    let return_hint = if name == "__construct" {
        "void".to_string()
    } else {
        let mut types =
            optional_hint_to_union(method.return_type_hint.as_ref().map(|rth| &rth.hint));
        if types.members.iter().any(|m| m == "void") {
            types.nullable = false;
        }
        doc_hint(&types)
    };

    let throws = match &method.body {
        MethodBody::Concrete(block) => collect_throws(&lower_statements(block.statements.iter())),
        _ => Vec::new(),
    };

    tracing::debug!(name, ?throws, "extracted method signature");

    FunctionSignature {
        name: name.to_string(),
        parameters,
        return_hint,
        throws,
    }
}

fn find_method<'s, 'a>(statement: &'s Statement<'a>, name: &str) -> Option<&'s Method<'a>> {
    members_of(statement)
        .into_iter()
        .find_map(|member| match member {
            ClassLikeMember::Method(method) if method.name.value == name => Some(method),
            _ => None,
        })
}

/// Members of a class-like statement; empty for anything else.
fn members_of<'s, 'a>(statement: &'s Statement<'a>) -> Vec<&'s ClassLikeMember<'a>> {
    match statement {
        Statement::Class(class) => class.members.iter().collect(),
        Statement::Interface(iface) => iface.members.iter().collect(),
        Statement::Trait(trait_def) => trait_def.members.iter().collect(),
        Statement::Enum(enum_def) => enum_def.members.iter().collect(),
        _ => Vec::new(),
    }
}

/// Run `map` over the members of the first class-like in `statements`
/// and return the first hit.
fn first_member<T>(
    statements: &[Statement<'_>],
    map: impl Fn(&ClassLikeMember<'_>) -> Option<T>,
) -> Option<T> {
    let statement = class_likes(statements).into_iter().next()?;
    members_of(statement).into_iter().find_map(map)
}

/// Byte offset of the start of `line`.
fn line_offset(document: &str, line: usize) -> u32 {
    let offset: usize = document
        .split('\n')
        .take(line)
        .map(|l| l.len() + 1)
        .sum();
    offset as u32
}

/// `^[A-Z]+$`: a bare upper-case word such as the `FO` a lazy pattern
/// may capture out of `const FOO`.
fn is_enum_style_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_uppercase())
}

/// Build a union from raw type text such as `?string` or `int|null`.
fn union_from_token(token: &str) -> TypeUnion {
    let (nullable, body) = match token.strip_prefix('?') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let mut union = TypeUnion {
        members: Vec::new(),
        nullable,
    };
    for member in body.split('|').filter(|m| !m.is_empty()) {
        union.push(member);
    }
    union
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(document: &str, line: usize) -> Fragment {
        Fragment::at_line(document, line).unwrap()
    }

    #[test]
    fn class_keywords() {
        let doc = "abstract class Repo extends Base";
        let sig = extract_class(&fragment(doc, 0)).unwrap();
        assert_eq!(sig.name, "Repo");
        assert_eq!(sig.keyword, ClassKeyword::AbstractClass);

        let sig = extract_class(&fragment("enum Suit: string {", 0)).unwrap();
        assert_eq!(sig.keyword, ClassKeyword::Enum);
        assert_eq!(sig.name, "Suit");
    }

    #[test]
    fn constant_types() {
        let sig = extract_constant(&fragment("    const FOO = 1;", 0)).unwrap();
        assert_eq!(sig.name, "FOO");
        assert_eq!(sig.hint, "mixed");

        let sig = extract_constant(&fragment("    public const ?string NAME = null;", 0)).unwrap();
        assert_eq!(sig.name, "NAME");
        assert_eq!(sig.hint, "string|null");
    }

    #[test]
    fn unfinished_property_is_repaired() {
        let sig = extract_property(&fragment("    private array $items = [", 0)).unwrap();
        assert_eq!(sig.name, "items");
        assert_eq!(sig.types, TypeUnion::single("array"));
    }

    #[test]
    fn untyped_property_has_empty_union() {
        let sig = extract_property(&fragment("    protected $legacy;", 0)).unwrap();
        assert_eq!(sig.name, "legacy");
        assert!(sig.types.is_empty());
    }

    #[test]
    fn function_parameters_return_and_throws() {
        let doc = concat!(
            "<?php\n",
            "namespace App;\n",
            "\n",
            "class Service\n",
            "{\n",
            "    public function run(?int $id, string|array $data, $raw): ?string\n",
            "    {\n",
            "        if ($id === null) {\n",
            "            throw new FooException();\n",
            "        } else {\n",
            "            throw new BarException();\n",
            "        }\n",
            "    }\n",
            "}\n",
        );
        let sig = extract_function(doc, &fragment(doc, 5)).unwrap();
        assert_eq!(sig.name, "run");
        let hints: Vec<_> = sig.parameters.iter().map(|p| p.hint.as_str()).collect();
        assert_eq!(hints, vec!["int|null", "string|array", "mixed"]);
        assert_eq!(sig.parameters[0].name, "id");
        assert_eq!(sig.return_hint, "string|null");
        assert_eq!(sig.throws, vec!["FooException", "BarException"]);
    }

    #[test]
    fn constructor_returns_void() {
        let doc = "<?php\nclass A\n{\n    public function __construct(int $a)\n    {\n    }\n}\n";
        let sig = extract_function(doc, &fragment(doc, 3)).unwrap();
        assert_eq!(sig.return_hint, "void");
        assert!(sig.throws.is_empty());
    }

    #[test]
    fn function_without_name_is_rejected() {
        let doc = "<?php\n$x = 1;\n";
        assert_eq!(
            extract_function(doc, &fragment(doc, 1)),
            Err(ExtractError::NameNotFound("Function"))
        );
    }

    #[test]
    fn missing_method_is_not_found() {
        let doc = "<?php\nfunction loose(): void {}\n";
        assert!(extract_function(doc, &fragment(doc, 1)).is_err());
    }

    #[test]
    fn tokens_to_unions() {
        assert!(is_enum_style_token("FO"));
        assert!(!is_enum_style_token("BAR_BAZ"));
        let u = union_from_token("?Foo");
        assert_eq!(u.members, vec!["Foo"]);
        assert!(u.nullable);
    }
}
