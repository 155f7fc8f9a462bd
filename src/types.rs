//! Data types used throughout the PHPForge server.
//!
//! This module contains the "model" structs and enums that describe a
//! declaration fragment picked from the editor, the signature facts
//! extracted from it, and the generated text handed back to the editor.

/// The kind of declaration a source line is believed to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `class`, `interface`, `trait` or `enum` header.
    ClassLike,
    /// Class constant (`const FOO = 1;`).
    Constant,
    /// Typed or untyped property (`private string $name;`).
    Property,
    /// Method signature (`public function foo(): void`).
    Function,
}

impl DeclarationKind {
    /// Label used in picker entries (`"Constant"`, `"Property"`, …).
    pub fn label(self) -> &'static str {
        match self {
            DeclarationKind::ClassLike => "Class",
            DeclarationKind::Constant => "Constant",
            DeclarationKind::Property => "Property",
            DeclarationKind::Function => "Function",
        }
    }
}

/// Keyword a class-like declaration (or generated skeleton) is introduced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKeyword {
    Class,
    AbstractClass,
    FinalClass,
    Interface,
    Trait,
    Enum,
}

impl ClassKeyword {
    /// The keyword exactly as it is written in PHP source.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassKeyword::Class => "class",
            ClassKeyword::AbstractClass => "abstract class",
            ClassKeyword::FinalClass => "final class",
            ClassKeyword::Interface => "interface",
            ClassKeyword::Trait => "trait",
            ClassKeyword::Enum => "enum",
        }
    }
}

/// A line of PHP source believed to contain exactly one declaration.
///
/// Built fresh for every invocation from the cursor line (or a picked
/// line in batch mode) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// The raw line text, untrimmed.
    pub text: String,
    /// Leading whitespace of the line, reused as the indentation unit
    /// for everything generated from this fragment.
    pub tab: String,
    /// 0-based line number of the declaration.
    pub line: usize,
    /// Nearest class name declared above the fragment, if any.
    pub class_name: Option<String>,
}

impl Fragment {
    /// Build a fragment from the given line of `content`.
    ///
    /// Returns `None` when `line` is past the end of the document.
    pub fn at_line(content: &str, line: usize) -> Option<Self> {
        let text = content.lines().nth(line)?;
        let indent_len = text.len() - text.trim_start().len();
        Some(Fragment {
            text: text.to_string(),
            tab: text[..indent_len].to_string(),
            line,
            class_name: crate::recognize::enclosing_class_name(content, line),
        })
    }

    /// The declaration text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Ordered, de-duplicated set of type names plus a nullability flag.
///
/// `?Foo` is stored as `members = ["Foo"], nullable = true`, while
/// `Foo|null` keeps `"null"` as an explicit member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeUnion {
    pub members: Vec<String>,
    pub nullable: bool,
}

impl TypeUnion {
    /// A single-member, non-nullable union.
    pub fn single(name: impl Into<String>) -> Self {
        TypeUnion {
            members: vec![name.into()],
            nullable: false,
        }
    }

    /// Append a member unless it is already present.
    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.members.contains(&name) {
            self.members.push(name);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Facts extracted from a class-like header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub name: String,
    pub keyword: ClassKeyword,
}

/// Facts extracted from a class constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSignature {
    pub name: String,
    /// Documentation-facing type; `"mixed"` when unresolvable.
    pub hint: String,
}

/// Facts extracted from a property declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    /// The property name WITHOUT the `$` prefix.
    pub name: String,
    pub types: TypeUnion,
}

/// A single method parameter as it appears in a `@param` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter name WITHOUT the `$` prefix.
    pub name: String,
    /// Documentation-facing type (e.g. `"string|null"`, `"mixed"`).
    pub hint: String,
}

/// Facts extracted from a method declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Documentation-facing return type; `"void"` for constructors.
    pub return_hint: String,
    /// Distinct thrown exception names in first-seen order.
    pub throws: Vec<String>,
}

/// Tagged result of extracting a fragment, one variant per declaration kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    ClassLike(ClassSignature),
    Constant(ConstantSignature),
    Property(PropertySignature),
    Function(FunctionSignature),
}

impl Signature {
    pub fn name(&self) -> &str {
        match self {
            Signature::ClassLike(s) => &s.name,
            Signature::Constant(s) => &s.name,
            Signature::Property(s) => &s.name,
            Signature::Function(s) => &s.name,
        }
    }
}

/// A text insertion at column 0 of `line`.  The existing line is pushed
/// down; nothing is overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub line: usize,
    pub text: String,
}

/// Apply a set of splices to `content`, returning the new text.
///
/// Splices are applied bottom-up so earlier line numbers stay valid; two
/// splices on the same line keep their original order.  A line past the
/// end of the document appends at the end.
pub fn apply_splices(content: &str, splices: &[Splice]) -> String {
    let mut line_starts: Vec<usize> = vec![0];
    for (idx, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            line_starts.push(idx + 1);
        }
    }

    let mut ordered: Vec<(usize, &Splice)> = splices.iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| b.line.cmp(&a.line).then(ib.cmp(ia)));

    let mut result = content.to_string();
    for (_, splice) in ordered {
        let offset = line_starts
            .get(splice.line)
            .copied()
            .unwrap_or(content.len());
        result.insert_str(offset, &splice.text);
    }
    result
}
