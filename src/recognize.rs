//! Line recognizers.
//!
//! Cheap regex-level classification of a single source line into one of
//! the declaration kinds the generators understand.  These never parse;
//! they only decide which extractor to hand the line to and provide the
//! display labels used by the batch picker.
//!
//! When a line could match several recognizers the priority is always
//! class → constant → property → function.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::DeclarationKind;

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:abstract|final|readonly)\s+)*(class|interface|trait|enum)\s+(\w+)")
        .expect("class recognizer is valid")
});

static CONSTANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:final\s+)?(?:(?:public|protected|private)\s+)?(?:final\s+)?const\s+(?:(\??[\w\\|]+)\s+)?(\w+)\s*=\s*(.*)$",
    )
    .expect("constant recognizer is valid")
});

static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:readonly\s+)?(?:public|protected|private)(?:\s+(?:static|readonly))*\s+(?:(\??[\w\\|]+)\s+)?\$(\w+)(?:\s*=\s*([^;]*))?\s*;",
    )
    .expect("property recognizer is valid")
});

/// The head of a property declaration, which may still be unterminated.
static PROPERTY_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:readonly\s+)?(?:public|protected|private)(?:\s+(?:static|readonly))*\s+(?:\??[\w\\|]+\s+)?\$\w+",
    )
    .expect("property head recognizer is valid")
});

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*((?:(?:public|protected|private|static|final|abstract)\s+)*)function\s+&?(\w+)\s*(?:\([^)]*\)?)?\s*(?::\s*\??\s*[\w\\|]+)?",
    )
    .expect("function recognizer is valid")
});

static EXISTING_DOCBLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*.*?\*/").expect("docblock pattern is valid"));

/// A successful recognizer match for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognized {
    ClassLike {
        keyword: String,
        name: String,
    },
    Constant {
        type_token: Option<String>,
        name: String,
    },
    Property {
        type_token: Option<String>,
        name: String,
    },
    Function {
        name: String,
        is_static: bool,
    },
}

impl Recognized {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Recognized::ClassLike { .. } => DeclarationKind::ClassLike,
            Recognized::Constant { .. } => DeclarationKind::Constant,
            Recognized::Property { .. } => DeclarationKind::Property,
            Recognized::Function { .. } => DeclarationKind::Function,
        }
    }

    /// Short human label, e.g. `"Foo (Class)"`, `"string $bar (Property)"`.
    pub fn label(&self) -> String {
        match self {
            Recognized::ClassLike { keyword, name } => {
                format!("{} ({})", name, capitalize_first(keyword))
            }
            Recognized::Constant { type_token, name } => match type_token {
                Some(t) => format!("{} {} (Constant)", t, name),
                None => format!("{} (Constant)", name),
            },
            Recognized::Property { type_token, name } => match type_token {
                Some(t) => format!("{} ${} (Property)", t, name),
                None => format!("${} (Property)", name),
            },
            Recognized::Function { name, is_static } => {
                let kind = if *is_static {
                    "Static function"
                } else {
                    "Function"
                };
                format!("{} ({})", name, kind)
            }
        }
    }
}

pub fn match_class(line: &str) -> Option<Recognized> {
    let caps = CLASS_RE.captures(line)?;
    Some(Recognized::ClassLike {
        keyword: caps[1].to_string(),
        name: caps[2].to_string(),
    })
}

pub fn match_constant(line: &str) -> Option<Recognized> {
    let caps = CONSTANT_RE.captures(line)?;
    Some(Recognized::Constant {
        type_token: caps.get(1).map(|m| m.as_str().to_string()),
        name: caps[2].to_string(),
    })
}

pub fn match_property(line: &str) -> Option<Recognized> {
    let caps = PROPERTY_RE.captures(line)?;
    Some(Recognized::Property {
        type_token: caps.get(1).map(|m| m.as_str().to_string()),
        name: caps[2].to_string(),
    })
}

/// Whether `line` opens a property declaration, finished or not.
pub fn opens_property(line: &str) -> bool {
    PROPERTY_HEAD_RE.is_match(line)
}

pub fn match_function(line: &str) -> Option<Recognized> {
    let caps = FUNCTION_RE.captures(line)?;
    let modifiers = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    Some(Recognized::Function {
        name: caps[2].to_string(),
        is_static: modifiers.split_whitespace().any(|m| m == "static"),
    })
}

/// Classify a line, trying class → constant → property → function.
pub fn recognize(line: &str) -> Option<Recognized> {
    match_class(line)
        .or_else(|| match_constant(line))
        .or_else(|| match_property(line))
        .or_else(|| match_function(line))
}

/// Name of the nearest class-like declared on a line before `line`.
///
/// Scans every earlier line so the last header above the fragment wins.
pub fn enclosing_class_name(content: &str, line: usize) -> Option<String> {
    let mut found = None;
    for text in content.lines().take(line) {
        if let Some(Recognized::ClassLike { name, .. }) = match_class(text) {
            found = Some(name);
        }
    }
    found
}

/// Whether one of the three lines immediately above `line` already
/// carries a `/** … */` comment.
pub fn has_existing_docblock(content: &str, line: usize) -> bool {
    let start = line.saturating_sub(3);
    let before: Vec<&str> = content
        .lines()
        .skip(start)
        .take(line - start)
        .collect();
    EXISTING_DOCBLOCK_RE.is_match(&before.join("\n"))
}

/// Uppercase the first character of the trimmed input.
pub fn capitalize_first(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
