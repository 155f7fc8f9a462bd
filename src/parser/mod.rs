/// PHP parsing and AST extraction.
///
/// This module owns every call into the mago_syntax parser.  Parsing is
/// always done through [`parse_and_locate`]: it parses a snippet (or a
/// whole document), hands the top-level statements to a kind-specific
/// locator, and converts "nothing found" into a typed [`ExtractError`].
/// Locators map the arena-backed AST into the owned types from
/// [`crate::types`] before returning, so nothing downstream ever touches
/// parser nodes.
///
/// Sub-modules:
/// - [`hints`]: type hint → [`TypeUnion`](crate::types::TypeUnion) mapping
/// - [`body`]: method-body lowering and the throws fold
/// - [`declarations`]: the class / constant / property / function extractors
pub mod body;
pub mod declarations;
pub mod hints;

use std::panic;

use bumpalo::Bump;
use mago_database::file::FileId;
use mago_syntax::ast::*;
use mago_syntax::parser::parse_file_content;
use thiserror::Error;

pub use declarations::{extract_class, extract_constant, extract_function, extract_property};

/// Why a fragment could not be turned into a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The snippet did not parse (or the parser crashed) and the expected
    /// node is missing.
    #[error("Invalid PHP code: {0}")]
    ParseFailed(String),
    /// The snippet parsed but holds no node of the expected kind.
    #[error("{0} declaration not found")]
    NodeNotFound(&'static str),
    /// The recognizer could not pull a name out of the raw line.
    #[error("{0} name not found")]
    NameNotFound(&'static str),
}

/// Parse `source` and run `locate` over its top-level statements.
///
/// `what` names the node being looked for and only feeds the error
/// message.  Syntax errors alone are not fatal: the parser recovers, and
/// as long as `locate` finds its node the result is used.
pub fn parse_and_locate<T>(
    source: &str,
    what: &'static str,
    locate: impl FnOnce(&[Statement<'_>]) -> Option<T>,
) -> Result<T, ExtractError> {
    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        let arena = Bump::new();
        let file_id = FileId::new("input.php");
        let program = parse_file_content(&arena, file_id, source);
        let error_count = program.errors.len();
        (locate(program.statements.as_slice()), error_count)
    }));

    match outcome {
        Ok((Some(found), error_count)) => {
            if error_count > 0 {
                tracing::debug!(what, error_count, "located node despite syntax errors");
            }
            Ok(found)
        }
        Ok((None, 0)) => Err(ExtractError::NodeNotFound(what)),
        Ok((None, error_count)) => Err(ExtractError::ParseFailed(format!(
            "{} syntax error(s) while looking for {}",
            error_count, what
        ))),
        Err(_) => {
            tracing::error!(what, "PHPForge: parser panicked");
            Err(ExtractError::ParseFailed("parser panicked".to_string()))
        }
    }
}

/// Walk top-level statements, descending into namespace blocks, and
/// return every class-like declaration in source order.
pub(crate) fn class_likes<'s, 'a>(statements: &'s [Statement<'a>]) -> Vec<&'s Statement<'a>> {
    let mut found = Vec::new();
    collect_class_likes(statements.iter(), &mut found);
    found
}

fn collect_class_likes<'s, 'a>(
    statements: impl Iterator<Item = &'s Statement<'a>>,
    found: &mut Vec<&'s Statement<'a>>,
) where
    'a: 's,
{
    for statement in statements {
        match statement {
            Statement::Class(_)
            | Statement::Interface(_)
            | Statement::Trait(_)
            | Statement::Enum(_) => found.push(statement),
            Statement::Namespace(namespace) => {
                collect_class_likes(namespace.statements().iter(), found);
            }
            _ => {}
        }
    }
}
