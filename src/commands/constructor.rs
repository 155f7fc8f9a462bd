//! `phpforge.generateConstructor`.

use super::{CommandError, Invocation, property_or_fallback};
use crate::host::Document;
use crate::insertion::constructor_line;
use crate::recognize::enclosing_class_name;
use crate::render::constructor::{DEFAULT_TAB, render_constructor};
use crate::selection::{labels, retain_chosen, scan_declarations};
use crate::types::{DeclarationKind, Fragment, Splice};

const PLACEHOLDER: &str = "Select properties to include in the constructor";

/// Offer every property of the document, then insert a constructor for
/// the picked ones right after the last property line.
///
/// A document without properties gets an empty constructor without
/// asking.  Cancelling the picker when properties exist ends the command.
pub async fn generate_constructor(
    ctx: &Invocation<'_>,
    document: &Document,
) -> Result<Vec<Splice>, CommandError> {
    let candidates = scan_declarations(&document.text, |r| r.kind() == DeclarationKind::Property);
    let last_property_line = candidates.last().map(|c| c.line);

    let picked = if candidates.is_empty() {
        Vec::new()
    } else {
        let chosen = ctx.host.pick_many(PLACEHOLDER, labels(&candidates)).await;
        let picked = retain_chosen(candidates, &chosen);
        if picked.is_empty() {
            return Err(CommandError::NoActiveTarget("Nothing selected.".to_string()));
        }
        picked
    };

    let mut properties = Vec::new();
    let mut tab = DEFAULT_TAB.to_string();
    for candidate in &picked {
        let Some(fragment) = Fragment::at_line(&document.text, candidate.line) else {
            continue;
        };
        if let Some(property) = property_or_fallback(ctx, &fragment).await {
            tab = fragment.tab.clone();
            properties.push(property);
        }
    }
    if !picked.is_empty() && properties.is_empty() {
        return Err(CommandError::EmptyTemplate);
    }

    let line = constructor_line(&document.text, last_property_line)
        .ok_or(CommandError::InsertionPointNotFound)?;
    let class_name = enclosing_class_name(&document.text, line);

    let template = render_constructor(&properties, &tab, class_name.as_deref(), &ctx.config);
    if template.is_empty() {
        return Err(CommandError::EmptyTemplate);
    }

    tracing::debug!(line, count = properties.len(), "rendered constructor");
    Ok(vec![Splice {
        line,
        text: template,
    }])
}
