//! Getter / setter commands.

use super::{
    AccessorSet, CommandError, Generated, Invocation, property_or_fallback, target_lines,
};
use crate::host::Document;
use crate::insertion::closing_brace_line;
use crate::recognize::opens_property;
use crate::render::{render_getter, render_setter};
use crate::types::{DeclarationKind, Fragment, Splice};

const PLACEHOLDER: &str = "Select properties";

/// Render the requested accessors for every target property and insert
/// them, in order, before the class's closing brace.  The "created"
/// notices ride along and are only shown once the edit is applied.
pub async fn insert_accessors(
    ctx: &Invocation<'_>,
    document: &Document,
    set: AccessorSet,
    many: bool,
) -> Result<Generated, CommandError> {
    if !many
        && !document
            .text
            .lines()
            .nth(document.cursor_line)
            .is_some_and(opens_property)
    {
        return Err(CommandError::NoActiveTarget(
            "No property found on the current line.".to_string(),
        ));
    }

    let lines = target_lines(ctx, document, many, PLACEHOLDER, |r| {
        r.kind() == DeclarationKind::Property
    })
    .await?;

    let mut templates = String::new();
    let mut created = Vec::new();
    for line in lines {
        let Some(fragment) = Fragment::at_line(&document.text, line) else {
            continue;
        };
        let Some(property) = property_or_fallback(ctx, &fragment).await else {
            continue;
        };

        if set.getter {
            let getter = render_getter(&property, &fragment.tab, &ctx.config);
            if !getter.is_empty() {
                templates.push_str(&getter);
                created.push(format!("Getter for property '{}' created.", property.name));
            }
        }
        if set.setter {
            let setter = render_setter(
                &property,
                &fragment.tab,
                fragment.class_name.as_deref(),
                &ctx.config,
            );
            if !setter.is_empty() {
                templates.push_str(&setter);
                created.push(format!("Setter for property '{}' created.", property.name));
            }
        }
    }

    if templates.is_empty() {
        return Err(CommandError::EmptyTemplate);
    }

    let line = closing_brace_line(&document.text).ok_or(CommandError::InsertionPointNotFound)?;
    Ok(Generated {
        splices: vec![Splice {
            line,
            text: templates,
        }],
        notices: created,
    })
}
