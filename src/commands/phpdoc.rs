//! `phpforge.generatePhpdoc` and `phpforge.generatePhpdocMany`.

use super::{CommandError, Invocation, signature_or_fallback, target_lines};
use crate::host::Document;
use crate::recognize::{has_existing_docblock, recognize};
use crate::render::render_doc;
use crate::types::{Fragment, Splice};

const PLACEHOLDER: &str = "Select declarations to document";

/// One doc block per target line, spliced onto the line itself.
///
/// Lines that already carry a doc block in the three lines above them are
/// skipped.  A line that renders nothing is reported and skipped without
/// affecting the others.
pub async fn generate_phpdoc(
    ctx: &Invocation<'_>,
    document: &Document,
    many: bool,
) -> Result<Vec<Splice>, CommandError> {
    let lines = target_lines(ctx, document, many, PLACEHOLDER, |_| true).await?;

    let pending: Vec<usize> = lines
        .into_iter()
        .filter(|line| !has_existing_docblock(&document.text, *line))
        .collect();
    if pending.is_empty() {
        ctx.info("Phpdoc already exists").await;
        return Ok(Vec::new());
    }

    let mut splices = Vec::new();
    for line in pending {
        let Some(fragment) = Fragment::at_line(&document.text, line) else {
            continue;
        };

        let template = match recognize(&fragment.text) {
            Some(recognized) => {
                let signature = signature_or_fallback(ctx, document, &fragment, &recognized).await;
                let template = render_doc(&signature, &fragment.tab, &ctx.config);
                if template.is_empty() {
                    ctx.error(&format!(
                        "{} - in block {}",
                        CommandError::EmptyTemplate,
                        signature.name()
                    ))
                    .await;
                }
                template
            }
            None => {
                ctx.error(&format!("{} - in block ", CommandError::EmptyTemplate))
                    .await;
                String::new()
            }
        };

        if !template.is_empty() {
            tracing::debug!(line, "rendered doc block");
            splices.push(Splice {
                line,
                text: template,
            });
        }
    }

    Ok(splices)
}
