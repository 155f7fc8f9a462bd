//! Class-like skeleton commands.

use super::{CommandError, Invocation};
use crate::composer::path_to_namespace;
use crate::host::Document;
use crate::render::skeleton::{render_skeleton, type_name_from_path};
use crate::types::{ClassKeyword, Splice};

/// Insert a `keyword Name {}` skeleton at the top of the document, named
/// after the file and namespaced through the project's PSR-4 table.
pub async fn generate_skeleton(
    ctx: &Invocation<'_>,
    document: &Document,
    keyword: ClassKeyword,
) -> Result<Vec<Splice>, CommandError> {
    let Some(path) = document.path.as_deref() else {
        return Err(CommandError::NoActiveTarget(
            "The active document has no file path.".to_string(),
        ));
    };

    let name = type_name_from_path(path);
    let namespace = match (ctx.workspace_root.as_deref(), path.parent()) {
        (Some(root), Some(dir)) => path_to_namespace(&ctx.project.psr4, root, dir),
        _ => String::new(),
    };

    if keyword == ClassKeyword::Enum && !ctx.project.supports_enums() {
        ctx.warn(&format!(
            "Enums require PHP 8.1 or newer, but the project targets PHP {}.",
            ctx.project.php_version
        ))
        .await;
    }

    let template = render_skeleton(keyword, &name, &namespace, &ctx.config);
    if template.is_empty() {
        return Err(CommandError::EmptyTemplate);
    }

    tracing::debug!(name = %name, namespace = %namespace, "rendered skeleton");
    Ok(vec![Splice {
        line: 0,
        text: template,
    }])
}
