//! Constructor template.

use super::{array_to_phpdoc, push_blank_lines};
use crate::config::Config;
use crate::normalize::{declared_type, doc_hint};
use crate::types::PropertySignature;

/// Indentation used when there is no property to borrow it from.
pub const DEFAULT_TAB: &str = "    ";

/// Render `__construct` assigning every property in `properties`.
///
/// The argument list stays on the signature line while
/// `tab + "public function __construct(...)"` fits within
/// `constructor-args-one-line-max-length` characters; otherwise each
/// argument gets its own line.  No properties gives a bare, undocumented
/// `__construct()`.
pub fn render_constructor(
    properties: &[PropertySignature],
    tab: &str,
    class_name: Option<&str>,
    config: &Config,
) -> String {
    if properties.is_empty() {
        return format!("\n{tab}public function __construct()\n{tab}{{\n{tab}}}\n");
    }

    let last = properties.len() - 1;
    let args: Vec<String> = properties
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let comma = if i == last { "" } else { "," };
            format!("{} ${}{}", declared_type(&p.types), p.name, comma)
        })
        .collect();
    let body: Vec<String> = properties
        .iter()
        .map(|p| format!("{tab}{tab}$this->{} = ${};", p.name, p.name))
        .collect();

    let mut doc_lines = Vec::new();
    if config.phpdoc_function_show_description
        && let Some(class_name) = class_name
    {
        doc_lines.push(format!("{} constructor.", class_name));
        push_blank_lines(&mut doc_lines, config.phpdoc_empty_lines_after_description);
    }
    for p in properties {
        doc_lines.push(format!("@param {} ${}", doc_hint(&p.types), p.name));
    }
    let doc = array_to_phpdoc(&doc_lines, tab);

    let one_line = format!("{tab}public function __construct({})", args.join(" "));
    let body = body.join("\n");

    if one_line.chars().count() <= config.constructor_args_one_line_max_length {
        format!("\n{doc}{one_line}\n{tab}{{\n{body}\n{tab}}}\n")
    } else {
        let separator = format!("\n{tab}{tab}");
        format!(
            "\n{doc}{tab}public function __construct(\n{tab}{tab}{}\n{tab}) {{\n{body}\n{tab}}}\n",
            args.join(&separator)
        )
    }
}
