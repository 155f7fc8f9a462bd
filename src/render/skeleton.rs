//! Class-like file skeletons.

use super::array_to_phpdoc;
use crate::config::Config;
use crate::recognize::capitalize_first;
use crate::types::ClassKeyword;

/// Render a whole-file skeleton for `name`, inserted at the top of the
/// document.  An empty `namespace` omits the namespace line.
pub fn render_skeleton(
    keyword: ClassKeyword,
    name: &str,
    namespace: &str,
    config: &Config,
) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut template = String::from("<?php\n\n");
    if config.builder_strict_types {
        template.push_str("declare(strict_types=1);\n\n");
    }
    if !namespace.is_empty() {
        template.push_str(&format!("namespace {};\n\n", namespace));
    }
    if config.builder_generate_phpdoc {
        let summary = format!("{} {}", capitalize_first(keyword.as_str()), name);
        template.push_str(&array_to_phpdoc(&[summary], ""));
    }
    template.push_str(&format!("{} {}\n{{\n}}\n", keyword.as_str(), name));
    template
}

/// File stem used as the skeleton's type name: `src/Foo/Bar.php` → `Bar`.
pub fn type_name_from_path(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}
