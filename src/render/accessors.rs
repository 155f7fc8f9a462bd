//! Getter and setter templates.
//!
//! Both accessors start with an empty line so consecutive templates stay
//! visually separated once spliced above the closing brace.

use super::{array_to_phpdoc, push_blank_lines};
use crate::config::Config;
use crate::normalize::{declared_type, doc_hint, is_boolean_hint};
use crate::recognize::capitalize_first;
use crate::types::PropertySignature;

/// Return type of a fluent setter.
const SELF_TYPE: &str = "self";

/// `getFoo`, or `isFoo` for boolean properties.
pub fn getter_name(property: &PropertySignature) -> String {
    let prefix = if is_boolean_hint(&doc_hint(&property.types)) {
        "is"
    } else {
        "get"
    };
    format!("{}{}", prefix, capitalize_first(&property.name))
}

pub fn setter_name(property: &PropertySignature) -> String {
    format!("set{}", capitalize_first(&property.name))
}

pub fn render_getter(property: &PropertySignature, tab: &str, config: &Config) -> String {
    if property.name.is_empty() {
        return String::new();
    }

    let mut template = String::from("\n");
    if config.getter_setter_generate_phpdoc {
        let mut lines = description(&format!("Getter for {}", property.name), config);
        lines.push(format!("@return {}", doc_hint(&property.types)));
        template.push_str(&array_to_phpdoc(&lines, tab));
    }

    template.push_str(&format!(
        "{tab}public function {}(): {}\n{tab}{{\n{tab}{tab}return $this->{};\n{tab}}}\n",
        getter_name(property),
        declared_type(&property.types),
        property.name,
    ));
    template
}

/// Setter for `property`.  With `setter-return-self` the method returns
/// `$this` and documents `@return <class_name>` (`self` when the
/// enclosing class is unknown).
///
/// The declared return type of a fluent setter is always `: self`, even
/// when the class name is known; only the doc tag names the class.
pub fn render_setter(
    property: &PropertySignature,
    tab: &str,
    class_name: Option<&str>,
    config: &Config,
) -> String {
    if property.name.is_empty() {
        return String::new();
    }

    let return_self = config.setter_return_self;
    let name = &property.name;

    let mut template = String::from("\n");
    if config.getter_setter_generate_phpdoc {
        let mut lines = description(&format!("Setter for {}", name), config);
        lines.push(format!("@param {} ${}", doc_hint(&property.types), name));
        if return_self {
            push_blank_lines(&mut lines, config.phpdoc_empty_lines_before_return);
            lines.push(format!("@return {}", class_name.unwrap_or(SELF_TYPE)));
        }
        template.push_str(&array_to_phpdoc(&lines, tab));
    }

    let return_type = if return_self { SELF_TYPE } else { "void" };
    template.push_str(&format!(
        "{tab}public function {}({} ${name}): {}\n{tab}{{\n{tab}{tab}$this->{name} = ${name};\n",
        setter_name(property),
        declared_type(&property.types),
        return_type,
    ));
    if return_self {
        template.push_str(&format!("\n{tab}{tab}return $this;\n"));
    }
    template.push_str(&format!("{tab}}}\n"));
    template
}

/// Accessor descriptions follow the function description switch.
fn description(text: &str, config: &Config) -> Vec<String> {
    let mut lines = Vec::new();
    if config.phpdoc_function_show_description {
        lines.push(text.to_string());
        push_blank_lines(&mut lines, config.phpdoc_empty_lines_after_description);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeUnion;

    fn property(name: &str, members: &[&str], nullable: bool) -> PropertySignature {
        PropertySignature {
            name: name.into(),
            types: TypeUnion {
                members: members.iter().map(|m| m.to_string()).collect(),
                nullable,
            },
        }
    }

    #[test]
    fn getter_with_doc() {
        let out = render_getter(&property("bar", &["string"], false), "    ", &Config::default());
        assert_eq!(
            out,
            concat!(
                "\n",
                "    /**\n",
                "     * @return string\n",
                "     */\n",
                "    public function getBar(): string\n",
                "    {\n",
                "        return $this->bar;\n",
                "    }\n",
            )
        );
    }

    #[test]
    fn boolean_getter_uses_is_prefix() {
        assert_eq!(getter_name(&property("active", &["bool"], false)), "isActive");
        assert_eq!(getter_name(&property("active", &["bool"], true)), "getActive");
    }

    #[test]
    fn nullable_setter_without_doc() {
        let config = Config {
            getter_setter_generate_phpdoc: false,
            ..Config::default()
        };
        let out = render_setter(&property("bar", &["Foo"], true), "  ", None, &config);
        assert_eq!(
            out,
            "\n  public function setBar(?Foo $bar): void\n  {\n    $this->bar = $bar;\n  }\n"
        );
    }

    #[test]
    fn fluent_setter() {
        let config = Config {
            setter_return_self: true,
            phpdoc_empty_lines_before_return: 1,
            ..Config::default()
        };
        let out = render_setter(&property("bar", &["string"], false), "    ", Some("Bar"), &config);
        assert!(out.contains("     * @param string $bar\n     *\n     * @return Bar\n"));
        assert!(out.contains("    public function setBar(string $bar): self\n"));
        assert!(out.ends_with("        $this->bar = $bar;\n\n        return $this;\n    }\n"));
    }

    #[test]
    fn untyped_property_is_mixed() {
        let out = render_getter(&property("legacy", &[], false), "", &Config::default());
        assert!(out.contains(" * @return mixed\n"));
        assert!(out.contains("public function getLegacy(): mixed\n"));
    }
}
