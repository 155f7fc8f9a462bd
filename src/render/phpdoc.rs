//! Documentation blocks.

use super::{array_to_phpdoc, push_blank_lines};
use crate::config::Config;
use crate::normalize::doc_hint;
use crate::recognize::capitalize_first;
use crate::types::*;

/// Render the doc block for any extracted signature.
pub fn render_doc(signature: &Signature, tab: &str, config: &Config) -> String {
    match signature {
        Signature::ClassLike(sig) => class_doc(sig, tab),
        Signature::Constant(sig) => constant_doc(sig, tab, config),
        Signature::Property(sig) => property_doc(sig, tab, config),
        Signature::Function(sig) => function_doc(sig, tab, config),
    }
}

/// Class-likes get their description unconditionally and no tags.
pub fn class_doc(sig: &ClassSignature, tab: &str) -> String {
    if sig.name.is_empty() {
        return String::new();
    }
    let description = format!(
        "{} {} description.",
        capitalize_first(sig.keyword.as_str()),
        sig.name
    );
    array_to_phpdoc(&[description], tab)
}

pub fn constant_doc(sig: &ConstantSignature, tab: &str, config: &Config) -> String {
    var_doc(
        &sig.name,
        &sig.hint,
        config.phpdoc_constant_show_description,
        tab,
        config,
    )
}

pub fn property_doc(sig: &PropertySignature, tab: &str, config: &Config) -> String {
    var_doc(
        &sig.name,
        &doc_hint(&sig.types),
        config.phpdoc_property_show_description,
        tab,
        config,
    )
}

fn var_doc(name: &str, hint: &str, show_description: bool, tab: &str, config: &Config) -> String {
    if name.is_empty() {
        return String::new();
    }
    let mut lines = description_lines(name, show_description, config);
    lines.push(format!("@var {}", hint));
    array_to_phpdoc(&lines, tab)
}

/// `@param` lines, `@return` and `@throws`, with the configured padding.
pub fn function_doc(sig: &FunctionSignature, tab: &str, config: &Config) -> String {
    if sig.name.is_empty() {
        return String::new();
    }

    let mut lines =
        description_lines(&sig.name, config.phpdoc_function_show_description, config);

    for param in &sig.parameters {
        lines.push(format!("@param {} ${}", param.hint, param.name));
    }

    let show_return = config.phpdoc_function_return_void || sig.return_hint != "void";
    if show_return {
        push_blank_lines(&mut lines, config.phpdoc_empty_lines_before_return);
        lines.push(format!("@return {}", sig.return_hint));
    }

    if !sig.throws.is_empty() {
        push_blank_lines(&mut lines, config.phpdoc_empty_lines_before_throws);
        if config.phpdoc_show_throws_on_diff_lines {
            for name in &sig.throws {
                lines.push(format!("@throws {}", name));
            }
        } else {
            lines.push(format!("@throws {}", sig.throws.join("|")));
        }
    }

    array_to_phpdoc(&lines, tab)
}

/// The optional `<subject> description.` line and the padding after it.
fn description_lines(subject: &str, show_description: bool, config: &Config) -> Vec<String> {
    let mut lines = Vec::new();
    if show_description {
        lines.push(format!("{} description.", subject));
        push_blank_lines(&mut lines, config.phpdoc_empty_lines_after_description);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(return_hint: &str, throws: &[&str]) -> FunctionSignature {
        FunctionSignature {
            name: "run".into(),
            parameters: vec![
                Parameter {
                    name: "id".into(),
                    hint: "int|null".into(),
                },
                Parameter {
                    name: "raw".into(),
                    hint: "mixed".into(),
                },
            ],
            return_hint: return_hint.into(),
            throws: throws.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn class_doc_always_has_description() {
        let sig = ClassSignature {
            name: "Repo".into(),
            keyword: ClassKeyword::AbstractClass,
        };
        assert_eq!(
            class_doc(&sig, ""),
            "/**\n * Abstract class Repo description.\n */\n"
        );
    }

    #[test]
    fn property_doc_uses_doc_hint() {
        let sig = PropertySignature {
            name: "bar".into(),
            types: TypeUnion {
                members: vec!["Foo".into()],
                nullable: true,
            },
        };
        let config = Config {
            phpdoc_property_show_description: true,
            phpdoc_empty_lines_after_description: 1,
            ..Config::default()
        };
        assert_eq!(
            property_doc(&sig, "    ", &config),
            "    /**\n     * bar description.\n     *\n     * @var Foo|null\n     */\n"
        );
    }

    #[test]
    fn hidden_description_drops_its_padding() {
        let sig = ConstantSignature {
            name: "LIMIT".into(),
            hint: "int".into(),
        };
        let config = Config {
            phpdoc_empty_lines_after_description: 2,
            ..Config::default()
        };
        assert_eq!(constant_doc(&sig, "", &config), "/**\n * @var int\n */\n");
    }

    #[test]
    fn void_return_is_omitted_with_its_padding() {
        let config = Config {
            phpdoc_empty_lines_before_return: 2,
            ..Config::default()
        };
        let doc = function_doc(&function("void", &[]), "", &config);
        assert_eq!(doc, "/**\n * @param int|null $id\n * @param mixed $raw\n */\n");
    }

    #[test]
    fn void_return_can_be_forced() {
        let config = Config {
            phpdoc_function_return_void: true,
            ..Config::default()
        };
        let doc = function_doc(&function("void", &[]), "", &config);
        assert!(doc.contains(" * @return void\n"));
    }

    #[test]
    fn throws_layouts() {
        let sig = function("string", &["FooException", "BarException"]);

        let doc = function_doc(&sig, "", &Config::default());
        assert!(doc.ends_with(
            " * @return string\n * @throws FooException\n * @throws BarException\n */\n"
        ));

        let config = Config {
            phpdoc_show_throws_on_diff_lines: false,
            phpdoc_empty_lines_before_throws: 1,
            ..Config::default()
        };
        let doc = function_doc(&sig, "", &config);
        assert!(doc.ends_with(" * @return string\n *\n * @throws FooException|BarException\n */\n"));
    }

    #[test]
    fn nameless_signature_renders_nothing() {
        let sig = ConstantSignature {
            name: String::new(),
            hint: "mixed".into(),
        };
        assert_eq!(constant_doc(&sig, "", &Config::default()), "");
    }
}
