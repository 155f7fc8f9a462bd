/// Template rendering.
///
/// Pure functions from extracted signatures plus a [`Config`] snapshot to
/// the exact text that gets spliced into the document.  Nothing in here
/// touches the editor or the parser.
///
/// Every renderer returns an empty string when it has nothing sensible to
/// produce (for example a signature without a name); callers treat that as
/// a failed render rather than inserting it.
///
/// Sub-modules:
/// - [`phpdoc`]: documentation blocks for each declaration kind
/// - [`accessors`]: getters and setters
/// - [`constructor`]: `__construct` from a property subset
/// - [`skeleton`]: whole-file class-like skeletons
///
/// [`Config`]: crate::config::Config
pub mod accessors;
pub mod constructor;
pub mod phpdoc;
pub mod skeleton;

pub use accessors::{getter_name, render_getter, render_setter, setter_name};
pub use constructor::render_constructor;
pub use phpdoc::render_doc;
pub use skeleton::render_skeleton;

/// Wrap content lines in a `/** ... */` block indented by `tab`.
///
/// An empty entry becomes a bare ` *` padding line.
pub fn array_to_phpdoc<S: AsRef<str>>(lines: &[S], tab: &str) -> String {
    let mut doc = format!("{}/**\n", tab);
    for line in lines {
        let line = line.as_ref();
        if line.is_empty() {
            doc.push_str(&format!("{} *\n", tab));
        } else {
            doc.push_str(&format!("{} * {}\n", tab, line));
        }
    }
    doc.push_str(&format!("{} */\n", tab));
    doc
}

/// Append `count` padding entries to a doc line list.
pub(crate) fn push_blank_lines(lines: &mut Vec<String>, count: usize) {
    lines.extend(std::iter::repeat_n(String::new(), count));
}
