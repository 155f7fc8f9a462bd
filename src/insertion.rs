//! Insertion-point resolution.
//!
//! Generated members are spliced in at column 0 of a target line, pushing
//! that line down.  Doc blocks go on the declaration's own line; accessors
//! and constructors need one of the scans below.

/// Line of the class-closing brace that accessors are inserted before.
///
/// Walks from the last line up to line 1 and remembers every line that
/// starts with `}` (no indentation).  Because the walk keeps overwriting,
/// the topmost such line below line 0 wins, which is the outer class's
/// closing brace in a one-class-per-file layout.
pub fn closing_brace_line(content: &str) -> Option<usize> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut found = None;
    for line_number in (1..lines.len()).rev() {
        if lines[line_number].starts_with('}') {
            found = Some(line_number);
        }
    }
    found
}

/// Constructor target: right after the last property line when the
/// document declares any property, otherwise the closing-brace scan.
pub fn constructor_line(content: &str, last_property_line: Option<usize>) -> Option<usize> {
    match last_property_line {
        Some(line) => Some(line + 1),
        None => closing_brace_line(content),
    }
}
