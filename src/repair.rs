//! Declaration repair.
//!
//! The editor hands us whatever is on the cursor line, which is often an
//! unfinished statement (`private array $items = [`) or a class header
//! whose body lives on later lines.  These helpers close the fragment so
//! it can be fed to the PHP parser on its own.

/// Close a property or constant line so it forms a complete statement.
///
/// Lines that already contain a `;` are returned unchanged.  Otherwise the
/// last character decides the completion: an open `[` gets `];`, a
/// dangling quote gets its matching quote and `;`, anything else gets `;`.
pub fn repair_member(line: &str) -> String {
    let declr = line.trim();
    if declr.contains(';') {
        return declr.to_string();
    }

    match declr.chars().last() {
        Some('[') => format!("{}];", declr),
        Some('\'') => format!("{}';", declr),
        Some('"') => format!("{}\";", declr),
        _ => format!("{};", declr),
    }
}

/// Give a class-like header a body.
///
/// A header that already opened its body (`class Foo {`) is closed with
/// `}`; otherwise an empty body is appended.
pub fn repair_class_header(line: &str) -> String {
    let declr = line.trim();
    if declr.contains('{') {
        format!("{} }}", declr)
    } else {
        format!("{} {{}}", declr)
    }
}

/// Wrap a repaired member line in a throwaway class so it parses as a
/// class member.
pub fn wrap_in_class(member: &str) -> String {
    format!("<?php \n class Foo {{ \n {} \n }} \n", member)
}

/// Prefix a repaired class header with the PHP open tag.
pub fn wrap_header(header: &str) -> String {
    format!("<?php \n {} \n", header)
}
