//! Batch declaration picking.
//!
//! Scans every line of a document with the recognizers, numbers the hits
//! (`"3. string $bar (Property)"`) so duplicate names stay distinguishable
//! in the picker, and maps the labels the user chose back to lines.

use crate::recognize::{Recognized, recognize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub line: usize,
    pub recognized: Recognized,
}

/// Every line whose recognizer match passes `accept`, in document order.
pub fn scan_declarations(content: &str, accept: impl Fn(&Recognized) -> bool) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (line, text) in content.lines().enumerate() {
        let Some(recognized) = recognize(text) else {
            continue;
        };
        if !accept(&recognized) {
            continue;
        }
        candidates.push(Candidate {
            label: format!("{}. {}", candidates.len() + 1, recognized.label()),
            line,
            recognized,
        });
    }
    candidates
}

/// Keep the candidates whose label was chosen, in first-seen order.
pub fn retain_chosen(candidates: Vec<Candidate>, chosen: &[String]) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| chosen.iter().any(|label| *label == c.label))
        .collect()
}

pub fn labels(candidates: &[Candidate]) -> Vec<String> {
    candidates.iter().map(|c| c.label.clone()).collect()
}
