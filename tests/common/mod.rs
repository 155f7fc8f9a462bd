#![allow(dead_code)]

use std::fs;
use std::sync::Mutex;

use phpforge_lsp::Backend;
use phpforge_lsp::host::{Document, Host, MessageKind};
use phpforge_lsp::types::Splice;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// Helper: create a temp workspace with the given files (composer.json,
/// .phpforge.toml, PHP sources) and a Backend rooted there.
pub fn create_workspace(files: &[(&str, &str)]) -> (Backend, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write file");
    }
    let backend = Backend::new_test_with_workspace(dir.path().to_path_buf());
    (backend, dir)
}

pub async fn open(backend: &Backend, uri: &Url, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "php".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

pub async fn configure(backend: &Backend, settings: serde_json::Value) {
    backend
        .did_change_configuration(DidChangeConfigurationParams { settings })
        .await;
}

pub fn test_uri() -> Url {
    Url::parse("file:///workspace/src/Bar.php").unwrap()
}

/// How the recording host answers the picker.
#[derive(Debug, Clone)]
pub enum Pick {
    /// Every label offered.
    All,
    /// Labels whose text contains one of these needles.
    Matching(Vec<String>),
    /// Dismissed picker.
    Cancel,
}

/// A [`Host`] that records everything a command does.
pub struct RecordingHost {
    pick: Pick,
    accept_edits: bool,
    pub offered: Mutex<Vec<Vec<String>>>,
    pub edits: Mutex<Vec<Vec<Splice>>>,
    pub messages: Mutex<Vec<(MessageKind, String)>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::with_pick(Pick::All)
    }

    pub fn with_pick(pick: Pick) -> Self {
        Self {
            pick,
            accept_edits: true,
            offered: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn picking(needles: &[&str]) -> Self {
        Self::with_pick(Pick::Matching(needles.iter().map(|n| n.to_string()).collect()))
    }

    pub fn rejecting_edits() -> Self {
        Self {
            accept_edits: false,
            ..Self::new()
        }
    }

    pub fn messages(&self) -> Vec<(MessageKind, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn messages_of(&self, kind: MessageKind) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text)
            .collect()
    }

    pub fn edit_count(&self) -> usize {
        self.edits.lock().unwrap().len()
    }
}

#[tower_lsp::async_trait]
impl Host for RecordingHost {
    async fn pick_many(&self, _placeholder: &str, labels: Vec<String>) -> Vec<String> {
        self.offered.lock().unwrap().push(labels.clone());
        match &self.pick {
            Pick::All => labels,
            Pick::Matching(needles) => labels
                .into_iter()
                .filter(|label| needles.iter().any(|n| label.contains(n.as_str())))
                .collect(),
            Pick::Cancel => Vec::new(),
        }
    }

    async fn apply_edits(&self, _document: &Document, splices: Vec<Splice>) -> bool {
        self.edits.lock().unwrap().push(splices);
        self.accept_edits
    }

    async fn show_message(&self, kind: MessageKind, text: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((kind, phpforge_lsp::host::strip_icon_markup(text)));
    }
}

/// Open `text` at [`test_uri`] and run `command` at `line` through `host`.
pub async fn run(
    backend: &Backend,
    text: &str,
    command: &str,
    line: usize,
    host: &RecordingHost,
) -> Option<String> {
    let uri = test_uri();
    open(backend, &uri, text).await;
    backend
        .execute_with_host(command, &uri, Some(line), host)
        .await
}
