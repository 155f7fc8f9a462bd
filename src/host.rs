/// Editor-facing collaborator.
///
/// Commands never talk to the LSP client directly; they go through the
/// [`Host`] trait so the feature layer can be driven by a recording mock
/// in tests.  [`LspHost`] is the production implementation backed by a
/// `tower_lsp::Client`.
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::Client;
use tower_lsp::lsp_types::*;

use crate::types::Splice;

/// Leading `$(icon)  ` markup some message texts carry.
static ICON_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(.+?\)\s\s").expect("icon prefix pattern is valid"));

/// Picker entry that selects every label at once.
pub const PICK_ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

impl From<MessageKind> for MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Info => MessageType::INFO,
            MessageKind::Warning => MessageType::WARNING,
            MessageKind::Error => MessageType::ERROR,
        }
    }
}

/// The document a command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub uri: Url,
    /// File-system path, when the URI is a `file://` URI.
    pub path: Option<PathBuf>,
    pub text: String,
    /// 0-based cursor line.
    pub cursor_line: usize,
}

impl Document {
    pub fn new(uri: Url, text: String, cursor_line: usize) -> Self {
        let path = uri.to_file_path().ok();
        Self {
            uri,
            path,
            text,
            cursor_line,
        }
    }
}

/// Strip one leading icon-markup prefix before display.
pub fn strip_icon_markup(text: &str) -> String {
    ICON_PREFIX_RE.replace(text, "").into_owned()
}

#[tower_lsp::async_trait]
pub trait Host: Send + Sync {
    /// Offer `labels` for multi-selection.  A cancelled picker yields an
    /// empty list.
    async fn pick_many(&self, placeholder: &str, labels: Vec<String>) -> Vec<String>;

    /// Apply every splice against `document` as one atomic edit.
    async fn apply_edits(&self, document: &Document, splices: Vec<Splice>) -> bool;

    async fn show_message(&self, kind: MessageKind, text: &str);
}

/// [`Host`] backed by an LSP client.
///
/// When the command arguments already carry the chosen labels they answer
/// the picker; otherwise `window/showMessageRequest` is used with one
/// action per label plus [`PICK_ALL`].
pub struct LspHost<'c> {
    client: &'c Client,
    preselected: Option<Vec<String>>,
}

impl<'c> LspHost<'c> {
    pub fn new(client: &'c Client, preselected: Option<Vec<String>>) -> Self {
        Self {
            client,
            preselected,
        }
    }
}

#[tower_lsp::async_trait]
impl Host for LspHost<'_> {
    async fn pick_many(&self, placeholder: &str, labels: Vec<String>) -> Vec<String> {
        if let Some(chosen) = &self.preselected {
            return chosen.clone();
        }
        if labels.is_empty() {
            return Vec::new();
        }

        let mut actions: Vec<MessageActionItem> = labels
            .iter()
            .map(|label| MessageActionItem {
                title: label.clone(),
                properties: Default::default(),
            })
            .collect();
        actions.push(MessageActionItem {
            title: PICK_ALL.to_string(),
            properties: Default::default(),
        });

        match self
            .client
            .show_message_request(MessageType::INFO, placeholder, Some(actions))
            .await
        {
            Ok(Some(action)) if action.title == PICK_ALL => labels,
            Ok(Some(action)) => vec![action.title],
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("PHPForge: picker request failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn apply_edits(&self, document: &Document, splices: Vec<Splice>) -> bool {
        let edits: Vec<TextEdit> = splices
            .into_iter()
            .map(|splice| {
                let position = Position::new(splice.line as u32, 0);
                TextEdit::new(Range::new(position, position), splice.text)
            })
            .collect();

        let mut changes = std::collections::HashMap::new();
        changes.insert(document.uri.clone(), edits);
        let edit = WorkspaceEdit {
            changes: Some(changes),
            ..WorkspaceEdit::default()
        };

        match self.client.apply_edit(edit).await {
            Ok(response) => response.applied,
            Err(e) => {
                tracing::warn!("PHPForge: workspace/applyEdit failed: {}", e);
                false
            }
        }
    }

    async fn show_message(&self, kind: MessageKind, text: &str) {
        self.client
            .show_message(kind.into(), strip_icon_markup(text))
            .await;
    }
}

/// [`Host`] used when there is no client: the picker answers with the
/// preselected labels, every edit is accepted and messages only reach the
/// log.
pub struct LogHost {
    preselected: Option<Vec<String>>,
}

impl LogHost {
    pub fn new(preselected: Option<Vec<String>>) -> Self {
        Self { preselected }
    }
}

#[tower_lsp::async_trait]
impl Host for LogHost {
    async fn pick_many(&self, _placeholder: &str, _labels: Vec<String>) -> Vec<String> {
        self.preselected.clone().unwrap_or_default()
    }

    async fn apply_edits(&self, _document: &Document, _splices: Vec<Splice>) -> bool {
        true
    }

    async fn show_message(&self, kind: MessageKind, text: &str) {
        let text = strip_icon_markup(text);
        match kind {
            MessageKind::Info => tracing::info!("{}", text),
            MessageKind::Warning => tracing::warn!("{}", text),
            MessageKind::Error => tracing::error!("{}", text),
        }
    }
}
