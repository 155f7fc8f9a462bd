/// Utility functions for the PHPForge server.
///
/// This module contains helper methods for logging, decoding command
/// arguments, and running a command against the open-files store.
use serde_json::Value;
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::commands::{self, Command, Invocation};
use crate::host::{Document, Host, LogHost, LspHost};

/// Decoded `[uri, line?, labels?]` command arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandArgs {
    pub uri: Url,
    pub line: Option<usize>,
    pub labels: Option<Vec<String>>,
}

impl CommandArgs {
    pub(crate) fn parse(arguments: &[Value]) -> Option<Self> {
        let uri = arguments.first()?.as_str().and_then(|s| Url::parse(s).ok())?;
        let line = arguments
            .get(1)
            .and_then(Value::as_u64)
            .map(|l| l as usize);
        let labels = arguments.get(2).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });
        Some(Self { uri, line, labels })
    }
}

impl Backend {
    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }

    /// Build the command's [`Document`] from the open-files store.  The
    /// cursor is the explicit line, else the last code-action line.
    pub(crate) fn document_for(&self, uri: &Url, line: Option<usize>) -> Option<Document> {
        let key = uri.to_string();
        let text = self.open_files.lock().get(&key).cloned()?;
        let cursor_line = line
            .or_else(|| self.cursor_lines.lock().get(&key).copied())
            .unwrap_or(0);
        Some(Document::new(uri.clone(), text, cursor_line))
    }

    /// Run a command id with raw LSP arguments through the client (or the
    /// log-only host when there is none).
    pub(crate) async fn run_command(&self, command_id: &str, arguments: &[Value]) {
        let Some(command) = Command::from_id(command_id) else {
            tracing::warn!(command_id, "PHPForge: unknown command");
            return;
        };
        let Some(args) = CommandArgs::parse(arguments) else {
            tracing::warn!(command_id, "PHPForge: missing document argument");
            return;
        };

        match &self.client {
            Some(client) => {
                let host = LspHost::new(client, args.labels.clone());
                self.run_command_with_host(command, &args, &host).await;
            }
            None => {
                let host = LogHost::new(args.labels.clone());
                self.run_command_with_host(command, &args, &host).await;
            }
        }
    }

    /// Run `command` with an explicit host and store the edited text.
    pub async fn execute_with_host(
        &self,
        command_id: &str,
        uri: &Url,
        line: Option<usize>,
        host: &dyn Host,
    ) -> Option<String> {
        let command = Command::from_id(command_id)?;
        let args = CommandArgs {
            uri: uri.clone(),
            line,
            labels: None,
        };
        self.run_command_with_host(command, &args, host).await
    }

    async fn run_command_with_host(
        &self,
        command: Command,
        args: &CommandArgs,
        host: &dyn Host,
    ) -> Option<String> {
        let ctx = Invocation {
            host,
            config: self.config(),
            project: self.project(),
            workspace_root: self.workspace_root.lock().clone(),
        };

        let Some(document) = self.document_for(&args.uri, args.line) else {
            host.show_message(
                crate::host::MessageKind::Info,
                "Open a PHP document before running this command.",
            )
            .await;
            return None;
        };

        let updated = commands::execute(command, &ctx, &document).await?;
        self.open_files
            .lock()
            .insert(args.uri.to_string(), updated.clone());
        Some(updated)
    }
}
