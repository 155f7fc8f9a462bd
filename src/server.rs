/// LSP server trait implementation.
///
/// This module contains the `impl LanguageServer for Backend` block,
/// which handles the LSP protocol messages the generators need:
/// document sync, configuration updates, code actions and
/// `workspace/executeCommand`.
use serde_json::Value;
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::commands::{AccessorSet, Command};
use crate::recognize::recognize;
use crate::types::{ClassKeyword, DeclarationKind};

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok());
        *self.workspace_root.lock() = workspace_root;

        self.set_initialization_options(params.initialization_options);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: Command::ids(),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.load_workspace();
        let project = self.project();
        self.log(
            MessageType::INFO,
            format!(
                "PHPForge initialized! PHP {}, {} PSR-4 mapping(s)",
                project.php_version,
                project.psr4.len()
            ),
        )
        .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.to_string();
        self.open_files.lock().insert(uri.clone(), doc.text);
        self.log(MessageType::LOG, format!("Opened file: {}", uri))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        if let Some(change) = params.content_changes.into_iter().last() {
            self.open_files.lock().insert(uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        self.open_files.lock().remove(&uri);
        self.cursor_lines.lock().remove(&uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if params.settings.is_object() {
            self.set_settings(params.settings);
        }
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;
        let line = params.range.start.line as usize;
        let key = uri.to_string();

        let Some(content) = self.open_files.lock().get(&key).cloned() else {
            return Ok(None);
        };
        self.cursor_lines.lock().insert(key, line);

        let commands = code_action_commands(&content, line);
        let arguments = vec![Value::String(uri.to_string()), Value::from(line)];
        let actions = commands
            .into_iter()
            .map(|command| {
                CodeActionOrCommand::CodeAction(CodeAction {
                    title: command.title(),
                    kind: Some(CodeActionKind::REFACTOR),
                    command: Some(tower_lsp::lsp_types::Command {
                        title: command.title(),
                        command: command.id().to_string(),
                        arguments: Some(arguments.clone()),
                    }),
                    ..CodeAction::default()
                })
            })
            .collect();

        Ok(Some(actions))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        self.run_command(&params.command, &params.arguments).await;
        Ok(None)
    }
}

/// Commands worth offering for `line` of `content`.
fn code_action_commands(content: &str, line: usize) -> Vec<Command> {
    let mut commands = Vec::new();

    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed == "<?php" {
        commands.extend(
            [
                ClassKeyword::Class,
                ClassKeyword::AbstractClass,
                ClassKeyword::FinalClass,
                ClassKeyword::Interface,
                ClassKeyword::Trait,
                ClassKeyword::Enum,
            ]
            .map(Command::GenerateSkeleton),
        );
        return commands;
    }

    let recognized = content.lines().nth(line).and_then(recognize);
    if let Some(recognized) = &recognized {
        if recognized.kind() == DeclarationKind::Property {
            for set in [AccessorSet::GETTER, AccessorSet::SETTER, AccessorSet::BOTH] {
                commands.push(Command::InsertAccessors { set, many: false });
            }
        }
        if !crate::recognize::has_existing_docblock(content, line) {
            commands.push(Command::GeneratePhpdoc { many: false });
        }
    }

    commands.push(Command::GeneratePhpdoc { many: true });
    commands.push(Command::InsertAccessors {
        set: AccessorSet::BOTH,
        many: true,
    });
    commands.push(Command::GenerateConstructor);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_offers_skeletons_only() {
        let commands = code_action_commands("<?php\n", 0);
        assert_eq!(commands.len(), 6);
        assert!(commands.contains(&Command::GenerateSkeleton(ClassKeyword::Enum)));
    }

    #[test]
    fn property_line_offers_accessors_and_doc() {
        let content = "<?php\nclass A\n{\n    private int $a;\n}\n";
        let commands = code_action_commands(content, 3);
        assert_eq!(
            commands[0],
            Command::InsertAccessors {
                set: AccessorSet::GETTER,
                many: false
            }
        );
        assert!(commands.contains(&Command::GeneratePhpdoc { many: false }));
        assert!(commands.contains(&Command::GenerateConstructor));
    }

    #[test]
    fn plain_line_offers_batch_commands() {
        let content = "<?php\nclass A\n{\n}\n";
        let commands = code_action_commands(content, 2);
        assert!(!commands.contains(&Command::GeneratePhpdoc { many: false }));
        assert!(commands.contains(&Command::GeneratePhpdoc { many: true }));
    }
}
