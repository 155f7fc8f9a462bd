mod common;

use common::{configure, create_test_backend, create_workspace, open, test_uri};
use serde_json::json;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

#[tokio::test]
async fn test_initialize_server_info() {
    let backend = create_test_backend();
    let params = InitializeParams::default();
    let result = backend.initialize(params).await.unwrap();

    let server_info = result.server_info.expect("server_info should be present");
    assert_eq!(server_info.name, "PHPForge");
    assert_eq!(server_info.version, Some(env!("CARGO_PKG_VERSION").to_string()));
}

#[tokio::test]
async fn test_initialize_capabilities() {
    let backend = create_test_backend();
    let result = backend.initialize(InitializeParams::default()).await.unwrap();

    let caps = result.capabilities;
    assert!(caps.code_action_provider.is_some());
    assert_eq!(
        caps.text_document_sync,
        Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL))
    );

    let commands = caps
        .execute_command_provider
        .expect("execute command provider should be enabled")
        .commands;
    assert_eq!(commands.len(), 15);
    assert!(commands.contains(&"phpforge.insertGetter".to_string()));
    assert!(commands.contains(&"phpforge.generatePhpdocMany".to_string()));
    assert!(commands.contains(&"phpforge.generateEnum".to_string()));
}

#[tokio::test]
async fn test_initialization_options_configure_generators() {
    let backend = create_test_backend();
    let params = InitializeParams {
        initialization_options: Some(json!({ "phpforge": { "setter-return-self": true } })),
        ..InitializeParams::default()
    };
    backend.initialize(params).await.unwrap();

    assert!(backend.config().setter_return_self);
    // untouched options keep their defaults
    assert!(backend.config().getter_setter_generate_phpdoc);
}

#[tokio::test]
async fn test_settings_override_initialization_options() {
    let backend = create_test_backend();
    let params = InitializeParams {
        initialization_options: Some(json!({ "constructor-args-one-line-max-length": 80 })),
        ..InitializeParams::default()
    };
    backend.initialize(params).await.unwrap();
    assert_eq!(backend.config().constructor_args_one_line_max_length, 80);

    configure(&backend, json!({ "constructor-args-one-line-max-length": 60 })).await;
    assert_eq!(backend.config().constructor_args_one_line_max_length, 60);
}

#[tokio::test]
async fn test_bad_setting_type_falls_back_to_defaults() {
    let backend = create_test_backend();
    configure(&backend, json!({ "setter-return-self": "yes" })).await;

    assert!(!backend.config().setter_return_self);
}

#[tokio::test]
async fn test_initialized_reads_composer() {
    let (backend, dir) = create_workspace(&[(
        "composer.json",
        r#"{ "require": { "php": "^8.3" }, "autoload": { "psr-4": { "Acme\\": "src/" } } }"#,
    )]);
    let params = InitializeParams {
        root_uri: Some(Url::from_file_path(dir.path()).unwrap()),
        ..InitializeParams::default()
    };
    backend.initialize(params).await.unwrap();
    backend.initialized(InitializedParams {}).await;

    let project = backend.project();
    assert_eq!(project.php_version, "8.3");
    assert_eq!(project.psr4[0].prefix, "Acme\\");
    assert!(project.supports_enums());
}

#[tokio::test]
async fn test_document_sync() {
    let backend = create_test_backend();
    let uri = test_uri();

    open(&backend, &uri, "<?php\n").await;
    assert_eq!(backend.get_document(uri.as_str()).as_deref(), Some("<?php\n"));

    backend
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: uri.clone(),
                version: 2,
            },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "<?php\nclass Bar {}\n".to_string(),
            }],
        })
        .await;
    assert_eq!(
        backend.get_document(uri.as_str()).as_deref(),
        Some("<?php\nclass Bar {}\n")
    );

    backend
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
        })
        .await;
    assert!(backend.get_document(uri.as_str()).is_none());
}

fn code_action_params(uri: &Url, line: u32) -> CodeActionParams {
    CodeActionParams {
        text_document: TextDocumentIdentifier { uri: uri.clone() },
        range: Range::new(Position::new(line, 0), Position::new(line, 0)),
        context: CodeActionContext::default(),
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
    }
}

fn action_commands(response: CodeActionResponse) -> Vec<Command> {
    response
        .into_iter()
        .filter_map(|action| match action {
            CodeActionOrCommand::CodeAction(action) => action.command,
            CodeActionOrCommand::Command(command) => Some(command),
        })
        .collect()
}

#[tokio::test]
async fn test_code_actions_on_property_line() {
    let backend = create_test_backend();
    let uri = test_uri();
    open(&backend, &uri, "<?php\nclass Bar\n{\n    private string $bar;\n}\n").await;

    let response = backend
        .code_action(code_action_params(&uri, 3))
        .await
        .unwrap()
        .expect("actions should be offered");
    let commands = action_commands(response);

    let ids: Vec<&str> = commands.iter().map(|c| c.command.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "phpforge.insertGetter",
            "phpforge.insertSetter",
            "phpforge.insertGetterSetter",
            "phpforge.generatePhpdoc",
            "phpforge.generatePhpdocMany",
            "phpforge.insertGettersSettersMany",
            "phpforge.generateConstructor",
        ]
    );
    assert_eq!(
        commands[0].arguments,
        Some(vec![json!(uri.to_string()), json!(3)])
    );
    assert_eq!(commands[0].title, "Insert getter");
}

#[tokio::test]
async fn test_code_actions_on_empty_file_offer_skeletons() {
    let backend = create_test_backend();
    let uri = test_uri();
    open(&backend, &uri, "").await;

    let response = backend
        .code_action(code_action_params(&uri, 0))
        .await
        .unwrap()
        .unwrap();

    let titles: Vec<String> = action_commands(response)
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "Generate class",
            "Generate abstract class",
            "Generate final class",
            "Generate interface",
            "Generate trait",
            "Generate enum",
        ]
    );
}

#[tokio::test]
async fn test_code_action_for_unknown_document() {
    let backend = create_test_backend();
    let result = backend
        .code_action(code_action_params(&test_uri(), 0))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_execute_command_applies_edit() {
    let backend = create_test_backend();
    let uri = test_uri();
    open(&backend, &uri, "<?php\nclass Bar\n{\n    private int $count;\n}\n").await;

    let result = backend
        .execute_command(ExecuteCommandParams {
            command: "phpforge.insertGetter".to_string(),
            arguments: vec![json!(uri.to_string()), json!(3)],
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap();
    assert!(result.is_none());

    let text = backend.get_document(uri.as_str()).unwrap();
    assert!(text.contains("public function getCount(): int\n"));
}

#[tokio::test]
async fn test_execute_command_uses_code_action_line_and_labels() {
    let backend = create_test_backend();
    let uri = test_uri();
    let source = "<?php\nclass Bar\n{\n    private int $a;\n    private int $b;\n}\n";
    open(&backend, &uri, source).await;

    // remembers line 4 as the cursor
    backend.code_action(code_action_params(&uri, 4)).await.unwrap();
    backend
        .execute_command(ExecuteCommandParams {
            command: "phpforge.insertSetter".to_string(),
            arguments: vec![json!(uri.to_string())],
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap();
    let text = backend.get_document(uri.as_str()).unwrap();
    assert!(text.contains("setB(int $b)"));
    assert!(!text.contains("setA("));

    open(&backend, &uri, source).await;
    backend
        .execute_command(ExecuteCommandParams {
            command: "phpforge.insertGettersMany".to_string(),
            arguments: vec![
                json!(uri.to_string()),
                json!(null),
                json!(["1. int $a (Property)"]),
            ],
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap();
    let text = backend.get_document(uri.as_str()).unwrap();
    assert!(text.contains("getA()"));
    assert!(!text.contains("getB()"));
}

#[tokio::test]
async fn test_unknown_command_is_ignored() {
    let backend = create_test_backend();
    let uri = test_uri();
    open(&backend, &uri, "<?php\n").await;

    let result = backend
        .execute_command(ExecuteCommandParams {
            command: "phpforge.nothing".to_string(),
            arguments: vec![json!(uri.to_string())],
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(backend.get_document(uri.as_str()).as_deref(), Some("<?php\n"));
}

#[tokio::test]
async fn test_shutdown() {
    let backend = create_test_backend();
    assert!(backend.shutdown().await.is_ok());
}
