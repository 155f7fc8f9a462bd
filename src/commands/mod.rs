/// Command layer.
///
/// Each editor command is one async function that reads the [`Document`],
/// drives extraction and rendering, and returns the splices to apply.
/// [`execute`] is the single boundary where a [`CommandError`] turns into
/// a user-visible message; nothing below it talks to the user except the
/// per-item warnings batch flows emit while they keep going.
///
/// Sub-modules:
/// - [`accessors`]: getters / setters, single and batch
/// - [`phpdoc`]: doc blocks, single and batch
/// - [`constructor`]: `__construct` from picked properties
/// - [`skeleton`]: class-like file skeletons
pub mod accessors;
pub mod constructor;
pub mod phpdoc;
pub mod skeleton;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::composer::ProjectMetadata;
use crate::config::Config;
use crate::host::{Document, Host, MessageKind};
use crate::parser::{self, ExtractError};
use crate::recognize::{Recognized, match_property};
use crate::types::*;

/// Failures that abort a whole command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Missing template to render")]
    EmptyTemplate,
    #[error("Unable to detect insert line for template.")]
    InsertionPointNotFound,
    #[error("{0}")]
    NoActiveTarget(String),
    #[error("The editor rejected the edit.")]
    EditRejected,
}

impl CommandError {
    fn message_kind(&self) -> MessageKind {
        match self {
            CommandError::NoActiveTarget(_) => MessageKind::Info,
            _ => MessageKind::Error,
        }
    }

    fn user_message(&self) -> String {
        match self {
            CommandError::NoActiveTarget(reason) => reason.clone(),
            other => format!("Error generating object: '{}'.", other),
        }
    }
}

/// Which accessors an accessor command generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorSet {
    pub getter: bool,
    pub setter: bool,
}

impl AccessorSet {
    pub const GETTER: Self = Self {
        getter: true,
        setter: false,
    };
    pub const SETTER: Self = Self {
        getter: false,
        setter: true,
    };
    pub const BOTH: Self = Self {
        getter: true,
        setter: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    InsertAccessors { set: AccessorSet, many: bool },
    GeneratePhpdoc { many: bool },
    GenerateConstructor,
    GenerateSkeleton(ClassKeyword),
}

/// `(command id, command)` for every command the server registers.
pub const COMMANDS: &[(&str, Command)] = &[
    (
        "phpforge.insertGetter",
        Command::InsertAccessors {
            set: AccessorSet::GETTER,
            many: false,
        },
    ),
    (
        "phpforge.insertSetter",
        Command::InsertAccessors {
            set: AccessorSet::SETTER,
            many: false,
        },
    ),
    (
        "phpforge.insertGetterSetter",
        Command::InsertAccessors {
            set: AccessorSet::BOTH,
            many: false,
        },
    ),
    (
        "phpforge.insertGettersMany",
        Command::InsertAccessors {
            set: AccessorSet::GETTER,
            many: true,
        },
    ),
    (
        "phpforge.insertSettersMany",
        Command::InsertAccessors {
            set: AccessorSet::SETTER,
            many: true,
        },
    ),
    (
        "phpforge.insertGettersSettersMany",
        Command::InsertAccessors {
            set: AccessorSet::BOTH,
            many: true,
        },
    ),
    ("phpforge.generatePhpdoc", Command::GeneratePhpdoc { many: false }),
    ("phpforge.generatePhpdocMany", Command::GeneratePhpdoc { many: true }),
    ("phpforge.generateConstructor", Command::GenerateConstructor),
    ("phpforge.generateClass", Command::GenerateSkeleton(ClassKeyword::Class)),
    (
        "phpforge.generateAbstractClass",
        Command::GenerateSkeleton(ClassKeyword::AbstractClass),
    ),
    (
        "phpforge.generateFinalClass",
        Command::GenerateSkeleton(ClassKeyword::FinalClass),
    ),
    (
        "phpforge.generateInterface",
        Command::GenerateSkeleton(ClassKeyword::Interface),
    ),
    ("phpforge.generateTrait", Command::GenerateSkeleton(ClassKeyword::Trait)),
    ("phpforge.generateEnum", Command::GenerateSkeleton(ClassKeyword::Enum)),
];

impl Command {
    pub fn from_id(id: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(command_id, _)| *command_id == id)
            .map(|(_, command)| *command)
    }

    pub fn id(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, command)| *command == self)
            .map(|(id, _)| *id)
            .unwrap_or_default()
    }

    pub fn ids() -> Vec<String> {
        COMMANDS.iter().map(|(id, _)| id.to_string()).collect()
    }

    /// Human title used for code actions.
    pub fn title(self) -> String {
        match self {
            Command::InsertAccessors { set, many } => {
                let what = match (set.getter, set.setter) {
                    (true, true) => "getter and setter",
                    (true, false) => "getter",
                    _ => "setter",
                };
                if many {
                    format!("Insert {}s for properties…", what)
                } else {
                    format!("Insert {}", what)
                }
            }
            Command::GeneratePhpdoc { many: false } => "Generate PHPDoc".to_string(),
            Command::GeneratePhpdoc { many: true } => "Generate PHPDoc for declarations…".to_string(),
            Command::GenerateConstructor => "Generate constructor…".to_string(),
            Command::GenerateSkeleton(keyword) => format!("Generate {}", keyword.as_str()),
        }
    }
}

/// What a command produced: the splices to apply, and the info messages
/// to show once the host has accepted them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    pub splices: Vec<Splice>,
    pub notices: Vec<String>,
}

impl From<Vec<Splice>> for Generated {
    fn from(splices: Vec<Splice>) -> Self {
        Self {
            splices,
            notices: Vec::new(),
        }
    }
}

/// Per-invocation context: the host plus read-only snapshots.
pub struct Invocation<'h> {
    pub host: &'h dyn Host,
    pub config: Arc<Config>,
    pub project: Arc<ProjectMetadata>,
    pub workspace_root: Option<PathBuf>,
}

impl Invocation<'_> {
    pub(crate) async fn info(&self, text: &str) {
        self.host.show_message(MessageKind::Info, text).await;
    }

    pub(crate) async fn warn(&self, text: &str) {
        self.host.show_message(MessageKind::Warning, text).await;
    }

    pub(crate) async fn error(&self, text: &str) {
        self.host.show_message(MessageKind::Error, text).await;
    }
}

/// Run `command` against `document` and apply its splices through the
/// host.  Returns the updated text when an edit was applied.
pub async fn execute(command: Command, ctx: &Invocation<'_>, document: &Document) -> Option<String> {
    tracing::info!(command = command.id(), uri = %document.uri, "executing command");

    let result = match run(command, ctx, document).await {
        Ok(generated) if generated.splices.is_empty() => Ok(None),
        Ok(Generated { splices, notices }) => {
            if ctx.host.apply_edits(document, splices.clone()).await {
                for notice in &notices {
                    ctx.info(notice).await;
                }
                Ok(Some(apply_splices(&document.text, &splices)))
            } else {
                Err(CommandError::EditRejected)
            }
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(updated) => updated,
        Err(e) => {
            tracing::warn!(command = command.id(), "PHPForge: {}", e);
            ctx.host.show_message(e.message_kind(), &e.user_message()).await;
            None
        }
    }
}

async fn run(
    command: Command,
    ctx: &Invocation<'_>,
    document: &Document,
) -> Result<Generated, CommandError> {
    if !is_php_document(document) {
        return Err(CommandError::NoActiveTarget(
            "The active document is not a PHP file.".to_string(),
        ));
    }

    match command {
        Command::InsertAccessors { set, many } => {
            accessors::insert_accessors(ctx, document, set, many).await
        }
        Command::GeneratePhpdoc { many } => phpdoc::generate_phpdoc(ctx, document, many)
            .await
            .map(Generated::from),
        Command::GenerateConstructor => constructor::generate_constructor(ctx, document)
            .await
            .map(Generated::from),
        Command::GenerateSkeleton(keyword) => skeleton::generate_skeleton(ctx, document, keyword)
            .await
            .map(Generated::from),
    }
}

/// Documents without a file path (untitled buffers) are accepted.
fn is_php_document(document: &Document) -> bool {
    match document.path.as_ref().and_then(|p| p.extension()) {
        Some(ext) => ext.eq_ignore_ascii_case("php"),
        None => true,
    }
}

/// Lines to operate on: the picked candidates in batch mode, otherwise
/// the cursor line.
pub(crate) async fn target_lines(
    ctx: &Invocation<'_>,
    document: &Document,
    many: bool,
    placeholder: &str,
    accept: impl Fn(&Recognized) -> bool,
) -> Result<Vec<usize>, CommandError> {
    if !many {
        return Ok(vec![document.cursor_line]);
    }

    let candidates = crate::selection::scan_declarations(&document.text, accept);
    if candidates.is_empty() {
        return Err(CommandError::NoActiveTarget(
            "No matching declarations found.".to_string(),
        ));
    }

    let chosen = ctx
        .host
        .pick_many(placeholder, crate::selection::labels(&candidates))
        .await;
    let picked = crate::selection::retain_chosen(candidates, &chosen);
    if picked.is_empty() {
        return Err(CommandError::NoActiveTarget("Nothing selected.".to_string()));
    }
    Ok(picked.into_iter().map(|c| c.line).collect())
}

/// Extract the property on `fragment`'s line.
///
/// A parse failure is reported and replaced by an untyped signature when
/// the recognizer still finds a name; `None` when it does not.
pub(crate) async fn property_or_fallback(
    ctx: &Invocation<'_>,
    fragment: &Fragment,
) -> Option<PropertySignature> {
    match parser::extract_property(fragment) {
        Ok(signature) => Some(signature),
        Err(e) => {
            report_parse_failure(ctx, DeclarationKind::Property, &e).await;
            match match_property(&fragment.text) {
                Some(Recognized::Property { name, .. }) => Some(PropertySignature {
                    name,
                    types: TypeUnion::default(),
                }),
                _ => None,
            }
        }
    }
}

/// Extract whatever `recognized` says the fragment holds, falling back to
/// permissive defaults on failure.
pub(crate) async fn signature_or_fallback(
    ctx: &Invocation<'_>,
    document: &Document,
    fragment: &Fragment,
    recognized: &Recognized,
) -> Signature {
    let extracted = match recognized {
        Recognized::ClassLike { .. } => parser::extract_class(fragment).map(Signature::ClassLike),
        Recognized::Constant { .. } => {
            parser::extract_constant(fragment).map(Signature::Constant)
        }
        Recognized::Property { .. } => {
            parser::extract_property(fragment).map(Signature::Property)
        }
        Recognized::Function { .. } => {
            parser::extract_function(&document.text, fragment).map(Signature::Function)
        }
    };

    match extracted {
        Ok(signature) => signature,
        Err(e) => {
            report_parse_failure(ctx, recognized.kind(), &e).await;
            fallback_signature(recognized)
        }
    }
}

fn fallback_signature(recognized: &Recognized) -> Signature {
    match recognized {
        Recognized::ClassLike { keyword, name } => Signature::ClassLike(ClassSignature {
            name: name.clone(),
            keyword: match keyword.as_str() {
                "interface" => ClassKeyword::Interface,
                "trait" => ClassKeyword::Trait,
                "enum" => ClassKeyword::Enum,
                _ => ClassKeyword::Class,
            },
        }),
        Recognized::Constant { name, .. } => Signature::Constant(ConstantSignature {
            name: name.clone(),
            hint: crate::normalize::MIXED.to_string(),
        }),
        Recognized::Property { name, .. } => Signature::Property(PropertySignature {
            name: name.clone(),
            types: TypeUnion::default(),
        }),
        Recognized::Function { name, .. } => Signature::Function(FunctionSignature {
            name: name.clone(),
            return_hint: crate::normalize::MIXED.to_string(),
            ..FunctionSignature::default()
        }),
    }
}

async fn report_parse_failure(ctx: &Invocation<'_>, kind: DeclarationKind, error: &ExtractError) {
    tracing::warn!(kind = kind.label(), "PHPForge: extraction failed: {}", error);
    ctx.error(&format!(
        "Failed to parse {}: {}.",
        kind.label().to_lowercase(),
        error
    ))
    .await;
}
