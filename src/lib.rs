//! PHPForge: a PHP code generation language server.
//!
//! The server re-parses single declaration lines with mago's PHP parser
//! and renders PHPDoc blocks, getters and setters, constructors and
//! class-like skeletons from what it finds.  Generators are exposed as
//! `workspace/executeCommand` commands and offered as code actions.
//!
//! Pipeline (leaf → root):
//!
//! - [`repair`]: close half-typed lines so they parse
//! - [`parser`]: parse, locate and map declarations into [`types`]
//! - [`normalize`]: doc hints vs. declared types
//! - [`render`]: pure template functions driven by [`config::Config`]
//! - [`insertion`] / [`selection`]: where to splice, and batch picking
//! - [`commands`]: the editor-facing features, talking to a [`host::Host`]
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tower_lsp::Client;

pub mod commands;
pub mod composer;
pub mod config;
pub mod host;
pub mod insertion;
pub mod normalize;
pub mod parser;
pub mod recognize;
pub mod render;
pub mod repair;
pub mod selection;
pub mod types;

mod server;
mod util;

use composer::ProjectMetadata;
use config::Config;

/// Configuration layers in precedence order (lowest first).
#[derive(Debug, Default)]
struct ConfigLayers {
    /// User file, then project file.
    files: Vec<Value>,
    initialization: Option<Value>,
    settings: Option<Value>,
}

impl ConfigLayers {
    fn resolve(&self) -> Config {
        Config::from_layers_lossy(
            self.files
                .iter()
                .chain(self.initialization.as_ref())
                .chain(self.settings.as_ref()),
        )
    }
}

pub struct Backend {
    name: String,
    version: String,
    /// Full text of every open document, keyed by URI.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    /// Last line a code action was requested on, keyed by URI.
    cursor_lines: Arc<Mutex<HashMap<String, usize>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    project: Arc<Mutex<Arc<ProjectMetadata>>>,
    config_layers: Arc<Mutex<ConfigLayers>>,
    config: Arc<Mutex<Arc<Config>>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
            ..Self::new_test()
        }
    }

    /// A backend without a client.  Messages go to the log only and every
    /// edit is accepted.
    pub fn new_test() -> Self {
        Self {
            name: "PHPForge".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            cursor_lines: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            project: Arc::new(Mutex::new(Arc::new(ProjectMetadata::default()))),
            config_layers: Arc::new(Mutex::new(ConfigLayers::default())),
            config: Arc::new(Mutex::new(Arc::new(Config::default()))),
            client: None,
        }
    }

    /// Test backend rooted at `root`, with `composer.json` and
    /// `.phpforge.toml` loaded from there.
    pub fn new_test_with_workspace(root: PathBuf) -> Self {
        let backend = Self::new_test();
        *backend.workspace_root.lock() = Some(root);
        backend.load_workspace();
        backend
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }

    /// Current text of an open document.
    pub fn get_document(&self, uri: &str) -> Option<String> {
        self.open_files.lock().get(uri).cloned()
    }

    /// Snapshot of the effective configuration.
    pub fn config(&self) -> Arc<Config> {
        self.config.lock().clone()
    }

    pub fn project(&self) -> Arc<ProjectMetadata> {
        self.project.lock().clone()
    }

    /// (Re)read `composer.json` and the file-backed configuration layers.
    pub(crate) fn load_workspace(&self) {
        let root = self.workspace_root.lock().clone();
        if let Some(root) = &root {
            *self.project.lock() = Arc::new(ProjectMetadata::load(root));
        }
        self.config_layers.lock().files = config::file_layers(root.as_deref());
        self.refresh_config();
    }

    pub(crate) fn set_initialization_options(&self, options: Option<Value>) {
        self.config_layers.lock().initialization = options;
        self.refresh_config();
    }

    pub(crate) fn set_settings(&self, settings: Value) {
        self.config_layers.lock().settings = Some(settings);
        self.refresh_config();
    }

    fn refresh_config(&self) {
        let resolved = self.config_layers.lock().resolve();
        tracing::debug!(?resolved, "configuration updated");
        *self.config.lock() = Arc::new(resolved);
    }
}
