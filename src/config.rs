/// Rendering options.
///
/// Every option the generators consult lives in [`Config`].  Values are
/// layered lowest → highest:
///
///   1. built-in defaults
///   2. `<user config dir>/phpforge/config.toml`
///   3. `.phpforge.toml` at the workspace root
///   4. LSP `initializationOptions`, then `workspace/didChangeConfiguration`
///
/// Layers are merged key by key as JSON objects before a single
/// deserialization, so a layer only needs to mention the keys it changes.
/// Unknown keys are ignored.
use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// File name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = ".phpforge.toml";

/// Key under which editor settings may nest our options.
const SETTINGS_SECTION: &str = "phpforge";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub phpdoc_function_show_description: bool,
    pub phpdoc_property_show_description: bool,
    pub phpdoc_constant_show_description: bool,
    pub phpdoc_empty_lines_after_description: usize,
    pub phpdoc_empty_lines_before_return: usize,
    pub phpdoc_empty_lines_before_throws: usize,
    /// Emit `@return void` instead of omitting it.
    pub phpdoc_function_return_void: bool,
    /// One `@throws` line per exception rather than one pipe-joined line.
    pub phpdoc_show_throws_on_diff_lines: bool,
    pub builder_strict_types: bool,
    pub builder_generate_phpdoc: bool,
    pub getter_setter_generate_phpdoc: bool,
    /// Fluent setters: `return $this;` and a `self` return type.
    pub setter_return_self: bool,
    pub constructor_args_one_line_max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            phpdoc_function_show_description: false,
            phpdoc_property_show_description: false,
            phpdoc_constant_show_description: false,
            phpdoc_empty_lines_after_description: 0,
            phpdoc_empty_lines_before_return: 0,
            phpdoc_empty_lines_before_throws: 0,
            phpdoc_function_return_void: false,
            phpdoc_show_throws_on_diff_lines: true,
            builder_strict_types: true,
            builder_generate_phpdoc: false,
            getter_setter_generate_phpdoc: true,
            setter_return_self: false,
            constructor_args_one_line_max_length: 120,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid option value: {0}")]
    Value(#[from] serde_json::Error),
}

impl Config {
    /// Merge `layers` (lowest first) over the defaults.
    ///
    /// Non-object layers are skipped.  A layer that nests its options under
    /// a `phpforge` key is unwrapped first.
    pub fn from_layers<'a>(layers: impl IntoIterator<Item = &'a Value>) -> Result<Self, ConfigError> {
        let mut merged = match serde_json::to_value(Config::default())? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for layer in layers {
            if let Some(options) = section(layer) {
                for (key, value) in options {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// Same as [`from_layers`](Self::from_layers), falling back to the
    /// defaults (with a warning) when a value has the wrong type.
    pub fn from_layers_lossy<'a>(layers: impl IntoIterator<Item = &'a Value>) -> Self {
        Self::from_layers(layers).unwrap_or_else(|e| {
            tracing::warn!("PHPForge: ignoring configuration: {}", e);
            Config::default()
        })
    }
}

fn section(layer: &Value) -> Option<&Map<String, Value>> {
    let options = layer.as_object()?;
    match options.get(SETTINGS_SECTION) {
        Some(Value::Object(nested)) => Some(nested),
        _ => Some(options),
    }
}

/// `<config dir>/phpforge/config.toml` for the current user.
pub fn user_config_path() -> Option<PathBuf> {
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("phpforge").join("config.toml"))
}

/// Read a TOML options file as a JSON layer.  A missing file is `Ok(None)`.
pub fn read_toml_layer(path: &Path) -> Result<Option<Value>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let value: Value = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

/// The file-backed layers: user file, then project file.  Unreadable
/// files are logged and skipped.
pub fn file_layers(workspace_root: Option<&Path>) -> Vec<Value> {
    let candidates = user_config_path()
        .into_iter()
        .chain(workspace_root.map(|root| root.join(PROJECT_CONFIG_FILE)));

    let mut layers = Vec::new();
    for path in candidates {
        match read_toml_layer(&path) {
            Ok(Some(layer)) => {
                tracing::debug!(path = %path.display(), "loaded configuration file");
                layers.push(layer);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("PHPForge: {}", e),
        }
    }
    layers
}
