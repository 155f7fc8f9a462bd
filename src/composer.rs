/// Composer project metadata.
///
/// This module reads `composer.json` for the two facts the generators
/// need from a project:
///
/// - the PHP version (from `require.php`), which decides whether `enum`
///   skeletons make sense;
/// - the PSR-4 autoload table, which maps a file's directory to the
///   namespace its skeleton should declare.
///
/// # Namespace derivation
///
/// Given a mapping like `"App\\" => "src/"`, a file at
/// `<workspace>/src/Http/Controller/Home.php` gets its namespace by:
///   1. Making its directory relative to the workspace (`src/Http/Controller`)
///   2. Replacing the matching base path with the prefix (`App\Http/Controller`)
///   3. Converting remaining `/` to `\`
///
/// Result: `App\Http\Controller`
use std::path::Path;
use std::sync::LazyLock;

use mago_php_version::PHPVersion;
use regex::Regex;

/// Version assumed when `composer.json` does not say.
pub const DEFAULT_PHP_VERSION: &str = "7.4";

static MAJOR_MINOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)").expect("version pattern is valid"));

/// A single PSR-4 namespace-to-directory mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psr4Mapping {
    /// The namespace prefix, always ending with `\` (e.g. `"App\"`).
    pub prefix: String,
    /// The base directory relative to the workspace root (e.g. `"src/"`).
    pub base_path: String,
}

/// Everything read from `composer.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// `major.minor`, e.g. `"8.2"`.
    pub php_version: String,
    /// Sorted longest prefix first.
    pub psr4: Vec<Psr4Mapping>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            php_version: DEFAULT_PHP_VERSION.to_string(),
            psr4: Vec::new(),
        }
    }
}

impl ProjectMetadata {
    /// Read `composer.json` under `workspace_root`.  A missing or invalid
    /// file yields the defaults.
    pub fn load(workspace_root: &Path) -> Self {
        let composer_path = workspace_root.join("composer.json");
        let content = match std::fs::read_to_string(&composer_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };

        let json: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("PHPForge: invalid composer.json: {}", e);
                return Self::default();
            }
        };

        Self {
            php_version: php_version_from_json(&json),
            psr4: psr4_from_json(&json),
        }
    }

    pub fn parsed_php_version(&self) -> PHPVersion {
        parse_php_version(&self.php_version)
    }

    /// Whether the project's PHP version has native enums (8.1+).
    pub fn supports_enums(&self) -> bool {
        self.parsed_php_version() >= PHPVersion::PHP81
    }
}

/// The last `major.minor` in the `require.php` constraint
/// (`"^7.4 || ^8.1"` → `"8.1"`), defaulting to `"7.4"`.
fn php_version_from_json(json: &serde_json::Value) -> String {
    json.get("require")
        .and_then(|r| r.get("php"))
        .and_then(|v| v.as_str())
        .and_then(|constraint| MAJOR_MINOR_RE.captures_iter(constraint).last())
        .map(|caps| format!("{}.{}", &caps[1], &caps[2]))
        .unwrap_or_else(|| DEFAULT_PHP_VERSION.to_string())
}

/// Map a `major.minor` string onto mago's version type.
pub fn parse_php_version(version: &str) -> PHPVersion {
    let fallback = PHPVersion::new(7, 4, 0);
    let Some(caps) = MAJOR_MINOR_RE.captures(version) else {
        return fallback;
    };
    match (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
        (Ok(major), Ok(minor)) => PHPVersion::new(major, minor, 0),
        _ => fallback,
    }
}

/// PSR-4 mappings from both `autoload` and `autoload-dev`, longest prefix
/// first.
fn psr4_from_json(json: &serde_json::Value) -> Vec<Psr4Mapping> {
    let mut mappings = Vec::new();

    for section_key in &["autoload", "autoload-dev"] {
        if let Some(section) = json.get(section_key)
            && let Some(psr4) = section.get("psr-4")
            && let Some(psr4_obj) = psr4.as_object()
        {
            for (prefix, paths) in psr4_obj {
                extract_psr4_entries(prefix, paths, &mut mappings);
            }
        }
    }

    mappings.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    mappings
}

/// The value can be either a string (`"src/"`) or an array of strings
/// (`["src/", "lib/"]`).
fn extract_psr4_entries(prefix: &str, paths: &serde_json::Value, mappings: &mut Vec<Psr4Mapping>) {
    let normalised_prefix = if prefix.ends_with('\\') || prefix.is_empty() {
        prefix.to_string()
    } else {
        format!("{}\\", prefix)
    };

    let mut push = |path: &str| {
        mappings.push(Psr4Mapping {
            prefix: normalised_prefix.clone(),
            base_path: normalise_path(path),
        });
    };

    match paths {
        serde_json::Value::String(path) => push(path),
        serde_json::Value::Array(arr) => arr.iter().filter_map(|e| e.as_str()).for_each(push),
        _ => {}
    }
}

/// Forward slashes, trailing `/`, no leading `./`.
pub fn normalise_path(path: &str) -> String {
    let p = path.replace('\\', "/");
    let p = p.strip_prefix("./").unwrap_or(&p);
    if p.ends_with('/') || p.is_empty() {
        p.to_string()
    } else {
        format!("{}/", p)
    }
}

/// Namespace for files living in `dir`.
///
/// The longest mapping whose base path prefixes the workspace-relative
/// directory wins.  Without a match the relative directory itself is
/// converted.  A directory outside the workspace gives an empty namespace.
pub fn path_to_namespace(mappings: &[Psr4Mapping], workspace_root: &Path, dir: &Path) -> String {
    let Ok(relative) = dir.strip_prefix(workspace_root) else {
        return String::new();
    };
    let relative = relative.to_string_lossy().replace('\\', "/");
    let relative = normalise_path(&relative);

    let namespaced = mappings
        .iter()
        .filter(|m| !m.base_path.is_empty() && relative.starts_with(&m.base_path))
        .max_by_key(|m| m.base_path.len())
        .map(|m| format!("{}{}", m.prefix, &relative[m.base_path.len()..]))
        .unwrap_or(relative);

    namespaced
        .replace('/', "\\")
        .trim_end_matches('\\')
        .to_string()
}
