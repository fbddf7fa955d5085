//! Configuration file support for fnscope
//!
//! Loads span extension settings from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.fnscoperc.json` in the start directory or any ancestor
//! 3. `fnscope.config.json` in the same directory
//! 4. `"fnscope"` key in `package.json` in the same directory
//!
//! The nearest directory holding any of these wins. All fields are optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which leading comments may extend a match's start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadingComments {
    /// Every comment the parser attached to the node
    #[default]
    All,
    /// Only `/** ... */` block comments
    Doc,
    /// Never extend over comments
    None,
}

/// fnscope configuration as written in a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FnscopeConfig {
    /// Leading comments to include (default: all)
    #[serde(default)]
    pub leading_comments: Option<LeadingComments>,

    /// Include decorators placed before the node (default: true)
    #[serde(default)]
    pub include_decorators: Option<bool>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub leading_comments: LeadingComments,
    pub include_decorators: bool,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            leading_comments: LeadingComments::All,
            include_decorators: true,
            config_path: None,
        }
    }
}

impl FnscopeConfig {
    /// Resolve config into the form used during extraction
    pub fn resolve(&self) -> ExtractConfig {
        ExtractConfig {
            leading_comments: self.leading_comments.unwrap_or_default(),
            include_decorators: self.include_decorators.unwrap_or(true),
            config_path: None,
        }
    }
}

/// Discover a config file in `start_dir` or the nearest ancestor that has one
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(start_dir: &Path) -> Result<Option<(FnscopeConfig, PathBuf)>> {
    for dir in start_dir.ancestors() {
        if let Some(found) = config_in_dir(dir)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn config_in_dir(dir: &Path) -> Result<Option<(FnscopeConfig, PathBuf)>> {
    // 1. .fnscoperc.json
    let rc_path = dir.join(".fnscoperc.json");
    if rc_path.is_file() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    // 2. fnscope.config.json
    let config_path = dir.join("fnscope.config.json");
    if config_path.is_file() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    // 3. package.json "fnscope" key
    let pkg_path = dir.join("package.json");
    if pkg_path.is_file() {
        if let Some(config) = load_from_package_json(&pkg_path)? {
            return Ok(Some((config, pkg_path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FnscopeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Load fnscope config from the "fnscope" key in package.json
fn load_from_package_json(path: &Path) -> Result<Option<FnscopeConfig>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let pkg: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    match pkg.get("fnscope") {
        Some(value) => {
            let config: FnscopeConfig = serde_json::from_value(value.clone())
                .with_context(|| format!("invalid fnscope config in {}", path.display()))?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

/// Load and resolve config for a lookup
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config starting at `start_dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(start_dir: &Path, config_path: Option<&Path>) -> Result<ExtractConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(start_dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (FnscopeConfig::default(), None),
        }
    };

    let mut resolved = config.resolve();
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let resolved = FnscopeConfig::default().resolve();
        assert_eq!(resolved, ExtractConfig::default());
        assert_eq!(resolved.leading_comments, LeadingComments::All);
        assert!(resolved.include_decorators);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: FnscopeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.resolve(), ExtractConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{ "leading_comments": "doc", "include_decorators": false }"#;
        let config: FnscopeConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve();
        assert_eq!(resolved.leading_comments, LeadingComments::Doc);
        assert!(!resolved.include_decorators);
    }

    #[test]
    fn test_reject_unknown_fields() {
        let json = r#"{"unknown_field": true}"#;
        let result: Result<FnscopeConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_unknown_comment_mode() {
        let json = r#"{"leading_comments": "some"}"#;
        let result: Result<FnscopeConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_rc_file_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".fnscoperc.json"),
            r#"{"leading_comments": "none"}"#,
        )
        .unwrap();
        let nested = dir.path().join("src").join("lib");
        fs::create_dir_all(&nested).unwrap();

        let resolved = load_and_resolve(&nested, None).unwrap();
        assert_eq!(resolved.leading_comments, LeadingComments::None);
        assert_eq!(
            resolved.config_path,
            Some(dir.path().join(".fnscoperc.json"))
        );
    }

    #[test]
    fn test_rc_file_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".fnscoperc.json"),
            r#"{"include_decorators": false}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("fnscope.config.json"),
            r#"{"include_decorators": true}"#,
        )
        .unwrap();

        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(!resolved.include_decorators);
    }

    #[test]
    fn test_package_json_key() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "fnscope": {"leading_comments": "doc"}}"#,
        )
        .unwrap();

        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert_eq!(resolved.leading_comments, LeadingComments::Doc);
    }

    #[test]
    fn test_package_json_without_key_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "app"}"#).unwrap();

        let (config, path) = config_in_dir(dir.path())
            .map(|found| found.unzip())
            .unwrap();
        assert!(config.is_none());
        assert!(path.is_none());
    }

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"leading_comments": "doc"}"#).unwrap();

        let resolved = load_and_resolve(Path::new("/nonexistent"), Some(&path)).unwrap();
        assert_eq!(resolved.leading_comments, LeadingComments::Doc);
        assert_eq!(resolved.config_path, Some(path));
    }

    #[test]
    fn test_explicit_path_missing() {
        let result = load_and_resolve(Path::new("."), Some(Path::new("/nonexistent/fnscope.json")));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("failed to read config file"), "got: {}", message);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_config_file(&path).is_err());
    }
}
