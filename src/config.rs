//! Project configuration loader for describing the asset layout.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::project::ProjectLayout;

/// File looked up in the project root by [`ProjectConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "enqueues.config.json";

/// Discoverable project configuration describing source and dist layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  /// Directory holding authored script folders.
  pub script_source_dir: String,
  /// Directory holding authored stylesheet folders.
  pub style_source_dir: String,
  /// Extension of authored scripts.
  pub script_extension: String,
  /// Extension of authored stylesheets.
  pub style_extension: String,
  /// Compiled output root.
  pub dist_dir: String,
  /// Extension of compiled stylesheets.
  pub compiled_style_extension: String,
  /// Suffix naming the metadata sidecar of a compiled script.
  pub metadata_suffix: String,
  /// Prefix of handles and block names.
  pub namespace: String,
  /// Prefix of localized data globals.
  pub global_prefix: String,
  /// Translation domain.
  pub text_domain: String,
  /// Block metadata filename.
  pub block_metadata_file: String,
  /// Public URL of the project root.
  pub base_url: String,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      script_source_dir: "source/editor".into(),
      style_source_dir: "source/editor".into(),
      script_extension: "js".into(),
      style_extension: "scss".into(),
      dist_dir: "dist/block-editor".into(),
      compiled_style_extension: "css".into(),
      metadata_suffix: "asset.json".into(),
      namespace: "enqueues".into(),
      global_prefix: "customBlockEditor".into(),
      text_domain: "enqueues".into(),
      block_metadata_file: "block.json".into(),
      base_url: String::new(),
    }
  }
}

impl ProjectConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// When the configuration file does not exist or fails to parse we fall back to default
  /// values so callers can continue with the conventional layout.
  pub fn discover(root: &Path) -> Self {
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Some(config) => config,
      None => {
        log::debug!("no usable {}, using default layout", candidate.display());
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
      Ok(config) => Some(config),
      Err(err) => {
        log::warn!("ignoring {}: {err}", path.display());
        None
      }
    }
  }

  /// Convert the configuration into an owned layout description.
  pub fn into_layout(self) -> ProjectLayout {
    ProjectLayout {
      script_source_dir: self.script_source_dir,
      style_source_dir: self.style_source_dir,
      script_extension: self.script_extension,
      style_extension: self.style_extension,
      dist_dir: self.dist_dir,
      compiled_style_extension: self.compiled_style_extension,
      metadata_suffix: self.metadata_suffix,
      namespace: self.namespace,
      global_prefix: self.global_prefix,
      text_domain: self.text_domain,
      block_metadata_file: self.block_metadata_file,
      base_url: self.base_url,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let layout = ProjectConfig::discover(dir.path()).into_layout();
    assert_eq!(layout, ProjectLayout::default());
    assert_eq!(layout.dist_dir, "dist/block-editor");
  }

  #[test]
  fn discover_reads_partial_overrides() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r#"{"namespace": "caretochange", "style_extension": "css"}"#,
    )
    .unwrap();

    let layout = ProjectConfig::discover(dir.path()).into_layout();
    assert_eq!(layout.namespace, "caretochange");
    assert_eq!(layout.style_extension, "css");
    assert_eq!(layout.script_extension, "js");
  }

  #[test]
  fn discover_ignores_malformed_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
    assert_eq!(ProjectConfig::discover(dir.path()).namespace, "enqueues");
  }
}
