//! Filesystem layout and environment shared by every pass.

use std::path::{Path, PathBuf};

use crate::models::{AssetCategory, FileKind};

/// Directory and naming conventions for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
  /// Source directory holding script category folders, relative to the root.
  pub script_source_dir: String,
  /// Source directory holding stylesheet category folders, relative to the root.
  pub style_source_dir: String,
  /// Extension of authored scripts.
  pub script_extension: String,
  /// Extension of authored stylesheets.
  pub style_extension: String,
  /// Compiled output root, relative to the project root.
  pub dist_dir: String,
  /// Extension of compiled stylesheets.
  pub compiled_style_extension: String,
  /// Suffix replacing `.js` on a compiled script to name its metadata sidecar.
  pub metadata_suffix: String,
  /// Prefix of every handle and block name.
  pub namespace: String,
  /// Prefix of localized data globals.
  pub global_prefix: String,
  /// Translation domain for user-facing strings.
  pub text_domain: String,
  /// Metadata file registered for each block.
  pub block_metadata_file: String,
  /// Public URL the project root is served from.
  pub base_url: String,
}

impl Default for ProjectLayout {
  fn default() -> Self {
    crate::config::ProjectConfig::default().into_layout()
  }
}

impl ProjectLayout {
  /// Directory holding the authored folders of a category for the given kind.
  pub fn source_category_dir(&self, root: &Path, category: AssetCategory, kind: FileKind) -> PathBuf {
    let source_dir = match kind {
      FileKind::Script => &self.script_source_dir,
      FileKind::Stylesheet => &self.style_source_dir,
    };
    root.join(source_dir).join(category.as_str())
  }

  /// Authored file extension for a kind.
  pub fn source_extension(&self, kind: FileKind) -> &str {
    match kind {
      FileKind::Script => &self.script_extension,
      FileKind::Stylesheet => &self.style_extension,
    }
  }

  /// Compiled file extension for a kind.
  pub fn compiled_extension(&self, kind: FileKind) -> &str {
    match kind {
      FileKind::Script => "js",
      FileKind::Stylesheet => &self.compiled_style_extension,
    }
  }

  /// Compiled output directory of a category.
  pub fn dist_category_dir(&self, root: &Path, category: AssetCategory) -> PathBuf {
    root.join(&self.dist_dir).join(category.as_str())
  }
}

/// Whether missing build output is a misconfiguration or something to skip quietly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentMode {
  /// Degrade gracefully and skip assets that were not built.
  #[default]
  Production,
  /// Local development: missing required output is raised loudly.
  Local,
}

impl EnvironmentMode {
  /// Whether structural problems should abort the pass.
  pub fn is_strict(self) -> bool {
    matches!(self, Self::Local)
  }
}
