//! Data structures shared by the build-time resolver and the runtime locator.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level grouping of asset folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
  /// Blocks registered through their metadata file.
  Blocks,
  /// Editor plugins.
  Plugins,
  /// Extensions of core blocks.
  Extensions,
}

impl AssetCategory {
  /// Directory name used in both the source and the dist tree.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Blocks => "blocks",
      Self::Plugins => "plugins",
      Self::Extensions => "extensions",
    }
  }

  /// Category name with its first letter upper-cased, as used in global variable names.
  pub fn capitalized(self) -> &'static str {
    match self {
      Self::Blocks => "Blocks",
      Self::Plugins => "Plugins",
      Self::Extensions => "Extensions",
    }
  }
}

impl fmt::Display for AssetCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AssetCategory {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "blocks" => Ok(Self::Blocks),
      "plugins" => Ok(Self::Plugins),
      "extensions" => Ok(Self::Extensions),
      other => Err(format!("unknown asset category `{other}`")),
    }
  }
}

/// The two supported file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
  /// JavaScript bundle.
  Script,
  /// Stylesheet bundle.
  Stylesheet,
}

impl FromStr for FileKind {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "script" | "js" => Ok(Self::Script),
      "stylesheet" | "style" | "css" => Ok(Self::Stylesheet),
      other => Err(format!("unknown file kind `{other}`")),
    }
  }
}

/// Page-rendering situation that decides which role is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderContext {
  /// Public pages.
  #[default]
  Frontend,
  /// The block editor screen.
  Editor,
  /// Block view scripts and styles.
  View,
}

impl FromStr for RenderContext {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "frontend" => Ok(Self::Frontend),
      "editor" => Ok(Self::Editor),
      "view" => Ok(Self::View),
      other => Err(format!("unknown render context `{other}`")),
    }
  }
}

/// A conventional file inside an asset folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetRole {
  /// Context the file is loaded in.
  pub context: RenderContext,
  /// Script or stylesheet.
  pub kind: FileKind,
}

impl AssetRole {
  /// Build a role from its parts.
  pub const fn new(context: RenderContext, kind: FileKind) -> Self {
    Self { context, kind }
  }

  /// Conventional filename stem for this role.
  pub fn stem(self) -> &'static str {
    crate::roles::role_for(self.context, self.kind)
  }
}

/// One named folder under a category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetUnit {
  /// Category the folder lives in.
  pub category: AssetCategory,
  /// Folder name.
  pub name: String,
}

impl AssetUnit {
  /// Scope used by selection rules, `{category}/{name}`.
  pub fn scope(&self) -> String {
    format!("{}/{}", self.category, self.name)
  }
}

/// Logical bundler key, `{category}/{name}/{stem}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct EntryKey {
  /// Category of the asset folder.
  pub category: AssetCategory,
  /// Asset folder name.
  pub name: String,
  /// Role stem.
  pub stem: &'static str,
}

impl EntryKey {
  /// Key for a folder and role.
  pub fn new(unit: &AssetUnit, role: AssetRole) -> Self {
    Self {
      category: unit.category,
      name: unit.name.clone(),
      stem: role.stem(),
    }
  }
}

impl fmt::Display for EntryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}/{}", self.category, self.name, self.stem)
  }
}

impl From<EntryKey> for String {
  fn from(key: EntryKey) -> Self {
    key.to_string()
  }
}

/// Entry points keyed by [`EntryKey`].
///
/// Ordering follows the derived `Ord` on the key (category, then name, then stem) so the map
/// enumerates identically across runs on an unchanged tree.
pub type EntryMap = BTreeMap<EntryKey, PathBuf>;

/// Dependency list and version read from a compiled script's sidecar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetMetadata {
  /// Handles the script depends on.
  #[serde(default)]
  pub dependencies: Vec<String>,
  /// Cache-busting version string.
  #[serde(default)]
  pub version: String,
}

/// Compiled output found for one folder and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledArtifact {
  /// Category of the asset folder.
  pub category: AssetCategory,
  /// Asset folder name.
  pub name: String,
  /// Role stem the artifact was matched on.
  pub stem: &'static str,
  /// Script or stylesheet.
  pub kind: FileKind,
  /// Absolute path of the compiled file.
  pub path: PathBuf,
  /// Public URL of the compiled file.
  pub url: String,
  /// Handles the artifact depends on.
  pub dependencies: Vec<String>,
  /// Version passed to the host.
  pub version: String,
}

/// Controls how a pass declares assets to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationContext {
  /// Category being processed.
  pub category: AssetCategory,
  /// Context deciding the requested roles.
  pub render_context: RenderContext,
  /// Declare without activating on the current request.
  pub register_only: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entry_keys_sort_by_category_then_name_then_stem() {
    let hero = AssetUnit {
      category: AssetCategory::Blocks,
      name: "hero".into(),
    };
    let alpha = AssetUnit {
      category: AssetCategory::Plugins,
      name: "alpha".into(),
    };
    let mut keys = vec![
      EntryKey::new(&alpha, AssetRole::new(RenderContext::Editor, FileKind::Script)),
      EntryKey::new(&hero, AssetRole::new(RenderContext::View, FileKind::Script)),
      EntryKey::new(&hero, AssetRole::new(RenderContext::Editor, FileKind::Script)),
    ];
    keys.sort();

    let rendered: Vec<String> = keys.into_iter().map(String::from).collect();
    assert_eq!(rendered, vec![
      "blocks/hero/index".to_string(),
      "blocks/hero/view".to_string(),
      "plugins/alpha/index".to_string(),
    ]);
  }

  #[test]
  fn parses_cli_spellings() {
    assert_eq!("plugins".parse::<AssetCategory>(), Ok(AssetCategory::Plugins));
    assert_eq!("css".parse::<FileKind>(), Ok(FileKind::Stylesheet));
    assert_eq!("view".parse::<RenderContext>(), Ok(RenderContext::View));
    assert!("themes".parse::<AssetCategory>().is_err());
  }

  #[test]
  fn capitalizes_category_names() {
    assert_eq!(AssetCategory::Extensions.capitalized(), "Extensions");
  }
}
