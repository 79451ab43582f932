//! Helpers used to filter which asset folders are resolved and registered.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::AssetUnit;

/// Trait describing selection filters for asset folders.
pub trait AssetInclusion {
  /// Returns `true` when the folder should be resolved and registered.
  fn is_included(&self, unit: &AssetUnit) -> bool;
}

/// Selection that keeps every folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl AssetInclusion for IncludeAll {
  fn is_included(&self, _unit: &AssetUnit) -> bool {
    true
  }
}

/// Default selection file name searched for in the project root.
pub const DEFAULT_SELECTION_FILE: &str = "enqueues.local.json";

#[derive(Debug, Default, Deserialize)]
struct AssetSelectionFile {
  #[serde(default)]
  include: Vec<String>,
  #[serde(default)]
  exclude: Vec<String>,
}

/// Include/exclude rules keyed by `{category}` or `{category}/{name}`.
#[derive(Debug, Clone, Default)]
pub struct AssetSelection {
  include: Option<BTreeSet<String>>,
  exclude: BTreeSet<String>,
}

/// Errors that can occur while loading the selection file.
#[derive(Debug, Error)]
pub enum SelectionError {
  /// Failed to read the selection file from disk.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse the JSON selection file.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

impl AssetSelection {
  /// Load rules from the selection file; a missing file selects everything.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(SelectionError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    let file: AssetSelectionFile =
      serde_json::from_str(&contents).map_err(|err| SelectionError::Parse {
        path: path.to_path_buf(),
        source: err,
      })?;
    Ok(Self::from(file))
  }

  /// Build a selection from explicit rule lists.
  pub fn from_rules(
    include: impl IntoIterator<Item = String>,
    exclude: impl IntoIterator<Item = String>,
  ) -> Self {
    Self::from(AssetSelectionFile {
      include: include.into_iter().collect(),
      exclude: exclude.into_iter().collect(),
    })
  }

  /// Determine whether a scope such as `blocks/hero` is selected.
  pub fn is_scope_included(&self, scope: &str) -> bool {
    if self.exclude.iter().any(|rule| scope_matches(rule, scope)) {
      return false;
    }

    match &self.include {
      Some(include) => include.iter().any(|rule| scope_matches(rule, scope)),
      None => true,
    }
  }

  /// Returns true when no filtering rules are active.
  pub fn is_unfiltered(&self) -> bool {
    self.include.is_none() && self.exclude.is_empty()
  }
}

impl AssetInclusion for AssetSelection {
  fn is_included(&self, unit: &AssetUnit) -> bool {
    self.is_scope_included(&unit.scope())
  }
}

impl From<AssetSelectionFile> for AssetSelection {
  fn from(file: AssetSelectionFile) -> Self {
    let include = normalise_list(file.include);
    let exclude = normalise_list(file.exclude);

    Self {
      include: (!include.is_empty()).then_some(include),
      exclude,
    }
  }
}

/// Convert raw rules into a sorted, de-duplicated set without blanks.
fn normalise_list(values: impl IntoIterator<Item = String>) -> BTreeSet<String> {
  values
    .into_iter()
    .map(|value| value.trim().trim_matches('/').to_string())
    .filter(|value| !value.is_empty())
    .collect()
}

fn scope_matches(rule: &str, candidate: &str) -> bool {
  if candidate == rule {
    return true;
  }

  candidate
    .strip_prefix(rule)
    .is_some_and(|suffix| suffix.starts_with('/'))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::AssetCategory;
  use tempfile::tempdir;

  fn unit(category: AssetCategory, name: &str) -> AssetUnit {
    AssetUnit {
      category,
      name: name.into(),
    }
  }

  #[test]
  fn defaults_to_including_everything() {
    let selection = AssetSelection::default();
    assert!(selection.is_unfiltered());
    assert!(selection.is_included(&unit(AssetCategory::Blocks, "hero")));
  }

  #[test]
  fn category_rules_cover_every_folder_in_it() {
    let selection = AssetSelection::from_rules(Vec::new(), vec!["plugins".into()]);

    assert!(!selection.is_included(&unit(AssetCategory::Plugins, "sidebar")));
    assert!(selection.is_included(&unit(AssetCategory::Blocks, "sidebar")));
  }

  #[test]
  fn exclusion_wins_over_inclusion() {
    let selection = AssetSelection::from_rules(
      vec!["blocks".into()],
      vec!["blocks/legacy-slider".into(), " ".into()],
    );

    assert!(selection.is_included(&unit(AssetCategory::Blocks, "hero")));
    assert!(!selection.is_included(&unit(AssetCategory::Blocks, "legacy-slider")));
    assert!(!selection.is_included(&unit(AssetCategory::Extensions, "hero")));
  }

  #[test]
  fn prefix_rules_need_a_path_boundary() {
    let selection = AssetSelection::from_rules(vec!["blocks/hero".into()], Vec::new());
    assert!(selection.is_included(&unit(AssetCategory::Blocks, "hero")));
    assert!(!selection.is_included(&unit(AssetCategory::Blocks, "hero-banner")));
  }

  #[test]
  fn normalises_whitespace_and_duplicates() {
    let normalised: Vec<String> =
      normalise_list(vec!["  blocks/ ".into(), "plugins".into(), "blocks".into(), String::new()])
        .into_iter()
        .collect();

    assert_eq!(normalised, vec![
      String::from("blocks"),
      String::from("plugins")
    ]);
  }

  #[test]
  fn load_from_path_returns_default_for_missing_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let selection = AssetSelection::load_from_path(temp.path().join(DEFAULT_SELECTION_FILE))
      .expect("missing files should not produce an error");
    assert!(selection.is_unfiltered());
  }

  #[test]
  fn load_from_path_reports_parse_errors() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_SELECTION_FILE);
    std::fs::write(&path, "[").expect("failed to write selection file");

    let err = AssetSelection::load_from_path(&path).unwrap_err();
    assert!(matches!(err, SelectionError::Parse { .. }));
  }

  #[test]
  fn load_from_path_reads_configuration() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_SELECTION_FILE);
    std::fs::write(&path, r#"{"include": ["blocks"], "exclude": ["blocks/old"]}"#)
      .expect("failed to write selection file");

    let selection =
      AssetSelection::load_from_path(&path).expect("configuration should load successfully");

    assert!(selection.is_included(&unit(AssetCategory::Blocks, "hero")));
    assert!(!selection.is_included(&unit(AssetCategory::Blocks, "old")));
    assert!(!selection.is_included(&unit(AssetCategory::Plugins, "hero")));
  }
}
