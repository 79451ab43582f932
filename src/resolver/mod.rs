//! Build-time resolution of conventional source files into bundler entry points.
//!
//! Every asset folder under `{source}/{category}/` may hold up to six conventional files. Each
//! role is expanded into a partial map, then the partials are merged into a single
//! [`EntryMap`]. Two files resolving to the same key abort the whole pass.

mod merge;
mod scanning;

use std::path::{Path, PathBuf};

pub use merge::merge_entries;
pub use scanning::{find_role_file, list_asset_folders};

use crate::error::{EnqueuesError, Result};
use crate::models::{AssetCategory, AssetRole, AssetUnit, EntryKey, EntryMap};
use crate::project::ProjectLayout;
use crate::roles::RoleTable;
use crate::selection::{AssetInclusion, IncludeAll};

/// Resolves the entry map for one project root.
pub struct EntryResolver<'a> {
  root: PathBuf,
  layout: &'a ProjectLayout,
  roles: &'a RoleTable,
  selection: &'a dyn AssetInclusion,
}

impl<'a> EntryResolver<'a> {
  /// Resolver over every asset folder of `root`.
  pub fn new(root: impl Into<PathBuf>, layout: &'a ProjectLayout, roles: &'a RoleTable) -> Self {
    Self {
      root: root.into(),
      layout,
      roles,
      selection: &IncludeAll,
    }
  }

  /// Restrict resolution to the folders accepted by `selection`.
  pub fn with_selection(mut self, selection: &'a dyn AssetInclusion) -> Self {
    self.selection = selection;
    self
  }

  /// Scan the source tree and merge every role into one entry map.
  pub fn resolve(&self) -> Result<EntryMap> {
    let root = std::path::absolute(&self.root).map_err(|err| EnqueuesError::io(&self.root, err))?;
    log::debug!(
      "resolving entries under {} (scripts: {}, styles: {})",
      root.display(),
      self.layout.script_source_dir,
      self.layout.style_source_dir
    );

    let mut partials = Vec::new();
    for category in self.roles.categories() {
      for role in self.roles.roles(category) {
        partials.push(self.role_entries(&root, category, *role)?);
      }
    }

    let merged = merge_entries(partials)?;
    log::debug!("resolved {} entries", merged.len());
    Ok(merged)
  }

  /// Entries for one category and role, equivalent to expanding
  /// `{source}/{category}/*/{stem}.{ext}`.
  fn role_entries(
    &self,
    root: &Path,
    category: AssetCategory,
    role: AssetRole,
  ) -> Result<Vec<(EntryKey, PathBuf)>> {
    let category_dir = self.layout.source_category_dir(root, category, role.kind);
    let extension = self.layout.source_extension(role.kind);

    let mut entries = Vec::new();
    for name in list_asset_folders(&category_dir)? {
      let unit = AssetUnit { category, name };
      if !self.selection.is_included(&unit) {
        continue;
      }

      let folder = category_dir.join(&unit.name);
      if let Some(path) = find_role_file(&folder, role.stem(), extension) {
        entries.push((EntryKey::new(&unit, role), path));
      }
    }
    Ok(entries)
  }
}

/// Resolve every folder of `root` with the given layout and role table.
pub fn resolve_entries(root: &Path, layout: &ProjectLayout, roles: &RoleTable) -> Result<EntryMap> {
  EntryResolver::new(root, layout, roles).resolve()
}

/// Render an entry map as the JSON object a bundler entry configuration imports.
pub fn render_entry_map(entries: &EntryMap) -> serde_json::Result<String> {
  let object: serde_json::Map<String, serde_json::Value> = entries
    .iter()
    .map(|(key, path)| {
      (
        key.to_string(),
        serde_json::Value::String(path.to_string_lossy().into_owned()),
      )
    })
    .collect();
  serde_json::to_string_pretty(&object)
}
