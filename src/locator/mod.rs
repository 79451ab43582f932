//! Runtime lookup of compiled artifacts produced from the conventional source files.
//!
//! The locator re-derives the role stem through the same table as the resolver, finds the
//! built file under `{dist}/{category}/{name}/` (tolerating content hashes), and reads the
//! dependency and version sidecar for scripts.

mod candidates;
mod metadata;
mod url;

use std::path::{Path, PathBuf};

pub use candidates::{CompiledName, find_compiled_file};
pub use metadata::{META_SUFFIX, load_sidecar, modified_version, sidecar_candidates};
pub use url::make_asset_url;

use crate::error::{EnqueuesError, Result};
use crate::models::{AssetCategory, CompiledArtifact, FileKind, RenderContext};
use crate::project::ProjectLayout;
use crate::roles::role_for;

/// Finds compiled output below a project root.
#[derive(Debug, Clone)]
pub struct ArtifactLocator<'a> {
  root: PathBuf,
  layout: &'a ProjectLayout,
}

impl<'a> ArtifactLocator<'a> {
  /// Locator for the project rooted at `root`.
  pub fn new(root: impl Into<PathBuf>, layout: &'a ProjectLayout) -> Self {
    Self {
      root: root.into(),
      layout,
    }
  }

  /// Layout the locator derives paths from.
  pub fn layout(&self) -> &'a ProjectLayout {
    self.layout
  }

  /// Compiled output directory of a category.
  pub fn dist_dir(&self, category: AssetCategory) -> PathBuf {
    self.layout.dist_category_dir(&self.root, category)
  }

  /// Find the artifact for one folder, context and kind.
  ///
  /// `Ok(None)` means the role was not built for this folder, which is not an error by itself.
  pub fn locate(
    &self,
    category: AssetCategory,
    name: &str,
    context: RenderContext,
    kind: FileKind,
  ) -> Result<Option<CompiledArtifact>> {
    let stem = role_for(context, kind);
    let folder = self.dist_dir(category).join(name);
    let extension = self.layout.compiled_extension(kind);

    let Some(path) = find_compiled_file(&folder, stem, extension)? else {
      return Ok(None);
    };

    let (dependencies, version) = match kind {
      FileKind::Script => self.script_metadata(&path, stem)?,
      FileKind::Stylesheet => (Vec::new(), modified_version(&path)?),
    };

    let file_name = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();
    let url = make_asset_url(self.layout, category, name, &file_name);

    Ok(Some(CompiledArtifact {
      category,
      name: name.to_string(),
      stem,
      kind,
      path,
      url,
      dependencies,
      version,
    }))
  }

  fn script_metadata(&self, script: &Path, stem: &str) -> Result<(Vec<String>, String)> {
    let candidates = sidecar_candidates(script, stem, &self.layout.metadata_suffix);
    match load_sidecar(&candidates)? {
      Some(metadata) if !metadata.version.is_empty() => {
        Ok((metadata.dependencies, metadata.version))
      }
      Some(metadata) => Ok((metadata.dependencies, modified_version(script)?)),
      None => {
        if let Some(expected) = candidates.into_iter().next() {
          log::warn!("{}", EnqueuesError::MissingMetadataFile { path: expected });
        }
        Ok((Vec::new(), modified_version(script)?))
      }
    }
  }
}

/// Locate one artifact without keeping a locator around.
pub fn locate_artifact(
  root: &Path,
  layout: &ProjectLayout,
  category: AssetCategory,
  name: &str,
  context: RenderContext,
  kind: FileKind,
) -> Result<Option<CompiledArtifact>> {
  ArtifactLocator::new(root, layout).locate(category, name, context, kind)
}
