//! Error type shared by the resolver, locator and registrar.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::AssetCategory;

/// Crate-wide result alias.
pub type Result<T, E = EnqueuesError> = std::result::Result<T, E>;

/// Failures raised while resolving entries or registering compiled assets.
#[derive(Debug, Error)]
pub enum EnqueuesError {
  /// Two source files resolved to the same entry key.
  #[error("duplicate entry key {key}: {} and {}", first.display(), second.display())]
  DuplicateEntryKey {
    /// Key produced by both files.
    key: String,
    /// Path already present in the map.
    first: PathBuf,
    /// Path that collided with it.
    second: PathBuf,
  },
  /// The compiled output directory for a category does not exist.
  #[error("Block Editor dist dir {} missing", path.display())]
  MissingDistDirectory {
    /// Directory that was expected.
    path: PathBuf,
  },
  /// A compiled script has no metadata sidecar next to it.
  #[error("run the bundler for the Block Editor asset files, the {} file is missing", path.display())]
  MissingMetadataFile {
    /// Sidecar path that was expected.
    path: PathBuf,
  },
  /// A required role has no compiled artifact.
  #[error("compiled {stem} bundle missing for {category}/{name}")]
  ArtifactNotFound {
    /// Category of the asset folder.
    category: AssetCategory,
    /// Asset folder name.
    name: String,
    /// Role stem that was searched for.
    stem: String,
  },
  /// A block folder has no metadata file.
  #[error("Block Editor block metadata file {} is missing", path.display())]
  MissingBlockMetadata {
    /// Metadata path that was expected.
    path: PathBuf,
  },
  /// The host refused to register a block.
  #[error("Block Editor block failed to register {name}")]
  BlockRegistrationFailed {
    /// Namespaced block name.
    name: String,
  },
  /// Filesystem access failed.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// A metadata sidecar could not be parsed.
  #[error("failed to parse {}: {source}", path.display())]
  Metadata {
    /// Sidecar path.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

impl EnqueuesError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
