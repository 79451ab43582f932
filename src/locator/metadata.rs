use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{EnqueuesError, Result};
use crate::models::AssetMetadata;

/// Extension of the plain sidecar, tried after the configured suffix.
pub const META_SUFFIX: &str = "meta";

/// Sidecar paths to try for a compiled script, most specific first.
///
/// `index.abcd123.js` with suffix `asset.json` yields `index.abcd123.asset.json`, then the
/// unhashed `index.asset.json`, then `index.meta`.
pub fn sidecar_candidates(script: &Path, stem: &str, suffix: &str) -> Vec<PathBuf> {
  let mut candidates = Vec::new();
  let Some(file_name) = script.file_name().map(|name| name.to_string_lossy()) else {
    return candidates;
  };

  let base = file_name.strip_suffix(".js").unwrap_or(file_name.as_ref());
  let base = base.split_once(".js.").map_or(base, |(head, _)| head);
  for name in [
    format!("{base}.{suffix}"),
    format!("{stem}.{suffix}"),
    format!("{stem}.{META_SUFFIX}"),
  ] {
    let candidate = script.with_file_name(name);
    if !candidates.contains(&candidate) {
      candidates.push(candidate);
    }
  }
  candidates
}

/// Load the first existing sidecar; `Ok(None)` when none exists.
pub fn load_sidecar(candidates: &[PathBuf]) -> Result<Option<AssetMetadata>> {
  for path in candidates {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(err) if err.kind() == ErrorKind::NotFound => continue,
      Err(err) => return Err(EnqueuesError::io(path, err)),
    };

    let metadata = serde_json::from_str(&content).map_err(|source| EnqueuesError::Metadata {
      path: path.clone(),
      source,
    })?;
    return Ok(Some(metadata));
  }
  Ok(None)
}

/// Last-modified time in seconds since the epoch, used when no explicit version exists.
pub fn modified_version(path: &Path) -> Result<String> {
  let modified = fs::metadata(path)
    .and_then(|meta| meta.modified())
    .map_err(|err| EnqueuesError::io(path, err))?;
  let seconds = modified
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs())
    .unwrap_or_default();
  Ok(seconds.to_string())
}
