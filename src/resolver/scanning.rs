//! Directory scanning utilities for discovering conventional asset files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{EnqueuesError, Result};

/// Sorted names of the asset folders directly under `dir`.
///
/// Hidden folders are skipped, as are names that cannot appear in a handle or entry key. Symlinked
/// folders are followed. A missing directory yields no folders, the same as a glob with no
/// matches.
pub fn list_asset_folders(dir: &Path) -> Result<Vec<String>> {
  let entries = match fs::read_dir(dir) {
    Ok(entries) => entries,
    Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
    Err(err) => return Err(EnqueuesError::io(dir, err)),
  };

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|err| EnqueuesError::io(dir, err))?;
    let path = entry.path();
    if !path.is_dir() {
      continue;
    }

    let name = match entry.file_name().into_string() {
      Ok(name) => name,
      Err(raw) => {
        log::warn!("skipping {}: folder name is not UTF-8", dir.join(raw).display());
        continue;
      }
    };
    if name.starts_with('.') {
      continue;
    }
    if !is_slug(&name) {
      log::warn!(
        "skipping {}: folder names may only use letters, digits, `-` and `_`",
        path.display()
      );
      continue;
    }
    names.push(name);
  }

  names.sort();
  Ok(names)
}

fn is_slug(name: &str) -> bool {
  !name.is_empty()
    && name
      .bytes()
      .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

/// Path of `{stem}.{extension}` inside a folder when it exists as a regular file.
pub fn find_role_file(folder: &Path, stem: &str, extension: &str) -> Option<PathBuf> {
  let candidate = folder.join(format!("{stem}.{extension}"));
  candidate.is_file().then_some(candidate)
}
