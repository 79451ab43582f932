use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use regex::Regex;

use crate::error::{EnqueuesError, Result};

/// Matches compiled file names for one stem and extension.
///
/// Accepts `{stem}.{ext}`, `{stem}.{hash}.{ext}` and `{stem}.{ext}.{hash}`. Source maps
/// (`{stem}.{ext}.map`) are not artifacts.
#[derive(Debug, Clone)]
pub struct CompiledName {
  pattern: Regex,
}

impl CompiledName {
  /// Matcher for `stem` with `extension`.
  pub fn new(stem: &str, extension: &str) -> Self {
    let pattern = Regex::new(&format!(
      r"^{}(?:\.[A-Za-z0-9_-]+)?\.{}(?:\.(?P<trailing>[0-9A-Za-z]+))?$",
      regex::escape(stem),
      regex::escape(extension)
    ))
    .expect("invalid compiled name regex");
    Self { pattern }
  }

  /// Whether `name` is a compiled file for this stem.
  pub fn matches(&self, name: &str) -> bool {
    self.pattern.captures(name).is_some_and(|caps| {
      caps
        .name("trailing")
        .is_none_or(|trailing| trailing.as_str() != "map")
    })
  }
}

/// Find the compiled file for a stem inside `folder`.
///
/// An unhashed `{stem}.{ext}` wins. Otherwise the most recently modified hashed candidate is
/// used, ties broken by name so repeated lookups agree. Symlinks are followed.
pub fn find_compiled_file(folder: &Path, stem: &str, extension: &str) -> Result<Option<PathBuf>> {
  let entries = match fs::read_dir(folder) {
    Ok(entries) => entries,
    Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
    Err(err) => return Err(EnqueuesError::io(folder, err)),
  };

  let exact = format!("{stem}.{extension}");
  let compiled = CompiledName::new(stem, extension);
  let mut best: Option<(SystemTime, String)> = None;

  for entry in entries {
    let entry = entry.map_err(|err| EnqueuesError::io(folder, err))?;
    let path = entry.path();
    if !path.is_file() {
      continue;
    }

    let name = entry.file_name().to_string_lossy().to_string();
    if name == exact {
      return Ok(Some(path));
    }
    if !compiled.matches(&name) {
      continue;
    }

    let modified = fs::metadata(&path)
      .and_then(|meta| meta.modified())
      .unwrap_or(SystemTime::UNIX_EPOCH);
    let replace = match &best {
      None => true,
      Some((best_modified, best_name)) => {
        modified > *best_modified || (modified == *best_modified && name < *best_name)
      }
    };
    if replace {
      best = Some((modified, name));
    }
  }

  Ok(best.map(|(_, name)| folder.join(name)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn pattern_tolerates_content_hashes() {
    let compiled = CompiledName::new("index", "js");
    assert!(compiled.matches("index.js"));
    assert!(compiled.matches("index.abcd123.js"));
    assert!(!compiled.matches("index.asset.json"));
    assert!(!compiled.matches("index.js.map"));
    assert!(!compiled.matches("indexer.js"));
    assert!(!compiled.matches("index.abcd123.css"));
  }

  #[test]
  fn pattern_accepts_hash_after_extension() {
    let compiled = CompiledName::new("style", "css");
    assert!(compiled.matches("style.css.abcd123"));
    assert!(!compiled.matches("style.css.map"));
    assert!(!compiled.matches("style.css.ab-cd"));
    assert!(!compiled.matches("styles.css.abcd123"));
  }

  #[test]
  fn prefers_the_unhashed_file() -> std::io::Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("style.0f0f.css"), "")?;
    fs::write(dir.path().join("style.css"), "")?;

    let found = find_compiled_file(dir.path(), "style", "css").unwrap();
    assert_eq!(found, Some(dir.path().join("style.css")));
    Ok(())
  }

  #[test]
  fn finds_hashed_file_by_stem_prefix() -> std::io::Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("index.abcd123.js"), "")?;
    fs::write(dir.path().join("index.abcd123.asset.json"), "{}")?;
    fs::write(dir.path().join("view.abcd123.js"), "")?;

    let found = find_compiled_file(dir.path(), "index", "js").unwrap();
    assert_eq!(found, Some(dir.path().join("index.abcd123.js")));
    Ok(())
  }

  #[test]
  fn finds_file_hashed_after_extension() -> std::io::Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("index.js.abcd123"), "")?;
    fs::write(dir.path().join("index.js.map"), "")?;

    let found = find_compiled_file(dir.path(), "index", "js").unwrap();
    assert_eq!(found, Some(dir.path().join("index.js.abcd123")));
    Ok(())
  }

  #[cfg(unix)]
  #[test]
  fn follows_symlinked_artifacts() -> std::io::Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("built.js"), "")?;
    std::os::unix::fs::symlink(dir.path().join("built.js"), dir.path().join("view.js"))?;

    let found = find_compiled_file(dir.path(), "view", "js").unwrap();
    assert_eq!(found, Some(dir.path().join("view.js")));
    Ok(())
  }

  #[test]
  fn missing_folder_or_file_is_not_an_error() -> std::io::Result<()> {
    let dir = tempdir()?;
    assert_eq!(find_compiled_file(&dir.path().join("absent"), "index", "js").unwrap(), None);
    assert_eq!(find_compiled_file(dir.path(), "index", "js").unwrap(), None);
    Ok(())
  }
}
