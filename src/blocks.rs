//! Block registration from compiled metadata files and block category listing.

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::error::{EnqueuesError, Result};
use crate::models::AssetCategory;
use crate::project::{EnvironmentMode, ProjectLayout};
use crate::registrar::AssetHost;
use crate::resolver::list_asset_folders;

/// Looks up translated user-facing strings.
pub trait Translator {
  /// Translation of `text` within `domain`.
  fn translate(&self, text: &str, domain: &str) -> String;
}

/// Translator returning every string unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
  fn translate(&self, text: &str, _domain: &str) -> String {
    text.to_string()
  }
}

impl<F> Translator for F
where
  F: Fn(&str, &str) -> String,
{
  fn translate(&self, text: &str, domain: &str) -> String {
    self(text, domain)
  }
}

/// Register every compiled block with the host through its metadata file.
///
/// Returns the namespaced names of the blocks the host accepted.
pub fn register_blocks<H: AssetHost + ?Sized>(
  host: &mut H,
  root: &Path,
  layout: &ProjectLayout,
  mode: EnvironmentMode,
) -> Result<Vec<String>> {
  let dist_dir = layout.dist_category_dir(root, AssetCategory::Blocks);
  if !dist_dir.is_dir() {
    let err = EnqueuesError::MissingDistDirectory { path: dist_dir };
    if mode.is_strict() {
      return Err(err);
    }
    log::warn!("{err}, no blocks registered");
    return Ok(Vec::new());
  }

  let mut registered = Vec::new();
  for folder in list_asset_folders(&dist_dir)? {
    let block_name = format!("{}/{}", layout.namespace, folder);
    let metadata_file = dist_dir.join(&folder).join(&layout.block_metadata_file);

    if !metadata_file.is_file() {
      let err = EnqueuesError::MissingBlockMetadata {
        path: metadata_file,
      };
      if mode.is_strict() {
        return Err(err);
      }
      log::warn!("{err}");
      continue;
    }

    if host.register_block_type(&block_name, &metadata_file) {
      log::info!("registered block {block_name}");
      registered.push(block_name);
    } else if mode.is_strict() {
      return Err(EnqueuesError::BlockRegistrationFailed { name: block_name });
    } else {
      log::warn!("host rejected block {block_name}");
    }
  }

  Ok(registered)
}

/// An entry in the editor's block category list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockCategory {
  /// Category slug blocks refer to.
  pub slug: String,
  /// Title shown in the inserter.
  pub title: String,
  /// Icon markup, dashicon name, or a path relative to the project root of an SVG file.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
}

/// Append the project's categories to `existing`, translating titles and inlining SVG icons.
pub fn block_categories(
  mut existing: Vec<BlockCategory>,
  configured: &[BlockCategory],
  root: &Path,
  layout: &ProjectLayout,
  translator: &dyn Translator,
) -> Vec<BlockCategory> {
  for category in configured {
    let mut category = category.clone();
    if let Some(icon) = category.icon.take() {
      category.icon = Some(embed_svg_icon(root, &icon).unwrap_or(icon));
    }
    category.title = translator.translate(&category.title, &layout.text_domain);
    existing.push(category);
  }
  existing
}

/// `<img>` tag carrying the SVG at `root/icon` as a base64 data URI.
///
/// `None` when the path does not point to a readable, non-empty file.
pub fn embed_svg_icon(root: &Path, icon: &str) -> Option<String> {
  let svg_file = root.join(icon.trim_start_matches('/'));
  let content = fs::read(&svg_file).ok()?;
  if content.is_empty() {
    return None;
  }

  let encoded = general_purpose::STANDARD.encode(content);
  Some(format!(
    r#"<img src="data:image/svg+xml;base64,{encoded}" alt="Custom Icon" width="20" height="20">"#
  ))
}
