use crate::models::AssetCategory;
use crate::project::ProjectLayout;

/// Public URL of a compiled file.
///
/// The generated URL always uses forward slashes, regardless of the native directory
/// separator used when the file was discovered on disk.
pub fn make_asset_url(
  layout: &ProjectLayout,
  category: AssetCategory,
  name: &str,
  file_name: &str,
) -> String {
  let relative = format!(
    "{}/{}/{}/{}",
    layout.dist_dir.trim_matches('/'),
    category,
    name,
    file_name
  )
  .replace('\\', "/");
  format!("{}/{}", layout.base_url.trim_end_matches('/'), relative)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn joins_base_url_and_dist_path() {
    let layout = ProjectLayout {
      base_url: "https://example.com/wp-content/themes/site/".into(),
      ..ProjectLayout::default()
    };
    let url = make_asset_url(&layout, AssetCategory::Plugins, "sidebar", "index.abcd.js");
    assert_eq!(
      url,
      "https://example.com/wp-content/themes/site/dist/block-editor/plugins/sidebar/index.abcd.js"
    );
  }

  #[test]
  fn empty_base_url_yields_root_relative_path() {
    let layout = ProjectLayout {
      dist_dir: "dist\\block-editor".into(),
      ..ProjectLayout::default()
    };
    let url = make_asset_url(&layout, AssetCategory::Blocks, "hero", "style.css");
    assert_eq!(url, "/dist/block-editor/blocks/hero/style.css");
  }
}
