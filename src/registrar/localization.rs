use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::models::AssetCategory;

/// Payload attached to a registered script as a page global.
pub type LocalizedData = Map<String, Value>;

/// Supplies the localized data for one asset folder.
pub trait LocalizedDataProvider {
  /// Data for `name` in `category`; an empty map attaches nothing.
  fn localized_data(&self, category: AssetCategory, name: &str) -> LocalizedData;
}

impl<F> LocalizedDataProvider for F
where
  F: Fn(AssetCategory, &str) -> LocalizedData,
{
  fn localized_data(&self, category: AssetCategory, name: &str) -> LocalizedData {
    self(category, name)
  }
}

/// Provider that never has data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalizedData;

impl LocalizedDataProvider for NoLocalizedData {
  fn localized_data(&self, _category: AssetCategory, _name: &str) -> LocalizedData {
    LocalizedData::new()
  }
}

/// Localized data providers keyed by category.
#[derive(Default)]
pub struct LocalizationProviders {
  providers: BTreeMap<AssetCategory, Box<dyn LocalizedDataProvider>>,
}

impl LocalizationProviders {
  /// Registry without providers.
  pub fn new() -> Self {
    Self::default()
  }

  /// Install the provider used for one category.
  pub fn with_provider(
    mut self,
    category: AssetCategory,
    provider: impl LocalizedDataProvider + 'static,
  ) -> Self {
    self.providers.insert(category, Box::new(provider));
    self
  }

  /// Provider for a category, falling back to [`NoLocalizedData`].
  pub fn provider(&self, category: AssetCategory) -> &dyn LocalizedDataProvider {
    match self.providers.get(&category) {
      Some(provider) => provider.as_ref(),
      None => &NoLocalizedData,
    }
  }
}

impl fmt::Debug for LocalizationProviders {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LocalizationProviders")
      .field("categories", &self.providers.keys().collect::<Vec<_>>())
      .finish()
  }
}

/// Global variable name for a category's payload, `{prefix}{Category}Config`.
pub fn global_var_name(prefix: &str, category: AssetCategory) -> String {
  format!("{prefix}{}Config", category.capitalized())
}
