//! Role lookup table shared by the resolver and the locator.
//!
//! A file produced under a role at build time must be found under the same role at runtime,
//! so both sides derive file names exclusively through [`role_for`].

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{AssetCategory, AssetRole, FileKind, RenderContext};

/// Filename stem for a render context and file kind.
pub fn role_for(context: RenderContext, kind: FileKind) -> &'static str {
  match (context, kind) {
    (RenderContext::Editor, FileKind::Script) => "index",
    (RenderContext::Editor, FileKind::Stylesheet) => "editor",
    (RenderContext::View, _) => "view",
    (RenderContext::Frontend, FileKind::Script) => "script",
    (RenderContext::Frontend, FileKind::Stylesheet) => "style",
  }
}

/// Every role in resolver order: scripts first, then stylesheets.
pub const ALL_ROLES: [AssetRole; 6] = [
  AssetRole::new(RenderContext::Editor, FileKind::Script),
  AssetRole::new(RenderContext::Frontend, FileKind::Script),
  AssetRole::new(RenderContext::View, FileKind::Script),
  AssetRole::new(RenderContext::Editor, FileKind::Stylesheet),
  AssetRole::new(RenderContext::Frontend, FileKind::Stylesheet),
  AssetRole::new(RenderContext::View, FileKind::Stylesheet),
];

/// Which roles each category uses, and which of them must have compiled output.
#[derive(Debug, Clone)]
pub struct RoleTable {
  roles: BTreeMap<AssetCategory, Vec<AssetRole>>,
  required: BTreeSet<AssetRole>,
}

impl Default for RoleTable {
  fn default() -> Self {
    let mut table = Self::empty();
    table.set(AssetCategory::Blocks, ALL_ROLES.to_vec());
    table.set(
      AssetCategory::Plugins,
      ALL_ROLES
        .iter()
        .copied()
        .filter(|role| *role != AssetRole::new(RenderContext::Editor, FileKind::Stylesheet))
        .collect(),
    );
    table.set(AssetCategory::Extensions, ALL_ROLES.to_vec());
    table.require(AssetRole::new(RenderContext::Editor, FileKind::Script));
    table
  }
}

impl RoleTable {
  /// Table without categories or required roles.
  pub fn empty() -> Self {
    Self {
      roles: BTreeMap::new(),
      required: BTreeSet::new(),
    }
  }

  /// Replace the roles used by a category.
  pub fn set(&mut self, category: AssetCategory, roles: Vec<AssetRole>) -> &mut Self {
    self.roles.insert(category, roles);
    self
  }

  /// Mark a role whose absence is fatal in strict mode.
  pub fn require(&mut self, role: AssetRole) -> &mut Self {
    self.required.insert(role);
    self
  }

  /// Roles used by a category, empty when the category is not configured.
  pub fn roles(&self, category: AssetCategory) -> &[AssetRole] {
    self.roles.get(&category).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Categories present in the table.
  pub fn categories(&self) -> impl Iterator<Item = AssetCategory> + '_ {
    self.roles.keys().copied()
  }

  /// Whether a missing artifact for this role is a deployment error.
  pub fn is_required(&self, role: AssetRole) -> bool {
    self.required.contains(&role)
  }
}
