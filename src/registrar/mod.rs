//! Declares compiled artifacts to the host and attaches localized data.
//!
//! A pass walks every folder under `{dist}/{category}/`, locates the artifacts for the pass's
//! render context and hands them to an [`AssetHost`]. A folder that was not built, or whose
//! sidecar is unreadable, is recorded in the [`PassReport`] and its siblings are still
//! processed. In [`EnvironmentMode::Local`] the same conditions abort the pass when they
//! concern a required role.

mod localization;

use std::path::Path;

pub use localization::{
  LocalizationProviders, LocalizedData, LocalizedDataProvider, NoLocalizedData, global_var_name,
};

use crate::error::{EnqueuesError, Result};
use crate::locator::ArtifactLocator;
use crate::models::{
  AssetRole, AssetUnit, CompiledArtifact, EntryKey, FileKind, RegistrationContext,
};
use crate::project::{EnvironmentMode, ProjectLayout};
use crate::resolver::list_asset_folders;
use crate::roles::RoleTable;
use crate::selection::{AssetInclusion, IncludeAll};

/// Capabilities the host asset pipeline provides.
pub trait AssetHost {
  /// Declare a script, activating it on the current request when `activate_now` is set.
  fn register_script(
    &mut self,
    handle: &str,
    url: &str,
    dependencies: &[String],
    version: &str,
    activate_now: bool,
  );

  /// Declare a stylesheet, activating it on the current request when `activate_now` is set.
  fn register_style(&mut self, handle: &str, url: &str, version: &str, activate_now: bool);

  /// Expose `data` to the page as the global `var_name`, printed alongside `handle`.
  fn attach_global_data(&mut self, handle: &str, var_name: &str, data: &LocalizedData);

  /// Register a block from its metadata file. Returns `false` when the host rejected it.
  fn register_block_type(&mut self, name: &str, metadata_file: &Path) -> bool;
}

/// Handle an artifact is registered under, `{namespace}/{name}-{stem}`.
pub fn asset_handle(namespace: &str, name: &str, stem: &str) -> String {
  format!("{namespace}/{name}-{stem}")
}

/// Declare one artifact to the host and attach its localized data.
///
/// Returns the handle used. Localized data is only attached to scripts, and only when the
/// provider returns a non-empty payload.
pub fn register_asset<H: AssetHost + ?Sized>(
  host: &mut H,
  layout: &ProjectLayout,
  artifact: &CompiledArtifact,
  context: RegistrationContext,
  provider: &dyn LocalizedDataProvider,
) -> String {
  let handle = asset_handle(&layout.namespace, &artifact.name, artifact.stem);
  let activate_now = !context.register_only;

  match artifact.kind {
    FileKind::Stylesheet => {
      host.register_style(&handle, &artifact.url, &artifact.version, activate_now);
    }
    FileKind::Script => {
      host.register_script(
        &handle,
        &artifact.url,
        &artifact.dependencies,
        &artifact.version,
        activate_now,
      );

      let data = provider.localized_data(context.category, &artifact.name);
      if !data.is_empty() {
        let var_name = global_var_name(&layout.global_prefix, context.category);
        host.attach_global_data(&handle, &var_name, &data);
      }
    }
  }

  log::info!(
    "{} {handle} ({})",
    if activate_now { "enqueued" } else { "registered" },
    artifact.url
  );
  handle
}

/// Outcome of one registration pass.
#[derive(Debug, Default)]
pub struct PassReport {
  /// Handles declared to the host, in registration order.
  pub registered: Vec<String>,
  /// Roles with no compiled artifact.
  pub missing: Vec<EntryKey>,
  /// Folders whose artifacts could not be read.
  pub failed: Vec<(AssetUnit, EnqueuesError)>,
}

impl PassReport {
  /// Fold another report into this one.
  pub fn extend(&mut self, other: PassReport) {
    self.registered.extend(other.registered);
    self.missing.extend(other.missing);
    self.failed.extend(other.failed);
  }
}

/// Runs registration passes for one project.
pub struct Registrar<'a> {
  locator: ArtifactLocator<'a>,
  roles: &'a RoleTable,
  localization: &'a LocalizationProviders,
  mode: EnvironmentMode,
  selection: &'a dyn AssetInclusion,
}

impl<'a> Registrar<'a> {
  /// Registrar over every compiled folder.
  pub fn new(
    locator: ArtifactLocator<'a>,
    roles: &'a RoleTable,
    localization: &'a LocalizationProviders,
    mode: EnvironmentMode,
  ) -> Self {
    Self {
      locator,
      roles,
      localization,
      mode,
      selection: &IncludeAll,
    }
  }

  /// Restrict passes to the folders accepted by `selection`.
  pub fn with_selection(mut self, selection: &'a dyn AssetInclusion) -> Self {
    self.selection = selection;
    self
  }

  /// Locate and register every folder of a category for one render context.
  pub fn run_pass<H: AssetHost + ?Sized>(
    &self,
    host: &mut H,
    context: RegistrationContext,
  ) -> Result<PassReport> {
    let mut report = PassReport::default();
    let dist_dir = self.locator.dist_dir(context.category);

    if !dist_dir.is_dir() {
      let err = EnqueuesError::MissingDistDirectory { path: dist_dir };
      if self.mode.is_strict() {
        return Err(err);
      }
      log::warn!("{err}, skipping {} pass", context.category);
      return Ok(report);
    }

    for name in list_asset_folders(&dist_dir)? {
      let unit = AssetUnit {
        category: context.category,
        name,
      };
      if !self.selection.is_included(&unit) {
        continue;
      }
      self.register_unit(host, &unit, context, &mut report)?;
    }

    Ok(report)
  }

  fn register_unit<H: AssetHost + ?Sized>(
    &self,
    host: &mut H,
    unit: &AssetUnit,
    context: RegistrationContext,
    report: &mut PassReport,
  ) -> Result<()> {
    let provider = self.localization.provider(context.category);

    for kind in [FileKind::Stylesheet, FileKind::Script] {
      let role = AssetRole::new(context.render_context, kind);
      if !self.roles.roles(unit.category).contains(&role) {
        continue;
      }

      match self
        .locator
        .locate(unit.category, &unit.name, context.render_context, kind)
      {
        Ok(Some(artifact)) => {
          let handle = register_asset(host, self.locator.layout(), &artifact, context, provider);
          report.registered.push(handle);
        }
        Ok(None) => {
          if self.mode.is_strict() && self.roles.is_required(role) {
            return Err(EnqueuesError::ArtifactNotFound {
              category: unit.category,
              name: unit.name.clone(),
              stem: role.stem().to_string(),
            });
          }
          log::debug!("no compiled {} for {}", role.stem(), unit.scope());
          report.missing.push(EntryKey::new(unit, role));
        }
        Err(err) => {
          if self.mode.is_strict() {
            return Err(err);
          }
          log::warn!("skipping {}: {err}", unit.scope());
          report.failed.push((unit.clone(), err));
        }
      }
    }
    Ok(())
  }
}
