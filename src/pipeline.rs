//! Orchestrates the registration passes run for each host hook.
//!
//! Hosts fire a small set of hooks during a request. Instead of subscribing callbacks to a
//! global event bus, the pipeline owns an ordered [`PassSchedule`] and runs the passes bound
//! to a hook when [`EnqueuePipeline::dispatch`] is called.

use std::path::PathBuf;

use crate::blocks::{BlockCategory, Translator, Untranslated, block_categories, register_blocks};
use crate::error::Result;
use crate::locator::ArtifactLocator;
use crate::models::{AssetCategory, RegistrationContext, RenderContext};
use crate::project::{EnvironmentMode, ProjectLayout};
use crate::registrar::{AssetHost, LocalizationProviders, PassReport, Registrar};
use crate::roles::RoleTable;
use crate::selection::{AssetInclusion, IncludeAll};

/// Points in a request at which passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
  /// Host start-up; blocks are registered here.
  Init,
  /// Public page assets.
  FrontendAssets,
  /// Block editor screen assets.
  EditorAssets,
}

/// Unit of work bound to a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
  /// Register every compiled block through its metadata file.
  RegisterBlocks,
  /// Locate and register the artifacts of one category and context.
  Assets(RegistrationContext),
}

impl Pass {
  /// Asset pass for a category and context.
  pub fn assets(category: AssetCategory, render_context: RenderContext, register_only: bool) -> Self {
    Self::Assets(RegistrationContext {
      category,
      render_context,
      register_only,
    })
  }
}

/// Ordered hook-to-pass bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSchedule {
  passes: Vec<(Hook, Pass)>,
}

impl Default for PassSchedule {
  fn default() -> Self {
    use AssetCategory::{Blocks, Extensions, Plugins};
    use RenderContext::{Editor, Frontend, View};

    let mut schedule = Self::empty();
    schedule
      .on(Hook::Init, Pass::RegisterBlocks)
      .on(Hook::FrontendAssets, Pass::assets(Blocks, Frontend, true))
      .on(Hook::FrontendAssets, Pass::assets(Blocks, View, true))
      .on(Hook::FrontendAssets, Pass::assets(Plugins, Frontend, true))
      .on(Hook::FrontendAssets, Pass::assets(Plugins, View, true))
      .on(Hook::EditorAssets, Pass::assets(Plugins, Editor, false))
      .on(Hook::FrontendAssets, Pass::assets(Extensions, Frontend, true))
      .on(Hook::FrontendAssets, Pass::assets(Extensions, View, true))
      .on(Hook::EditorAssets, Pass::assets(Extensions, Editor, false));
    schedule
  }
}

impl PassSchedule {
  /// Schedule without bindings.
  pub fn empty() -> Self {
    Self { passes: Vec::new() }
  }

  /// Bind a pass to a hook after every pass already bound to it.
  pub fn on(&mut self, hook: Hook, pass: Pass) -> &mut Self {
    self.passes.push((hook, pass));
    self
  }

  /// Passes bound to a hook, in binding order.
  pub fn passes_for(&self, hook: Hook) -> impl Iterator<Item = &Pass> + '_ {
    self
      .passes
      .iter()
      .filter(move |(bound, _)| *bound == hook)
      .map(|(_, pass)| pass)
  }
}

/// Results of dispatching one hook.
#[derive(Debug, Default)]
pub struct HookReport {
  /// Blocks accepted by the host.
  pub blocks: Vec<String>,
  /// Asset registrations across every pass.
  pub assets: PassReport,
}

/// Runs scheduled passes against a host for one project.
pub struct EnqueuePipeline<'a> {
  root: PathBuf,
  layout: &'a ProjectLayout,
  roles: &'a RoleTable,
  localization: &'a LocalizationProviders,
  mode: EnvironmentMode,
  schedule: PassSchedule,
  categories: Vec<BlockCategory>,
  translator: Box<dyn Translator + 'a>,
  selection: &'a dyn AssetInclusion,
}

impl<'a> EnqueuePipeline<'a> {
  /// Pipeline with the default schedule and no block categories.
  pub fn new(
    root: impl Into<PathBuf>,
    layout: &'a ProjectLayout,
    roles: &'a RoleTable,
    localization: &'a LocalizationProviders,
    mode: EnvironmentMode,
  ) -> Self {
    Self {
      root: root.into(),
      layout,
      roles,
      localization,
      mode,
      schedule: PassSchedule::default(),
      categories: Vec::new(),
      translator: Box::new(Untranslated),
      selection: &IncludeAll,
    }
  }

  /// Replace the pass schedule.
  pub fn with_schedule(mut self, schedule: PassSchedule) -> Self {
    self.schedule = schedule;
    self
  }

  /// Categories appended by [`EnqueuePipeline::block_categories`], with their translator.
  pub fn with_block_categories(
    mut self,
    categories: Vec<BlockCategory>,
    translator: impl Translator + 'a,
  ) -> Self {
    self.categories = categories;
    self.translator = Box::new(translator);
    self
  }

  /// Restrict asset passes to the folders accepted by `selection`.
  pub fn with_selection(mut self, selection: &'a dyn AssetInclusion) -> Self {
    self.selection = selection;
    self
  }

  /// Run every pass bound to `hook`, in order.
  ///
  /// A pass error aborts the remaining passes; per-folder problems in production mode are
  /// collected in the report instead.
  pub fn dispatch<H: AssetHost + ?Sized>(&self, hook: Hook, host: &mut H) -> Result<HookReport> {
    let registrar = Registrar::new(
      ArtifactLocator::new(&self.root, self.layout),
      self.roles,
      self.localization,
      self.mode,
    )
    .with_selection(self.selection);

    let mut report = HookReport::default();
    for pass in self.schedule.passes_for(hook) {
      match pass {
        Pass::RegisterBlocks => {
          log::debug!("{hook:?}: registering blocks");
          report
            .blocks
            .extend(register_blocks(host, &self.root, self.layout, self.mode)?);
        }
        Pass::Assets(context) => {
          log::debug!(
            "{hook:?}: {} {:?} assets",
            context.category,
            context.render_context
          );
          report.assets.extend(registrar.run_pass(host, *context)?);
        }
      }
    }
    Ok(report)
  }

  /// Append the configured block categories to the host's list.
  pub fn block_categories(&self, existing: Vec<BlockCategory>) -> Vec<BlockCategory> {
    block_categories(
      existing,
      &self.categories,
      &self.root,
      self.layout,
      self.translator.as_ref(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::registrar::testing::{HostCall, RecordingHost};
  use crate::registrar::LocalizedData;
  use crate::selection::AssetSelection;
  use serde_json::json;
  use std::fs;
  use std::path::Path;
  use tempfile::tempdir;

  fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  fn built_project() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    write(dir.path(), "dist/block-editor/blocks/hero/block.json", "{}");
    write(dir.path(), "dist/block-editor/blocks/hero/view.abcd.js", "");
    write(dir.path(), "dist/block-editor/blocks/hero/style.css", "");
    write(dir.path(), "dist/block-editor/plugins/panel/index.js", "");
    write(
      dir.path(),
      "dist/block-editor/plugins/panel/index.asset.json",
      r#"{"dependencies": ["wp-plugins"], "version": "9f8e"}"#,
    );
    write(dir.path(), "dist/block-editor/extensions/cover/index.js", "");
    dir
  }

  fn handles(host: &RecordingHost) -> Vec<String> {
    host
      .calls
      .iter()
      .filter_map(|call| match call {
        HostCall::Script { handle, .. } | HostCall::Style { handle, .. } => Some(handle.clone()),
        _ => None,
      })
      .collect()
  }

  #[test]
  fn default_schedule_preserves_binding_order() {
    let schedule = PassSchedule::default();
    let editor: Vec<_> = schedule.passes_for(Hook::EditorAssets).copied().collect();
    assert_eq!(editor, vec![
      Pass::assets(AssetCategory::Plugins, RenderContext::Editor, false),
      Pass::assets(AssetCategory::Extensions, RenderContext::Editor, false),
    ]);
    assert_eq!(schedule.passes_for(Hook::FrontendAssets).count(), 6);
    assert_eq!(schedule.passes_for(Hook::Init).count(), 1);
  }

  #[test]
  fn frontend_hook_registers_without_activating() {
    let dir = built_project();
    let layout = ProjectLayout::default();
    let roles = RoleTable::default();
    let localization = LocalizationProviders::new();
    let pipeline =
      EnqueuePipeline::new(dir.path(), &layout, &roles, &localization, EnvironmentMode::Production);

    let mut host = RecordingHost::default();
    let report = pipeline.dispatch(Hook::FrontendAssets, &mut host).unwrap();

    assert_eq!(handles(&host), vec!["enqueues/hero-style", "enqueues/hero-view"]);
    assert!(host.calls.iter().all(|call| matches!(
      call,
      HostCall::Script { activate_now: false, .. } | HostCall::Style { activate_now: false, .. }
    )));
    assert!(!report.assets.missing.is_empty());
  }

  #[test]
  fn editor_hook_enqueues_plugins_then_extensions() {
    let dir = built_project();
    let layout = ProjectLayout::default();
    let roles = RoleTable::default();
    let localization = LocalizationProviders::new().with_provider(
      AssetCategory::Extensions,
      |_category: AssetCategory, name: &str| {
        let mut data = LocalizedData::new();
        data.insert("extension".into(), json!(name));
        data
      },
    );
    let pipeline =
      EnqueuePipeline::new(dir.path(), &layout, &roles, &localization, EnvironmentMode::Local);

    let mut host = RecordingHost::default();
    let report = pipeline.dispatch(Hook::EditorAssets, &mut host).unwrap();

    assert_eq!(report.assets.registered, vec![
      "enqueues/panel-index".to_string(),
      "enqueues/cover-index".to_string(),
    ]);
    assert!(matches!(
      &host.calls[0],
      HostCall::Script { dependencies, version, activate_now: true, .. }
        if dependencies == &vec!["wp-plugins".to_string()] && version == "9f8e"
    ));
    assert!(matches!(
      host.calls.last(),
      Some(HostCall::GlobalData { var_name, .. }) if var_name == "customBlockEditorExtensionsConfig"
    ));
  }

  #[test]
  fn init_hook_registers_blocks() {
    let dir = built_project();
    let layout = ProjectLayout::default();
    let roles = RoleTable::default();
    let localization = LocalizationProviders::new();
    let pipeline =
      EnqueuePipeline::new(dir.path(), &layout, &roles, &localization, EnvironmentMode::Local);

    let report = pipeline
      .dispatch(Hook::Init, &mut RecordingHost::default())
      .unwrap();
    assert_eq!(report.blocks, vec!["enqueues/hero".to_string()]);
  }

  #[test]
  fn selection_limits_asset_passes() {
    let dir = built_project();
    let layout = ProjectLayout::default();
    let roles = RoleTable::default();
    let localization = LocalizationProviders::new();
    let selection = AssetSelection::from_rules(Vec::new(), vec!["extensions".into()]);
    let pipeline =
      EnqueuePipeline::new(dir.path(), &layout, &roles, &localization, EnvironmentMode::Production)
        .with_selection(&selection);

    let report = pipeline
      .dispatch(Hook::EditorAssets, &mut RecordingHost::default())
      .unwrap();
    assert_eq!(report.assets.registered, vec!["enqueues/panel-index".to_string()]);
  }

  #[test]
  fn custom_schedule_replaces_defaults() {
    let dir = built_project();
    let layout = ProjectLayout::default();
    let roles = RoleTable::default();
    let localization = LocalizationProviders::new();
    let mut schedule = PassSchedule::empty();
    schedule.on(
      Hook::EditorAssets,
      Pass::assets(AssetCategory::Blocks, RenderContext::Frontend, false),
    );
    let pipeline =
      EnqueuePipeline::new(dir.path(), &layout, &roles, &localization, EnvironmentMode::Production)
        .with_schedule(schedule);

    let mut host = RecordingHost::default();
    pipeline.dispatch(Hook::EditorAssets, &mut host).unwrap();
    assert_eq!(handles(&host), vec!["enqueues/hero-style"]);
  }

  #[test]
  fn appends_configured_block_categories() {
    let dir = tempdir().unwrap();
    let layout = ProjectLayout::default();
    let roles = RoleTable::default();
    let localization = LocalizationProviders::new();
    let pipeline =
      EnqueuePipeline::new(dir.path(), &layout, &roles, &localization, EnvironmentMode::Production)
        .with_block_categories(
          vec![BlockCategory {
            slug: "site".into(),
            title: "Site".into(),
            icon: None,
          }],
          |text: &str, _domain: &str| text.to_uppercase(),
        );

    let categories = pipeline.block_categories(Vec::new());
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].title, "SITE");
  }
}
