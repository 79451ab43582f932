//! Command line front-end: print the bundler entry map or inspect compiled output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use block_enqueues::pipeline::{EnqueuePipeline, Hook};
use block_enqueues::registrar::{AssetHost, LocalizationProviders, LocalizedData};
use block_enqueues::resolver::render_entry_map;
use block_enqueues::selection::{AssetSelection, DEFAULT_SELECTION_FILE};
use block_enqueues::{
  ArtifactLocator, AssetCategory, EntryResolver, EnvironmentMode, FileKind, ProjectConfig,
  RenderContext, RoleTable,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

#[derive(Parser)]
#[command(name = "enqueues", about = "Resolve block editor entry points and compiled assets")]
struct Cli {
  /// Project root containing the source and dist trees.
  #[arg(long, global = true, default_value = ".")]
  root: PathBuf,
  /// Treat missing build output as an error.
  #[arg(long, global = true)]
  strict: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the entry map as JSON.
  Entries,
  /// Print the compiled artifact for one folder and role.
  Locate {
    #[arg(long)]
    category: AssetCategory,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "frontend")]
    context: RenderContext,
    #[arg(long, default_value = "script")]
    kind: FileKind,
  },
  /// Run the passes bound to a hook against a host that prints each call.
  Register {
    #[arg(value_enum)]
    hook: HookArg,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum HookArg {
  Init,
  Frontend,
  Editor,
}

impl From<HookArg> for Hook {
  fn from(value: HookArg) -> Self {
    match value {
      HookArg::Init => Hook::Init,
      HookArg::Frontend => Hook::FrontendAssets,
      HookArg::Editor => Hook::EditorAssets,
    }
  }
}

struct PrintingHost;

impl AssetHost for PrintingHost {
  fn register_script(
    &mut self,
    handle: &str,
    url: &str,
    dependencies: &[String],
    version: &str,
    activate_now: bool,
  ) {
    let call = json!({
      "script": handle,
      "url": url,
      "dependencies": dependencies,
      "version": version,
      "enqueue": activate_now,
    });
    println!("{call}");
  }

  fn register_style(&mut self, handle: &str, url: &str, version: &str, activate_now: bool) {
    let call = json!({ "style": handle, "url": url, "version": version, "enqueue": activate_now });
    println!("{call}");
  }

  fn attach_global_data(&mut self, handle: &str, var_name: &str, data: &LocalizedData) {
    println!("{}", json!({ "localize": handle, "variable": var_name, "data": data }));
  }

  fn register_block_type(&mut self, name: &str, metadata_file: &Path) -> bool {
    println!("{}", json!({ "block": name, "metadata": metadata_file }));
    true
  }
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let cli = Cli::parse();
  let layout = ProjectConfig::discover(&cli.root).into_layout();
  let roles = RoleTable::default();
  let mode = if cli.strict {
    EnvironmentMode::Local
  } else {
    EnvironmentMode::Production
  };
  let selection_path = cli.root.join(DEFAULT_SELECTION_FILE);
  let selection = AssetSelection::load_from_path(&selection_path)
    .with_context(|| format!("failed to load {}", selection_path.display()))?;

  match cli.command {
    Command::Entries => {
      let entries = EntryResolver::new(&cli.root, &layout, &roles)
        .with_selection(&selection)
        .resolve()
        .context("failed to resolve entry points")?;
      println!("{}", render_entry_map(&entries)?);
    }
    Command::Locate {
      category,
      name,
      context,
      kind,
    } => {
      let artifact = ArtifactLocator::new(&cli.root, &layout)
        .locate(category, &name, context, kind)?
        .ok_or_else(|| anyhow!("no compiled {category}/{name} artifact for {context:?} {kind:?}"))?;
      println!("{}", serde_json::to_string_pretty(&artifact)?);
    }
    Command::Register { hook } => {
      let localization = LocalizationProviders::new();
      let pipeline = EnqueuePipeline::new(&cli.root, &layout, &roles, &localization, mode)
        .with_selection(&selection);
      let report = pipeline.dispatch(hook.into(), &mut PrintingHost)?;
      for key in &report.assets.missing {
        log::debug!("not built: {key}");
      }
      for (unit, err) in &report.assets.failed {
        log::warn!("{}: {err}", unit.scope());
      }
    }
  }

  Ok(())
}
