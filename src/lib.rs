#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod blocks;
pub mod config;
pub mod error;
pub mod locator;
pub mod models;
pub mod pipeline;
pub mod project;
pub mod registrar;
pub mod resolver;
pub mod roles;
pub mod selection;

pub use config::ProjectConfig;
pub use error::{EnqueuesError, Result};
pub use locator::{ArtifactLocator, locate_artifact};
pub use models::{
  AssetCategory, AssetRole, AssetUnit, CompiledArtifact, EntryKey, EntryMap, FileKind,
  RegistrationContext, RenderContext,
};
pub use pipeline::{EnqueuePipeline, Hook, Pass, PassSchedule};
pub use project::{EnvironmentMode, ProjectLayout};
pub use registrar::{AssetHost, Registrar, register_asset};
pub use resolver::{EntryResolver, resolve_entries};
pub use roles::{RoleTable, role_for};
pub use selection::{AssetInclusion, AssetSelection};
