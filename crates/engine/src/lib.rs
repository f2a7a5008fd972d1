//! # Ashiba Orchestration Engine
//!
//! Core library for the ashiba project scaffolding tool.
//!
//! This crate provides the lifecycle mechanism that coordinates recipe
//! execution when bootstrapping a project skeleton:
//!
//! - **Phases**: The three lifecycle points of a scaffolding run
//! - **Hook Registry**: Ordered deferred callbacks, drained per phase
//! - **Recipes**: Named configuration units executed once per run
//! - **Manifest**: The generated project's dependency declaration sink
//! - **System Abstraction**: Filesystem operations abstracted for testing
//! - **External Steps**: Opaque installer and generator commands
//! - **Orchestrator**: The state machine driving a full run

pub mod context;
pub mod error;
pub mod external;
pub mod hooks;
pub mod manifest;
pub mod orchestrator;
pub mod phase;
pub mod recipe;
pub mod system;

// Re-export path types from core
pub use ashiba_core::path::{AbsPath, RelPath};

pub use context::{InjectAt, PhaseContext, ProjectFiles, RecipeContext};
pub use error::{Error, Result};
pub use external::{CommandStep, ExternalStep};
pub use hooks::{Callback, HookRegistry};
pub use manifest::{Dependency, Manifest};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, RunReport, RunState};
pub use phase::Phase;
pub use recipe::{Recipe, RecipeFn};
pub use system::{DryRunSystem, Operation, RealSystem, System};
