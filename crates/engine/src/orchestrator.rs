//! Orchestrator: the state machine driving one scaffolding run
//!
//! Loads recipes in a fixed order, flushes the manifest, runs the external
//! installer and generator steps, and drains the two deferred phases exactly
//! once each. Any failure moves the run into the terminal `Failed` state and
//! no further phase is drained — template application is all-or-nothing.

use crate::context::{PhaseContext, ProjectFiles, RecipeContext};
use crate::error::{Error, Result};
use crate::external::ExternalStep;
use crate::hooks::HookRegistry;
use crate::manifest::Manifest;
use crate::phase::Phase;
use crate::recipe::Recipe;
use crate::system::System;
use ashiba_core::path::{AbsPath, RelPath};
use indexmap::IndexMap;

/// State of an orchestration run
///
/// Transitions are strictly forward; `Failed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Run has not begun
    NotStarted,
    /// Recipe bodies are executing
    LoadingRecipes,
    /// The external dependency installer is running
    DependenciesInstalling,
    /// Installer finished; the post-install phase drains here
    DependenciesInstalled,
    /// The external generator step is running
    GeneratorsRunning,
    /// Generator finished; the post-generate phase drains here
    GeneratorsComplete,
    /// Run completed successfully
    Done,
    /// Run aborted; no further phase drains
    Failed(String),
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Names of the recipes executed, in order
    pub recipes: Vec<String>,
    /// Number of dependencies declared in the manifest
    pub dependencies: usize,
    /// Callbacks invoked during the post-install drain
    pub post_install_callbacks: usize,
    /// Callbacks invoked during the post-generate drain
    pub post_generate_callbacks: usize,
}

/// Top-level driver for one scaffolding run
///
/// Owns the hook registry and manifest for the run; there is no process-wide
/// state. Built via [`Orchestrator::builder`], consumed by a single call to
/// [`Orchestrator::run`].
pub struct Orchestrator<'a> {
    system: &'a dyn System,
    project_root: AbsPath,
    recipes: Vec<Recipe>,
    variables: IndexMap<String, String>,
    manifest: Manifest,
    registry: HookRegistry,
    installer: Option<Box<dyn ExternalStep>>,
    generator: Option<Box<dyn ExternalStep>>,
    manifest_path: RelPath,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    /// Create a builder for configuring an orchestrator
    pub fn builder(system: &'a dyn System, project_root: AbsPath) -> OrchestratorBuilder<'a> {
        OrchestratorBuilder::new(system, project_root)
    }

    /// Current state of the run
    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Drive the full run to completion
    ///
    /// # Errors
    ///
    /// Fails on the first recipe failure, external step failure, or callback
    /// failure; the state moves to `Failed` and nothing further executes.
    /// Calling `run` more than once is an error.
    pub fn run(&mut self) -> Result<RunReport> {
        if self.state != RunState::NotStarted {
            return Err(Error::InvalidState {
                message: format!("run already started (state: {:?})", self.state),
            });
        }

        match self.run_to_completion() {
            Ok(report) => {
                self.state = RunState::Done;
                tracing::info!(
                    recipes = report.recipes.len(),
                    dependencies = report.dependencies,
                    "Scaffolding run complete"
                );
                Ok(report)
            }
            Err(e) => {
                self.state = RunState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn run_to_completion(&mut self) -> Result<RunReport> {
        let mut report = RunReport::default();

        self.state = RunState::LoadingRecipes;
        let recipes = self.recipes.clone();
        for recipe in &recipes {
            let span = tracing::info_span!("recipe", name = recipe.name());
            let _guard = span.enter();
            tracing::debug!("Executing recipe");

            let mut ctx = RecipeContext::new(
                ProjectFiles::new(self.system, &self.project_root),
                &mut self.manifest,
                &mut self.registry,
                &self.variables,
            );
            recipe.execute(&mut ctx).map_err(|e| Error::RecipeFailed {
                name: recipe.name().to_string(),
                source: Box::new(e),
            })?;
            report.recipes.push(recipe.name().to_string());
        }
        report.dependencies = self.manifest.len();

        // Flush the manifest so the installer can consume it. Package
        // metadata alone is enough: a run of dependency-free recipes still
        // needs a valid Cargo.toml for the install step.
        if self.manifest.has_package() || !self.manifest.is_empty() {
            let manifest_path = self.project_root.join(&self.manifest_path);
            tracing::debug!(path = %manifest_path, "Writing dependency manifest");
            self.system
                .write_file(&manifest_path, self.manifest.render().as_bytes())?;
        }

        self.state = RunState::DependenciesInstalling;
        self.run_step(self.installer.as_deref(), "dependency installer")?;
        self.state = RunState::DependenciesInstalled;
        report.post_install_callbacks = self.drain(Phase::PostInstall)?;

        self.state = RunState::GeneratorsRunning;
        self.run_step(self.generator.as_deref(), "generator runner")?;
        self.state = RunState::GeneratorsComplete;
        report.post_generate_callbacks = self.drain(Phase::PostGenerate)?;

        Ok(report)
    }

    fn run_step(&self, step: Option<&dyn ExternalStep>, kind: &str) -> Result<()> {
        match step {
            Some(step) => {
                tracing::info!(step = step.name(), "Running {kind}");
                step.run(&self.project_root)
            }
            None => {
                // An absent step still counts as complete.
                tracing::debug!("No {kind} configured, step skipped");
                Ok(())
            }
        }
    }

    fn drain(&mut self, phase: Phase) -> Result<usize> {
        let mut ctx = PhaseContext::new(self.system, &self.project_root);
        self.registry.drain(phase, &mut ctx)
    }
}

/// Builder for configuring an [`Orchestrator`]
pub struct OrchestratorBuilder<'a> {
    system: &'a dyn System,
    project_root: AbsPath,
    recipes: Vec<Recipe>,
    variables: IndexMap<String, String>,
    manifest: Manifest,
    installer: Option<Box<dyn ExternalStep>>,
    generator: Option<Box<dyn ExternalStep>>,
    manifest_path: RelPath,
}

impl<'a> OrchestratorBuilder<'a> {
    /// Create a builder with required parameters
    pub fn new(system: &'a dyn System, project_root: AbsPath) -> Self {
        Self {
            system,
            project_root,
            recipes: Vec::new(),
            variables: IndexMap::new(),
            manifest: Manifest::new(),
            installer: None,
            generator: None,
            manifest_path: RelPath::new("Cargo.toml".into()).expect("literal path is relative"),
        }
    }

    /// Append a recipe to the fixed load order
    #[must_use]
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Append several recipes, preserving iteration order
    #[must_use]
    pub fn recipes(mut self, recipes: impl IntoIterator<Item = Recipe>) -> Self {
        self.recipes.extend(recipes);
        self
    }

    /// Set the generated package's name and edition
    #[must_use]
    pub fn package(mut self, name: impl Into<String>, edition: impl Into<String>) -> Self {
        self.manifest.set_package(name, edition);
        self
    }

    /// Add a template variable available to recipes
    #[must_use]
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Add multiple template variables at once
    #[must_use]
    pub fn variables(mut self, vars: IndexMap<String, String>) -> Self {
        self.variables.extend(vars);
        self
    }

    /// Set the dependency installer step
    #[must_use]
    pub fn installer(mut self, step: Box<dyn ExternalStep>) -> Self {
        self.installer = Some(step);
        self
    }

    /// Set the generator runner step
    #[must_use]
    pub fn generator(mut self, step: Box<dyn ExternalStep>) -> Self {
        self.generator = Some(step);
        self
    }

    /// Override where the rendered manifest is written (default `Cargo.toml`)
    #[must_use]
    pub fn manifest_path(mut self, path: RelPath) -> Self {
        self.manifest_path = path;
        self
    }

    /// Build the orchestrator
    #[must_use]
    pub fn build(self) -> Orchestrator<'a> {
        Orchestrator {
            system: self.system,
            project_root: self.project_root,
            recipes: self.recipes,
            variables: self.variables,
            manifest: self.manifest,
            registry: HookRegistry::new(),
            installer: self.installer,
            generator: self.generator,
            manifest_path: self.manifest_path,
            state: RunState::NotStarted,
        }
    }
}
