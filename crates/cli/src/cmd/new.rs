//! `ashiba new` - scaffold a project

use anyhow::{Context, Result, bail};
use ashiba_config::Config;
use ashiba_core::path::AbsPath;
use ashiba_engine::{
    CommandStep, DryRunSystem, Operation, Orchestrator, RealSystem, Recipe, RunReport, System,
};
use clap::Args;
use indexmap::IndexMap;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Scaffold a new project at the given path
#[derive(Args)]
pub struct NewCommand {
    /// Target directory for the generated project
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Path to the run configuration file
    #[arg(long, env = "ASHIBA_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Recipes to load, in order; repeatable
    ///
    /// Overrides the config file's recipe list. Defaults to the full
    /// built-in catalog.
    #[arg(short, long = "recipe", value_name = "NAME")]
    pub recipes: Vec<String>,

    /// Template variable as KEY=VALUE; repeatable, overrides config
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Skip the dependency install step (its phase still drains)
    #[arg(long)]
    pub skip_install: bool,

    /// Skip the generator step (its phase still drains)
    #[arg(long)]
    pub skip_generate: bool,

    /// Show what would be written without touching the filesystem
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl NewCommand {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        let config = match self.config.as_deref() {
            Some(path) => Config::load(path)?,
            None => Config::discover(&std::env::current_dir()?)?,
        };

        let target = if self.path.is_absolute() {
            self.path.clone()
        } else {
            std::env::current_dir()?.join(&self.path)
        };
        if target.exists() && target.read_dir()?.next().is_some() {
            bail!("target directory {} is not empty", target.display());
        }

        let project_name = config
            .project
            .name
            .clone()
            .or_else(|| {
                target
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .context("cannot derive a project name from the target path")?;

        let recipe_names = if self.recipes.is_empty() {
            if config.recipes.is_empty() {
                ashiba_recipes::catalog()
                    .iter()
                    .map(|r| r.name().to_string())
                    .collect()
            } else {
                config.recipes.clone()
            }
        } else {
            self.recipes.clone()
        };
        let recipes = ashiba_recipes::resolve(&recipe_names)?;
        tracing::debug!(recipes = ?recipe_names, "Resolved recipe list");

        let mut variables = config.variables.clone();
        variables.insert("project_name".to_string(), project_name.clone());
        for pair in &self.vars {
            let (key, value) = parse_var(pair)?;
            variables.insert(key, value);
        }

        if self.dry_run {
            let system = DryRunSystem::new();
            let root = AbsPath::new(target.clone())?;
            // External steps would mutate real state, so a dry run skips them.
            let report = orchestrate(&system, root, &project_name, &config, recipes, variables, true, true)?;
            print_dry_run(&system, &report);
            return Ok(());
        }

        std::fs::create_dir_all(&target)
            .with_context(|| format!("cannot create {}", target.display()))?;
        let system = RealSystem;
        let root = AbsPath::new(target)?;
        let report = orchestrate(
            &system,
            root,
            &project_name,
            &config,
            recipes,
            variables,
            self.skip_install,
            self.skip_generate,
        )?;
        print_report(&project_name, &report);
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn orchestrate(
    system: &dyn System,
    root: AbsPath,
    project_name: &str,
    config: &Config,
    recipes: Vec<Recipe>,
    variables: IndexMap<String, String>,
    skip_install: bool,
    skip_generate: bool,
) -> Result<RunReport> {
    let mut builder = Orchestrator::builder(system, root)
        .package(project_name, config.project.edition.clone())
        .variables(variables)
        .recipes(recipes);

    if !skip_install
        && let Some(command) = &config.steps.install_command
    {
        builder = builder.installer(Box::new(CommandStep::new("install", command)));
    }
    if !skip_generate
        && let Some(command) = &config.steps.generate_command
    {
        builder = builder.generator(Box::new(CommandStep::new("generate", command)));
    }

    let mut orchestrator = builder.build();
    Ok(orchestrator.run()?)
}

fn parse_var(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => bail!("invalid --var '{pair}', expected KEY=VALUE"),
    }
}

fn print_report(project_name: &str, report: &RunReport) {
    println!(
        "{} {}",
        "Scaffolded".green().bold(),
        project_name.bold()
    );
    println!("  recipes:      {}", report.recipes.join(", "));
    println!("  dependencies: {}", report.dependencies);
    println!(
        "  deferred:     {} post-install, {} post-generate",
        report.post_install_callbacks, report.post_generate_callbacks
    );
}

fn print_dry_run(system: &DryRunSystem, report: &RunReport) {
    println!(
        "{} {} operations planned",
        "Dry run:".yellow().bold(),
        system.operations().len()
    );
    for op in system.operations() {
        match op {
            Operation::WriteFile { path, size } => {
                println!("  {} {path} ({size} bytes)", "write ".cyan());
            }
            Operation::CopyFile { from, to } => {
                println!("  {} {from} -> {to}", "copy  ".cyan());
            }
            Operation::Remove { path } => {
                println!("  {} {path}", "remove".red());
            }
            Operation::CreateDir { path } => {
                println!("  {} {path}", "mkdir ".cyan());
            }
        }
    }
    println!("  recipes: {}", report.recipes.join(", "));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn parse_var_splits_on_first_equals() {
        let (key, value) = parse_var("database_url=postgres://x?a=b").unwrap();
        assert_eq!(key, "database_url");
        assert_eq!(value, "postgres://x?a=b");
    }

    #[test]
    fn parse_var_rejects_missing_equals() {
        assert!(parse_var("not-a-pair").is_err());
        assert!(parse_var("=value").is_err());
    }

    #[test]
    fn dry_run_leaves_the_filesystem_untouched() {
        let temp = tempfile::TempDir::new().unwrap();
        let cmd = NewCommand {
            path: temp.path().join("app"),
            config: None,
            recipes: vec!["base".to_string()],
            vars: vec![],
            skip_install: true,
            skip_generate: true,
            dry_run: true,
        };

        cmd.run().unwrap();
        assert!(!temp.path().join("app").exists());
    }
}
