//! End-to-end orchestration tests
//!
//! Drives full scaffolding runs against a temporary directory, including
//! real external command steps.

#![allow(clippy::unwrap_used)]

use ashiba_engine::{
    AbsPath, CommandStep, Error, InjectAt, Orchestrator, Phase, Recipe, RecipeContext, Result,
};
use std::time::SystemTime;
use tempfile::TempDir;

fn base(ctx: &mut RecipeContext<'_>) -> Result<()> {
    ctx.dependency("axum", "0.8");
    ctx.dependency_with("tokio", "1", &["full"]);
    ctx.files().create_file(
        "src/main.rs",
        "#[tokio::main]\nasync fn main() {\n    // routes\n}\n",
    )?;
    ctx.files().create_file("README.md", "# demo\n")?;
    Ok(())
}

fn database(ctx: &mut RecipeContext<'_>) -> Result<()> {
    ctx.dependency_with("sqlx", "0.8", &["postgres"]);
    ctx.files().create_file(".env", "DATABASE_URL=postgres://localhost/demo\n")?;
    ctx.defer(Phase::PostInstall, |phase| {
        phase
            .files()
            .create_file("migrations/0001_init.sql", "CREATE TABLE users ();\n")
    })?;
    Ok(())
}

fn routes(ctx: &mut RecipeContext<'_>) -> Result<()> {
    ctx.defer(Phase::PostGenerate, |phase| {
        phase.files().inject_into_file(
            "src/main.rs",
            "// routes",
            "    let _router = axum::Router::new();",
            InjectAt::After,
        )
    })?;
    Ok(())
}

#[test]
fn full_run_with_command_steps() {
    let temp = TempDir::new().unwrap();
    let root = AbsPath::from_path(temp.path()).unwrap();
    let system = ashiba_engine::RealSystem;

    let mut orchestrator = Orchestrator::builder(&system, root)
        .package("demo-app", "2024")
        .variable("project_name", "demo-app")
        .recipe(Recipe::new("base", "application skeleton", base))
        .recipe(Recipe::new("database", "sqlx + migrations", database))
        .recipe(Recipe::new("routes", "router wiring", routes))
        .installer(Box::new(CommandStep::new("install", "touch installed.stamp")))
        .generator(Box::new(CommandStep::new("generate", "touch generated.stamp")))
        .build();

    let report = orchestrator.run().unwrap();
    assert_eq!(report.recipes.len(), 3);
    assert_eq!(report.dependencies, 3);
    assert_eq!(report.post_install_callbacks, 1);
    assert_eq!(report.post_generate_callbacks, 1);

    // Manifest rendered for the installer.
    let manifest = std::fs::read_to_string(temp.path().join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"demo-app\""));
    assert!(manifest.contains("sqlx = { version = \"0.8\", features = [\"postgres\"] }"));

    // Both external steps actually ran.
    assert!(temp.path().join("installed.stamp").exists());
    assert!(temp.path().join("generated.stamp").exists());

    // Deferred work landed after its phase.
    assert!(temp.path().join("migrations/0001_init.sql").exists());
    let main_rs = std::fs::read_to_string(temp.path().join("src/main.rs")).unwrap();
    assert!(main_rs.contains("axum::Router::new()"));
}

#[test]
fn manifest_written_for_dependency_free_run() {
    let temp = TempDir::new().unwrap();
    let root = AbsPath::from_path(temp.path()).unwrap();
    let system = ashiba_engine::RealSystem;

    fn docker(ctx: &mut RecipeContext<'_>) -> Result<()> {
        ctx.files().create_file("Dockerfile", "FROM rust:1\n")
    }

    let mut orchestrator = Orchestrator::builder(&system, root)
        .package("demo-app", "2024")
        .recipe(Recipe::new("docker", "container packaging", docker))
        .build();

    let report = orchestrator.run().unwrap();
    assert_eq!(report.dependencies, 0);

    // The installer still needs a valid Cargo.toml even with no dependencies.
    let manifest = std::fs::read_to_string(temp.path().join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"demo-app\""));
    assert!(manifest.contains("[dependencies]"));
}

#[test]
fn post_install_work_happens_before_post_generate_work() {
    let temp = TempDir::new().unwrap();
    let root = AbsPath::from_path(temp.path()).unwrap();
    let system = ashiba_engine::RealSystem;

    fn a(ctx: &mut RecipeContext<'_>) -> Result<()> {
        ctx.defer(Phase::PostInstall, |phase| phase.files().create_file("X", "x\n"))
    }
    fn b(ctx: &mut RecipeContext<'_>) -> Result<()> {
        ctx.defer(Phase::PostGenerate, |phase| phase.files().create_file("Y", "y\n"))
    }

    let mut orchestrator = Orchestrator::builder(&system, root)
        .recipe(Recipe::new("a", "post-install X", a))
        .recipe(Recipe::new("b", "post-generate Y", b))
        .build();
    orchestrator.run().unwrap();

    let mtime = |name: &str| -> SystemTime {
        std::fs::metadata(temp.path().join(name))
            .unwrap()
            .modified()
            .unwrap()
    };
    assert!(temp.path().join("X").exists());
    assert!(temp.path().join("Y").exists());
    assert!(mtime("X") <= mtime("Y"));
}

#[test]
fn failing_installer_surfaces_tool_output() {
    let temp = TempDir::new().unwrap();
    let root = AbsPath::from_path(temp.path()).unwrap();
    let system = ashiba_engine::RealSystem;

    fn a(ctx: &mut RecipeContext<'_>) -> Result<()> {
        ctx.defer(Phase::PostInstall, |phase| phase.files().create_file("X", "x\n"))
    }

    let mut orchestrator = Orchestrator::builder(&system, root)
        .recipe(Recipe::new("a", "post-install X", a))
        .installer(Box::new(CommandStep::new(
            "install",
            "sh -c 'echo could not resolve deps; exit 3'",
        )))
        .build();

    let err = orchestrator.run().unwrap_err();
    match err {
        Error::ExternalStep { step, message } => {
            assert_eq!(step, "install");
            assert!(message.contains("could not resolve deps"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!temp.path().join("X").exists());
}
