//! Postgres database recipe
//!
//! Declares sqlx, writes the .env connection string, and defers the initial
//! migration until after the dependency install step.

use crate::render::render;
use ashiba_engine::{Phase, RecipeContext, Result};

const DOT_ENV: &str = r#"DATABASE_URL={{ database_url | default("postgres://localhost/" ~ (project_name | default("app"))) }}
"#;

const INITIAL_MIGRATION: &str = r"CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

pub(crate) fn run(ctx: &mut RecipeContext<'_>) -> Result<()> {
    ctx.dependency_with("sqlx", "0.8", &["runtime-tokio", "postgres"]);
    ctx.dependency("dotenvy", "0.15");

    let vars = ctx.variables().clone();
    ctx.files().create_file(".env", &render(DOT_ENV, &vars)?)?;

    // Migration tooling only exists once dependencies are installed.
    ctx.defer(Phase::PostInstall, |phase| {
        phase
            .files()
            .create_file("migrations/0001_init.sql", INITIAL_MIGRATION)
    })?;
    Ok(())
}
