//! Built-in recipe catalog for ashiba
//!
//! Each recipe is a self-contained configuration unit for the generated
//! web-backend skeleton: it declares dependencies into the manifest, writes
//! or mutates project files, and may defer work to a later lifecycle phase.
//!
//! The catalog order below is the documented load order; it is the only
//! dependency-resolution mechanism between recipes.

mod auth;
mod base;
mod ci;
mod database;
mod docker;
mod readme;
mod render;

use ashiba_engine::{Error, Recipe, Result};

/// Application skeleton: src/main.rs, README, .gitignore, axum stack
pub const BASE: Recipe = Recipe::new("base", "axum application skeleton", base::run);

/// Postgres via sqlx, .env, and the initial migration (post-install)
pub const DATABASE: Recipe = Recipe::new("database", "sqlx + Postgres setup", database::run);

/// Token auth module, wired into the router post-generate
pub const AUTH: Recipe = Recipe::new("auth", "JWT authentication module", auth::run);

/// Dockerfile and .dockerignore
pub const DOCKER: Recipe = Recipe::new("docker", "container packaging", docker::run);

/// GitHub Actions workflow
pub const CI: Recipe = Recipe::new("ci", "GitHub Actions CI workflow", ci::run);

/// Usage docs appended to the README
pub const README: Recipe = Recipe::new("readme", "usage documentation", readme::run);

/// The full catalog in its default load order
#[must_use]
pub fn catalog() -> Vec<Recipe> {
    vec![BASE, DATABASE, AUTH, DOCKER, CI, README]
}

/// Resolve an ordered list of recipe names against the catalog
///
/// The caller's ordering is preserved; it becomes the load order.
///
/// # Errors
///
/// Fails with [`Error::UnknownRecipe`] for any name not in the catalog.
pub fn resolve(names: &[String]) -> Result<Vec<Recipe>> {
    let catalog = catalog();
    names
        .iter()
        .map(|name| {
            catalog
                .iter()
                .find(|recipe| recipe.name() == name)
                .copied()
                .ok_or_else(|| Error::UnknownRecipe { name: name.clone() })
        })
        .collect()
}
