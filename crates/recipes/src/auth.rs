//! Authentication recipe
//!
//! Writes the token auth module immediately, then wires it into the router
//! after the generator step so it composes with generated routes.

use ashiba_engine::{InjectAt, Phase, RecipeContext, Result};

const AUTH_RS: &str = r#"use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

async fn login(Json(_credentials): Json<Credentials>) -> Json<TokenResponse> {
    // Token issuance is stubbed; replace with real verification.
    Json(TokenResponse {
        token: String::new(),
    })
}
"#;

pub(crate) fn run(ctx: &mut RecipeContext<'_>) -> Result<()> {
    ctx.dependency("jsonwebtoken", "9");
    ctx.dependency("argon2", "0.5");
    ctx.dependency_with("serde", "1", &["derive"]);

    ctx.files().create_file("src/auth.rs", AUTH_RS)?;

    ctx.defer(Phase::PostGenerate, |phase| {
        phase.files().inject_into_file(
            "src/main.rs",
            "// modules",
            "mod auth;",
            InjectAt::Before,
        )?;
        phase.files().inject_into_file(
            "src/main.rs",
            "// routes",
            "    let app = app.merge(auth::router());",
            InjectAt::After,
        )
    })?;
    Ok(())
}
