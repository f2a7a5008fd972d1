//! Application skeleton recipe
//!
//! Lays down the axum entry point with the anchors later recipes and
//! deferred callbacks inject against (`// modules`, `// routes`).

use crate::render::render;
use ashiba_engine::{RecipeContext, Result};

const MAIN_RS: &str = r#"use axum::{Router, routing::get};
// modules

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new().route("/health", get(health));
    // routes

    let addr = "0.0.0.0:{{ port | default("8080") }}";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    tracing::info!(addr, "listening");
    axum::serve(listener, app).await.expect("server error");
}

async fn health() -> &'static str {
    "ok"
}
"#;

const GITIGNORE: &str = "/target\n.env\n";

const README_MD: &str = r#"# {{ project_name | default("app") }}

A web-application backend scaffolded with ashiba.
"#;

pub(crate) fn run(ctx: &mut RecipeContext<'_>) -> Result<()> {
    ctx.dependency("axum", "0.8");
    ctx.dependency_with("tokio", "1", &["full"]);
    ctx.dependency("tracing", "0.1");
    ctx.dependency("tracing-subscriber", "0.3");

    let vars = ctx.variables().clone();
    ctx.files().create_file("src/main.rs", &render(MAIN_RS, &vars)?)?;
    ctx.files().create_file(".gitignore", GITIGNORE)?;
    ctx.files().create_file("README.md", &render(README_MD, &vars)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use ashiba_engine::{AbsPath, HookRegistry, Manifest, ProjectFiles, RealSystem};
    use indexmap::IndexMap;
    use tempfile::TempDir;

    #[test]
    fn writes_skeleton_and_declares_stack() {
        let temp = TempDir::new().unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let system = RealSystem;
        let mut manifest = Manifest::new();
        let mut registry = HookRegistry::new();
        let mut vars = IndexMap::new();
        vars.insert("project_name".to_string(), "shop".to_string());
        vars.insert("port".to_string(), "9000".to_string());

        let mut ctx = RecipeContext::new(
            ProjectFiles::new(&system, &root),
            &mut manifest,
            &mut registry,
            &vars,
        );
        run(&mut ctx).unwrap();

        let main_rs = std::fs::read_to_string(temp.path().join("src/main.rs")).unwrap();
        assert!(main_rs.contains("0.0.0.0:9000"));
        assert!(main_rs.contains("// routes"));
        assert!(main_rs.contains("// modules"));

        let readme = std::fs::read_to_string(temp.path().join("README.md")).unwrap();
        assert!(readme.starts_with("# shop"));

        assert!(manifest.get("axum").is_some());
        assert_eq!(manifest.get("tokio").unwrap().features, vec!["full"]);
    }
}
