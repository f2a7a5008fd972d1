//! Container packaging recipe

use crate::render::render;
use ashiba_engine::{RecipeContext, Result};

const DOCKERFILE: &str = r#"FROM rust:1 AS builder
WORKDIR /build
COPY . .
RUN cargo build --release

FROM debian:bookworm-slim
COPY --from=builder /build/target/release/{{ project_name | default("app") }} /usr/local/bin/app
EXPOSE {{ port | default("8080") }}
CMD ["app"]
"#;

const DOCKERIGNORE: &str = "target\n.git\n.env\n";

pub(crate) fn run(ctx: &mut RecipeContext<'_>) -> Result<()> {
    let vars = ctx.variables().clone();
    ctx.files().create_file("Dockerfile", &render(DOCKERFILE, &vars)?)?;
    ctx.files().create_file(".dockerignore", DOCKERIGNORE)?;
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
    fn writes_docker_files_without_dependencies() {
        let temp = TempDir::new().unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let system = RealSystem;
        let mut manifest = Manifest::new();
        let mut registry = HookRegistry::new();
        let mut vars = IndexMap::new();
        vars.insert("project_name".to_string(), "shop".to_string());

        let mut ctx = RecipeContext::new(
            ProjectFiles::new(&system, &root),
            &mut manifest,
            &mut registry,
            &vars,
        );
        run(&mut ctx).unwrap();

        let dockerfile = std::fs::read_to_string(temp.path().join("Dockerfile")).unwrap();
        assert!(dockerfile.contains("/usr/local/bin/app"));
        assert!(dockerfile.contains("release/shop"));
        assert!(temp.path().join(".dockerignore").exists());
        assert!(manifest.is_empty());
    }
}
