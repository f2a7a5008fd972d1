//! Dependency manifest for the generated project
//!
//! Recipes declare dependencies here; the orchestrator renders the manifest
//! to the generated project's `Cargo.toml` before the installer runs.
//! Declaration is idempotent per name with last-wins merge semantics: a
//! repeated declaration replaces the version and features but keeps the
//! original position.

use indexmap::IndexMap;

/// A single declared dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Version requirement
    pub version: String,
    /// Cargo features to enable
    pub features: Vec<String>,
}

impl Dependency {
    /// Create a dependency with a bare version requirement
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            features: Vec::new(),
        }
    }

    /// Add features to the dependency
    #[must_use]
    pub fn with_features(mut self, features: &[&str]) -> Self {
        self.features = features.iter().map(ToString::to_string).collect();
        self
    }

    fn render(&self) -> String {
        if self.features.is_empty() {
            format!("\"{}\"", self.version)
        } else {
            let features = self
                .features
                .iter()
                .map(|f| format!("\"{f}\""))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ version = \"{}\", features = [{features}] }}", self.version)
        }
    }
}

/// Package metadata for the generated manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
    /// Package name
    pub name: String,
    /// Rust edition
    pub edition: String,
}

/// The dependency declaration sink
///
/// Ordered by first declaration; rendering produces the full `Cargo.toml`
/// of the generated project.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    package: Option<PackageMeta>,
    dependencies: IndexMap<String, Dependency>,
}

impl Manifest {
    /// Create an empty manifest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated package's metadata
    pub fn set_package(&mut self, name: impl Into<String>, edition: impl Into<String>) {
        self.package = Some(PackageMeta {
            name: name.into(),
            edition: edition.into(),
        });
    }

    /// Declare a dependency
    ///
    /// Idempotent per name: re-declaring replaces the requirement (last
    /// wins) without producing a duplicate entry or changing its position.
    pub fn declare(&mut self, name: &str, dependency: Dependency) {
        if let Some(existing) = self.dependencies.get_mut(name) {
            tracing::debug!(
                dependency = name,
                old = %existing.version,
                new = %dependency.version,
                "Re-declared dependency, last declaration wins"
            );
            *existing = dependency;
        } else {
            self.dependencies.insert(name.to_string(), dependency);
        }
    }

    /// Whether package metadata has been set
    #[must_use]
    pub fn has_package(&self) -> bool {
        self.package.is_some()
    }

    /// Number of declared dependencies
    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Whether no dependencies have been declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Look up a declared dependency by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.get(name)
    }

    /// Iterate over declared dependencies in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dependency)> {
        self.dependencies.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the manifest as `Cargo.toml` content
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(package) = &self.package {
            out.push_str("[package]\n");
            out.push_str(&format!("name = \"{}\"\n", package.name));
            out.push_str("version = \"0.1.0\"\n");
            out.push_str(&format!("edition = \"{}\"\n", package.edition));
            out.push('\n');
        }

        out.push_str("[dependencies]\n");
        for (name, dependency) in &self.dependencies {
            out.push_str(&format!("{name} = {}\n", dependency.render()));
        }

        out
    }
}
