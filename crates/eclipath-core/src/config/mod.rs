//! Project configuration
//!
//! Settings live in `eclipath.toml` at the project root (`eclipath.json` is
//! accepted as well). Every section is optional; an empty manifest means
//! shared-repository placement with no dependencies.
//!
//! # Example
//!
//! ```toml
//! [classpath]
//! policy = "project"
//! layout = "standalone"
//!
//! [[dependencies]]
//! group = "org.slf4j"
//! artifact = "slf4j-api"
//! version = "1.7.36"
//! ```

mod manifest;

pub use manifest::{
    ClasspathSection, CompilerSection, Manifest, PolicyKind, RefreshSection, RepositorySection,
    WorkspaceSection,
};
