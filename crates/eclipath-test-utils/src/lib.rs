//! Shared test utilities for the eclipath workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each rebuild an Eclipse project by hand. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject), a temporary Eclipse
//!   workspace holding one project and a fake local Maven repository

pub mod project;

pub use project::TestProject;
