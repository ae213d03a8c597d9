//! The `.classpath` descriptor
//!
//! - **xml**: a small element tree over `quick-xml`
//! - **entry**: typed library and variable entries
//! - **document**: the loaded descriptor with lookup, mutation and change tracking

mod document;
mod entry;
pub mod xml;

pub use document::{ClasspathDocument, EntryId, TrackedEntry};
pub use entry::{ClasspathEntry, ClasspathKind, JAVADOC_LOCATION};
