//! Classpath reconciliation engine for eclipath
//!
//! Keeps an Eclipse `.classpath` descriptor in step with a declared
//! dependency set:
//!
//! - **Placement**: where each library lives (copied into the project or
//!   referenced through a classpath variable) and what path the descriptor uses
//! - **Resolution**: primary artifacts are required, sources and javadoc optional
//! - **Descriptor model**: typed entries, version-independent lookup, change tracking
//! - **Reconciler**: stale-version replacement, insertion, orphan removal,
//!   and a write only when something changed
//!
//! # Architecture
//!
//! ```text
//!                       eclipath-cli
//!                            |
//!                         Session
//!                            |
//!        +---------------+---+-----------+-------------+
//!        |               |               |             |
//!   Reconciler       Workspace        Project      RefreshClient
//!        |
//!   +----+-------------+-----------------+
//!   |                  |                 |
//! ResolverAdapter  DescriptorBuilder  ClasspathDocument
//!   |                  |                 |
//! LocalRepository  PlacementPolicy    xml (quick-xml)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use eclipath_core::{RunOptions, Session, TracingReporter};
//!
//! let session = Session::open(std::path::Path::new("."))?;
//! let report = session.sync(RunOptions::default(), &TracingReporter)?;
//! println!("{} added, {} removed", report.added.len(), report.removed.len());
//! ```

pub mod artifact;
pub mod classpath;
pub mod cleanup;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod placement;
pub mod prefs;
pub mod project;
pub mod reconcile;
pub mod refresh;
pub mod report;
pub mod reporter;
pub mod resolver;
pub mod session;
pub mod workspace;

pub use artifact::{Attachment, Coordinate, Dependency, ResolvedArtifact, Scope, VersionPattern};
pub use classpath::{ClasspathDocument, ClasspathEntry, ClasspathKind, EntryId, TrackedEntry};
pub use cleanup::CleanReport;
pub use config::{Manifest, PolicyKind};
pub use descriptor::DescriptorBuilder;
pub use error::{Error, Result};
pub use placement::{Exclusions, LayoutKind, LibraryLayout, PlacementPolicy, SharedRepository};
pub use project::Project;
pub use reconcile::{
    ContainerSpec, ReconcileOptions, ReconcileReport, Reconciler, SkippedDependency, SyncMode,
};
pub use refresh::RefreshClient;
pub use report::ResolutionReport;
pub use reporter::{CapturingReporter, Level, Reporter, TracingReporter};
pub use resolver::{
    ArtifactResolver, Attachments, LocalRepository, ResolutionFailure, ResolveError,
    ResolverAdapter,
};
pub use session::{RunOptions, Session};
pub use workspace::Workspace;
