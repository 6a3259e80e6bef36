//! Dockerfile generation and build artifact reconciliation for dockside.
//!
//! # Deploy pipeline
//!
//! ```text
//! dockside deploy
//!   1. Restore / build / publish ── dotnet (dockside-engine)
//!   2. Reconcile artifacts ──────── build/*.dll missing from publish/ → publish/
//!   3. Descriptor ───────────────── DockerfileGenerator::render() → Dockerfile
//!   4. Lifecycle / image / run ──── docker (dockside-engine)
//! ```
//!
//! # Artifact reconciliation
//!
//! Only names are compared. A library that exists in both outputs keeps the
//! publish version.

pub mod artifacts;
pub mod descriptor;
pub mod dockerfile;

pub use artifacts::{ArtifactError, ArtifactListing, ReconcileReport, reconcile_artifacts};
pub use descriptor::{DescriptorError, write_descriptor};
pub use dockerfile::DockerfileGenerator;
