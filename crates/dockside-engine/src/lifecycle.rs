//! Idempotent teardown of a previously deployed container and image.
//!
//! A container and an image share one [`ResourceName`] but have independent
//! lifecycles, so each gets its own handle and its own state query:
//!
//! ```text
//! container:  Running ──stop──▶ Stopped ──rm──▶ Absent
//! image:      Present ──rmi──▶ Absent
//! ```
//!
//! Actions are only issued for states that need them. The engine reports a
//! failure for `stop`/`rm`/`rmi` on something that does not exist, so
//! querying first is what makes repeated runs succeed.

use crate::docker::EngineError;
use dockside_core::ResourceName;
use std::fmt;

/// Tag the engine applies to `build -t <name>` without an explicit tag.
pub const DEFAULT_IMAGE_TAG: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerHandle {
    name: ResourceName,
}

impl ContainerHandle {
    pub fn new(name: ResourceName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    name: ResourceName,
}

impl ImageHandle {
    pub fn new(name: ResourceName) -> Self {
        Self { name }
    }

    /// Image reference used for build and run. The engine resolves it to
    /// the `latest` tag.
    pub fn reference(&self) -> &str {
        self.name.as_str()
    }

    /// Fully tagged reference, e.g. `svc1:latest`. Queried and removed by
    /// teardown so a differently tagged image of the same repository is left
    /// alone.
    pub fn tagged(&self) -> String {
        format!("{}:{DEFAULT_IMAGE_TAG}", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Absent,
    Running,
    /// Exited or created but never started.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Absent,
    Present,
}

/// State queries and teardown actions against a container engine.
///
/// Queries are point-in-time snapshots; nothing guards against another actor
/// changing state between a query and the action that follows it.
#[allow(async_fn_in_trait)]
pub trait ContainerEngine: Send + Sync {
    async fn container_state(&self, container: &ContainerHandle)
    -> Result<ContainerState, EngineError>;

    async fn image_state(&self, image: &ImageHandle) -> Result<ImageState, EngineError>;

    async fn stop_container(&self, container: &ContainerHandle) -> Result<(), EngineError>;

    async fn remove_container(&self, container: &ContainerHandle) -> Result<(), EngineError>;

    async fn remove_image(&self, image: &ImageHandle) -> Result<(), EngineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    StopContainer,
    RemoveContainer,
    RemoveImage,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StopContainer => "stopped container",
            Self::RemoveContainer => "removed container",
            Self::RemoveImage => "removed image",
        })
    }
}

/// Actions performed by [`teardown`], in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub actions: Vec<LifecycleAction>,
}

impl TeardownReport {
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Remove any container and image named `name`, leaving both absent.
///
/// A running container is stopped before it is removed. Image removal does
/// not force: an image still referenced by another container makes the
/// engine refuse, and that refusal is returned as an error.
///
/// # Errors
///
/// The first failing query or action, as [`EngineError::Operation`]. Nothing
/// already removed is restored.
pub async fn teardown<G: ContainerEngine>(
    engine: &G,
    name: &ResourceName,
) -> Result<TeardownReport, EngineError> {
    let container = ContainerHandle::new(name.clone());
    let image = ImageHandle::new(name.clone());
    let mut report = TeardownReport::default();

    let state = engine.container_state(&container).await?;
    tracing::debug!(container = %name, ?state, "container state");
    match state {
        ContainerState::Running => {
            engine.stop_container(&container).await?;
            report.actions.push(LifecycleAction::StopContainer);
            engine.remove_container(&container).await?;
            report.actions.push(LifecycleAction::RemoveContainer);
        }
        ContainerState::Stopped => {
            engine.remove_container(&container).await?;
            report.actions.push(LifecycleAction::RemoveContainer);
        }
        ContainerState::Absent => {}
    }

    let state = engine.image_state(&image).await?;
    tracing::debug!(image = %name, ?state, "image state");
    if state == ImageState::Present {
        engine.remove_image(&image).await?;
        report.actions.push(LifecycleAction::RemoveImage);
    }

    tracing::info!(name = %name, actions = report.actions.len(), "teardown complete");
    Ok(report)
}
