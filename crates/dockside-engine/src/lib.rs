//! External tool operations for dockside: the `dotnet` toolchain, the
//! container engine, and the idempotent container/image teardown built on it.

pub mod docker;
pub mod doctor;
pub mod dotnet;
pub mod executor;
pub mod lifecycle;
pub mod tool;

pub use docker::{DockerClient, EngineError, EngineOp};
pub use doctor::{CheckResult, DoctorReport, doctor};
pub use dotnet::{BuildOptions, DotnetClient, ToolchainError, ToolchainStep};
pub use executor::{ExecutionStrategy, RealExecutor, ToolExecutor};
pub use lifecycle::{
    ContainerEngine, ContainerHandle, ContainerState, ImageHandle, ImageState, LifecycleAction,
    TeardownReport, teardown,
};
pub use tool::ToolError;
