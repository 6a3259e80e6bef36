use crate::docker::DockerClient;
use crate::dotnet::DotnetClient;
use crate::executor::ToolExecutor;
use std::fmt;

/// Run all diagnostic checks without early return.
pub async fn doctor<T: ToolExecutor, D: ToolExecutor>(
    dotnet: &DotnetClient<T>,
    docker: &DockerClient<D>,
) -> DoctorReport {
    let toolchain = match dotnet.version().await {
        Ok(v) if !v.is_empty() => CheckResult::ok(&v),
        Ok(_) => CheckResult::fail("no SDK version reported"),
        Err(e) => CheckResult::fail(&error_chain(&e)),
    };

    let engine = match docker.version().await {
        Ok(v) if !v.is_empty() => CheckResult::ok(&v),
        Ok(_) => CheckResult::fail("engine server not reachable"),
        Err(e) => CheckResult::fail(&error_chain(&e)),
    };

    DoctorReport { toolchain, engine }
}

/// `outer: inner: ...` on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        source = inner.source();
    }
    out
}

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub toolchain: CheckResult,
    pub engine: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.toolchain.passed && self.engine.passed
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dockside doctor")?;
        writeln!(f, "  [{}] toolchain  {}", self.toolchain.icon(), self.toolchain.detail)?;
        write!(f, "  [{}] engine     {}", self.engine.icon(), self.engine.detail)
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
