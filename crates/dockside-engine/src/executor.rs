use crate::tool::ToolError;
use std::process::Stdio;

/// Abstraction over external CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ToolExecutor: Send + Sync {
    /// Execute a command and capture stdout.
    async fn exec(&self, args: &[String]) -> Result<String, ToolError>;

    /// Execute a command, streaming output to the terminal.
    async fn exec_streaming(&self, args: &[String]) -> Result<(), ToolError>;
}

/// How a tool's command line is launched.
///
/// Chosen once at startup and applied uniformly to every call made through
/// an executor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Run the program directly.
    #[default]
    Direct,
    /// Run the program through a shim, e.g. `wsl docker ps`.
    Shim(String),
}

impl ExecutionStrategy {
    /// Resolve the program to spawn and its full argument list.
    pub fn command_line(&self, program: &str, args: &[String]) -> (String, Vec<String>) {
        match self {
            Self::Direct => (program.to_owned(), args.to_vec()),
            Self::Shim(shim) => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(program.to_owned());
                full.extend_from_slice(args);
                (shim.clone(), full)
            }
        }
    }
}

/// Real process executor for one program.
#[derive(Debug, Clone)]
pub struct RealExecutor {
    program: String,
    strategy: ExecutionStrategy,
}

impl RealExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_strategy(program, ExecutionStrategy::Direct)
    }

    pub fn with_strategy(program: impl Into<String>, strategy: ExecutionStrategy) -> Self {
        Self {
            program: program.into(),
            strategy,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn strategy(&self) -> &ExecutionStrategy {
        &self.strategy
    }

    fn command(&self, args: &[String]) -> (String, tokio::process::Command) {
        let (program, full_args) = self.strategy.command_line(&self.program, args);
        tracing::debug!(program = %program, args = ?full_args, "spawning");
        let mut cmd = tokio::process::Command::new(&program);
        cmd.args(&full_args);
        (program, cmd)
    }
}

impl ToolExecutor for RealExecutor {
    async fn exec(&self, args: &[String]) -> Result<String, ToolError> {
        let (program, mut cmd) = self.command(args);

        let output = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ToolError::NotFound { program, source: e })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| ToolError::InvalidUtf8 {
                program: self.program.clone(),
                source: e,
            })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            Err(ToolError::CommandFailed {
                program: self.program.clone(),
                args: args.to_vec(),
                stderr,
            })
        }
    }

    async fn exec_streaming(&self, args: &[String]) -> Result<(), ToolError> {
        let (program, mut cmd) = self.command(args);

        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ToolError::NotFound { program, source: e })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::CommandFailed {
                program: self.program.clone(),
                args: args.to_vec(),
                stderr: format!("exit code: {status}"),
            })
        }
    }
}
