#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{program} not found or not executable")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program} {}` failed: {stderr}", args.join(" "))]
    CommandFailed {
        program: String,
        args: Vec<String>,
        stderr: String,
    },

    #[error("{program} output was not valid UTF-8")]
    InvalidUtf8 {
        program: String,
        source: std::string::FromUtf8Error,
    },
}
