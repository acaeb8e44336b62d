use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceLensError {
    #[error("Failed to parse JSON input: {message}")]
    Parse { message: String },

    #[error("Invalid Apollo trace format: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tracelens operations
pub type Result<T> = std::result::Result<T, TraceLensError>;

impl TraceLensError {
    /// Creates a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Creates a new schema error
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        Self::Schema(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new render error
    pub fn render<S: Into<String>>(msg: S) -> Self {
        Self::Render(msg.into())
    }

    /// Returns true if this error means the submitted trace itself was
    /// bad and the user must correct and resubmit it.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Schema(_))
    }

    /// Returns the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::Schema(_) => "schema",
            Self::Config(_) => "config",
            Self::Render(_) => "render",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
