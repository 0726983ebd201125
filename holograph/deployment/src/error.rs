use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("network `{0}` not found in the network registry")]
    UnknownNetwork(String),

    #[error("artifact `{name}` not found at {path}")]
    MissingArtifact { name: String, path: PathBuf },

    #[error("artifact `{0}` has no creation bytecode")]
    EmptyBytecode(String),

    #[error("artifact `{name}` has invalid bytecode: {reason}")]
    InvalidBytecode { name: String, reason: String },

    #[error("no deployment of `{contract}` recorded for network `{network}`")]
    MissingDeployment { network: String, contract: String },
}

pub type Result<T> = std::result::Result<T, DeploymentError>;
