use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown metric \"{0}\" (expected views, likes, comments, or subscribers)")]
    UnknownMetric(String),

    #[error("unknown export preset \"{0}\" (expected youtube or instagram)")]
    UnknownPreset(String),
}
