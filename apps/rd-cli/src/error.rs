use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] rd_config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] rd_config::ValidationError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] rd_sim::SimError),

    #[error("Bearing error: {0}")]
    Bearing(#[from] rd_bearing::BearingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{failed} of {total} sweep points failed")]
    SweepFailed { failed: usize, total: usize },
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
