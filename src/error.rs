use thiserror::Error;

/// Errors that can occur while setting up logging. Logging itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable is not set
    #[error("environment variable {0} must be set")]
    MissingVariable(String),

    /// An environment variable has a value that cannot be used
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidVariable { name: String, reason: String },

    /// The Cloud Logging client could not be built
    #[error("could not set up the Google Cloud Logging client: {0}")]
    Backend(#[from] googlelog::Error),
}
