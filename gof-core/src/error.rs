use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Malformed or missing numeric input for a distribution.
    #[error("Invalid {distribution} parameters: {message}")]
    InvalidParameter {
        distribution: String,
        message: String,
    },

    #[error("{0}")]
    UnsupportedType(String),

    /// Input that is well-formed but carries nothing to test (e.g. zero observations).
    #[error("{0}")]
    DegenerateInput(String),

    #[error("Total probability mass is zero for the {0} distribution with the given parameters.")]
    ZeroMass(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn invalid_parameter(distribution: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidParameter {
            distribution: distribution.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
