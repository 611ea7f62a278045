use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A particle or field was configured with values it can't be simulated with,
    /// e.g. a non-positive life span or a negative radius.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Settings couldn't be encoded or decoded.
    #[error(transparent)]
    Encoding(#[from] serde_cbor::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_the_problem() {
        let e = Error::invalid("life must be > 0");
        let msg = e.to_string();
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("life"));
    }
}
