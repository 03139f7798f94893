//! Errors.
use displaydoc::Display;
use thiserror::Error;

pub use crate::configuration::ConfigurationError;
pub use crate::spec::SpecError;

/// Error loading a contract ABI.
#[derive(Error, Display, Debug)]
#[non_exhaustive]
pub enum AbiError {
    /// could not deserialize the contract abi: {0}
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_error_message() {
        let error = AbiError::Deserialize(serde_json::from_str::<Vec<u8>>("{").unwrap_err());
        assert!(
            error
                .to_string()
                .starts_with("could not deserialize the contract abi: ")
        );
        assert!(std::error::Error::source(&error).is_some());
    }
}
