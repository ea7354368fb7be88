use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur during conversion and codec operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Error when a converter or codec is configured with unusable parameters
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Error when a number or digit string falls outside the converter's domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Error when a date of birth or sequential number is outside the encodable range
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// Error when an input string does not match the canonical layout
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    /// Error when a well-formed string carries a check digit that disagrees with its payload
    #[error("invalid checksum: expected '{expected}', found '{found}'")]
    InvalidChecksum { expected: char, found: char },
}
