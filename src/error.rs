use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported when installing a forwarding rule.
///
/// Queries never fail; a malformed query string yields an empty result
/// list instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The string is empty or contains a character outside the alphabet.
    #[error("not a phone number: {0:?}")]
    NotANumber(String),
    /// Source and target of a rule are the same number.
    #[error("a prefix cannot forward to itself")]
    SelfForward,
}
