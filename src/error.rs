use thiserror::Error;

/// Contract violations caught while configuring a [`BBCodeParser`][crate::BBCodeParser].
/// # Remarks
/// Formatting itself never fails, every mistake in the input has a defined output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("tag handlers must have a non-empty display name")]
    EmptyTagName,

    #[error("tag name `{0}` starts with the close marker `/`")]
    CloseMarkerInName(String),

    #[error("tag name `{0}` is reserved for the root context")]
    ReservedTagName(String),

    #[error("tag delimiters must not be empty")]
    EmptyDelimiter,

    #[error("start and end tag delimiters are both `{0}`")]
    IdenticalDelimiters(String),
}
