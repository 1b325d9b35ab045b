use super::Error;

/// Error when the type registry is inconsistent.
///
/// This occurs when:
/// - A named type is declared twice
/// - A typedef chain loops back on itself
/// - A `TypeId` does not belong to the registry it is used with
#[derive(Debug, Clone)]
pub(super) struct InvalidType {
    message: Box<str>,
}

impl std::error::Error for InvalidType {}

impl core::fmt::Display for InvalidType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid type: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid type error.
    pub fn invalid_type(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidType(InvalidType {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error in its cause chain, is an
    /// invalid type error.
    pub fn is_invalid_type(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), super::ErrorKind::InvalidType(_)))
    }
}
