use super::Error;

/// Free-form error built from a formatted message.
#[derive(Debug, Clone)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    pub(super) fn new(message: impl Into<String>) -> AdhocError {
        AdhocError {
            message: message.into().into(),
        }
    }
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an error from pre-formatted arguments. Used by [`bail!`] and [`err!`].
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::adhoc(args.to_string())
    }

    /// Creates an error carrying only a message.
    pub fn adhoc(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Adhoc(AdhocError::new(message)))
    }
}
