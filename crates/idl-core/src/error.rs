mod adhoc;
mod invalid_field;
mod invalid_type;

use adhoc::AdhocError;
use invalid_field::InvalidField;
use invalid_type::InvalidType;
use std::sync::Arc;

/// Returns early with an [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error reported while building or checking an IDL program.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    assert!(
                        inner.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    inner.kind
                }
                Err(shared) => {
                    assert!(
                        shared.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    shared.kind.clone()
                }
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Returns the innermost error of the chain.
    pub fn root(&self) -> &Error {
        let mut root = self;
        for err in self.chain() {
            root = err;
        }
        root
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => {
                let err: &(dyn std::error::Error + 'static) = &***err;
                Some(err)
            }
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug, Clone)]
enum ErrorKind {
    Anyhow(Arc<anyhow::Error>),
    Adhoc(AdhocError),
    InvalidField(InvalidField),
    InvalidType(InvalidType),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidField(err) => core::fmt::Display::fmt(err, f),
            InvalidType(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown idl error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(Arc::new(err)))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for String {
    fn into_error(self) -> Error {
        Error::adhoc(self)
    }
}

impl IntoError for &str {
    fn into_error(self) -> Error {
        Error::adhoc(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Error stays at one word
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn bail_macro() {
        fn missing() -> crate::Result<()> {
            crate::bail!("type `{}` is not declared", "Point")
        }

        let err = missing().unwrap_err();
        assert_eq!(err.to_string(), "type `Point` is not declared");
        assert!(!err.is_invalid_type());
    }

    #[test]
    fn err_macro() {
        let err = crate::err!("field `{}` is unused", "legacy");
        assert_eq!(err.to_string(), "field `legacy` is unused");
        assert!(!err.is_invalid_field());
    }

    #[test]
    fn shared_consequent_keeps_kind() {
        let consequent = Error::duplicate_field_key(1, "a", "b");
        let retained = consequent.clone();

        let err = Error::adhoc("building `User`").context(consequent);
        assert!(err.is_duplicate_field_key());
        assert_eq!(
            err.to_string(),
            "invalid field: fields `a` and `b` share key 1: building `User`"
        );
        assert!(retained.is_invalid_field());
        assert_eq!(retained.to_string(), "invalid field: fields `a` and `b` share key 1");
    }

    #[test]
    fn anyhow_source() {
        use std::error::Error as _;

        let err: Error = anyhow::anyhow!("disk full").into();
        assert_eq!(err.source().unwrap().to_string(), "disk full");
        assert!(Error::adhoc("plain").source().is_none());
    }

    #[test]
    fn context_keeps_root_kind() {
        let err = Error::reserved_field_key("id").context("struct `User`");
        assert!(err.is_invalid_field());
        assert!(!err.root().is_invalid_type());
        assert!(err.root().is_invalid_field());
        assert_eq!(
            err.to_string(),
            "struct `User`: invalid field: field `id` uses reserved key 0"
        );
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn duplicate_field_key() {
        let err = Error::duplicate_field_key(3, "name", "email");
        assert_eq!(
            err.to_string(),
            "invalid field: fields `name` and `email` share key 3"
        );
    }

    #[test]
    fn key_out_of_range() {
        let err = Error::field_key_out_of_range("big", 40_000);
        assert_eq!(
            err.to_string(),
            "invalid field: key 40000 of field `big` is outside the range -32768..=32767"
        );
    }

    #[test]
    fn invalid_type_error() {
        let err = Error::invalid_type("type `Point` is declared twice");
        assert!(err.is_invalid_type());
        assert_eq!(
            err.to_string(),
            "invalid type: type `Point` is declared twice"
        );
    }
}
