//! [`Error`]-related definitions.

use std::{fmt, io};

use derive_more::Error as StdError;
use service::infra::database;
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[exit = $exit_code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            exit_code: $exit_code,
                            message: $message.to_string(),
                            details: None,
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// CLI [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Process exit code caused by this [`Error`].
    pub exit_code: u8,

    /// [`Error`] message.
    pub message: String,

    /// Details of this [`Error`] occurrence, if any.
    pub details: Option<String>,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,
}

impl Error {
    /// Create a new [`Error`] representing an internal failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            exit_code: 1,
            message: msg.to_string(),
            details: None,
            backtrace: None,
        }
    }

    /// Attaches the provided `details` to this [`Error`].
    #[must_use]
    pub fn with_details(mut self, details: impl ToString) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            exit_code: _,
            message,
            details,
            backtrace: _,
        } = self;

        write!(f, "[{code}]: {message}")?;
        if let Some(details) = details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "STORE_UNAVAILABLE"]
                #[exit = 6]
                #[message = "Store file cannot be read or written"]
                Unavailable,
            }
        }

        Some(crate::Error::from(Error::Unavailable).with_details(self))
    }
}

impl AsError for io::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for serde_json::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_BACKUP"]
                #[exit = 5]
                #[message = "Backup is not a valid store"]
                InvalidBackup,
            }
        }

        Some(crate::Error::from(Error::InvalidBackup).with_details(self))
    }
}

#[cfg(test)]
mod spec {
    use super::{AsError as _, Error};
    use crate::define_error;

    define_error! {
        enum TestError {
            #[code = "SOMETHING_WRONG"]
            #[exit = 3]
            #[message = "Something went wrong"]
            Wrong,
        }
    }

    #[test]
    fn displays_code_and_message() {
        let err = Error::from(TestError::Wrong);

        assert_eq!(err.exit_code, 3);
        assert_eq!(err.to_string(), "[SOMETHING_WRONG]: Something went wrong");
        assert_eq!(
            err.with_details("twice").to_string(),
            "[SOMETHING_WRONG]: Something went wrong: twice",
        );
    }

    #[test]
    fn unknown_errors_are_internal() {
        let err = std::io::Error::other("disk on fire").as_error();

        assert_eq!(err.code, "INTERNAL_ERROR");
        assert_eq!(err.exit_code, 1);
        assert_eq!(err.message, "disk on fire");
    }
}
