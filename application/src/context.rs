//! [`Context`]-related definitions.

use std::io::{self, Write as _};

use crate::{
    view::{Format, Render, Text},
    AsError, Error, Service,
};

/// Application context.
#[derive(Debug)]
pub struct Context<Out = io::Stdout> {
    /// [`Service`] instance.
    service: Service,

    /// [`Format`] of the printed output.
    format: Format,

    /// Destination of the printed output.
    out: Out,
}

impl Context {
    /// Creates a new [`Context`] printing into the standard output.
    #[must_use]
    pub fn new(service: Service, format: Format) -> Self {
        Self::with_output(service, format, io::stdout())
    }
}

impl<Out: io::Write> Context<Out> {
    /// Creates a new [`Context`] printing into the provided `out`put.
    #[must_use]
    pub fn with_output(service: Service, format: Format, out: Out) -> Self {
        Self {
            service,
            format,
            out,
        }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the [`Format`] of the printed output.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Prints the provided `output` in the [`Format`] of this [`Context`].
    ///
    /// # Errors
    ///
    /// If failed to write the `output`.
    pub fn print<T: Render + ?Sized>(
        &mut self,
        output: &T,
    ) -> Result<(), Error> {
        match self.format {
            Format::Text => write!(self.out, "{}", Text(output))
                .map_err(AsError::into_error),
            Format::Json => serde_json::to_writer_pretty(&mut self.out, output)
                .map_err(io::Error::from)
                .and_then(|()| writeln!(self.out))
                .map_err(AsError::into_error),
        }
    }

    /// Returns the printed output.
    #[must_use]
    pub fn output(&self) -> &Out {
        &self.out
    }
}
