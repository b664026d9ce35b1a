//! [`Handler`] abstractions.

/// Executable handler.
///
/// Execution is synchronous: every [`Handler`] completes in the caller's
/// thread without suspension points.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    ///
    /// # Errors
    ///
    /// Whatever the concrete [`Handler`] considers a failure.
    fn execute(&self, args: Args) -> Result<Self::Ok, Self::Err>;
}
