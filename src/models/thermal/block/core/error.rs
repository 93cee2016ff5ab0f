use ode_solvers::dop_shared::IntegrationError;
use thiserror::Error;

/// Errors that can occur while advancing the block temperature in time.
#[derive(Debug, Error)]
pub enum StepError {
    /// The adaptive integrator failed to complete the step.
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    /// The step produced a non-finite block temperature.
    ///
    /// Reached when the drive current pushes the linearized balance into
    /// exponential growth, or when an input was not a number.
    #[error("step produced a non-finite block temperature: {temperature} K")]
    NonFinite {
        /// The offending temperature value, in kelvin.
        temperature: f64,
    },
}
