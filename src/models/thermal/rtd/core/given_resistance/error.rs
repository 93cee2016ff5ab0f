use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::ElectricalResistance;

/// Errors that can occur while looking up temperature from resistance.
#[derive(Debug, Error)]
pub enum InversionError {
    /// The bisection solver encountered an error.
    ///
    /// A target resistance outside the sensor's achievable span leaves the
    /// search bracket without a sign change and is reported through this
    /// variant.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best resistance residual achieved.
        ///
        /// This is the smallest absolute difference between evaluated and
        /// target resistance encountered during iteration.
        residual: ElectricalResistance,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
