//! Iterative solver for resistance-to-temperature lookup.
//!
//! This module inverts the Callendar–Van Dusen polynomial by varying the
//! temperature until the evaluated resistance converges to the target value.

mod config;
mod error;
mod problem;

pub use config::InversionConfig;
pub use error::InversionError;

use twine_solvers::equation::bisection;
use uom::si::{
    electrical_resistance::ohm,
    f64::{ElectricalResistance, ThermodynamicTemperature},
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use super::{MAX_CELSIUS, MIN_CELSIUS, RtdSensor};

use problem::{InversionProblem, RtdModel};

/// Solves for the temperature that produces a target sensor resistance.
///
/// Uses bisection over the sensor's valid span, where the forward polynomial
/// is strictly increasing and brackets every achievable resistance.
///
/// # Errors
///
/// Returns [`InversionError`] if the target is outside the achievable span
/// or the solver fails to converge.
pub(super) fn given_resistance(
    sensor: &RtdSensor,
    target: ElectricalResistance,
    config: InversionConfig,
) -> Result<ThermodynamicTemperature, InversionError> {
    let model = RtdModel::new(sensor);
    let problem = InversionProblem::new(target);

    let solution = bisection::solve(
        &model,
        &problem,
        [
            ThermodynamicTemperature::new::<degree_celsius>(MIN_CELSIUS).get::<kelvin>(),
            ThermodynamicTemperature::new::<degree_celsius>(MAX_CELSIUS).get::<kelvin>(),
        ],
        &config.bisection(),
        |_: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(InversionError::MaxIters {
            residual: ElectricalResistance::new::<ohm>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(ThermodynamicTemperature::new::<kelvin>(solution.x))
}
