use twine_solvers::equation::bisection;
use uom::si::{
    electrical_resistance::ohm,
    f64::{ElectricalResistance, TemperatureInterval},
    temperature_interval::kelvin as delta_kelvin,
};

/// Solver configuration for resistance-to-temperature lookup.
#[derive(Debug, Clone, Copy)]
pub struct InversionConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the temperature search variable.
    pub temp_tol: TemperatureInterval,

    /// Absolute tolerance for the resistance residual (achieved - target).
    pub resistance_tol: ElectricalResistance,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
            resistance_tol: ElectricalResistance::new::<ohm>(1e-9),
        }
    }
}

impl InversionConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temp_tol.get::<delta_kelvin>(),
            x_rel_tol: 0.0,
            residual_tol: self.resistance_tol.get::<ohm>(),
        }
    }
}
