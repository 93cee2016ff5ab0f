use ode_solvers::{SVector, System};
use uom::si::{
    f64::{ElectricCurrent, ThermodynamicTemperature},
    heat_capacity::joule_per_kelvin,
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::models::thermal::tec::TecElement;

use super::{StepConfig, StepError, ThermalBlock};

/// Lumped heat balance of a block at a fixed drive current and ambient.
///
/// All terms are reduced to raw SI values here so the same right-hand side
/// can serve both the closed-form linear step and the adaptive integrator.
#[derive(Debug, Clone, Copy)]
pub(super) struct HeatBalance {
    /// Temperature-independent heat flow into the block, W.
    offset_w: f64,

    /// Change in heat flow per kelvin of block temperature, W/K.
    slope_w_per_k: f64,

    /// Ambient temperature, K.
    ambient_k: f64,

    /// Radiative exchange factor `ε·σ·A`, W/K⁴.
    radiation_w_per_k4: f64,

    /// Lumped heat capacity of the block, J/K.
    capacity_j_per_k: f64,
}

impl HeatBalance {
    /// Combines the module's Peltier terms with the block's convective
    /// exchange, both linear in block temperature.
    pub(super) fn new(
        block: &ThermalBlock,
        tec: &TecElement,
        ambient: ThermodynamicTemperature,
        current: ElectricCurrent,
    ) -> Self {
        let linear = tec
            .linear_coefficients(current, ambient)
            .plus(&block.convection_coefficients(ambient));

        Self {
            offset_w: linear.offset.get::<watt>(),
            slope_w_per_k: linear.slope.get::<watt_per_kelvin>(),
            ambient_k: ambient.get::<kelvin>(),
            radiation_w_per_k4: block.radiation_factor(),
            capacity_j_per_k: block.heat_capacity().get::<joule_per_kelvin>(),
        }
    }

    /// Net rate of temperature change at a block temperature, K/s.
    fn derivative(&self, temperature_k: f64) -> f64 {
        let linear_w = self.offset_w + self.slope_w_per_k * temperature_k;
        let radiation_w =
            self.radiation_w_per_k4 * (self.ambient_k.powi(4) - temperature_k.powi(4));

        (linear_w + radiation_w) / self.capacity_j_per_k
    }

    /// Advances the linearized balance (radiation neglected) in closed form.
    ///
    /// With `a = slope/C` and `b = offset/C`, the balance integrates to
    /// `T(t) = T0 + (a·T0 + b)·(e^(a·t) − 1)/a`. When the linear gain
    /// cancels exactly the response degenerates to constant drift `T0 + b·t`.
    pub(super) fn linear_step(&self, initial_k: f64, elapsed_s: f64) -> f64 {
        let a = self.slope_w_per_k / self.capacity_j_per_k;
        let b = self.offset_w / self.capacity_j_per_k;

        if a == 0.0 {
            return initial_k + b * elapsed_s;
        }

        initial_k + (a * initial_k + b) * f64::exp_m1(a * elapsed_s) / a
    }

    /// Advances the full balance, radiation included, with an adaptive
    /// Runge-Kutta step.
    pub(super) fn full_step(
        self,
        initial_k: f64,
        elapsed_s: f64,
        config: StepConfig,
    ) -> Result<f64, StepError> {
        let mut stepper = ode_solvers::Dopri5::new(
            self,
            0.0,
            elapsed_s,
            elapsed_s,
            SVector::<f64, 1>::new(initial_k),
            config.rel_tol,
            config.abs_tol.get::<delta_kelvin>(),
        );

        stepper.integrate()?;

        Ok(stepper.y_out().last().map_or(f64::NAN, |y| y[0]))
    }

    /// The temperature where the linearized balance comes to rest.
    ///
    /// `None` when the drive term overwhelms the passive losses, since the
    /// linearized block then has no bounded resting temperature.
    pub(super) fn equilibrium(&self) -> Option<f64> {
        (self.slope_w_per_k < 0.0).then(|| -self.offset_w / self.slope_w_per_k)
    }
}

impl System<f64, SVector<f64, 1>> for HeatBalance {
    fn system(&self, _time: f64, y: &SVector<f64, 1>, dy: &mut SVector<f64, 1>) {
        dy[0] = self.derivative(y[0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::electric_current::ampere;

    use crate::models::thermal::tec::TecDatasheet;

    use crate::models::thermal::block::BlockConfig;

    /// Builds a balance for the reference block at 295 K ambient.
    fn balance(current: f64) -> HeatBalance {
        let block = ThermalBlock::new(BlockConfig::default()).expect("reference block is valid");
        let tec = TecElement::new(TecDatasheet::default()).expect("default datasheet is valid");

        HeatBalance::new(
            &block,
            &tec,
            ThermodynamicTemperature::new::<kelvin>(295.0),
            ElectricCurrent::new::<ampere>(current),
        )
    }

    #[test]
    fn derivative_vanishes_at_ambient_without_drive() {
        let balance = balance(0.0);

        assert_relative_eq!(balance.derivative(295.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn linear_step_is_stationary_at_its_equilibrium() {
        let balance = balance(-1.0);
        let resting = balance.equilibrium().expect("cooling drive must decay");

        assert_relative_eq!(balance.linear_step(resting, 3.0), resting, epsilon = 1e-9);
    }

    #[test]
    fn full_step_tracks_linear_step_at_low_emissivity() {
        let balance = balance(-1.0);
        let config = StepConfig::default();

        let full = balance
            .full_step(295.0, 2.0, config)
            .expect("integration over a short step succeeds");
        let linear = balance.linear_step(295.0, 2.0);

        // Radiative exchange for the reference block is three orders of
        // magnitude below conduction, so the trajectories nearly coincide.
        assert_relative_eq!(full, linear, max_relative = 1e-4);
    }

    #[test]
    fn equilibrium_exists_only_for_decaying_response() {
        let resting = balance(-1.0).equilibrium().expect("cooling drive must decay");
        assert!(resting > 260.0 && resting < 280.0);

        // Past α·I = κ + h·A the linear gain turns positive and the
        // response grows without bound.
        assert!(balance(12.0).equilibrium().is_none());
    }

    #[test]
    fn runaway_linear_response_overflows_to_infinity() {
        let result = balance(12.0).linear_step(295.0, 36_000.0);

        assert!(result.is_infinite());
    }
}
