//! Lumped-capacitance modeling of a conditioned metal block.
//!
//! The block sits on a thermoelectric module's cold face and exchanges heat
//! three ways: through the module itself, by free convection with ambient
//! air, and by radiation at its exposed surface. Treating the block as a
//! single thermal mass reduces the balance to one ordinary differential
//! equation in block temperature.
//!
//! Two fidelities are offered per step: a closed-form solution of the
//! linearized balance, and adaptive Runge-Kutta integration of the full
//! nonlinear balance.

mod balance;
mod error;

pub use error::StepError;

use uom::si::{
    area::square_millimeter,
    f64::{
        Area, ElectricCurrent, HeatCapacity, HeatTransfer, Length, MassDensity, Ratio,
        SpecificHeatCapacity, TemperatureInterval, ThermalConductance, ThermodynamicTemperature,
        Time,
    },
    heat_transfer::watt_per_square_meter_kelvin,
    length::millimeter,
    mass_density::kilogram_per_cubic_meter,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::models::thermal::tec::{LinearCoefficients, TecElement, core::kelvins_above_zero};
use crate::support::constraint::{
    Constrained, ConstraintError, NonNegative, StrictlyPositive, UnitInterval,
};

use balance::HeatBalance;

/// The Stefan-Boltzmann constant, W/(m²·K⁴).
const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Geometry and material properties of a lumped block.
///
/// The default describes the reference fixture: a 12 mm × 12 mm × 3 mm
/// polished aluminum block seated on the module's cold face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockConfig {
    /// Face area exchanging heat with the module and the surrounding air.
    pub area: Area,

    /// Block thickness.
    pub thickness: Length,

    /// Surface emissivity of the exposed face, in `[0, 1]`.
    pub emissivity: Ratio,

    /// Specific heat capacity of the block material.
    pub specific_heat: SpecificHeatCapacity,

    /// Density of the block material.
    pub density: MassDensity,

    /// Free-convection film coefficient at the exposed face.
    pub film_coefficient: HeatTransfer,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            area: Area::new::<square_millimeter>(144.0),
            thickness: Length::new::<millimeter>(3.0),
            emissivity: Ratio::new::<ratio>(0.04),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(900.0),
            density: MassDensity::new::<kilogram_per_cubic_meter>(2700.0),
            film_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(10.0),
        }
    }
}

/// A lumped-capacitance block validated for physical plausibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalBlock {
    area: Constrained<Area, StrictlyPositive>,
    thickness: Constrained<Length, StrictlyPositive>,
    emissivity: Constrained<Ratio, UnitInterval>,
    specific_heat: Constrained<SpecificHeatCapacity, StrictlyPositive>,
    density: Constrained<MassDensity, StrictlyPositive>,
    film_coefficient: Constrained<HeatTransfer, NonNegative>,
}

impl ThermalBlock {
    /// Validates a block description.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if a property is out of range:
    /// dimensions, density, and specific heat must be strictly positive,
    /// emissivity must lie in `[0, 1]`, and the film coefficient must be
    /// non-negative (zero models a perfectly still, insulated enclosure).
    pub fn new(config: BlockConfig) -> Result<Self, ConstraintError> {
        Ok(Self {
            area: StrictlyPositive::new(config.area)?,
            thickness: StrictlyPositive::new(config.thickness)?,
            emissivity: UnitInterval::new(config.emissivity)?,
            specific_heat: StrictlyPositive::new(config.specific_heat)?,
            density: StrictlyPositive::new(config.density)?,
            film_coefficient: NonNegative::new(config.film_coefficient)?,
        })
    }

    /// Lumped heat capacity `c·ρ·A·d` of the block.
    #[must_use]
    pub fn heat_capacity(&self) -> HeatCapacity {
        self.specific_heat.into_inner()
            * self.density.into_inner()
            * self.area.into_inner()
            * self.thickness.into_inner()
    }

    /// The block's convective exchange with ambient air as a linear form in
    /// block temperature: `offset = h·A·T_amb` and `slope = −h·A`.
    #[must_use]
    pub fn convection_coefficients(
        &self,
        ambient: ThermodynamicTemperature,
    ) -> LinearCoefficients {
        let conductance: ThermalConductance =
            self.film_coefficient.into_inner() * self.area.into_inner();

        LinearCoefficients {
            offset: conductance * kelvins_above_zero(ambient),
            slope: -conductance,
        }
    }

    /// Radiative exchange factor `ε·σ·A`, W/K⁴.
    fn radiation_factor(&self) -> f64 {
        self.emissivity.into_inner().get::<ratio>()
            * STEFAN_BOLTZMANN
            * self.area.into_inner().value
    }

    /// Advances the block temperature across one interval of held inputs.
    ///
    /// Drive current and ambient temperature are held constant over the
    /// interval, so a longer gap between updates coarsens the input history
    /// rather than the integration itself. A non-positive interval returns
    /// the initial temperature unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if the adaptive integrator fails or the step
    /// produces a non-finite temperature.
    pub fn advance(
        &self,
        tec: &TecElement,
        step: BlockStep,
        config: StepConfig,
    ) -> Result<ThermodynamicTemperature, StepError> {
        let elapsed_s = step.elapsed.get::<second>();
        if elapsed_s <= 0.0 {
            return Ok(step.initial);
        }

        let balance = HeatBalance::new(self, tec, step.ambient, step.current);
        let initial_k = step.initial.get::<kelvin>();

        let final_k = match step.mode {
            PhysicsMode::Simplified => balance.linear_step(initial_k, elapsed_s),
            PhysicsMode::Full => balance.full_step(initial_k, elapsed_s, config)?,
        };

        if !final_k.is_finite() {
            return Err(StepError::NonFinite {
                temperature: final_k,
            });
        }

        Ok(ThermodynamicTemperature::new::<kelvin>(final_k))
    }

    /// The resting temperature of the linearized balance, if one exists.
    ///
    /// Strong positive drive can tip the net linear gain positive, in which
    /// case the response grows without bound and `None` is returned.
    #[must_use]
    pub fn linear_equilibrium(
        &self,
        tec: &TecElement,
        ambient: ThermodynamicTemperature,
        current: ElectricCurrent,
    ) -> Option<ThermodynamicTemperature> {
        HeatBalance::new(self, tec, ambient, current)
            .equilibrium()
            .map(ThermodynamicTemperature::new::<kelvin>)
    }
}

/// Fidelity of the block's heat balance when advancing in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsMode {
    /// Closed-form response of the linearized balance; radiation neglected.
    #[default]
    Simplified,

    /// Adaptive integration of the nonlinear balance, radiation included.
    Full,
}

/// Tolerances for the adaptive integrator used in full-physics steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepConfig {
    /// Relative tolerance on the integrated temperature.
    pub rel_tol: f64,

    /// Absolute tolerance on the integrated temperature.
    pub abs_tol: TemperatureInterval,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            rel_tol: 1e-8,
            abs_tol: TemperatureInterval::new::<delta_kelvin>(1e-8),
        }
    }
}

/// One pull-based update of the block temperature across a held interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStep {
    /// Block temperature at the start of the interval.
    pub initial: ThermodynamicTemperature,

    /// Ambient air and module hot-side temperature, held fixed.
    pub ambient: ThermodynamicTemperature,

    /// Drive current through the module, held fixed.
    pub current: ElectricCurrent,

    /// Length of the interval.
    pub elapsed: Time,

    /// Physics fidelity used to advance the balance.
    pub mode: PhysicsMode,
}
