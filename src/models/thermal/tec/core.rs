//! Derived-parameter thermoelectric module modeling.
//!
//! Manufacturers publish a module's performance as maximums measured at a
//! fixed hot-side temperature. Those five values determine the three
//! physical parameters of the standard single-stage model: the effective
//! Seebeck coefficient, the module's thermal path, and its electrical
//! resistance. Heat flow at the cold side then follows from the usual
//! balance of Peltier transport, conduction, and Joule heating.

mod datasheet;
mod error;

pub use datasheet::TecDatasheet;
pub use error::TecDatasheetError;

use uom::si::{
    f64::{
        ElectricCurrent, ElectricalResistance, Power, Ratio, TemperatureInterval,
        ThermalConductance, ThermodynamicTemperature,
    },
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::constraint::{Constraint, StrictlyPositive};
use crate::support::units::{SeebeckCoefficient, ThermalResistance};

/// Reinterprets an absolute temperature as its interval above absolute zero.
///
/// The Peltier term scales with the absolute cold-side temperature, which
/// uom only permits in multiplication as an interval.
pub(crate) fn kelvins_above_zero(temperature: ThermodynamicTemperature) -> TemperatureInterval {
    TemperatureInterval::new::<delta_kelvin>(temperature.get::<kelvin>())
}

/// The exact linear form of cold-side heat flow at a fixed drive current
/// and hot-side temperature: `q(T) = offset + slope·T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCoefficients {
    /// Constant term of the heat flow, W.
    pub offset: Power,

    /// Sensitivity of the heat flow to cold-side temperature, W/K.
    pub slope: ThermalConductance,
}

impl LinearCoefficients {
    /// Evaluates the heat flow at a cold-side temperature.
    #[must_use]
    pub fn evaluate(&self, cold_side: ThermodynamicTemperature) -> Power {
        self.offset + self.slope * kelvins_above_zero(cold_side)
    }

    /// Sums two linear forms termwise.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            offset: self.offset + other.offset,
            slope: self.slope + other.slope,
        }
    }
}

/// A single-stage thermoelectric module with parameters derived from its
/// datasheet.
///
/// The derivation follows the standard reduction of published maximums:
///
/// - Seebeck coefficient: `α = (Umax·Imax + 2·Qmax) / ((2·Th + ΔTmax)·Imax)`
/// - Module conductance: `κ = (Qmax − α·ΔTmax·Imax) / ΔTmax` (the thermal
///   resistance θ is its reciprocal)
/// - Electrical resistance: `R = 2·(α·Th·Imax − Qmax) / Imax²`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TecElement {
    seebeck: SeebeckCoefficient,
    conductance: ThermalConductance,
    resistance: ElectricalResistance,
}

impl TecElement {
    /// Derives module parameters from a datasheet.
    ///
    /// # Errors
    ///
    /// Returns a [`TecDatasheetError`] if any published value is not
    /// strictly positive, or if the derived thermal path is degenerate
    /// (the conductance must be finite and strictly positive so later heat
    /// flow evaluation cannot divide by zero).
    pub fn new(datasheet: TecDatasheet) -> Result<Self, TecDatasheetError> {
        let th = datasheet.hot_side_temperature;
        if StrictlyPositive::check(&th.value).is_err() {
            return Err(TecDatasheetError::HotSideTemperature { value: th });
        }

        let dt_max = datasheet.max_temperature_difference;
        if StrictlyPositive::check(&dt_max.value).is_err() {
            return Err(TecDatasheetError::MaxTemperatureDifference { value: dt_max });
        }

        let u_max = datasheet.max_voltage;
        if StrictlyPositive::check(&u_max.value).is_err() {
            return Err(TecDatasheetError::MaxVoltage { value: u_max });
        }

        let i_max = datasheet.max_current;
        if StrictlyPositive::check(&i_max.value).is_err() {
            return Err(TecDatasheetError::MaxCurrent { value: i_max });
        }

        let q_max = datasheet.max_cooling_power;
        if StrictlyPositive::check(&q_max.value).is_err() {
            return Err(TecDatasheetError::MaxCoolingPower { value: q_max });
        }

        let th_span = kelvins_above_zero(th);

        let seebeck: SeebeckCoefficient =
            (u_max * i_max + 2.0 * q_max) / ((2.0 * th_span + dt_max) * i_max);

        let conductance: ThermalConductance = (q_max - seebeck * dt_max * i_max) / dt_max;
        if StrictlyPositive::check(&conductance.value).is_err() {
            return Err(TecDatasheetError::DegenerateThermalPath { conductance });
        }

        let resistance: ElectricalResistance =
            2.0 * (seebeck * th_span * i_max - q_max) / (i_max * i_max);

        Ok(Self {
            seebeck,
            conductance,
            resistance,
        })
    }

    /// Returns the effective Seebeck coefficient α, V/K.
    #[must_use]
    pub fn seebeck_coefficient(&self) -> SeebeckCoefficient {
        self.seebeck
    }

    /// Returns the module conductance κ = 1/θ, W/K.
    #[must_use]
    pub fn thermal_conductance(&self) -> ThermalConductance {
        self.conductance
    }

    /// Returns the module thermal resistance θ, K/W.
    #[must_use]
    pub fn thermal_resistance(&self) -> ThermalResistance {
        Ratio::new::<ratio>(1.0) / self.conductance
    }

    /// Returns the module electrical resistance R, Ω.
    #[must_use]
    pub fn electrical_resistance(&self) -> ElectricalResistance {
        self.resistance
    }

    /// Computes the heat flow into the module's cold side.
    ///
    /// The balance is `q = (T_hot − T_cold)·κ + α·T_cold·I + I²·R/2`: heat
    /// conducted across the module, carried by the Peltier effect, and half
    /// the Joule heating. A negative result means heat is being extracted
    /// from the cold side; negative current drives cooling.
    #[must_use]
    pub fn heat_power(
        &self,
        current: ElectricCurrent,
        cold_side: ThermodynamicTemperature,
        hot_side: ThermodynamicTemperature,
    ) -> Power {
        self.linear_coefficients(current, hot_side).evaluate(cold_side)
    }

    /// Returns the decomposition `q(T_cold) = offset + slope·T_cold` at a
    /// fixed drive current and hot-side temperature.
    ///
    /// `offset = T_hot·κ + I²·R/2` and `slope = α·I − κ`. Since
    /// [`Self::heat_power`] evaluates this decomposition directly, the
    /// identity between the two is exact in floating point, not merely
    /// algebraic.
    #[must_use]
    pub fn linear_coefficients(
        &self,
        current: ElectricCurrent,
        hot_side: ThermodynamicTemperature,
    ) -> LinearCoefficients {
        let joule_heating: Power = 0.5 * current * current * self.resistance;

        LinearCoefficients {
            offset: kelvins_above_zero(hot_side) * self.conductance + joule_heating,
            slope: self.seebeck * current - self.conductance,
        }
    }
}
