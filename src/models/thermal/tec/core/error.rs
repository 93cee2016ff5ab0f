use thiserror::Error;
use uom::si::f64::{
    ElectricCurrent, ElectricPotential, Power, TemperatureInterval, ThermalConductance,
    ThermodynamicTemperature,
};

/// Errors that can occur while deriving module parameters from a datasheet.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TecDatasheetError {
    #[error("invalid hot-side temperature: {value:?}")]
    HotSideTemperature { value: ThermodynamicTemperature },

    #[error("invalid maximum temperature difference: {value:?}")]
    MaxTemperatureDifference { value: TemperatureInterval },

    #[error("invalid maximum voltage: {value:?}")]
    MaxVoltage { value: ElectricPotential },

    #[error("invalid maximum current: {value:?}")]
    MaxCurrent { value: ElectricCurrent },

    #[error("invalid maximum cooling power: {value:?}")]
    MaxCoolingPower { value: Power },

    /// The published values do not describe a realizable thermal path.
    ///
    /// The derived module conductance must be finite and strictly positive;
    /// otherwise the model's conduction term is meaningless.
    #[error("derived module conductance is not strictly positive: {conductance:?}")]
    DegenerateThermalPath { conductance: ThermalConductance },
}
