use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricCurrent, ElectricPotential, Power, TemperatureInterval, ThermodynamicTemperature},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Published performance values for a single-stage thermoelectric module.
///
/// Manufacturers characterize a module by its maximums at a fixed hot-side
/// temperature: the largest sustainable temperature difference, the drive
/// values that produce it, and the peak cooling power at zero temperature
/// difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TecDatasheet {
    /// Hot-side reference temperature for the published maximums.
    pub hot_side_temperature: ThermodynamicTemperature,

    /// Largest temperature difference the module sustains at zero load.
    pub max_temperature_difference: TemperatureInterval,

    /// Drive voltage at the maximum temperature difference.
    pub max_voltage: ElectricPotential,

    /// Drive current at the maximum temperature difference.
    pub max_current: ElectricCurrent,

    /// Cooling power at maximum current and zero temperature difference.
    pub max_cooling_power: Power,
}

/// Published figures for a common 40×40 mm single-stage module.
impl Default for TecDatasheet {
    fn default() -> Self {
        Self {
            hot_side_temperature: ThermodynamicTemperature::new::<kelvin>(300.0),
            max_temperature_difference: TemperatureInterval::new::<delta_kelvin>(70.0),
            max_voltage: ElectricPotential::new::<volt>(16.1),
            max_current: ElectricCurrent::new::<ampere>(6.1),
            max_cooling_power: Power::new::<watt>(57.0),
        }
    }
}
