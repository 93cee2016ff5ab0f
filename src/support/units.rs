//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, power,
//! electrical resistance). This module provides extensions that are useful
//! for modeling but aren't included in [`uom`].
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use thermal_twin::support::units::TemperatureDifference;
//!
//! let block = ThermodynamicTemperature::new::<kelvin>(280.0);
//! let ambient = ThermodynamicTemperature::new::<kelvin>(295.0);
//! let delta_t = ambient.minus(block);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```
//!
//! This extension trait is currently needed due to limitations in [`uom`].
//! See [`TemperatureDifference`] for details.
//!
//! ## Quantity aliases
//!
//! [`uom`] has no named quantities for a Seebeck coefficient (V/K) or a
//! lumped thermal resistance (K/W), so this module defines them as
//! [`uom::si::Quantity`] aliases.

mod quantities;
mod temperature_difference;

pub use quantities::{SeebeckCoefficient, ThermalResistance};
pub use temperature_difference::TemperatureDifference;
