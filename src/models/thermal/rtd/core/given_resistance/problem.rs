//! Problem formulation for resistance-to-temperature lookup.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    electrical_resistance::ohm,
    f64::{ElectricalResistance, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use crate::models::thermal::rtd::core::RtdSensor;

/// Model adapter exposing temperature as the sole input variable.
///
/// Wraps the forward polynomial so the bisection solver can evaluate the
/// sensor at candidate temperatures.
pub(super) struct RtdModel<'a> {
    sensor: &'a RtdSensor,
}

impl<'a> RtdModel<'a> {
    pub(super) fn new(sensor: &'a RtdSensor) -> Self {
        Self { sensor }
    }
}

impl Model for RtdModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = ElectricalResistance;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.sensor.resistance(*input))
    }
}

/// Equation problem definition for resistance matching.
///
/// Computes the residual as `evaluated_resistance - target_resistance`.
pub(super) struct InversionProblem {
    target: ElectricalResistance,
}

impl InversionProblem {
    pub(super) fn new(target: ElectricalResistance) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for InversionProblem {
    type Input = ThermodynamicTemperature;
    type Output = ElectricalResistance;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.get::<ohm>() - self.target.get::<ohm>()])
    }
}
