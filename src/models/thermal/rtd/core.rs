//! Callendar–Van Dusen resistance thermometry.
//!
//! A platinum RTD reports temperature as a resistance change. The forward
//! map (temperature to resistance) is a closed-form polynomial; the inverse
//! has no closed form over the sensor's full span, so lookup solves the
//! forward map numerically.

mod given_resistance;

pub use given_resistance::{InversionConfig, InversionError};

use uom::si::{
    electrical_resistance::ohm,
    f64::{ElectricalResistance, ThermodynamicTemperature},
    thermodynamic_temperature::degree_celsius,
};

use crate::support::constraint::{Constraint, ConstraintError, StrictlyPositive};

use given_resistance::given_resistance;

/// IEC 60751 Callendar–Van Dusen coefficients for platinum.
const CVD_A: f64 = 3.9083e-3;
const CVD_B: f64 = -5.775e-7;
const CVD_C: f64 = -4.183e-12;

/// Span over which the polynomial is defined and strictly increasing, in °C.
const MIN_CELSIUS: f64 = -200.0;
const MAX_CELSIUS: f64 = 850.0;

/// A platinum RTD characterized by its nominal resistance at 0 °C.
///
/// Standard sensors are available through [`RtdSensor::pt100`] and
/// [`RtdSensor::pt1000`]; other nominal values go through [`RtdSensor::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RtdSensor {
    r0: ElectricalResistance,
}

impl RtdSensor {
    /// Creates a sensor with the given nominal resistance at 0 °C.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] unless the nominal resistance is
    /// strictly positive and finite.
    pub fn new(r0: ElectricalResistance) -> Result<Self, ConstraintError> {
        StrictlyPositive::check(&r0.value)?;
        Ok(Self { r0 })
    }

    /// A PT100 sensor (100 Ω at 0 °C).
    #[must_use]
    pub fn pt100() -> Self {
        Self {
            r0: ElectricalResistance::new::<ohm>(100.0),
        }
    }

    /// A PT1000 sensor (1000 Ω at 0 °C).
    #[must_use]
    pub fn pt1000() -> Self {
        Self {
            r0: ElectricalResistance::new::<ohm>(1000.0),
        }
    }

    /// Returns the nominal resistance at 0 °C.
    #[must_use]
    pub fn nominal_resistance(&self) -> ElectricalResistance {
        self.r0
    }

    /// Evaluates the Callendar–Van Dusen polynomial at the given temperature.
    ///
    /// With `t` in °C, the resistance is `R0·(1 + A·t + B·t²)` at and above
    /// 0 °C, with the additional `R0·C·(t − 100)·t³` term below 0 °C. The
    /// polynomial is defined for −200 °C to 850 °C and this method does not
    /// range-check its argument.
    #[must_use]
    pub fn resistance(&self, temperature: ThermodynamicTemperature) -> ElectricalResistance {
        let t = temperature.get::<degree_celsius>();
        let mut poly = 1.0 + CVD_A * t + CVD_B * t * t;
        if t < 0.0 {
            poly += CVD_C * (t - 100.0) * t.powi(3);
        }
        self.r0 * poly
    }

    /// Finds the temperature at which this sensor reads the given resistance.
    ///
    /// The lookup solves `resistance(T) = target` by bisection over the
    /// sensor's −200 °C to 850 °C span, where the forward polynomial is
    /// strictly increasing and the root is unique.
    ///
    /// # Errors
    ///
    /// Returns an [`InversionError`] if the target resistance lies outside
    /// the achievable span or the solver fails to converge.
    pub fn temperature(
        &self,
        resistance: ElectricalResistance,
        config: InversionConfig,
    ) -> Result<ThermodynamicTemperature, InversionError> {
        given_resistance(self, resistance, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::kelvin;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn nominal_resistance_must_be_physical() {
        assert!(RtdSensor::new(ElectricalResistance::new::<ohm>(500.0)).is_ok());
        assert!(RtdSensor::new(ElectricalResistance::new::<ohm>(0.0)).is_err());
        assert!(RtdSensor::new(ElectricalResistance::new::<ohm>(-100.0)).is_err());
        assert!(RtdSensor::new(ElectricalResistance::new::<ohm>(f64::NAN)).is_err());
    }

    #[test]
    fn reads_nominal_at_zero_celsius() {
        assert_relative_eq!(
            RtdSensor::pt100().resistance(celsius(0.0)).get::<ohm>(),
            100.0
        );
        assert_relative_eq!(
            RtdSensor::pt1000().resistance(celsius(0.0)).get::<ohm>(),
            1000.0
        );
    }

    #[test]
    fn branches_are_continuous_at_zero_celsius() {
        let sensor = RtdSensor::pt100();

        let just_below = sensor.resistance(celsius(-1e-9)).get::<ohm>();
        let just_above = sensor.resistance(celsius(1e-9)).get::<ohm>();

        // The cubic correction vanishes as t³, so the branch split is smooth.
        assert_relative_eq!(just_below, just_above, epsilon = 1e-9);
    }

    #[test]
    fn matches_iec_60751_table_points() {
        let sensor = RtdSensor::pt100();

        assert_relative_eq!(
            sensor.resistance(celsius(100.0)).get::<ohm>(),
            138.5055,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            sensor.resistance(celsius(-40.0)).get::<ohm>(),
            84.2707,
            epsilon = 1e-4
        );
    }

    #[test]
    fn strictly_increasing_over_span() {
        let sensor = RtdSensor::pt100();

        let mut previous = sensor.resistance(celsius(MIN_CELSIUS));
        let mut t = MIN_CELSIUS + 10.0;
        while t <= MAX_CELSIUS {
            let next = sensor.resistance(celsius(t));
            assert!(
                next > previous,
                "resistance must increase with temperature (failed at {t} °C)"
            );
            previous = next;
            t += 10.0;
        }
    }

    #[test]
    fn scales_with_nominal_resistance() {
        let reading = ThermodynamicTemperature::new::<kelvin>(295.0);

        let pt100 = RtdSensor::pt100().resistance(reading).get::<ohm>();
        let pt1000 = RtdSensor::pt1000().resistance(reading).get::<ohm>();

        assert_relative_eq!(10.0 * pt100, pt1000, epsilon = 1e-9);
    }
}
