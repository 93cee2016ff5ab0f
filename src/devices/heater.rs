//! A simulated TEC-conditioned heater block.
//!
//! The heater wires the three thermal models together: a [`ThermalBlock`]
//! advanced lazily in wall-clock time, a [`TecElement`] driving it, and an
//! [`RtdSensor`] reading it back as a resistance. Nothing runs in the
//! background; temperature is recomputed on demand from the last snapshot,
//! so an idle heater costs nothing.

use std::time::Instant;

use log::{debug, trace};
use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        electric_current::ampere,
        electrical_resistance::ohm,
        f64::{ElectricCurrent, ElectricalResistance, ThermodynamicTemperature, Time},
        thermodynamic_temperature::kelvin,
    },
};

use crate::models::thermal::{
    block::{BlockConfig, BlockStep, PhysicsMode, StepConfig, StepError, ThermalBlock},
    rtd::RtdSensor,
    tec::{TecDatasheet, TecDatasheetError, TecElement},
};
use crate::support::constraint::ConstraintError;

use super::{Command, CommandOutcome, Device, DeviceError};

/// Description of a heater device and its physical parts.
///
/// The default describes the reference sandbox device: a PT100-instrumented
/// aluminum block at 295 K ambient, simplified physics, answering to the
/// name `"heater"`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaterConfig {
    /// Name the device answers to in dotted commands.
    pub name: String,

    /// Ambient air and module hot-side temperature, fixed for the device's
    /// lifetime.
    pub ambient: ThermodynamicTemperature,

    /// Starting physics fidelity.
    pub mode: PhysicsMode,

    /// Block geometry and material.
    pub block: BlockConfig,

    /// Thermoelectric module datasheet.
    pub tec: TecDatasheet,

    /// Nominal resistance of the block's RTD at 0 °C.
    pub rtd_nominal: ElectricalResistance,

    /// Solver tolerances for full-physics steps.
    pub solver: StepConfig,
}

impl Default for HeaterConfig {
    fn default() -> Self {
        Self {
            name: "heater".to_owned(),
            ambient: ThermodynamicTemperature::new::<kelvin>(295.0),
            mode: PhysicsMode::default(),
            block: BlockConfig::default(),
            tec: TecDatasheet::default(),
            rtd_nominal: ElectricalResistance::new::<ohm>(100.0),
            solver: StepConfig::default(),
        }
    }
}

/// Errors that can occur while building a heater from its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeaterError {
    /// The block description was rejected.
    #[error("invalid block configuration")]
    Block(#[source] ConstraintError),

    /// The RTD nominal resistance was rejected.
    #[error("invalid RTD configuration")]
    Rtd(#[source] ConstraintError),

    /// The module datasheet was rejected.
    #[error("invalid thermoelectric module datasheet")]
    Tec(#[from] TecDatasheetError),
}

/// A named heater block simulated in wall-clock time.
///
/// The block temperature evolves continuously between state changes. Each
/// change of drive current or physics mode snapshots the temperature under
/// the outgoing dynamics and restarts the interval clock, so the next read
/// integrates from the correct initial condition.
pub struct Heater {
    name: String,
    block: ThermalBlock,
    tec: TecElement,
    rtd: RtdSensor,
    ambient: ThermodynamicTemperature,
    mode: PhysicsMode,
    current: ElectricCurrent,
    solver: StepConfig,

    /// Instant of the last current or mode change.
    last_change: Instant,

    /// Block temperature when the dynamics last changed; the initial
    /// condition for the next step.
    baseline: ThermodynamicTemperature,

    /// Most recently computed block temperature.
    temperature: ThermodynamicTemperature,
}

impl Heater {
    /// Builds a heater resting at ambient with no drive current.
    ///
    /// The construction instant starts the device's interval clock; the
    /// heater never reads the wall clock itself.
    ///
    /// # Errors
    ///
    /// Returns a [`HeaterError`] if the block, RTD, or module description
    /// is invalid.
    pub fn new(config: HeaterConfig, now: Instant) -> Result<Self, HeaterError> {
        let block = ThermalBlock::new(config.block).map_err(HeaterError::Block)?;
        let tec = TecElement::new(config.tec)?;
        let rtd = RtdSensor::new(config.rtd_nominal).map_err(HeaterError::Rtd)?;

        debug!(
            "heater {:?} starting at {:.2} K ambient, {:?} physics",
            config.name,
            config.ambient.get::<kelvin>(),
            config.mode,
        );

        Ok(Self {
            name: config.name,
            block,
            tec,
            rtd,
            ambient: config.ambient,
            mode: config.mode,
            current: ElectricCurrent::ZERO,
            solver: config.solver,
            last_change: now,
            baseline: config.ambient,
            temperature: config.ambient,
        })
    }

    /// The name this heater answers to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The active physics fidelity.
    #[must_use]
    pub fn physics_mode(&self) -> PhysicsMode {
        self.mode
    }

    /// The drive current currently applied to the module.
    #[must_use]
    pub fn drive_current(&self) -> ElectricCurrent {
        self.current
    }

    /// The most recently computed block temperature, without advancing time.
    #[must_use]
    pub fn last_temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    /// Computes the block temperature at the given instant.
    ///
    /// Advances the heat balance from the last snapshot across the elapsed
    /// interval under the held current and mode. Instants earlier than the
    /// last change clamp to a zero interval and return the snapshot itself.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if the integration fails.
    pub fn temperature(&mut self, now: Instant) -> Result<ThermodynamicTemperature, StepError> {
        // Imported here rather than at module level so the unit struct does
        // not leak into the test module, where `second` names a binding.
        use uom::si::time::second;

        let elapsed = now.duration_since(self.last_change);

        let step = BlockStep {
            initial: self.baseline,
            ambient: self.ambient,
            current: self.current,
            elapsed: Time::new::<second>(elapsed.as_secs_f64()),
            mode: self.mode,
        };
        self.temperature = self.block.advance(&self.tec, step, self.solver)?;

        trace!(
            "heater {:?}: {:.3} K after {:.3} s",
            self.name,
            self.temperature.get::<kelvin>(),
            elapsed.as_secs_f64(),
        );

        Ok(self.temperature)
    }

    /// Reads the RTD resistance at the given instant.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if the underlying temperature read fails.
    pub fn resistance(&mut self, now: Instant) -> Result<ElectricalResistance, StepError> {
        let temperature = self.temperature(now)?;
        Ok(self.rtd.resistance(temperature))
    }

    /// Applies a new drive current.
    ///
    /// The block temperature is first read under the outgoing current so
    /// the new dynamics integrate from where the old ones left off. Setting
    /// the same current again still refreshes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if the snapshot read fails.
    pub fn set_current(
        &mut self,
        current: ElectricCurrent,
        now: Instant,
    ) -> Result<(), StepError> {
        self.rebase(now)?;
        debug!(
            "heater {:?}: drive current {:+.3} A",
            self.name,
            current.get::<ampere>(),
        );
        self.current = current;
        Ok(())
    }

    /// Switches the physics fidelity.
    ///
    /// Follows the same snapshot discipline as [`Self::set_current`]: the
    /// temperature is captured under the outgoing mode before the dynamics
    /// change.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if the snapshot read fails.
    pub fn set_physics_mode(&mut self, mode: PhysicsMode, now: Instant) -> Result<(), StepError> {
        self.rebase(now)?;
        debug!("heater {:?}: physics mode {mode:?}", self.name);
        self.mode = mode;
        Ok(())
    }

    /// Snapshots the temperature under the outgoing dynamics and restarts
    /// the interval clock.
    fn rebase(&mut self, now: Instant) -> Result<(), StepError> {
        self.baseline = self.temperature(now)?;
        self.last_change = now;
        Ok(())
    }

    fn execute_simplephysics(
        &mut self,
        value: &str,
        now: Instant,
    ) -> Result<CommandOutcome, DeviceError> {
        let mode = match value {
            "" => {
                let reply = match self.mode {
                    PhysicsMode::Simplified => "1",
                    PhysicsMode::Full => "0",
                };
                return Ok(CommandOutcome::Reported(reply.to_owned()));
            }
            "1" => PhysicsMode::Simplified,
            "0" => PhysicsMode::Full,
            other => {
                debug!(
                    "heater {:?}: rejecting simplephysics value {other:?}",
                    self.name,
                );
                return Ok(CommandOutcome::Rejected);
            }
        };

        self.set_physics_mode(mode, now)
            .map_err(|source| DeviceError::new(self.name.clone(), "simplephysics", source))?;

        Ok(CommandOutcome::Applied)
    }
}

impl Device for Heater {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &mut self,
        command: &Command<'_>,
        now: Instant,
    ) -> Result<CommandOutcome, DeviceError> {
        if command.device() != self.name {
            return Ok(CommandOutcome::NotForDevice);
        }

        match command.parameter() {
            "simplephysics" => self.execute_simplephysics(command.value(), now),
            other => {
                debug!("heater {:?}: unknown parameter {other:?}", self.name);
                Ok(CommandOutcome::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::millimeter};

    use crate::devices::Sandbox;

    fn named(name: &str) -> HeaterConfig {
        HeaterConfig {
            name: name.to_owned(),
            ..HeaterConfig::default()
        }
    }

    fn heater(now: Instant) -> Heater {
        Heater::new(HeaterConfig::default(), now).expect("default configuration is valid")
    }

    fn amps(current: f64) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(current)
    }

    fn temp(kelvins: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(kelvins)
    }

    fn cmd<'a>(command: &'a str, value: &'a str) -> Command<'a> {
        Command::parse(command, value).expect("test commands are dotted")
    }

    #[test]
    fn starts_at_ambient_with_zero_drive() {
        let t0 = Instant::now();
        let mut heater = heater(t0);

        assert_eq!(heater.drive_current(), ElectricCurrent::ZERO);
        assert_eq!(heater.physics_mode(), PhysicsMode::Simplified);
        assert_eq!(heater.temperature(t0).expect("read succeeds"), temp(295.0));
    }

    #[test]
    fn holds_at_ambient_without_drive() {
        let t0 = Instant::now();
        let mut heater = heater(t0);

        let after_an_hour = heater
            .temperature(t0 + Duration::from_secs(3600))
            .expect("read succeeds");

        assert_relative_eq!(after_an_hour.get::<kelvin>(), 295.0, epsilon = 1e-6);
    }

    #[test]
    fn resistance_reads_through_the_rtd() {
        let t0 = Instant::now();
        let mut heater = heater(t0);

        let resistance = heater.resistance(t0).expect("read succeeds");

        assert_relative_eq!(
            resistance.get::<ohm>(),
            RtdSensor::pt100().resistance(temp(295.0)).get::<ohm>(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn cools_toward_the_linear_fixed_point() {
        let t0 = Instant::now();
        let mut heater = heater(t0);

        heater.set_current(amps(-1.0), t0).expect("current change succeeds");
        let after_10s = heater
            .temperature(t0 + Duration::from_secs(10))
            .expect("read succeeds");

        let resting = ThermalBlock::new(BlockConfig::default())
            .expect("reference block is valid")
            .linear_equilibrium(
                &TecElement::new(TecDatasheet::default()).expect("default datasheet is valid"),
                temp(295.0),
                amps(-1.0),
            )
            .expect("cooling drive must have a resting temperature");

        // Ten seconds is several time constants; the block has essentially
        // settled below ambient at the fixed point.
        assert!(after_10s < temp(295.0));
        assert_relative_eq!(
            after_10s.get::<kelvin>(),
            resting.get::<kelvin>(),
            epsilon = 0.2
        );
    }

    #[test]
    fn refreshing_the_current_preserves_the_reading() {
        let t0 = Instant::now();
        let t5 = t0 + Duration::from_secs(5);
        let mut heater = heater(t0);
        heater.set_current(amps(-1.0), t0).expect("current change succeeds");

        let before = heater.temperature(t5).expect("read succeeds");
        heater.set_current(amps(-1.0), t5).expect("refresh succeeds");
        let after = heater.temperature(t5).expect("read succeeds");

        assert_eq!(before, after);
    }

    #[test]
    fn rebasing_preserves_the_trajectory() {
        let t0 = Instant::now();
        let t5 = t0 + Duration::from_secs(5);
        let t7 = t0 + Duration::from_secs(7);

        // One heater re-anchored mid-flight, one left alone.
        let mut rebased = heater(t0);
        rebased.set_current(amps(-1.0), t0).expect("current change succeeds");
        rebased.set_current(amps(-1.0), t5).expect("refresh succeeds");
        let with_rebase = rebased.temperature(t7).expect("read succeeds");

        let mut control = heater(t0);
        control.set_current(amps(-1.0), t0).expect("current change succeeds");
        let without_rebase = control.temperature(t7).expect("read succeeds");

        assert_relative_eq!(
            with_rebase.get::<kelvin>(),
            without_rebase.get::<kelvin>(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn dropping_the_drive_relaxes_back_to_ambient() {
        let t0 = Instant::now();
        let t5 = t0 + Duration::from_secs(5);
        let mut heater = heater(t0);

        heater.set_current(amps(-1.0), t0).expect("current change succeeds");
        heater.set_current(amps(0.0), t5).expect("current change succeeds");

        let settled = heater
            .temperature(t5 + Duration::from_secs(60))
            .expect("read succeeds");

        assert_relative_eq!(settled.get::<kelvin>(), 295.0, epsilon = 1e-6);
    }

    #[test]
    fn mode_switch_preserves_continuity() {
        let t0 = Instant::now();
        let t2 = t0 + Duration::from_secs(2);
        let mut heater = heater(t0);
        heater.set_current(amps(-1.0), t0).expect("current change succeeds");

        let before = heater.temperature(t2).expect("read succeeds");
        heater
            .set_physics_mode(PhysicsMode::Full, t2)
            .expect("mode change succeeds");
        let after = heater.temperature(t2).expect("read succeeds");

        assert_eq!(before, after);

        // The trajectory keeps cooling under the new dynamics.
        let later = heater
            .temperature(t2 + Duration::from_secs(3))
            .expect("read succeeds");
        assert!(later < after);
    }

    #[test]
    fn repeated_reads_do_not_advance_state() {
        let t0 = Instant::now();
        let t5 = t0 + Duration::from_secs(5);
        let mut heater = heater(t0);
        heater.set_current(amps(-1.0), t0).expect("current change succeeds");

        let first = heater.temperature(t5).expect("read succeeds");
        let second = heater.temperature(t5).expect("read succeeds");

        assert_eq!(first, second);
        assert_eq!(heater.last_temperature(), second);
    }

    #[test]
    fn command_interface_follows_the_reporting_convention() {
        let t0 = Instant::now();
        let mut heater = Heater::new(named("heater1"), t0).expect("configuration is valid");

        let applied = heater
            .execute(&cmd("heater1.simplephysics", "1"), t0)
            .expect("execute succeeds");
        assert_eq!(applied, CommandOutcome::Applied);

        let queried = heater
            .execute(&cmd("heater1.simplephysics", ""), t0)
            .expect("execute succeeds");
        assert_eq!(queried, CommandOutcome::Reported("1".to_owned()));

        heater
            .execute(&cmd("heater1.simplephysics", "0"), t0)
            .expect("execute succeeds");
        let queried = heater
            .execute(&cmd("heater1.simplephysics", ""), t0)
            .expect("execute succeeds");
        assert_eq!(queried, CommandOutcome::Reported("0".to_owned()));
        assert_eq!(heater.physics_mode(), PhysicsMode::Full);

        let not_mine = heater
            .execute(&cmd("heater2.simplephysics", "1"), t0)
            .expect("execute succeeds");
        assert_eq!(not_mine, CommandOutcome::NotForDevice);

        let bogus_value = heater
            .execute(&cmd("heater1.simplephysics", "bogus"), t0)
            .expect("execute succeeds");
        assert_eq!(bogus_value, CommandOutcome::Rejected);
        assert_eq!(heater.physics_mode(), PhysicsMode::Full);

        let bogus_parameter = heater
            .execute(&cmd("heater1.frobnicate", "1"), t0)
            .expect("execute succeeds");
        assert_eq!(bogus_parameter, CommandOutcome::Rejected);
    }

    #[test]
    fn sandbox_routes_to_the_named_heater() {
        let t0 = Instant::now();
        let mut sandbox = Sandbox::new();
        sandbox.register(Heater::new(named("heater1"), t0).expect("configuration is valid"));

        let applied = sandbox
            .dispatch("heater1.simplephysics", "0", t0)
            .expect("dispatch succeeds");
        assert_eq!(applied, CommandOutcome::Applied);

        let queried = sandbox
            .dispatch("heater1.simplephysics", "", t0)
            .expect("dispatch succeeds");
        assert_eq!(queried, CommandOutcome::Reported("0".to_owned()));

        let unclaimed = sandbox
            .dispatch("heater2.simplephysics", "", t0)
            .expect("dispatch succeeds");
        assert_eq!(unclaimed, CommandOutcome::NotForDevice);
    }

    #[test]
    fn rejects_invalid_configurations() {
        let t0 = Instant::now();

        let dead_rtd = HeaterConfig {
            rtd_nominal: ElectricalResistance::new::<ohm>(0.0),
            ..HeaterConfig::default()
        };
        assert!(matches!(
            Heater::new(dead_rtd, t0),
            Err(HeaterError::Rtd(_))
        ));

        let flat_block = HeaterConfig {
            block: BlockConfig {
                thickness: Length::new::<millimeter>(0.0),
                ..BlockConfig::default()
            },
            ..HeaterConfig::default()
        };
        assert!(matches!(
            Heater::new(flat_block, t0),
            Err(HeaterError::Block(_))
        ));

        let dead_module = HeaterConfig {
            tec: TecDatasheet {
                max_current: amps(0.0),
                ..TecDatasheet::default()
            },
            ..HeaterConfig::default()
        };
        assert!(matches!(
            Heater::new(dead_module, t0),
            Err(HeaterError::Tec(_))
        ));
    }
}
