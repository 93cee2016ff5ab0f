//! Simulated devices behind a string command channel.
//!
//! A hardware-in-the-loop sandbox drives simulated instruments the same way
//! it drives real ones: by name, through textual commands. Each device
//! answers to dotted commands of the form `<device>.<parameter>` paired
//! with a value string, where an empty value conventionally means "query".
//! A [`Sandbox`] owns a set of named devices and routes each command to the
//! first device that claims it.
//!
//! Routing misses, rejected values, and accepted commands are all reported
//! through [`CommandOutcome`]. Hard failures inside a device surface
//! separately as a [`DeviceError`].

pub mod heater;

use std::time::Instant;

use log::trace;
use thiserror::Error;

/// A dotted command addressed to a named device, with its value string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    device: &'a str,
    parameter: &'a str,
    value: &'a str,
}

impl<'a> Command<'a> {
    /// Splits a raw command at its first dot.
    ///
    /// Returns `None` when the command has no dotted form, in which case it
    /// cannot address any device.
    #[must_use]
    pub fn parse(command: &'a str, value: &'a str) -> Option<Self> {
        let (device, parameter) = command.split_once('.')?;
        Some(Self {
            device,
            parameter,
            value,
        })
    }

    /// The addressed device name.
    #[must_use]
    pub fn device(&self) -> &'a str {
        self.device
    }

    /// The addressed parameter on the device.
    #[must_use]
    pub fn parameter(&self) -> &'a str {
        self.parameter
    }

    /// The value string accompanying the command.
    #[must_use]
    pub fn value(&self) -> &'a str {
        self.value
    }
}

/// The routed result of offering a command to a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The address names a different device; a dispatcher should try the
    /// next one.
    NotForDevice,

    /// Addressed to this device, but the parameter or value is not
    /// acceptable.
    Rejected,

    /// The command was applied; there is nothing to report.
    Applied,

    /// The command was a query; carries the reply value.
    Reported(String),
}

/// An internal failure raised while a device carried out a command it had
/// already claimed.
#[derive(Debug, Error)]
#[error("device {device:?} failed executing {parameter:?}")]
pub struct DeviceError {
    /// Name of the failing device.
    pub device: String,

    /// The parameter being executed.
    pub parameter: String,

    /// The underlying failure.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl DeviceError {
    /// Wraps a failure raised while `device` executed `parameter`.
    #[must_use]
    pub fn new(
        device: impl Into<String>,
        parameter: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            device: device.into(),
            parameter: parameter.into(),
            source: source.into(),
        }
    }
}

/// The contract between the sandbox and a simulated device.
///
/// Devices never read the wall clock themselves; the instant of each call
/// is passed in, which keeps simulated time fully under the caller's
/// control.
pub trait Device {
    /// The name this device answers to in dotted commands.
    fn name(&self) -> &str;

    /// Executes a command against this device at the given instant.
    ///
    /// Implementations must return [`CommandOutcome::NotForDevice`] when
    /// the command addresses a different name, leaving the dispatcher free
    /// to offer it elsewhere.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the device recognizes the command but
    /// fails internally while carrying it out.
    fn execute(
        &mut self,
        command: &Command<'_>,
        now: Instant,
    ) -> Result<CommandOutcome, DeviceError>;
}

/// A set of named simulated devices sharing one command channel.
#[derive(Default)]
pub struct Sandbox {
    devices: Vec<Box<dyn Device>>,
}

impl Sandbox {
    /// Creates an empty sandbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a device to the end of the dispatch order.
    pub fn register(&mut self, device: impl Device + 'static) {
        self.devices.push(Box::new(device));
    }

    /// Offers a raw command to each device in registration order.
    ///
    /// The first outcome other than [`CommandOutcome::NotForDevice`] wins.
    /// Commands without a dotted form, or addressed to a name no device
    /// answers to, come back as [`CommandOutcome::NotForDevice`].
    ///
    /// # Errors
    ///
    /// Propagates the first [`DeviceError`] raised by a claiming device.
    pub fn dispatch(
        &mut self,
        command: &str,
        value: &str,
        now: Instant,
    ) -> Result<CommandOutcome, DeviceError> {
        let Some(parsed) = Command::parse(command, value) else {
            trace!("command {command:?} has no dotted address");
            return Ok(CommandOutcome::NotForDevice);
        };

        for device in &mut self.devices {
            let outcome = device.execute(&parsed, now)?;
            if outcome != CommandOutcome::NotForDevice {
                trace!("device {:?} claimed command {command:?}", device.name());
                return Ok(outcome);
            }
        }

        trace!("no device claimed command {command:?}");
        Ok(CommandOutcome::NotForDevice)
    }
}
