//! Heater block models.
//!
//! A small metal block conditioned by a thermoelectric module, treated as a
//! single lumped thermal mass. The computational core is in the internal
//! `core` module.

pub(crate) mod core;

pub use core::{BlockConfig, BlockStep, PhysicsMode, StepConfig, StepError, ThermalBlock};
