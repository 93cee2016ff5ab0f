//! Thermal systems models.
//!
//! This module contains the models behind the simulated heater: the
//! conditioned block, the thermoelectric module driving it, and the RTD
//! sensor reading it back.

pub mod block;
pub mod rtd;
pub mod tec;
