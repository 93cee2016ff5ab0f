//! Platinum resistance thermometer (RTD) model.
//!
//! [`RtdSensor`] maps temperature to sensor resistance through the
//! Callendar–Van Dusen polynomial and inverts the polynomial numerically for
//! resistance-to-temperature lookup. The computational core is in the
//! internal `core` module.

pub(crate) mod core;

pub use core::{InversionConfig, InversionError, RtdSensor};
