//! Thermoelectric (Peltier) module model.
//!
//! [`TecElement`] derives the physical parameters of a single-stage module
//! from its published datasheet maximums and evaluates the heat flow at the
//! module's cold side. The computational core is in the internal `core`
//! module.

pub(crate) mod core;

pub use core::{LinearCoefficients, TecDatasheet, TecDatasheetError, TecElement};
