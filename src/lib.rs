//! # Thermal Twin
//!
//! Digital-twin models of a TEC-driven heater block for hardware-in-the-loop
//! sandboxes.
//!
//! The simulated hardware is a small aluminum block seated on a
//! thermoelectric module, instrumented with a platinum RTD. This crate
//! stands in for that hardware behind a string command channel: the block
//! temperature advances lazily in wall-clock time under a selectable
//! physics fidelity, the RTD reads it back as a resistance, and every
//! quantity on the public API carries its units.
//!
//! ## Crate layout
//!
//! - [`models`]: Physical models of the hardware (RTD sensor,
//!   thermoelectric module, heater block).
//! - [`devices`]: Stateful simulated devices and the command-dispatch
//!   sandbox.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code in this crate follows a natural progression as needs emerge:
//!
//! 1. **Model-specific**: Starts in a model's internal `core` module
//! 2. **Domain-specific**: If useful across models in a domain (e.g., `thermal`),
//!    it moves to a domain-level support module
//! 3. **Crate-level**: If useful across multiple domains or potentially useful
//!    outside this crate, it moves to [`support`]
//! 4. **Standalone**: If broadly useful and stable, it may become its own crate
//!    (and be removed from here in a future release)
//!
//! Note: Only utilities at the crate-level (in [`support`]) are part of the public API.
//! Model-specific and domain-specific utility code remains private.

pub mod devices;
pub mod models;
pub mod support;
