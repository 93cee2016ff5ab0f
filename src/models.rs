//! Physical models of the simulated hardware.
//!
//! Models are the computational half of this crate: pure, typed
//! descriptions of how the hardware behaves, with no clocks and no command
//! strings. The device layer in [`crate::devices`] composes them into
//! stateful simulated instruments.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules based on an
//! opinionated taxonomy. This organization may evolve as more models are
//! added.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core`
//! submodule where the actual computation and domain logic lives. Public
//! types are re-exported at the model's root; `core` itself is an
//! implementation detail. Solver integrations (the RTD inverse, the
//! block's full-physics step) implement the [`twine_core`] and
//! [`ode_solvers`] traits at those internal seams.

pub mod thermal;
