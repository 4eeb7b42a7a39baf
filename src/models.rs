//! Reservoir and well models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! - [`reservoir`]: Material-balance models for oil and gas reservoirs,
//!   including gas-cap sizing.
//! - [`well`]: Steady-state inflow models.
//!
//! # Model structure
//!
//! A model keeps its computation in an internal `core` submodule where that
//! logic is large enough to warrant one. The [`twine_core::Model`]
//! implementation is a thin adapter that delegates to the core API.

pub mod reservoir;
pub mod well;
