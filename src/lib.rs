//! # Material Balance
//!
//! Reservoir material-balance models built on
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! The centerpiece is gas-cap sizing: sweeping candidate gas-cap ratios `m`,
//! fitting underground withdrawal against total expansion for each, and
//! selecting the `m` that best linearizes the material-balance relation.
//! See [`models::reservoir::gas_cap`].
//!
//! ## Crate layout
//!
//! - [`models`]: Reservoir and well models, with [`twine_core::Model`] adapters.
//! - [`support`]: Units, PVT data, production history, expansion terms and
//!   regression used by the models.
//!
//! ## Units
//!
//! All calculations run in the canonical metric petroleum units listed in
//! [`support::units`]. Field-unit input is converted once, when PVT tables,
//! production histories and model inputs are constructed.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. Per-candidate
//! and per-point failures that are recorded rather than propagated are logged
//! at `warn`; selected results at `info`.

pub mod models;
pub mod support;
