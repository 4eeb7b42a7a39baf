//! Well inflow models.
//!
//! - [`darcy`]: Steady-state radial inflow of oil into a vertical well.

pub mod darcy;
