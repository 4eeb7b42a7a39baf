//! Supporting utilities used by models.
//!
//! These modules are public because they are useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod material_balance;
pub mod production;
pub mod pvt;
pub mod regression;
pub mod units;
