//! Marketplace workflows, grouped by domain.

pub mod profiles;
pub mod roster;
