//! Cross-crate integration scenarios.

pub mod e2e_lifecycle;
pub mod factory_properties;
